//! Canonical rendering helpers shared by the declaration model.
//!
//! Unordered collections are rendered through [`sorted`] so that source order
//! never leaks into a rendering.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Write};

use super::attribute::AttributeNode;
use super::generic::GenericRequirementNode;
use super::support::ModifierNode;
use super::types::TypeNode;

/// Render each item and join in the given order.
pub(crate) fn joined<'a, T, I>(items: I, separator: &str) -> String
where
    T: Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut out = String::new();
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            out.push_str(separator);
        }
        // Writing into a String cannot fail
        let _ = write!(out, "{}", item);
    }
    out
}

/// Render each item, sort the renderings, then join.
pub(crate) fn sorted<'a, T, I>(items: I, separator: &str) -> String
where
    T: Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut rendered: Vec<String> = items.into_iter().map(ToString::to_string).collect();
    rendered.sort();
    rendered.join(separator)
}

/// Attributes, one per line, followed by a newline.
pub(crate) fn write_attributes(
    f: &mut fmt::Formatter<'_>,
    attributes: &BTreeSet<AttributeNode>,
) -> fmt::Result {
    if attributes.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}", sorted(attributes, "\n"))
}

/// Modifiers separated by spaces, followed by a space.
pub(crate) fn write_modifiers(
    f: &mut fmt::Formatter<'_>,
    modifiers: &BTreeSet<ModifierNode>,
) -> fmt::Result {
    if modifiers.is_empty() {
        return Ok(());
    }
    write!(f, "{} ", sorted(modifiers, " "))
}

pub(crate) fn write_header(
    f: &mut fmt::Formatter<'_>,
    attributes: &BTreeSet<AttributeNode>,
    modifiers: &BTreeSet<ModifierNode>,
) -> fmt::Result {
    write_attributes(f, attributes)?;
    write_modifiers(f, modifiers)
}

/// `<A, B>` in declaration order.
pub(crate) fn write_generic_parameters(
    f: &mut fmt::Formatter<'_>,
    parameters: &[String],
) -> fmt::Result {
    if parameters.is_empty() {
        return Ok(());
    }
    write!(f, "<{}>", parameters.join(", "))
}

/// `: A, B` in declaration order.
pub(crate) fn write_conformances(
    f: &mut fmt::Formatter<'_>,
    conformances: &[TypeNode],
) -> fmt::Result {
    if conformances.is_empty() {
        return Ok(());
    }
    write!(f, ": {}", joined(conformances, ", "))
}

/// ` where A: B, C == D` with sorted requirements.
pub(crate) fn write_requirements(
    f: &mut fmt::Formatter<'_>,
    requirements: &BTreeSet<GenericRequirementNode>,
) -> fmt::Result {
    if requirements.is_empty() {
        return Ok(());
    }
    write!(f, " where {}", sorted(requirements, ", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_ignores_input_order() {
        let a = ["b", "a", "c"];
        let b = ["c", "b", "a"];
        assert_eq!(sorted(&a, ", "), "a, b, c");
        assert_eq!(sorted(&a, ", "), sorted(&b, ", "));
    }

    #[test]
    fn test_joined_keeps_input_order() {
        assert_eq!(joined(&["T", "U"], ", "), "T, U");
        assert_eq!(joined::<&str, _>(&[], ", "), "");
    }
}
