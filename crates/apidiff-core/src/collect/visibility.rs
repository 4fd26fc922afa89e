//! Which declarations belong to the externally visible surface.

use std::collections::BTreeSet;

use crate::model::{DeclNode, FunctionParameterNode, ModifierNode, TypeNode};

/// Names with this prefix are private by convention.
pub const PRIVATE_NAME_PREFIX: &str = "_";

/// A declaration needs one of these to be part of the surface.
pub const EXTERNALLY_VISIBLE_MODIFIERS: [&str; 2] = ["open", "public"];

pub fn is_externally_visible(name: &str, modifiers: &BTreeSet<ModifierNode>) -> bool {
    !name.starts_with(PRIVATE_NAME_PREFIX)
        && modifiers
            .iter()
            .any(|modifier| EXTERNALLY_VISIBLE_MODIFIERS.contains(&modifier.name.as_str()))
}

/// An extension target is visible when no component of its member chain is
/// private. Target shapes other than simple and member types are not.
pub fn is_visible_extension_target(target: &TypeNode) -> bool {
    match target {
        TypeNode::Simple(node) => !node.name.starts_with(PRIVATE_NAME_PREFIX),
        TypeNode::Member(node) => {
            !node.name.starts_with(PRIVATE_NAME_PREFIX) && is_visible_extension_target(&node.parent)
        }
        _ => false,
    }
}

// An unlabeled first parameter contributes no name.
fn first_label(parameters: &[FunctionParameterNode]) -> &str {
    parameters
        .first()
        .and_then(|parameter| parameter.label.as_deref())
        .unwrap_or("")
}

/// Whether `node` and its subtree take part in the comparison.
pub fn should_collect(node: &DeclNode) -> bool {
    let (name, modifiers) = match node {
        DeclNode::Associatedtype(decl) => (decl.name.as_str(), &decl.modifiers),
        DeclNode::Class(decl) => (decl.name.as_str(), &decl.modifiers),
        DeclNode::Enum(decl) => (decl.name.as_str(), &decl.modifiers),
        DeclNode::EnumCase(decl) => (decl.name.as_str(), &decl.modifiers),
        DeclNode::Function(decl) => (decl.name.as_str(), &decl.modifiers),
        DeclNode::Protocol(decl) => (decl.name.as_str(), &decl.modifiers),
        DeclNode::Struct(decl) => (decl.name.as_str(), &decl.modifiers),
        DeclNode::Typealias(decl) => (decl.name.as_str(), &decl.modifiers),
        DeclNode::Initializer(decl) => (first_label(&decl.parameters), &decl.modifiers),
        DeclNode::Subscript(decl) => (first_label(&decl.indices), &decl.modifiers),
        DeclNode::Variable(decl) => match decl.pattern.identifier() {
            Some(name) => (name, &decl.modifiers),
            None => return false,
        },
        DeclNode::Deinitializer(_) => return true,
        DeclNode::Extension(decl) => return is_visible_extension_target(&decl.extended_type),
        DeclNode::IfConfig(_)
        | DeclNode::Import(_)
        | DeclNode::Operator(_)
        | DeclNode::PoundError(_)
        | DeclNode::PoundWarning(_)
        | DeclNode::PrecedenceGroup(_)
        | DeclNode::Unknown => return false,
    };
    is_externally_visible(name, modifiers)
}
