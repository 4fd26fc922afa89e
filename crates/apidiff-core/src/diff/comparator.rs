//! Field-level decomposition of a modified declaration slot.

use std::collections::{BTreeMap, BTreeSet};

use super::model::{FieldModification, FieldModificationKind, Modification};
use crate::errors::{ApiDiffError, Result};
use crate::identity::DeclarationIdentifier;
use crate::model::{AttributeNode, DeclNode, TypeNode};

/// Splits a [`Modification`] into attribute, conformance and remainder edits.
pub struct NodeComparator;

fn sorted_text<T: ToString>(items: impl IntoIterator<Item = T>, separator: &str) -> String {
    let mut rendered: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    rendered.sort();
    rendered.join(separator)
}

fn group_by_name(attributes: Option<&BTreeSet<AttributeNode>>) -> BTreeMap<String, BTreeSet<&AttributeNode>> {
    let mut groups: BTreeMap<String, BTreeSet<&AttributeNode>> = BTreeMap::new();
    for attribute in attributes.into_iter().flatten() {
        groups.entry(attribute.name()).or_default().insert(attribute);
    }
    groups
}

fn attribute_modifications(old: &DeclNode, new: &DeclNode) -> Vec<FieldModification> {
    let old_groups = group_by_name(old.attributes());
    let new_groups = group_by_name(new.attributes());
    let text = |group: &BTreeSet<&AttributeNode>| sorted_text(group.iter(), "\n");

    let only_old = old_groups
        .iter()
        .filter(|(name, _)| !new_groups.contains_key(*name))
        .map(|(_, group)| FieldModification::new(FieldModificationKind::Attribute, text(group), ""));
    let only_new = new_groups
        .iter()
        .filter(|(name, _)| !old_groups.contains_key(*name))
        .map(|(_, group)| FieldModification::new(FieldModificationKind::Attribute, "", text(group)));
    let changed = old_groups.iter().filter_map(|(name, old_group)| {
        let new_group = new_groups.get(name)?;
        (old_group != new_group).then(|| {
            FieldModification::new(FieldModificationKind::Attribute, text(old_group), text(new_group))
        })
    });

    only_old.chain(only_new).chain(changed).collect()
}

fn conformance_modification(old: &DeclNode, new: &DeclNode) -> Option<FieldModification> {
    let old_set: BTreeSet<&TypeNode> = old.conformances().into_iter().flatten().collect();
    let new_set: BTreeSet<&TypeNode> = new.conformances().into_iter().flatten().collect();
    if old_set == new_set {
        return None;
    }
    Some(FieldModification::new(
        FieldModificationKind::Conformance,
        sorted_text(old_set.difference(&new_set), ", "),
        sorted_text(new_set.difference(&old_set), ", "),
    ))
}

fn strip_compared_fields(node: &mut DeclNode) {
    if let Some(attributes) = node.attributes_mut() {
        attributes.clear();
    }
    if let Some(conformances) = node.conformances_mut() {
        conformances.clear();
    }
}

impl NodeComparator {
    /// Field modifications for one modified slot.
    ///
    /// A single declaration replaced by a single declaration of the same kind
    /// is compared structurally. Anything else becomes one coarse replacement
    /// of all removed renderings by all added renderings.
    ///
    /// # Errors
    ///
    /// `EmptyModification` when both sides are empty.
    pub fn modifications(modification: &Modification) -> Result<Vec<FieldModification>> {
        let Modification {
            identifier,
            added,
            removed,
        } = modification;
        if added.is_empty() && removed.is_empty() {
            return Err(ApiDiffError::EmptyModification {
                identifier: identifier.to_string(),
            });
        }

        if let ([old], [new]) = (
            removed.iter().collect::<Vec<_>>().as_slice(),
            added.iter().collect::<Vec<_>>().as_slice(),
        ) {
            if old.discriminator() == new.discriminator() {
                return Self::compare(identifier, old, new);
            }
        }

        Ok(vec![FieldModification::new(
            FieldModificationKind::Replacement,
            sorted_text(removed, "\n"),
            sorted_text(added, "\n"),
        )])
    }

    /// Structural comparison of two declarations of the same kind.
    ///
    /// Attribute groups come first (names only in `old`, then only in `new`,
    /// then changed), then the conformance difference, then a replacement of
    /// whatever else differs once attributes and conformances are set aside.
    ///
    /// # Errors
    ///
    /// `KindMismatch` when the declarations are of different kinds.
    pub fn compare(
        identifier: &DeclarationIdentifier,
        old: &DeclNode,
        new: &DeclNode,
    ) -> Result<Vec<FieldModification>> {
        if old.discriminator() != new.discriminator() {
            return Err(ApiDiffError::KindMismatch {
                identifier: identifier.to_string(),
                old: old.discriminator().name().to_string(),
                new: new.discriminator().name().to_string(),
            });
        }

        let mut modifications = attribute_modifications(old, new);
        modifications.extend(conformance_modification(old, new));

        let mut old_rest = old.clone();
        let mut new_rest = new.clone();
        strip_compared_fields(&mut old_rest);
        strip_compared_fields(&mut new_rest);
        if old_rest != new_rest {
            modifications.push(FieldModification::new(
                FieldModificationKind::Replacement,
                old_rest.to_string(),
                new_rest.to_string(),
            ));
        }

        // Reordered conformances differ without any set-level change.
        if modifications.is_empty() && old != new {
            modifications.push(FieldModification::new(
                FieldModificationKind::Replacement,
                old.to_string(),
                new.to_string(),
            ));
        }
        Ok(modifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FunctionDeclNode, ModifierNode, StructDeclNode};

    fn identifier() -> DeclarationIdentifier {
        DeclarationIdentifier::type_path(["Foo"])
    }

    fn structure(attributes: &[AttributeNode], conformances: &[&str]) -> DeclNode {
        DeclNode::Struct(StructDeclNode {
            attributes: attributes.iter().cloned().collect(),
            modifiers: BTreeSet::from([ModifierNode::new("public")]),
            name: "Foo".to_string(),
            generic_parameters: Vec::new(),
            conformances: conformances.iter().map(|name| TypeNode::simple(*name)).collect(),
            generic_requirements: BTreeSet::new(),
            members: BTreeSet::new(),
        })
    }

    fn function(name: &str) -> DeclNode {
        DeclNode::Function(FunctionDeclNode {
            attributes: BTreeSet::new(),
            modifiers: BTreeSet::from([ModifierNode::new("public")]),
            name: name.to_string(),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            asyncness: None,
            throws: None,
            return_type: None,
            generic_requirements: BTreeSet::new(),
        })
    }

    fn modification(removed: Vec<DeclNode>, added: Vec<DeclNode>) -> Modification {
        Modification {
            identifier: identifier(),
            added: added.into_iter().collect(),
            removed: removed.into_iter().collect(),
        }
    }

    #[test]
    fn test_added_conformance() {
        let result = NodeComparator::modifications(&modification(
            vec![structure(&[], &[])],
            vec![structure(&[], &["Equatable"])],
        ))
        .unwrap();
        assert_eq!(
            result,
            vec![FieldModification::new(FieldModificationKind::Conformance, "", "Equatable")]
        );
    }

    #[test]
    fn test_conformance_sides_are_sorted() {
        let result = NodeComparator::compare(
            &identifier(),
            &structure(&[], &["Zeta", "Alpha", "Shared"]),
            &structure(&[], &["Shared", "Hashable", "Codable"]),
        )
        .unwrap();
        assert_eq!(
            result,
            vec![FieldModification::new(
                FieldModificationKind::Conformance,
                "Alpha, Zeta",
                "Codable, Hashable"
            )]
        );
    }

    #[test]
    fn test_attribute_groups_in_order() {
        let old = structure(
            &[
                AttributeNode::standard("frozen", None),
                AttributeNode::standard("available", Some("iOS 13")),
            ],
            &[],
        );
        let new = structure(
            &[
                AttributeNode::standard("available", Some("iOS 14")),
                AttributeNode::standard("usableFromInline", None),
            ],
            &[],
        );

        let result = NodeComparator::compare(&identifier(), &old, &new).unwrap();
        assert_eq!(
            result,
            vec![
                FieldModification::new(FieldModificationKind::Attribute, "@frozen", ""),
                FieldModification::new(FieldModificationKind::Attribute, "", "@usableFromInline"),
                FieldModification::new(
                    FieldModificationKind::Attribute,
                    "@available(iOS 13)",
                    "@available(iOS 14)"
                ),
            ]
        );
    }

    #[test]
    fn test_remainder_uses_stripped_renderings() {
        let mut old = structure(&[AttributeNode::standard("frozen", None)], &["A"]);
        let mut new = structure(&[AttributeNode::standard("frozen", None)], &["A"]);
        if let DeclNode::Struct(node) = &mut old {
            node.generic_parameters = vec!["T".to_string()];
        }
        if let DeclNode::Struct(node) = &mut new {
            node.generic_parameters = vec!["U".to_string()];
        }

        let result = NodeComparator::compare(&identifier(), &old, &new).unwrap();
        assert_eq!(
            result,
            vec![FieldModification::new(
                FieldModificationKind::Replacement,
                "public struct Foo<T>",
                "public struct Foo<U>"
            )]
        );
    }

    #[test]
    fn test_reordered_conformances_fall_back_to_full_replacement() {
        let result = NodeComparator::compare(
            &identifier(),
            &structure(&[], &["A", "B"]),
            &structure(&[], &["B", "A"]),
        )
        .unwrap();
        assert_eq!(
            result,
            vec![FieldModification::new(
                FieldModificationKind::Replacement,
                "public struct Foo: A, B",
                "public struct Foo: B, A"
            )]
        );
    }

    #[test]
    fn test_kind_change_is_one_coarse_replacement() {
        let result = NodeComparator::modifications(&modification(
            vec![structure(&[], &[])],
            vec![function("Foo")],
        ))
        .unwrap();
        assert_eq!(
            result,
            vec![FieldModification::new(
                FieldModificationKind::Replacement,
                "public struct Foo",
                "public func Foo()"
            )]
        );
    }

    #[test]
    fn test_overload_changes_are_one_coarse_replacement() {
        let result = NodeComparator::modifications(&modification(
            vec![function("b"), function("a")],
            vec![function("c")],
        ))
        .unwrap();
        assert_eq!(
            result,
            vec![FieldModification::new(
                FieldModificationKind::Replacement,
                "public func a()\npublic func b()",
                "public func c()"
            )]
        );
    }

    #[test]
    fn test_kind_mismatch_is_invariant_violation() {
        let err = NodeComparator::compare(&identifier(), &structure(&[], &[]), &function("f"))
            .unwrap_err();
        assert!(matches!(err, ApiDiffError::KindMismatch { .. }));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_empty_modification_is_rejected() {
        let err = NodeComparator::modifications(&modification(Vec::new(), Vec::new())).unwrap_err();
        assert!(matches!(err, ApiDiffError::EmptyModification { .. }));
    }
}
