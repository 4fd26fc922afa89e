use std::collections::BTreeSet;

use apidiff_core_types::RunId;
use tracing::debug;

use super::assembler::convert_modification;
use super::model::{Difference, Modification};
use crate::collect::{collect_declarations, surface_digest, DeclarationMap};
use crate::errors::{ExError, Result};
use crate::model::DeclNode;
use crate::syntax::SyntaxNode;
use crate::{log_op_end, log_op_error, log_op_start};

/// One [`Modification`] per identifier whose declaration set changed.
///
/// Identifiers only in `new` carry their whole set as added, identifiers only
/// in `old` their whole set as removed. For identifiers in both, declarations
/// present on both sides are left out. Output follows identifier order.
pub fn compare_declaration_sets(old: &DeclarationMap, new: &DeclarationMap) -> Vec<Modification> {
    let identifiers: BTreeSet<_> = old.keys().chain(new.keys()).collect();
    let empty = BTreeSet::new();

    identifiers
        .into_iter()
        .filter_map(|identifier| {
            let removed_from = old.get(identifier).unwrap_or(&empty);
            let added_to = new.get(identifier).unwrap_or(&empty);
            if removed_from == added_to {
                return None;
            }
            Some(Modification {
                identifier: identifier.clone(),
                added: added_to.difference(removed_from).cloned().collect(),
                removed: removed_from.difference(added_to).cloned().collect(),
            })
        })
        .collect()
}

fn collect_tree(module: &str, tree: Option<&SyntaxNode>) -> Result<DeclarationMap> {
    match tree {
        Some(tree) => collect_declarations(DeclNode::parse_source_file(tree)?, module),
        None => Ok(DeclarationMap::new()),
    }
}

struct Comparison {
    differences: Vec<Difference>,
    old_len: usize,
    new_len: usize,
    old_digest: String,
    new_digest: String,
}

fn compare_maps(
    module: &str,
    old_map: &DeclarationMap,
    new_map: &DeclarationMap,
) -> Result<Comparison> {
    let old_digest = surface_digest(old_map)?;
    let new_digest = surface_digest(new_map)?;

    // Decided on structure: distinct declarations may share a rendering
    let differences = if old_map == new_map {
        debug!(module = module, digest = %old_digest, "surfaces are identical");
        Vec::new()
    } else {
        let mut differences = compare_declaration_sets(old_map, new_map)
            .iter()
            .map(convert_modification)
            .collect::<Result<Vec<_>>>()?;
        differences.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        differences
    };

    Ok(Comparison {
        differences,
        old_len: old_map.len(),
        new_len: new_map.len(),
        old_digest,
        new_digest,
    })
}

fn compare_modules_impl(
    module: &str,
    old: Option<&SyntaxNode>,
    new: Option<&SyntaxNode>,
) -> Result<Comparison> {
    let old_map = collect_tree(module, old)?;
    let new_map = collect_tree(module, new)?;
    compare_maps(module, &old_map, &new_map)
}

/// Compare two versions of `module`'s declaration surface.
///
/// Each tree is a `SourceFile` syntax tree; a missing tree is an empty
/// surface. The result is sorted by identifier.
///
/// # Errors
///
/// Malformed syntax and any invariant violation abort the whole run; no
/// partial result is returned.
pub fn compare_modules(
    module: &str,
    old: Option<&SyntaxNode>,
    new: Option<&SyntaxNode>,
) -> Result<Vec<Difference>> {
    let run_id = RunId::new();
    log_op_start!("compare_modules", module = module, run_id = %run_id);
    let start = std::time::Instant::now();

    let comparison = compare_modules_impl(module, old, new).map_err(|e| {
        log_op_error!(
            "compare_modules",
            ExError::from(e.clone())
                .with_op("compare_modules")
                .with_run_id(run_id.clone()),
            duration_ms = start.elapsed().as_millis() as u64,
            module = module
        );
        e
    })?;

    log_op_end!(
        "compare_modules",
        duration_ms = start.elapsed().as_millis() as u64,
        module = module,
        run_id = %run_id,
        old_len = comparison.old_len,
        new_len = comparison.new_len,
        diff_len = comparison.differences.len(),
        old_digest = %comparison.old_digest,
        new_digest = %comparison.new_digest
    );

    Ok(comparison.differences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::DeclarationIdentifier;
    use crate::model::{FunctionDeclNode, ModifierNode, TypeNode};

    fn function(return_type: &str) -> DeclNode {
        DeclNode::Function(FunctionDeclNode {
            attributes: BTreeSet::new(),
            modifiers: BTreeSet::from([ModifierNode::new("public")]),
            name: "run".to_string(),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            asyncness: None,
            throws: None,
            return_type: Some(TypeNode::simple(return_type)),
            generic_requirements: BTreeSet::new(),
        })
    }

    fn run() -> DeclarationIdentifier {
        DeclarationIdentifier::Function {
            path: Vec::new(),
            name: "run".to_string(),
            labels: Vec::new(),
            is_static: false,
        }
    }

    fn map(nodes: Vec<DeclNode>) -> DeclarationMap {
        DeclarationMap::from([(run(), nodes.into_iter().collect())])
    }

    #[test]
    fn test_unchanged_overloads_are_excluded() {
        let old = map(vec![function("Int"), function("String")]);
        let new = map(vec![function("Int"), function("Data")]);

        let modifications = compare_declaration_sets(&old, &new);
        assert_eq!(
            modifications,
            vec![Modification {
                identifier: run(),
                added: BTreeSet::from([function("Data")]),
                removed: BTreeSet::from([function("String")]),
            }]
        );
    }

    #[test]
    fn test_one_sided_identifiers_carry_full_sets() {
        let old = map(vec![function("Int"), function("String")]);
        let modifications = compare_declaration_sets(&old, &DeclarationMap::new());
        assert_eq!(modifications.len(), 1);
        assert_eq!(modifications[0].removed.len(), 2);
        assert!(modifications[0].added.is_empty());
    }

    #[test]
    fn test_equal_maps_have_no_modifications() {
        let old = map(vec![function("Int")]);
        assert!(compare_declaration_sets(&old, &old.clone()).is_empty());
    }

    #[test]
    fn test_shared_rendering_does_not_hide_structural_change() {
        use crate::model::FunctionParameterNode;

        let with_label = |label: Option<&str>| {
            let DeclNode::Function(mut node) = function("Int") else {
                unreachable!()
            };
            node.parameters = vec![FunctionParameterNode {
                attributes: BTreeSet::new(),
                label: label.map(str::to_string),
                type_annotation: Some(TypeNode::simple("Int")),
                is_variadic: false,
                default_value: None,
            }];
            DeclNode::Function(node)
        };
        let old = map(vec![with_label(None)]);
        let new = map(vec![with_label(Some("_"))]);

        let comparison = compare_maps("Kit", &old, &new).unwrap();
        assert_eq!(comparison.old_digest, comparison.new_digest);
        assert_eq!(
            comparison.differences.len(),
            compare_declaration_sets(&old, &new).len()
        );
        assert_eq!(comparison.differences.len(), 1);
    }

    #[test]
    fn test_absent_trees_are_empty_surfaces() {
        assert!(compare_modules("Kit", None, None).unwrap().is_empty());
    }
}
