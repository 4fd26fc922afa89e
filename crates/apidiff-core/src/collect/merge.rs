//! Folding parked extension conformances into their target declaration.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::DeclarationMap;
use crate::errors::{ApiDiffError, Result};
use crate::identity::DeclarationIdentifier;
use crate::model::DeclNode;

/// Extensions that add conformances, keyed by their target's identity.
pub type ParkedExtensions = BTreeMap<DeclarationIdentifier, BTreeSet<DeclNode>>;

/// Merge every parked extension into `declarations`.
///
/// With a primary declaration at the parked identity, the extension
/// conformances are appended to the primary's list in first-seen order and
/// the extensions themselves are dropped. Without one, the extensions become
/// the entries for that identity.
///
/// # Errors
///
/// `MultiplePrimaryDeclarations` when an identity holds more than one
/// declaration, `ConformanceMergeTarget` when the primary cannot carry
/// conformances.
pub fn merge_extensions(
    mut declarations: DeclarationMap,
    parked: ParkedExtensions,
) -> Result<DeclarationMap> {
    for (identifier, extensions) in parked {
        let primaries = declarations.remove(&identifier).unwrap_or_default();
        if primaries.len() > 1 {
            return Err(ApiDiffError::MultiplePrimaryDeclarations {
                identifier: identifier.to_string(),
                count: primaries.len(),
            });
        }

        let merged = match primaries.into_iter().next() {
            Some(primary) => BTreeSet::from([merge_into(&identifier, primary, &extensions)?]),
            None => {
                debug!(
                    identifier = %identifier,
                    extensions = extensions.len(),
                    "no primary declaration, keeping extensions"
                );
                extensions
            }
        };
        declarations.insert(identifier, merged);
    }
    Ok(declarations)
}

fn merge_into(
    identifier: &DeclarationIdentifier,
    mut primary: DeclNode,
    extensions: &BTreeSet<DeclNode>,
) -> Result<DeclNode> {
    let kind = primary.discriminator();
    let can_merge = matches!(
        primary,
        DeclNode::Associatedtype(_)
            | DeclNode::Class(_)
            | DeclNode::Enum(_)
            | DeclNode::Protocol(_)
            | DeclNode::Struct(_)
    );
    let conformances = match primary.conformances_mut() {
        Some(conformances) if can_merge => conformances,
        _ => {
            return Err(ApiDiffError::ConformanceMergeTarget {
                identifier: identifier.to_string(),
                kind: kind.name().to_string(),
            })
        }
    };

    for conformance in extensions
        .iter()
        .filter_map(|extension| extension.conformances())
        .flatten()
    {
        if !conformances.contains(conformance) {
            conformances.push(conformance.clone());
        }
    }
    Ok(primary)
}
