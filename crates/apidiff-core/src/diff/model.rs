use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::identity::DeclarationIdentifier;
use crate::model::DeclNode;

/// Declarations that appeared and disappeared at one identifier.
///
/// Built by the set diff, which never produces one with both sides empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modification {
    pub identifier: DeclarationIdentifier,
    pub added: BTreeSet<DeclNode>,
    pub removed: BTreeSet<DeclNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    Addition,
    Removal,
    Modification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldModificationKind {
    /// One attribute name gained, lost or changed its arguments
    Attribute,
    /// Conformances only in one version
    Conformance,
    /// Full renderings of everything else that changed
    Replacement,
}

/// One unit of change inside a modified declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldModification {
    pub kind: FieldModificationKind,
    pub previous: String,
    pub current: String,
}

impl FieldModification {
    pub fn new(
        kind: FieldModificationKind,
        previous: impl Into<String>,
        current: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            previous: previous.into(),
            current: current.into(),
        }
    }
}

/// A single reported change, as handed to a report renderer.
///
/// `name` is the identifier's rendering and `path` the owning type joined
/// with `.`, empty at module scope. `modifications` is only populated for
/// [`DifferenceKind::Modification`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    pub kind: DifferenceKind,
    pub identifier: DeclarationIdentifier,
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifications: Vec<FieldModification>,
}

impl Difference {
    pub fn new(
        kind: DifferenceKind,
        identifier: DeclarationIdentifier,
        modifications: Vec<FieldModification>,
    ) -> Self {
        Self {
            kind,
            name: identifier.to_string(),
            path: identifier.parent().type_name(),
            identifier,
            modifications,
        }
    }
}
