//! apidiff core - structural diff of a public declaration surface
//!
//! This crate compares two versions of a module's public interface and reports
//! what was added, removed or modified, including:
//! - A closed declaration model with deterministic canonical renderings
//! - Stable cross-version declaration identifiers
//! - Visibility filtering, member flattening and extension merging
//! - Set-based diffing with field-level decomposition of modifications
//!
//! Parsing interface source is left to an external syntax provider; the core
//! consumes the concrete syntax tree defined in [`syntax`].

pub mod collect;
pub mod diff;
pub mod errors;
pub mod identity;
pub mod logging_facility;
pub mod model;
pub mod syntax;

// Used by the logging macros
pub use apidiff_core_types;

// Re-export commonly used types
pub use collect::{
    collect_declarations, surface_digest, DeclarationMap, EXTERNALLY_VISIBLE_MODIFIERS,
    PRIVATE_NAME_PREFIX,
};
pub use diff::{
    compare_declaration_sets, compare_modules, convert_modification, Difference, DifferenceKind,
    FieldModification, FieldModificationKind, Modification, NodeComparator,
};
pub use errors::{ApiDiffError, ExError, ExErrorKind, Result};
pub use identity::DeclarationIdentifier;
pub use model::{DeclNode, Discriminator};
pub use syntax::SyntaxNode;
