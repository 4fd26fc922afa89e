//! Stable cross-version identity of declarations.
//!
//! An identifier is derived from the enclosing scope's identifier and the
//! declaration's own name and kind. Extensions are the exception: they
//! reopen the scope of their target type at module level.

mod identifier;
pub mod scope;

pub use identifier::DeclarationIdentifier;
pub use scope::{child_identifier, extension_target_path, STATIC_MODIFIERS};
