//! Collection of the externally visible declaration surface.
//!
//! A declaration tree is walked depth-first with the enclosing identifier
//! passed down explicitly. Visible declarations are flattened into a
//! [`DeclarationMap`]; extensions that add conformances are parked and merged
//! into their target once the walk is done.

mod collector;
pub mod digest;
pub mod merge;
pub mod visibility;

pub use collector::{collect_declarations, DeclarationMap};
pub use digest::surface_digest;
pub use visibility::{EXTERNALLY_VISIBLE_MODIFIERS, PRIVATE_NAME_PREFIX};
