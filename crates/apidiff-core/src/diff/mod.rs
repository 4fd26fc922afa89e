//! Comparing two collected surfaces.
//!
//! The set diff finds identifiers whose declaration sets changed, the
//! comparator splits each change into field modifications, and the assembler
//! turns the result into the ordered [`Difference`] list.

mod assembler;
mod comparator;
mod engine;
mod model;

pub use assembler::convert_modification;
pub use comparator::NodeComparator;
pub use engine::{compare_declaration_sets, compare_modules};
pub use model::{Difference, DifferenceKind, FieldModification, FieldModificationKind, Modification};
