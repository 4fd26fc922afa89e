use super::comparator::NodeComparator;
use super::model::{Difference, DifferenceKind, Modification};
use crate::errors::{ApiDiffError, Result};

/// Turn one [`Modification`] into the [`Difference`] reported for it.
///
/// # Errors
///
/// `EmptyModification` when both sides are empty, and any error from the
/// structural comparison.
pub fn convert_modification(modification: &Modification) -> Result<Difference> {
    let identifier = modification.identifier.clone();
    match (modification.removed.is_empty(), modification.added.is_empty()) {
        (true, true) => Err(ApiDiffError::EmptyModification {
            identifier: identifier.to_string(),
        }),
        (false, true) => Ok(Difference::new(DifferenceKind::Removal, identifier, Vec::new())),
        (true, false) => Ok(Difference::new(DifferenceKind::Addition, identifier, Vec::new())),
        (false, false) => {
            let modifications = NodeComparator::modifications(modification)?;
            Ok(Difference::new(
                DifferenceKind::Modification,
                identifier,
                modifications,
            ))
        }
    }
}
