//! Digest of a collected declaration surface.
//!
//! The digest is a SHA256 over the canonical JSON of every identifier
//! description paired with its sorted declaration renderings. It fingerprints
//! a surface in log events. Renderings are not injective, so equal digests do
//! not imply equal maps and comparisons decide on the maps themselves.

use sha2::{Digest, Sha256};

use super::DeclarationMap;
use crate::errors::Result;

/// Hex-encoded SHA256 digest (64 characters) of `declarations`.
///
/// # Errors
///
/// Returns `ApiDiffError::Serialization` if JSON serialization fails.
pub fn surface_digest(declarations: &DeclarationMap) -> Result<String> {
    let canonical: Vec<(String, Vec<String>)> = declarations
        .iter()
        .map(|(identifier, nodes)| {
            let mut renderings: Vec<String> = nodes.iter().map(ToString::to_string).collect();
            renderings.sort();
            (identifier.to_string(), renderings)
        })
        .collect();
    let canonical = serde_json::to_string(&canonical)?;
    Ok(hash_string(&canonical))
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::DeclarationIdentifier;
    use crate::model::DeclNode;
    use std::collections::BTreeSet;

    #[test]
    fn test_empty_surface_digest() {
        let digest = surface_digest(&DeclarationMap::new()).unwrap();
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, hash_string("[]"));
    }

    #[test]
    fn test_digest_depends_on_identifiers() {
        let mut a = DeclarationMap::new();
        a.insert(
            DeclarationIdentifier::type_path(["Foo"]),
            BTreeSet::from([DeclNode::Unknown]),
        );
        let mut b = DeclarationMap::new();
        b.insert(
            DeclarationIdentifier::type_path(["Bar"]),
            BTreeSet::from([DeclNode::Unknown]),
        );

        assert_eq!(surface_digest(&a).unwrap(), surface_digest(&a.clone()).unwrap());
        assert_ne!(surface_digest(&a).unwrap(), surface_digest(&b).unwrap());
    }
}
