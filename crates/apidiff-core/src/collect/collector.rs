use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use super::merge::{merge_extensions, ParkedExtensions};
use super::visibility::should_collect;
use crate::errors::Result;
use crate::identity::{child_identifier, DeclarationIdentifier};
use crate::model::DeclNode;

/// Flattened surface: every visible declaration under its identifier.
///
/// A slot holds a set because overloads that agree on labels share an
/// identifier. Containers are stored without their members.
pub type DeclarationMap = BTreeMap<DeclarationIdentifier, BTreeSet<DeclNode>>;

struct Collector<'a> {
    module: &'a str,
    declarations: DeclarationMap,
    extensions: ParkedExtensions,
}

impl Collector<'_> {
    fn collect(&mut self, scope: &DeclarationIdentifier, mut node: DeclNode) -> Result<()> {
        let Some(identifier) = child_identifier(scope, &node, self.module)? else {
            log_without_identity(scope, &node);
            return Ok(());
        };

        if !should_collect(&node) {
            debug!(identifier = %identifier, "skipping declaration outside the public surface");
            return Ok(());
        }

        let members = node.take_members();
        for member in members {
            self.collect(&identifier, member)?;
        }

        if !matches!(node, DeclNode::Extension(_)) {
            self.declarations.entry(identifier).or_default().insert(node);
        } else if node.conformances().is_some_and(|list| !list.is_empty()) {
            self.extensions.entry(identifier).or_default().insert(node);
        }
        Ok(())
    }
}

fn log_without_identity(scope: &DeclarationIdentifier, node: &DeclNode) {
    match node {
        DeclNode::Extension(extension) => warn!(
            scope = %scope,
            target = %extension.extended_type,
            "skipping extension of a target with no identity"
        ),
        DeclNode::Variable(variable) => warn!(
            scope = %scope,
            pattern = %variable.pattern,
            "skipping variable bound by a non-identifier pattern"
        ),
        _ => debug!(
            scope = %scope,
            kind = node.discriminator().name(),
            "skipping declaration without identity"
        ),
    }
}

/// Flatten `nodes`, the top-level declarations of `module`, into a map of the
/// externally visible surface.
///
/// Nested members are collected under their own identifiers. Extension
/// members land under the extension target, and extensions that add
/// conformances are merged into the target's declaration.
///
/// # Errors
///
/// Invariant violations from scope resolution or extension merging.
pub fn collect_declarations(nodes: Vec<DeclNode>, module: &str) -> Result<DeclarationMap> {
    let mut collector = Collector {
        module,
        declarations: DeclarationMap::new(),
        extensions: ParkedExtensions::new(),
    };
    let root = DeclarationIdentifier::root();
    for node in nodes {
        collector.collect(&root, node)?;
    }
    merge_extensions(collector.declarations, collector.extensions)
}
