//! Logical tree construction from a manifest and a flat lock table
//!
//! Every `name@range` pair resolves to exactly one node for the whole build.
//! The node is memoized before its own dependencies are resolved, which is
//! what lets cyclic lock tables terminate and makes shared dependencies share
//! identity.

use std::collections::HashMap;

use tracing::{debug, trace};

use lockgraph_core::types::{display_version, DependencyKind, LockTable, Manifest};
use lockgraph_core::{LockgraphError, LockgraphResult};

use crate::node::{Node, NodeAttrs};

/// Name used for the requirer of top-level dependencies when the manifest has none
const ROOT_REQUIRER: &str = "the root manifest";

/// Build the logical dependency tree of `manifest` using `lock_table`.
///
/// Fails with [`LockgraphError::UnresolvedDependency`] when any reachable
/// `name@range` has no lock entry. No partial tree is returned on failure.
pub fn build(manifest: &Manifest, lock_table: &LockTable) -> LockgraphResult<Node> {
    TreeBuilder::new(lock_table).build(manifest)
}

/// Flags a newly created node inherits from the edge that discovered it
#[derive(Debug, Clone, Copy, Default)]
struct EdgeFlags {
    dev: bool,
    optional: bool,
}

impl EdgeFlags {
    fn from_kind(kind: DependencyKind) -> Self {
        Self {
            dev: kind.is_dev(),
            optional: kind.is_optional(),
        }
    }
}

/// Single-use builder holding the per-build memo
struct TreeBuilder<'a> {
    lock_table: &'a LockTable,
    /// Nodes by lock key, filled before descending
    resolved: HashMap<String, Node>,
}

impl<'a> TreeBuilder<'a> {
    fn new(lock_table: &'a LockTable) -> Self {
        Self {
            lock_table,
            resolved: HashMap::new(),
        }
    }

    fn build(mut self, manifest: &Manifest) -> LockgraphResult<Node> {
        debug!(
            root = %manifest.name,
            lock_entries = self.lock_table.len(),
            "building logical tree"
        );

        let root = Node::with_attrs(
            manifest.name.clone(),
            "",
            NodeAttrs {
                version: manifest.version.clone(),
                ..NodeAttrs::default()
            },
        );

        for (name, declared) in manifest.merged_dependencies() {
            let flags = EdgeFlags::from_kind(declared.kind);
            if let Err(e) = self.attach(&root, &name, &declared.range, flags) {
                self.unlink(&root);
                return Err(e);
            }
        }

        debug!(
            root = %manifest.name,
            nodes = self.resolved.len(),
            "logical tree built"
        );
        Ok(root)
    }

    /// Resolve `name@range`, attach it under `parent` and descend on first sight
    fn attach(&mut self, parent: &Node, name: &str, range: &str, flags: EdgeFlags) -> LockgraphResult<()> {
        let key = LockTable::key(name, range);

        if let Some(existing) = self.resolved.get(&key) {
            trace!(key = %key, parent = %parent.name(), "reusing resolved node");
            parent.add_dep(existing);
            return Ok(());
        }

        let lock_table = self.lock_table;
        let entry = lock_table.get_key(&key).ok_or_else(|| {
            let requirer = if parent.name().is_empty() {
                ROOT_REQUIRER
            } else {
                parent.name()
            };
            LockgraphError::unresolved(name, range, requirer)
        })?;

        let address = if parent.address().is_empty() {
            name.to_string()
        } else {
            format!("{}:{}", parent.address(), name)
        };

        let node = Node::with_attrs(
            name,
            address,
            NodeAttrs {
                version: Some(display_version(range, &entry.version).to_string()),
                optional: flags.optional,
                dev: flags.dev,
                bundled: false,
                resolved: entry.resolved.clone(),
                integrity: entry.integrity.clone(),
            },
        );
        trace!(key = %key, address = %node.address(), "created node");

        self.resolved.insert(key, node.clone());
        parent.add_dep(&node);

        for (dep_name, declared) in entry.merged_dependencies() {
            let dep_flags = EdgeFlags {
                dev: false,
                optional: declared.kind.is_optional(),
            };
            self.attach(&node, &dep_name, &declared.range, dep_flags)?;
        }

        Ok(())
    }

    /// Break every edge created so far so cyclic partial graphs are freed
    fn unlink(&mut self, root: &Node) {
        root.clear_dependencies();
        for node in self.resolved.values() {
            node.clear_dependencies();
        }
        self.resolved.clear();
    }
}
