//! Dependency node handle and edge bookkeeping.
//!
//! A [`Node`] is a cheap, clonable handle to a shared vertex. Cloning a handle
//! never copies the vertex, so two parents that need the same resolution hold
//! the very same node. Forward edges (`dependencies`) own their children;
//! reverse edges (`required_by`) are weak so that a parent is never kept
//! alive by its own children.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

/// Per-node attributes fixed at construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAttrs {
    /// Resolved version, or the literal specifier for non-registry ranges
    pub version: Option<String>,
    /// Only reachable through an optional dependency edge
    pub optional: bool,
    /// Only reachable through a dev dependency edge
    pub dev: bool,
    /// Shipped inside its parent's tarball
    pub bundled: bool,
    /// Where the package was fetched from
    pub resolved: Option<String>,
    /// Integrity hash of the fetched content
    pub integrity: Option<String>,
}

impl NodeAttrs {
    /// Attributes with only a version set
    pub fn version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::default()
        }
    }
}

/// Identity of a node for the lifetime of its allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeKey(usize);

struct NodeInner {
    name: String,
    address: String,
    attrs: NodeAttrs,
    dependencies: RefCell<IndexMap<String, Node>>,
    required_by: RefCell<IndexMap<NodeKey, Weak<NodeInner>>>,
}

impl NodeInner {
    fn key(&self) -> NodeKey {
        NodeKey(self as *const NodeInner as usize)
    }
}

impl Drop for NodeInner {
    fn drop(&mut self) {
        // A dying parent must not linger in its children's reverse edges.
        let key = self.key();
        for child in self.dependencies.get_mut().values() {
            child.0.required_by.borrow_mut().swap_remove(&key);
        }
    }
}

/// Shared handle to a vertex of the logical dependency tree
///
/// Equality and hashing are by identity: two handles compare equal only when
/// they point at the same vertex, regardless of attributes.
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

impl Node {
    /// Create a bare node with default attributes and an empty address
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_attrs(name, "", NodeAttrs::default())
    }

    /// Create a node with an address and attributes
    pub fn with_attrs(name: impl Into<String>, address: impl Into<String>, attrs: NodeAttrs) -> Self {
        Self(Rc::new(NodeInner {
            name: name.into(),
            address: address.into(),
            attrs,
            dependencies: RefCell::new(IndexMap::new()),
            required_by: RefCell::new(IndexMap::new()),
        }))
    }

    fn key(&self) -> NodeKey {
        self.0.key()
    }

    /// Package name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Structural address, empty for a tree root
    pub fn address(&self) -> &str {
        &self.0.address
    }

    /// All attributes
    pub fn attrs(&self) -> &NodeAttrs {
        &self.0.attrs
    }

    /// Resolved version or literal specifier
    pub fn version(&self) -> Option<&str> {
        self.0.attrs.version.as_deref()
    }

    pub fn optional(&self) -> bool {
        self.0.attrs.optional
    }

    pub fn dev(&self) -> bool {
        self.0.attrs.dev
    }

    pub fn bundled(&self) -> bool {
        self.0.attrs.bundled
    }

    pub fn resolved(&self) -> Option<&str> {
        self.0.attrs.resolved.as_deref()
    }

    pub fn integrity(&self) -> Option<&str> {
        self.0.attrs.integrity.as_deref()
    }

    /// Register `child` under its name and record `self` as one of its parents.
    ///
    /// Returns `self` so calls can be chained. Adding the same child twice is
    /// a no-op. A different node already registered under the same name is
    /// displaced and loses this parent from its `required_by`.
    pub fn add_dep(&self, child: &Node) -> &Self {
        let displaced = self
            .0
            .dependencies
            .borrow_mut()
            .insert(child.name().to_string(), child.clone());

        if let Some(old) = displaced {
            if old != *child {
                old.0.required_by.borrow_mut().swap_remove(&self.key());
            }
        }

        child
            .0
            .required_by
            .borrow_mut()
            .insert(self.key(), Rc::downgrade(&self.0));
        self
    }

    /// Remove `child` from this node's dependencies.
    ///
    /// Only removes the entry if it currently maps to `child`; otherwise this
    /// is a no-op. The child's own dependencies are left untouched.
    pub fn del_dep(&self, child: &Node) -> &Self {
        let removed = {
            let mut deps = self.0.dependencies.borrow_mut();
            match deps.get(child.name()) {
                Some(existing) if existing == child => deps.shift_remove(child.name()),
                _ => None,
            }
        };

        if removed.is_some() {
            child.0.required_by.borrow_mut().swap_remove(&self.key());
        }
        self
    }

    /// Remove every outgoing edge of this node
    pub fn clear_dependencies(&self) {
        for child in self.dependencies() {
            self.del_dep(&child);
        }
    }

    /// The direct dependency registered under `name`
    pub fn get_dep(&self, name: &str) -> Option<Node> {
        self.0.dependencies.borrow().get(name).cloned()
    }

    /// Direct dependencies in attachment order
    pub fn dependencies(&self) -> Vec<Node> {
        self.0.dependencies.borrow().values().cloned().collect()
    }

    /// Names of direct dependencies in attachment order
    pub fn dependency_names(&self) -> Vec<String> {
        self.0.dependencies.borrow().keys().cloned().collect()
    }

    /// Number of direct dependencies
    pub fn dependency_count(&self) -> usize {
        self.0.dependencies.borrow().len()
    }

    /// Parents currently pointing at this node, in no particular order
    pub fn required_by(&self) -> Vec<Node> {
        self.0
            .required_by
            .borrow()
            .values()
            .filter_map(Weak::upgrade)
            .map(Node)
            .collect()
    }

    /// Check if `parent` currently depends on this node
    pub fn is_required_by(&self, parent: &Node) -> bool {
        self.0.required_by.borrow().contains_key(&parent.key())
    }

    /// True while no parent points at this node
    pub fn is_root(&self) -> bool {
        self.0.required_by.borrow().is_empty()
    }

    /// Check if this node can reach itself through one or more edges.
    ///
    /// Nodes that merely lead into a cycle without being part of it report
    /// `false`. Uses an explicit stack, so depth is bounded by the heap.
    pub fn has_cycle(&self) -> bool {
        let mut seen: HashSet<Node> = HashSet::new();
        let mut stack = self.dependencies();

        while let Some(dep) = stack.pop() {
            if dep == *self {
                return true;
            }
            if !seen.insert(dep.clone()) {
                continue;
            }
            stack.extend(dep.dependencies());
        }

        false
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version() {
            Some(version) => write!(f, "{}@{}", self.name(), version),
            None => write!(f, "{}", self.name()),
        }
    }
}

// Only names of neighbours are printed; a derived impl would recurse forever
// on cyclic graphs.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let required_by: Vec<String> = self
            .required_by()
            .iter()
            .map(|parent| parent.name().to_string())
            .collect();

        f.debug_struct("Node")
            .field("name", &self.name())
            .field("address", &self.address())
            .field("attrs", self.attrs())
            .field("dependencies", &self.dependency_names())
            .field("required_by", &required_by)
            .finish()
    }
}
