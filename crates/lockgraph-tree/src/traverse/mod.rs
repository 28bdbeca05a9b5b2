//! Cycle-safe traversal over the logical tree
//!
//! Visitors receive the current node and a continuation. Invoking the
//! continuation visits the node's dependencies; invoking it first gives
//! post-order, invoking it last gives pre-order, and never invoking it prunes
//! the subtree. Every top-level call keeps its own visited set, so each
//! reachable node is visited at most once even on cyclic graphs.

pub mod mapper;
pub mod options;
pub mod walk;
pub mod walk_async;

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::future::Future;

pub use mapper::{Bounded, ChildMapper, Sequential, Unordered, VisitFn, VisitFuture};
pub use options::{Concurrency, TraversalOptions};
pub use walk::{for_each, Recurse};
pub use walk_async::{for_each_async, for_each_async_with, Next};

use crate::node::Node;

impl Node {
    /// Synchronous traversal starting at this node, see [`for_each`]
    pub fn for_each<F, E>(&self, visitor: F) -> Result<(), E>
    where
        F: Fn(&Node, Recurse<'_, E>) -> Result<(), E>,
    {
        for_each(self, visitor)
    }

    /// Asynchronous traversal starting at this node, see [`for_each_async`]
    pub fn for_each_async<F, Fut, E>(&self, visitor: F) -> VisitFuture<E>
    where
        F: Fn(Node, Next<E>) -> Fut + 'static,
        Fut: Future<Output = Result<(), E>> + 'static,
        E: 'static,
    {
        for_each_async(self, visitor)
    }

    /// Asynchronous traversal dispatching children according to `options`
    pub fn for_each_async_with<F, Fut, E>(&self, options: &TraversalOptions, visitor: F) -> VisitFuture<E>
    where
        F: Fn(Node, Next<E>) -> Fut + 'static,
        Fut: Future<Output = Result<(), E>> + 'static,
        E: 'static,
    {
        for_each_async_with(self, options.concurrency, visitor)
    }
}

/// Every node reachable from `root`, root first, each once
pub fn reachable(root: &Node) -> Vec<Node> {
    let found = RefCell::new(Vec::new());
    let walked: Result<(), Infallible> = for_each(root, |node, next| {
        found.borrow_mut().push(node.clone());
        next.descend()
    });
    match walked {
        Ok(()) => found.into_inner(),
        Err(never) => match never {},
    }
}

/// Number of distinct nodes reachable from `root`, root included
pub fn count_nodes(root: &Node) -> usize {
    let count = Cell::new(0usize);
    let walked: Result<(), Infallible> = for_each(root, |_node, next| {
        count.set(count.get() + 1);
        next.descend()
    });
    match walked {
        Ok(()) => count.get(),
        Err(never) => match never {},
    }
}

/// Drop every edge reachable from `root`.
///
/// Dependency edges are strong references, so a cyclic tree is never freed
/// on its own. Call this once a tree with cycles is no longer needed.
pub fn unlink_all(root: &Node) {
    for node in reachable(root) {
        node.clear_dependencies();
    }
}
