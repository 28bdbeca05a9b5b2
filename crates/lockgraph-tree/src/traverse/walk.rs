//! Synchronous continuation-passing traversal

use std::cell::RefCell;
use std::collections::HashSet;

use tracing::trace;

use crate::node::Node;

/// Continuation handed to a synchronous visitor.
///
/// Calling [`Recurse::descend`] visits every not-yet-seen dependency of the
/// current node, in attachment order, and returns once they are all done.
/// Dropping it without calling `descend` prunes the subtree.
pub struct Recurse<'w, E> {
    walk: &'w dyn Walk<E>,
    node: Node,
}

impl<'w, E> Recurse<'w, E> {
    /// Visit the current node's dependencies
    pub fn descend(self) -> Result<(), E> {
        self.walk.children(&self.node)
    }

    /// The node whose dependencies `descend` would visit
    pub fn node(&self) -> &Node {
        &self.node
    }
}

trait Walk<E> {
    fn visit(&self, node: &Node) -> Result<(), E>;
    fn children(&self, node: &Node) -> Result<(), E>;
}

struct SyncWalk<F> {
    visitor: F,
    seen: RefCell<HashSet<Node>>,
}

impl<F, E> Walk<E> for SyncWalk<F>
where
    F: Fn(&Node, Recurse<'_, E>) -> Result<(), E>,
{
    fn visit(&self, node: &Node) -> Result<(), E> {
        if !self.seen.borrow_mut().insert(node.clone()) {
            trace!(node = %node, "already visited");
            return Ok(());
        }

        let recurse = Recurse {
            walk: self,
            node: node.clone(),
        };
        (self.visitor)(node, recurse)
    }

    fn children(&self, node: &Node) -> Result<(), E> {
        for child in node.dependencies() {
            self.visit(&child)?;
        }
        Ok(())
    }
}

/// Visit `node` and, as far as the visitor recurses, everything it reaches.
///
/// Each reachable node is handed to `visitor` at most once, so cycles and
/// shared dependencies are safe. The first error returned by the visitor
/// stops the walk and is returned unchanged.
pub fn for_each<F, E>(node: &Node, visitor: F) -> Result<(), E>
where
    F: Fn(&Node, Recurse<'_, E>) -> Result<(), E>,
{
    let walk = SyncWalk {
        visitor,
        seen: RefCell::new(HashSet::new()),
    };
    walk.visit(node)
}
