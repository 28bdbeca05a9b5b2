//! Asynchronous continuation-passing traversal
//!
//! The walk runs on a single thread: nodes are `!Send`, so concurrency here
//! means interleaving sibling visits on one executor task, never parallelism.

use std::cell::RefCell;
use std::collections::HashSet;
use std::future::Future;
use std::rc::Rc;

use futures_util::future;
use tracing::trace;

use super::mapper::{ChildMapper, Unordered, VisitFn, VisitFuture};
use crate::node::Node;

/// Continuation handed to an asynchronous visitor.
///
/// [`Next::descend`] starts the visits of the node's not-yet-seen
/// dependencies through the configured mapper and resolves once they all
/// finished. Dropping it without awaiting the result prunes the subtree.
pub struct Next<E> {
    node: Node,
    walk: Rc<dyn AsyncWalk<E>>,
}

impl<E: 'static> Next<E> {
    /// Visit the current node's dependencies
    pub fn descend(self) -> VisitFuture<E> {
        self.walk.children(self.node)
    }

    /// The node whose dependencies `descend` would visit
    pub fn node(&self) -> &Node {
        &self.node
    }
}

trait AsyncWalk<E> {
    fn visit(self: Rc<Self>, node: Node) -> VisitFuture<E>;
    fn children(self: Rc<Self>, node: Node) -> VisitFuture<E>;
}

type BoxedVisitor<E> = Box<dyn Fn(Node, Next<E>) -> VisitFuture<E>>;

struct AsyncWalker<M, E> {
    visitor: BoxedVisitor<E>,
    mapper: M,
    seen: RefCell<HashSet<Node>>,
}

impl<M, E> AsyncWalk<E> for AsyncWalker<M, E>
where
    M: ChildMapper + 'static,
    E: 'static,
{
    fn visit(self: Rc<Self>, node: Node) -> VisitFuture<E> {
        // A node already claimed by another branch is not awaited again.
        if !self.seen.borrow_mut().insert(node.clone()) {
            trace!(node = %node, "already visited");
            return Box::pin(future::ready(Ok(())));
        }

        let next = Next {
            node: node.clone(),
            walk: Rc::clone(&self) as Rc<dyn AsyncWalk<E>>,
        };
        (self.visitor)(node, next)
    }

    fn children(self: Rc<Self>, node: Node) -> VisitFuture<E> {
        let walk = Rc::clone(&self);
        let visit: VisitFn<E> = Rc::new(move |child: Node| Rc::clone(&walk).visit(child));
        self.mapper.map_children(node.dependencies(), visit)
    }
}

/// Asynchronously visit `node` and its dependencies with unordered
/// concurrent dispatch of siblings.
///
/// Each reachable node is handed to `visitor` at most once. The first error
/// returned by any visit aborts the walk; sibling visits still in flight are
/// dropped.
pub fn for_each_async<F, Fut, E>(node: &Node, visitor: F) -> VisitFuture<E>
where
    F: Fn(Node, Next<E>) -> Fut + 'static,
    Fut: Future<Output = Result<(), E>> + 'static,
    E: 'static,
{
    for_each_async_with(node, Unordered, visitor)
}

/// Like [`for_each_async`] but dispatching children through `mapper`
pub fn for_each_async_with<M, F, Fut, E>(node: &Node, mapper: M, visitor: F) -> VisitFuture<E>
where
    M: ChildMapper + 'static,
    F: Fn(Node, Next<E>) -> Fut + 'static,
    Fut: Future<Output = Result<(), E>> + 'static,
    E: 'static,
{
    let walker = Rc::new(AsyncWalker {
        visitor: Box::new(move |node, next| Box::pin(visitor(node, next)) as VisitFuture<E>),
        mapper,
        seen: RefCell::new(HashSet::new()),
    });
    walker.visit(node.clone())
}
