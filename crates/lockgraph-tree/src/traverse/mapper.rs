//! Child dispatch policies for asynchronous traversal
//!
//! A [`ChildMapper`] decides how the visits of a node's dependencies are
//! scheduled: all at once, one after another, or through a bounded window.
//! Whatever the policy, the returned future resolves only after every child
//! visit has finished, or with the first error any of them produced.

use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use futures_util::stream::{self, FuturesUnordered, StreamExt};

use crate::node::Node;

/// Future produced by a single visit or a whole batch of child visits
pub type VisitFuture<E> = LocalBoxFuture<'static, Result<(), E>>;

/// Starts the visit of one child
pub type VisitFn<E> = Rc<dyn Fn(Node) -> VisitFuture<E>>;

/// Map-over-children with a caller-chosen concurrency policy
pub trait ChildMapper {
    /// Run `visit` over `children`, resolving once all of them completed
    fn map_children<E: 'static>(&self, children: Vec<Node>, visit: VisitFn<E>) -> VisitFuture<E>;
}

/// Start every child at once and complete in whatever order they finish
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unordered;

impl ChildMapper for Unordered {
    fn map_children<E: 'static>(&self, children: Vec<Node>, visit: VisitFn<E>) -> VisitFuture<E> {
        let mut pending: FuturesUnordered<VisitFuture<E>> =
            children.into_iter().map(|child| visit(child)).collect();

        Box::pin(async move {
            while let Some(result) = pending.next().await {
                result?;
            }
            Ok::<(), E>(())
        })
    }
}

/// Visit children one at a time in attachment order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequential;

impl ChildMapper for Sequential {
    fn map_children<E: 'static>(&self, children: Vec<Node>, visit: VisitFn<E>) -> VisitFuture<E> {
        Box::pin(async move {
            for child in children {
                visit(child).await?;
            }
            Ok::<(), E>(())
        })
    }
}

/// Keep at most `n` child visits in flight; zero is treated as one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounded(pub usize);

impl ChildMapper for Bounded {
    fn map_children<E: 'static>(&self, children: Vec<Node>, visit: VisitFn<E>) -> VisitFuture<E> {
        let limit = self.0.max(1);

        Box::pin(async move {
            let mut results = stream::iter(children)
                .map(move |child| visit(child))
                .buffer_unordered(limit);

            while let Some(result) = results.next().await {
                result?;
            }
            Ok::<(), E>(())
        })
    }
}
