//! Logical dependency trees for lockgraph
//!
//! This crate turns a manifest plus a flat lock table into a graph of shared
//! [`Node`]s and walks that graph safely even when it contains cycles.
//!
//! - `node`: the shared node handle with forward and reverse edges
//! - `build`: lock table to tree construction with memoized identity
//! - `traverse`: continuation-passing sync and async walks with pluggable
//!   child dispatch
//! - `render`: indented text output for inspection
//!
//! Node handles are reference counted and `!Send`; a tree lives on the thread
//! that built it.

pub mod build;
pub mod node;
pub mod render;
pub mod traverse;

// Re-export main types
pub use build::build;
pub use node::{Node, NodeAttrs};
pub use render::render_tree;
pub use traverse::{
    count_nodes, for_each, for_each_async, for_each_async_with, reachable, unlink_all, Bounded, ChildMapper,
    Concurrency, Next, Recurse, Sequential, TraversalOptions, Unordered, VisitFn, VisitFuture,
};

pub use lockgraph_core::{LockgraphError, LockgraphResult};
