//! Lockgraph benchmarking suite
//!
//! Benchmarks for lock table parsing, tree construction and traversal over
//! synthetic, densely shared dependency graphs.

pub mod common;

pub use common::*;
