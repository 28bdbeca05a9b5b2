//! # lockgraph-core
//!
//! Core types shared across all lockgraph crates.
//!
//! This crate provides:
//! - `Manifest`, `LockTable` and `LockEntry`: the two inputs of the tree builder
//! - range classification for literal references such as `file:` paths
//! - `LockgraphError` for unified error handling
//! - JSON loading for both inputs
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Input records (manifest, lock table, declared dependencies)
//! - `error`: Error types and result aliases
//! - `json`: Parsing and async file loading

pub mod error;
pub mod json;
pub mod types;

// Re-export commonly used types
pub use error::{LockgraphError, LockgraphResult};
pub use types::{DeclaredDependency, DependencyKind, DependencyMap, LockEntry, LockTable, Manifest, RangeKind};
