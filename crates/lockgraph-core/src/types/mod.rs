//! Input record types for tree construction.
//!
//! This module provides the two inputs the tree builder consumes:
//! - the top-level manifest with its dependency maps
//! - the flat lock table keyed by `name@range`
//! - range classification for literal (non-registry) references

pub mod dependency;
pub mod lockfile;
pub mod manifest;
pub mod range;

// Re-export all public types
pub use dependency::{merge_dependency_maps, DeclaredDependency, DependencyKind, DependencyMap};
pub use lockfile::{LockEntry, LockTable};
pub use manifest::Manifest;
pub use range::{display_version, RangeKind};
