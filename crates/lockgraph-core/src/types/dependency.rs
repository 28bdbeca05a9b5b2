//! Declared dependency types.
//!
//! A declared dependency is one `name -> range` pair after the dev, optional
//! and regular maps of a manifest or lock entry have been merged.

use indexmap::IndexMap;

/// Ordered `name -> range` mapping as written in a manifest or lock entry
pub type DependencyMap = IndexMap<String, String>;

/// Which map a declared dependency came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// Regular runtime dependency
    Normal,
    /// Development-only dependency
    Dev,
    /// Optional dependency (may fail to install)
    Optional,
}

/// A dependency range together with the map it was declared in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub range: String,
    pub kind: DependencyKind,
}

impl DeclaredDependency {
    /// Create a new declared dependency
    pub fn new(range: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            range: range.into(),
            kind,
        }
    }
}

impl DependencyKind {
    /// Check if this dependency is only for development
    pub fn is_dev(&self) -> bool {
        matches!(self, DependencyKind::Dev)
    }

    /// Check if this dependency may be absent at install time
    pub fn is_optional(&self) -> bool {
        matches!(self, DependencyKind::Optional)
    }
}

/// Merge dependency maps in precedence order, lowest first.
///
/// A later map overrides the range of a name already present, but the name
/// keeps the position of its first insertion.
pub fn merge_dependency_maps<'a, I>(maps: I) -> IndexMap<String, DeclaredDependency>
where
    I: IntoIterator<Item = (&'a DependencyMap, DependencyKind)>,
{
    let mut merged = IndexMap::new();
    for (map, kind) in maps {
        for (name, range) in map {
            merged.insert(name.clone(), DeclaredDependency::new(range.clone(), kind));
        }
    }
    merged
}
