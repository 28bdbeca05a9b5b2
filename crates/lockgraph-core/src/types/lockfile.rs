//! Flat lock table types.
//!
//! The table is keyed by the literal `name@range` string a requirer used, not
//! by resolved version. Two requirers with different range strings for the
//! same install produce two keys unless the table itself collapses them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::dependency::{DeclaredDependency, DependencyKind, DependencyMap};

/// A single resolved lock entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEntry {
    /// Concrete resolved version
    pub version: String,

    /// Where the package was fetched from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,

    /// Integrity hash of the fetched content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,

    /// Runtime dependency ranges
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: DependencyMap,

    /// Optional dependency ranges
    #[serde(
        default,
        rename = "optionalDependencies",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub optional_dependencies: DependencyMap,
}

impl LockEntry {
    /// Create a lock entry resolved to `version`
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Record the resolved URL
    pub fn with_resolved(mut self, resolved: impl Into<String>) -> Self {
        self.resolved = Some(resolved.into());
        self
    }

    /// Record the integrity hash
    pub fn with_integrity(mut self, integrity: impl Into<String>) -> Self {
        self.integrity = Some(integrity.into());
        self
    }

    /// Add a runtime dependency range
    pub fn with_dependency(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), range.into());
        self
    }

    /// Add an optional dependency range
    pub fn with_optional_dependency(
        mut self,
        name: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.optional_dependencies.insert(name.into(), range.into());
        self
    }

    /// Whether `name` is listed among this entry's optional dependencies
    pub fn lists_optional(&self, name: &str) -> bool {
        self.optional_dependencies.contains_key(name)
    }

    /// Optional then regular dependencies, regular ranges winning.
    ///
    /// A name listed as optional stays `Optional` even when the regular map
    /// overrides its range.
    pub fn merged_dependencies(&self) -> IndexMap<String, DeclaredDependency> {
        let mut merged = IndexMap::new();
        for (name, range) in self.optional_dependencies.iter().chain(&self.dependencies) {
            let kind = if self.lists_optional(name) {
                DependencyKind::Optional
            } else {
                DependencyKind::Normal
            };
            merged.insert(name.clone(), DeclaredDependency::new(range.clone(), kind));
        }
        merged
    }
}

/// Flat mapping from `name@range` to resolved entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockTable {
    entries: IndexMap<String, LockEntry>,
}

impl LockTable {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the lookup key for a dependency range
    pub fn key(name: &str, range: &str) -> String {
        format!("{}@{}", name, range)
    }

    /// Insert an entry for `name@range`, replacing any previous one
    pub fn insert(&mut self, name: &str, range: &str, entry: LockEntry) -> Option<LockEntry> {
        self.entries.insert(Self::key(name, range), entry)
    }

    /// Builder-style insert
    pub fn with_entry(mut self, name: &str, range: &str, entry: LockEntry) -> Self {
        self.insert(name, range, entry);
        self
    }

    /// Look up the entry for `name@range`
    pub fn get(&self, name: &str, range: &str) -> Option<&LockEntry> {
        self.entries.get(&Self::key(name, range))
    }

    /// Look up an entry by its literal key
    pub fn get_key(&self, key: &str) -> Option<&LockEntry> {
        self.entries.get(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, entry)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LockEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, LockEntry)> for LockTable {
    fn from_iter<T: IntoIterator<Item = (String, LockEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
