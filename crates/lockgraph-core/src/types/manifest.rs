//! Top-level manifest record.
//!
//! Only the fields the tree builder reads are modelled; everything else in a
//! package.json is ignored on deserialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::dependency::{merge_dependency_maps, DeclaredDependency, DependencyKind, DependencyMap};

/// The package whose logical tree is being built
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Package name (may be empty for anonymous projects)
    #[serde(default)]
    pub name: String,

    /// Package version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Runtime dependencies
    #[serde(default)]
    pub dependencies: DependencyMap,

    /// Development dependencies
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: DependencyMap,

    /// Optional dependencies
    #[serde(default, rename = "optionalDependencies")]
    pub optional_dependencies: DependencyMap,
}

impl Manifest {
    /// Create an empty manifest with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the package version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add a runtime dependency
    pub fn with_dependency(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), range.into());
        self
    }

    /// Add a development dependency
    pub fn with_dev_dependency(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dev_dependencies.insert(name.into(), range.into());
        self
    }

    /// Add an optional dependency
    pub fn with_optional_dependency(
        mut self,
        name: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.optional_dependencies.insert(name.into(), range.into());
        self
    }

    /// All declared dependencies merged dev, then optional, then regular.
    ///
    /// Regular ranges override optional ones, which override dev ones. The
    /// kind records which map supplied the winning range.
    pub fn merged_dependencies(&self) -> IndexMap<String, DeclaredDependency> {
        merge_dependency_maps([
            (&self.dev_dependencies, DependencyKind::Dev),
            (&self.optional_dependencies, DependencyKind::Optional),
            (&self.dependencies, DependencyKind::Normal),
        ])
    }
}
