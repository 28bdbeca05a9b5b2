//! Dependency range classification.
//!
//! Most ranges are registry semver ranges and resolve to the version recorded
//! in the lock entry. Some are literal specifiers (local paths, git URLs,
//! tarball URLs) and the specifier itself stands in for the version.

/// Protocol prefixes that never resolve through a registry
const LITERAL_PREFIXES: &[&str] = &[
    "file:",
    "link:",
    "portal:",
    "git:",
    "git+",
    "github:",
    "http://",
    "https://",
];

/// How a dependency range resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    /// A semver range or tag looked up in a registry
    Registry,
    /// A literal reference (path, git or tarball URL)
    Literal,
}

impl RangeKind {
    /// Classify a range string as written in a manifest
    pub fn of(range: &str) -> Self {
        let range = range.trim();
        let literal = LITERAL_PREFIXES.iter().any(|p| range.starts_with(p))
            || range.starts_with("./")
            || range.starts_with("../")
            || range.starts_with("~/")
            || range.starts_with('/');

        if literal {
            RangeKind::Literal
        } else {
            RangeKind::Registry
        }
    }

    /// Check if this range is a literal reference
    pub fn is_literal(&self) -> bool {
        matches!(self, RangeKind::Literal)
    }
}

/// The version a node should carry for `range` resolved to `locked_version`
pub fn display_version<'a>(range: &'a str, locked_version: &'a str) -> &'a str {
    if RangeKind::of(range).is_literal() {
        range
    } else {
        locked_version
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn semver_shaped_ranges_are_registry(
            op in prop::sample::select(vec!["", "^", "~", ">=", "<", "="]),
            major in 0u64..100,
            minor in 0u64..100,
            patch in 0u64..100,
        ) {
            let range = format!("{}{}.{}.{}", op, major, minor, patch);
            prop_assert_eq!(RangeKind::of(&range), RangeKind::Registry);
            prop_assert_eq!(display_version(&range, "9.9.9"), "9.9.9");
        }

        #[test]
        fn file_references_are_their_own_version(path in "[a-z][a-z0-9/_-]{0,20}") {
            let range = format!("file:{}", path);
            prop_assert!(RangeKind::of(&range).is_literal());
            prop_assert_eq!(display_version(&range, "1.0.0"), range.as_str());
        }
    }
}
