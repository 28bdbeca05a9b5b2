//! Traversal configuration

use serde::{Deserialize, Serialize};

use super::mapper::{Bounded, ChildMapper, Sequential, Unordered, VisitFn, VisitFuture};
use crate::node::Node;

/// How sibling subtrees are scheduled during an asynchronous walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Concurrency {
    /// All children in flight at once
    #[default]
    Unbounded,
    /// One child at a time, in attachment order
    Sequential,
    /// At most this many children in flight
    Limit(usize),
}

impl ChildMapper for Concurrency {
    fn map_children<E: 'static>(&self, children: Vec<Node>, visit: VisitFn<E>) -> VisitFuture<E> {
        match *self {
            Concurrency::Unbounded => Unordered.map_children(children, visit),
            Concurrency::Sequential => Sequential.map_children(children, visit),
            Concurrency::Limit(n) => Bounded(n).map_children(children, visit),
        }
    }
}

/// Options for asynchronous traversal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TraversalOptions {
    /// Child dispatch policy
    pub concurrency: Concurrency,
}

impl TraversalOptions {
    /// Options with the given concurrency policy
    pub fn with_concurrency(concurrency: Concurrency) -> Self {
        Self { concurrency }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(TraversalOptions::default().concurrency, Concurrency::Unbounded);
    }

    #[test]
    fn test_deserialize_from_config() {
        let options: TraversalOptions = serde_json::from_str(r#"{ "concurrency": "sequential" }"#).unwrap();
        assert_eq!(options.concurrency, Concurrency::Sequential);

        let options: TraversalOptions = serde_json::from_str(r#"{ "concurrency": { "limit": 4 } }"#).unwrap();
        assert_eq!(options.concurrency, Concurrency::Limit(4));

        let options: TraversalOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, TraversalOptions::default());
    }

    #[test]
    fn test_serialize_round_trip() {
        let options = TraversalOptions::with_concurrency(Concurrency::Limit(8));
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"concurrency":{"limit":8}}"#);
        assert_eq!(serde_json::from_str::<TraversalOptions>(&json).unwrap(), options);
    }
}
