//! Record set module
//!
//! Defines the favourite-tree record type and the built-in default set.
//! The set is process-wide read-only state: constructed once at startup,
//! never mutated or persisted.

use serde::{Deserialize, Serialize};

/// A single favourite-tree record
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Tree {
    pub name: String,
}

/// Built-in record set, used when the configuration file does not provide
/// a `trees` section. Must stay non-empty so the endpoint never serves an
/// empty payload.
pub fn default_trees() -> Vec<Tree> {
    ["Baobab", "Oak", "Pine", "Jacaranda"]
        .into_iter()
        .map(|name| Tree {
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_non_empty() {
        assert!(!default_trees().is_empty());
    }

    #[test]
    fn test_default_set_encodes_to_json_array() {
        let json = serde_json::to_string(&default_trees()).unwrap();
        assert!(json.starts_with('['));
        assert_ne!(json, "{}");
        assert_ne!(json, "[]");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let trees = default_trees();
        let a = serde_json::to_vec(&trees).unwrap();
        let b = serde_json::to_vec(&trees).unwrap();
        assert_eq!(a, b);
    }
}
