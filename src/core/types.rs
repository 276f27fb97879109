//! Core type definitions
//!
//! This module contains the basic data structures used throughout the
//! application, with minimal logic - focusing on data representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized package name identifying one node of a dependency graph
///
/// Construction always trims surrounding whitespace and lower-cases the name,
/// so `"Requests "` and `"requests"` refer to the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A downloadable release artifact chosen for one package query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    /// Download URL of the archive
    pub url: String,
    /// Version the query resolved to
    pub version: String,
    /// File name as listed by the registry
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_normalizes_case_and_whitespace() {
        assert_eq!(NodeId::new("  Requests\t"), NodeId::new("requests"));
        assert_eq!(NodeId::new("PyYAML").as_str(), "pyyaml");
    }

    #[test]
    fn test_node_id_empty() {
        assert!(NodeId::new("   ").is_empty());
        assert!(!NodeId::new("a").is_empty());
    }

    #[test]
    fn test_node_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&NodeId::new("Flask")).unwrap();
        assert_eq!(json, "\"flask\"");
    }
}
