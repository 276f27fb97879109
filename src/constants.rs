//! Configuration constants for deptrace
//!
//! This module contains all configurable constants used throughout the
//! application. Most of these values can be overridden through command-line
//! flags or `DEPTRACE_*` environment variables.

use std::time::Duration;

/// Registry access configuration
pub mod registry {
    use super::*;

    /// Base URL of the package registry JSON API
    pub const DEFAULT_REGISTRY_URL: &str = "https://pypi.org/pypi";

    /// Timeout for a single metadata query
    pub const METADATA_TIMEOUT: Duration = Duration::from_secs(10);

    /// Timeout for a single archive download
    pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(20);

    /// Upper bound on the number of archive bytes read into memory
    pub const MAX_ARCHIVE_BYTES: u64 = 256 * 1024 * 1024;

    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("deptrace/", env!("CARGO_PKG_VERSION"));
}

/// Archive and metadata layout
pub mod archive {
    /// File name suffix of a binary distribution
    pub const WHEEL_SUFFIX: &str = ".whl";

    /// Source archive suffixes that are zip containers
    pub const SOURCE_ARCHIVE_SUFFIXES: &[&str] = &[".zip"];

    /// Entry name suffixes of the metadata descriptor
    pub const METADATA_ENTRY_SUFFIXES: &[&str] = &["METADATA", "PKG-INFO"];

    /// Field prefix of a dependency declaration
    pub const REQUIRES_DIST_FIELD: &str = "Requires-Dist:";

    /// Extra values that mark a declaration as part of the default install
    pub const DEFAULT_EXTRA_VALUES: &[&str] = &["", "main", "default"];
}

/// Traversal bounds
pub mod traversal {
    /// Default depth bound for registry builds
    pub const DEFAULT_MAX_DEPTH: usize = 2;

    /// Default depth bound for subgraphs of a local graph file
    pub const DEFAULT_SUBGRAPH_DEPTH: usize = 5;
}

/// Progress spinner configuration
pub mod progress {
    use super::*;

    /// Duration between spinner updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the telescope animation
    pub const SPINNER_FRAMES: &[&str] = &["🔭◐", "🔭◓", "🔭◑", "🔭◒", "✓"];
}

/// Output formatting configuration
pub mod output {
    /// Default graph format when not specified
    pub const DEFAULT_FORMAT: &str = "tree";

    /// Marker appended to a node that closes a cycle on its own path
    pub const CYCLE_MARKER: &str = "⮌ (cycle)";

    /// Width of the `=` rule framing tree titles
    pub const TITLE_RULE_WIDTH: usize = 40;
}

/// Built-in sample graph used by `deptrace local` without a file
pub const SAMPLE_GRAPH: &str = "\
# Sample graph: a diamond (A -> B -> D, A -> C -> D) plus E -> B
A: B C
B: D
C: D E
D:
E: B
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_constants() {
        assert_eq!(registry::METADATA_TIMEOUT, Duration::from_secs(10));
        assert_eq!(registry::DOWNLOAD_TIMEOUT, Duration::from_secs(20));
        assert!(registry::USER_AGENT.starts_with("deptrace/"));
    }

    #[test]
    fn test_traversal_constants() {
        assert_eq!(traversal::DEFAULT_MAX_DEPTH, 2);
        assert_eq!(traversal::DEFAULT_SUBGRAPH_DEPTH, 5);
    }

    #[test]
    fn test_output_constants() {
        assert_eq!(output::DEFAULT_FORMAT, "tree");
    }
}
