//! # Cycle Detection Module
//!
//! Finds circular dependencies in a dependency graph with Tarjan's Strongly
//! Connected Components algorithm, in O(V + E) time.
//!
//! ## Example
//!
//! ```
//! use deptrace::detector::CycleDetector;
//! use deptrace::graph::AdjacencyMap;
//!
//! let graph = AdjacencyMap::from_adjacency([
//!     ("requests", vec!["urllib3"]),
//!     ("urllib3", vec!["requests"]),
//! ]);
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph);
//!
//! assert!(detector.has_cycles());
//! assert_eq!(detector.cycle_count(), 1);
//! ```

mod detector_impl;

pub use detector_impl::*;
