//! # Graph Construction and Rendering Module
//!
//! Builds dependency graphs from a package registry, inverts them into
//! "who depends on me" graphs and renders either direction.
//!
//! ## Components
//!
//! ### Graph Building
//! - **DependencyGraphBuilder**: Breadth-first discovery from a root package,
//!   bounded by a maximum depth
//! - **ReverseIndexer**: Inverts a graph and walks it backwards from a target
//! - **AdjacencyMap**: Insertion-ordered node to neighbours map shared by both
//!   directions
//!
//! ### Graph Rendering
//! - **TreeRenderer**: ASCII trees with per-path cycle markers
//! - **GraphRenderer**: Titled trees, Graphviz DOT and JSON output
//!
//! ## Example
//!
//! ```
//! use deptrace::core::NodeId;
//! use deptrace::graph::{AdjacencyMap, ReverseIndexer, TreeRenderer};
//!
//! let graph = AdjacencyMap::from_adjacency([
//!     ("app", vec!["web", "db"]),
//!     ("web", vec!["core"]),
//!     ("db", vec!["core"]),
//! ]);
//!
//! let tree = TreeRenderer::render_to_string(&graph, &NodeId::new("app"));
//! assert_eq!(tree, "app\n├── web\n│   └── core\n└── db\n    └── core\n");
//!
//! let dependents = ReverseIndexer::invert(&graph);
//! let core = NodeId::new("core");
//! assert_eq!(
//!     dependents.neighbours(&core),
//!     [NodeId::new("web"), NodeId::new("db")]
//! );
//! ```
//!
//! ## Output Formats
//!
//! - **Tree**: indented ASCII trees, one per titled view
//! - **DOT**: Graphviz format, globally deduplicated statements
//! - **JSON**: array of titled views for programmatic use

mod builder;
mod renderer;
mod reverse;
mod tree;
mod types;

// Re-export main types and builders
pub use builder::{BuildOutcome, DependencyGraphBuilder, NodeFailure};
pub use renderer::{GraphRenderer, GraphView};
pub use reverse::ReverseIndexer;
pub use tree::{TreeLine, TreeRenderer};
pub use types::{AdjacencyMap, DependencyGraph, ReverseGraph};
