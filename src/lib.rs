//! # deptrace - Trace Package Dependency Graphs
//!
//! deptrace discovers the dependency graph of a published package by reading
//! the metadata inside its release archives, then answers two questions about
//! it: what does this package pull in, and who in the graph depends on a given
//! package.
//!
//! ## Main Components
//!
//! - **Registry**: Resolves packages to downloadable archives through the
//!   registry JSON API
//! - **Metadata**: Reads `Requires-Dist` declarations out of wheel and zip
//!   archives
//! - **Graph**: Breadth-first graph building, reverse indexing and rendering
//! - **Detector**: Finds dependency cycles (Tarjan's SCC)
//!
//! ## Usage
//!
//! ### Example: Tracing a Package from the Registry
//!
//! ```no_run
//! use deptrace::core::NodeId;
//! use deptrace::graph::{DependencyGraphBuilder, ReverseIndexer, TreeRenderer};
//! use deptrace::registry::RegistryClient;
//!
//! let builder = DependencyGraphBuilder::new(RegistryClient::default(), 2);
//! let root = NodeId::new("requests");
//! let outcome = builder.build(&root, None, None);
//!
//! print!("{}", TreeRenderer::render_to_string(&outcome.graph, &root));
//! for failure in &outcome.failures {
//!     eprintln!("{}: {}", failure.node, failure.error);
//! }
//!
//! // Who depends on urllib3 within this graph?
//! let reverse = ReverseIndexer::invert(&outcome.graph);
//! let dependents = ReverseIndexer::reverse_subgraph_from(&NodeId::new("urllib3"), &reverse);
//! print!(
//!     "{}",
//!     TreeRenderer::render_to_string(&dependents, &NodeId::new("urllib3"))
//! );
//! ```
//!
//! ### Example: Exploring a Hand-Written Graph
//!
//! ```
//! use deptrace::core::NodeId;
//! use deptrace::detector::CycleDetector;
//! use deptrace::graph::{ReverseIndexer, TreeRenderer};
//! use deptrace::graph_file::GraphFile;
//!
//! # fn main() -> miette::Result<()> {
//! let graph = GraphFile::parse("deps.graph", "app: web db\nweb: core\ndb: core\ncore:\n")?;
//!
//! let reverse = ReverseIndexer::invert(&graph);
//! let core = NodeId::new("core");
//! let dependents = ReverseIndexer::reverse_subgraph_from(&core, &reverse);
//! assert_eq!(
//!     TreeRenderer::render_to_string(&dependents, &core),
//!     "core\n├── web\n│   └── app\n└── db\n    └── app\n"
//! );
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph);
//! assert!(!detector.has_cycles());
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod progress;
mod utils;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod detector;
pub mod error;
pub mod executors;
pub mod graph;
pub mod graph_file;
pub mod metadata;
pub mod registry;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    execute_command(cli.command)
}
