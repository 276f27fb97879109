//! # Configuration Module
//!
//! Configuration structures for the deptrace commands. Each command has its
//! own config module with a builder that validates the assembled values.
//!
//! ## Command Configurations
//!
//! - **TraceConfig**: Configuration for the `trace` command, which builds a
//!   graph from a package registry
//! - **LocalGraphConfig**: Configuration for the `local` command, which reads
//!   a hand-written graph file
//!
//! ## Example
//!
//! ```
//! use deptrace::cli::GraphFormat;
//! use deptrace::common::ConfigBuilder;
//! use deptrace::config::TraceConfig;
//!
//! let config = TraceConfig::builder()
//!     .with_package("requests")
//!     .with_max_depth(1)
//!     .with_registry_url("https://pypi.org/pypi")
//!     .with_format(GraphFormat::Dot)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.package.as_str(), "requests");
//! ```

pub mod local;
pub mod trace;

pub use local::LocalGraphConfig;
pub use trace::TraceConfig;
