use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::OutputArgs;
use crate::constants::registry::DEFAULT_REGISTRY_URL;
use crate::constants::traversal::{DEFAULT_MAX_DEPTH, DEFAULT_SUBGRAPH_DEPTH};

#[derive(Parser)]
#[command(
    name = "deptrace",
    about = "🔭 Trace package dependency graphs, forwards and backwards",
    long_about = "deptrace discovers the dependency graph of a package by reading the metadata \
                  of its published archives, then prints it as a tree, in Graphviz DOT or as \
                  JSON. It can also answer \"who depends on this?\" for any node of the graph, \
                  and works on hand-written graph files without network access.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Trace the dependencies of a published package
    ///
    /// Queries the registry breadth-first from PACKAGE, downloading each
    /// package's archive and reading its declared dependencies, up to a
    /// maximum depth. Packages that cannot be resolved stay in the graph
    /// without dependencies.
    #[command(
        long_about = "Build the dependency graph of a package from a registry. Each package is \
                      resolved to a wheel (or a zip source archive), downloaded, and its \
                      `Requires-Dist` declarations are read; optional extras are skipped. The \
                      forward tree is printed from the root, followed by the tree of dependents \
                      of --reverse TARGET when given."
    )]
    Trace {
        /// Package to trace
        #[arg(value_name = "PACKAGE", env = "DEPTRACE_PACKAGE")]
        package: String,

        /// Exact version of the root package (latest if not specified)
        #[arg(value_name = "VERSION", env = "DEPTRACE_VERSION")]
        version: Option<String>,

        /// Largest distance from the root whose dependencies are fetched
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, env = "DEPTRACE_MAX_DEPTH")]
        max_depth: usize,

        /// Also show everything in the graph that depends on TARGET
        #[arg(long, value_name = "TARGET", env = "DEPTRACE_REVERSE")]
        reverse: Option<String>,

        /// Base URL of the registry JSON API
        #[arg(long, value_name = "URL", default_value = DEFAULT_REGISTRY_URL, env = "DEPTRACE_REGISTRY")]
        registry: String,

        /// Timeout in seconds for each metadata query
        #[arg(long, value_name = "SECONDS", env = "DEPTRACE_METADATA_TIMEOUT")]
        metadata_timeout: Option<u64>,

        /// Timeout in seconds for each archive download
        #[arg(long, value_name = "SECONDS", env = "DEPTRACE_DOWNLOAD_TIMEOUT")]
        download_timeout: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Explore a hand-written graph file
    ///
    /// Reads `NODE: dep1 dep2 ...` lines and prints every component of the
    /// graph. Uses a small built-in sample graph when no file is given.
    #[command(
        long_about = "Load a dependency graph from a text file with one `NODE: dep1 dep2 ...` \
                      line per node (`#` starts a comment) and print an overview of each \
                      component. With --node, also print the subgraph reachable from NODE and \
                      the tree of nodes depending on it."
    )]
    Local {
        /// Graph file to read (built-in sample graph if not specified)
        #[arg(value_name = "PATH", env = "DEPTRACE_GRAPH_FILE")]
        path: Option<PathBuf>,

        /// Node to focus on
        #[arg(long, value_name = "NODE", env = "DEPTRACE_NODE")]
        node: Option<String>,

        /// Depth bound of the forward subgraph from --node
        #[arg(long, default_value_t = DEFAULT_SUBGRAPH_DEPTH, env = "DEPTRACE_SUBGRAPH_DEPTH")]
        max_depth: usize,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    Tree,
    Dot,
    Json,
}
