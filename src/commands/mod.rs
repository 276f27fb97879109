//! Command implementations for the deptrace CLI
//!
//! This module contains the implementations for each CLI command:
//! - trace: Build a dependency graph from a package registry
//! - local: Explore a hand-written graph file

pub mod local;
pub mod trace;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Trace { .. } => trace::execute_trace_command(command),
        Commands::Local { .. } => local::execute_local_command(command),
    }
}
