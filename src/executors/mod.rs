//! Command executors that handle the actual logic for each command

pub mod local;
pub mod trace;

use console::style;
use miette::Result;

use crate::detector::CycleDetector;
use crate::error::DeptraceError;
use crate::graph::AdjacencyMap;
use crate::utils::string::pluralize;

/// Trait for command executors
pub trait CommandExecutor {
    type Config;

    /// Execute the command with the given configuration
    fn execute(config: Self::Config) -> Result<()>;
}

/// Print the dependency cycles of `graph` to stderr
fn report_cycles(graph: &AdjacencyMap) {
    let mut detector = CycleDetector::new();
    detector.detect_cycles(graph);

    if !detector.has_cycles() {
        eprintln!("{} No dependency cycles", style("✓").green());
        return;
    }

    eprintln!(
        "{} Found {} dependency {}:",
        style("⚠").yellow(),
        style(detector.cycle_count()).red().bold(),
        pluralize("cycle", detector.cycle_count())
    );
    for cycle in detector.cycles() {
        let members: Vec<&str> = cycle.members().iter().map(|m| m.as_str()).collect();
        eprintln!("  {} {}", style("⮌").red(), members.join(" ↔ "));
    }
}

/// Print a query error to stderr without aborting the command
fn report_query_error(error: DeptraceError) {
    eprintln!("{:?}", miette::Report::new(error));
}
