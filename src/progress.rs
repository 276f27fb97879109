use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::core::NodeId;
use crate::utils::string::pluralize;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} [{elapsed_precise}] {msg}";

/// Interactive progress display for a graph build
pub struct ProgressReporter {
    term: Term,
    processed: AtomicUsize,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            processed: AtomicUsize::new(0),
            current_bar: None,
        }
    }

    /// Reporter for interactive sessions; `None` when stderr is not a terminal
    pub fn for_terminal() -> Option<Self> {
        Term::stderr().is_term().then(Self::new)
    }

    fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .expect("Spinner template should be valid")
                .tick_strings(SPINNER_FRAMES),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    pub fn start_build(&mut self, root: &NodeId, max_depth: usize) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Tracing dependencies of {} (max depth {})...",
            style("🔭").cyan(),
            style(root).green().bold(),
            max_depth
        );
        self.processed.store(0, Ordering::Relaxed);
        self.current_bar = Some(self.create_spinner("Contacting registry..."));
    }

    pub fn expanding(&self, node: &NodeId, depth: usize, queued: usize) {
        let done = self.processed.fetch_add(1, Ordering::Relaxed);
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!(
                "Expanding {} (depth {depth}) · {done} done, {queued} queued",
                style(node).green()
            ));
        }
    }

    pub fn node_degraded(&self, node: &NodeId, reason: &str) {
        let line = format!("{} {}: {}", style("✗").red(), node, style(reason).dim());
        match self.current_bar {
            Some(ref pb) => pb.println(line),
            None => eprintln!("{line}"),
        }
    }

    pub fn finish_build(&mut self, expanded: usize, failures: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        if failures == 0 {
            eprintln!(
                "{} Graph complete: {} {} expanded",
                style("✓").green(),
                style(expanded).yellow().bold(),
                pluralize("package", expanded)
            );
        } else {
            eprintln!(
                "{} Graph complete: {} {} expanded, {} without metadata",
                style("⚠").yellow(),
                style(expanded).yellow().bold(),
                pluralize("package", expanded),
                style(failures).red().bold()
            );
        }
    }
}
