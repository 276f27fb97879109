//! Trace command executor

use std::io::Write;

use console::style;
use miette::{Result, WrapErr};

use crate::common::open_output;
use crate::config::TraceConfig;
use crate::error::DeptraceError;
use crate::executors::{CommandExecutor, report_cycles, report_query_error};
use crate::graph::{
    BuildOutcome, DependencyGraphBuilder, GraphRenderer, GraphView, ReverseIndexer,
};
use crate::progress::ProgressReporter;
use crate::registry::{PackageSource, RegistryClient};
use crate::utils::string::pluralize;

pub struct TraceExecutor;

impl CommandExecutor for TraceExecutor {
    type Config = TraceConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Generating {} dependency graph for {}...",
            style("📊").cyan(),
            format!("{:?}", config.format).to_lowercase(),
            style(&config.package).bold()
        );

        let client = RegistryClient::new(
            config.registry_url.as_str(),
            config.metadata_timeout,
            config.download_timeout,
        );

        let mut output_writer = open_output(config.output.as_ref())?;
        let outcome = Self::trace(&config, &client, output_writer.as_mut())?;
        output_writer
            .flush()
            .map_err(DeptraceError::from)
            .wrap_err("Failed to flush graph output")?;

        report_cycles(&outcome.graph);
        report_failures(&outcome);

        if let Some(output_path) = config.output {
            eprintln!(
                "{} Graph written to {}",
                style("✓").green(),
                style(output_path.display()).bold()
            );
        }

        Ok(())
    }
}

impl TraceExecutor {
    /// Build the graph from `source` and render the requested views
    ///
    /// An unknown reverse target is reported on stderr and its view skipped.
    pub fn trace<S: PackageSource>(
        config: &TraceConfig,
        source: S,
        output: &mut dyn Write,
    ) -> Result<BuildOutcome> {
        let mut progress = ProgressReporter::for_terminal();
        let builder = DependencyGraphBuilder::new(source, config.max_depth);
        let outcome = builder.build(&config.package, config.version.as_deref(), progress.as_mut());

        let graph = &outcome.graph;
        let dependents = config.reverse.as_ref().and_then(|target| {
            if graph.contains_node(target) {
                let reverse = ReverseIndexer::invert(graph);
                Some((
                    target,
                    ReverseIndexer::reverse_subgraph_from(target, &reverse),
                ))
            } else {
                report_query_error(DeptraceError::unknown_node(
                    target.as_str(),
                    graph.all_nodes().into_iter().map(|n| n.as_str()),
                ));
                None
            }
        });

        let mut views = vec![GraphView::forward(
            format!(
                "Dependencies of {} (max depth {})",
                config.package, config.max_depth
            ),
            config.package.clone(),
            graph,
        )];
        if let Some((target, ref subgraph)) = dependents {
            views.push(GraphView::reverse(
                format!("Packages depending on {target}"),
                target.clone(),
                subgraph,
            ));
        }

        GraphRenderer::new(config.format)
            .render_views(&views, output)
            .wrap_err("Failed to render dependency graph")?;

        Ok(outcome)
    }
}

fn report_failures(outcome: &BuildOutcome) {
    if outcome.failures.is_empty() {
        return;
    }

    eprintln!(
        "{} {} {} recorded without dependencies:",
        style("ℹ").blue(),
        outcome.failures.len(),
        pluralize("package", outcome.failures.len())
    );
    for failure in &outcome.failures {
        let marker = if failure.error.is_not_found() {
            style("?").yellow()
        } else {
            style("✗").red()
        };
        eprintln!(
            "  {} {} (depth {}): {}",
            marker,
            failure.node,
            failure.depth,
            style(&failure.error).dim()
        );
    }
}
