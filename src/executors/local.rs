//! Local graph command executor

use std::io::Write;

use console::style;
use miette::{Result, WrapErr};

use crate::common::open_output;
use crate::config::LocalGraphConfig;
use crate::error::DeptraceError;
use crate::executors::{CommandExecutor, report_cycles, report_query_error};
use crate::graph::{DependencyGraph, GraphRenderer, GraphView, ReverseIndexer};
use crate::graph_file::GraphFile;
use crate::utils::string::pluralize;

pub struct LocalGraphExecutor;

impl CommandExecutor for LocalGraphExecutor {
    type Config = LocalGraphConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let graph = match config.path.as_ref() {
            Some(path) => GraphFile::load(path)
                .wrap_err_with(|| format!("Failed to load graph file '{}'", path.display()))?,
            None => {
                eprintln!(
                    "{} No graph file given, using the built-in sample graph",
                    style("ℹ").blue()
                );
                GraphFile::sample()?
            }
        };

        eprintln!(
            "{} Loaded {} {} with {} {}",
            style("📊").cyan(),
            graph.len(),
            pluralize("node", graph.len()),
            graph.edge_count(),
            pluralize("edge", graph.edge_count())
        );

        let mut output_writer = open_output(config.output.as_ref())?;
        Self::explore(&config, &graph, output_writer.as_mut())?;
        output_writer
            .flush()
            .map_err(DeptraceError::from)
            .wrap_err("Failed to flush graph output")?;

        report_cycles(&graph);

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

impl LocalGraphExecutor {
    /// Render the overview of `graph` and, for a focus node, its forward
    /// subgraph and its dependents
    ///
    /// An unknown focus node is reported on stderr and its views skipped.
    pub fn explore(
        config: &LocalGraphConfig,
        graph: &DependencyGraph,
        output: &mut dyn Write,
    ) -> Result<()> {
        let focus = config.node.as_ref().and_then(|node| {
            if graph.contains_node(node) {
                let reverse = ReverseIndexer::invert(graph);
                Some((
                    node,
                    graph.subgraph_from(node, config.max_depth),
                    ReverseIndexer::reverse_subgraph_from(node, &reverse),
                ))
            } else {
                report_query_error(DeptraceError::unknown_node(
                    node.as_str(),
                    graph.all_nodes().into_iter().map(|n| n.as_str()),
                ));
                None
            }
        });

        let mut views = vec![GraphView::overview("Dependency graph", graph)];
        if let Some((node, ref forward, ref dependents)) = focus {
            views.push(GraphView::forward(
                format!("Dependencies of {node} (max depth {})", config.max_depth),
                node.clone(),
                forward,
            ));
            views.push(GraphView::reverse(
                format!("Nodes depending on {node}"),
                node.clone(),
                dependents,
            ));
        }

        GraphRenderer::new(config.format)
            .render_views(&views, output)
            .wrap_err("Failed to render dependency graph")?;

        Ok(())
    }
}
