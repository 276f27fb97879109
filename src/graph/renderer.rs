use std::collections::HashSet;
use std::io::Write;

use miette::Result;
use serde::Serialize;

use super::tree::TreeRenderer;
use super::types::AdjacencyMap;
use crate::cli::GraphFormat;
use crate::constants::output::TITLE_RULE_WIDTH;
use crate::core::NodeId;
use crate::error::DeptraceError;

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(DeptraceError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(DeptraceError::from)
    };
}

/// A titled graph to render
///
/// Views with a root render as one tree; views without one render every
/// component of the graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphView<'a> {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<NodeId>,
    /// Whether `graph` maps nodes to their dependents instead of their
    /// dependencies
    pub reverse: bool,
    pub graph: &'a AdjacencyMap,
}

impl<'a> GraphView<'a> {
    pub fn forward(title: impl Into<String>, root: NodeId, graph: &'a AdjacencyMap) -> Self {
        Self {
            title: title.into(),
            root: Some(root),
            reverse: false,
            graph,
        }
    }

    pub fn overview(title: impl Into<String>, graph: &'a AdjacencyMap) -> Self {
        Self {
            title: title.into(),
            root: None,
            reverse: false,
            graph,
        }
    }

    pub fn reverse(title: impl Into<String>, root: NodeId, graph: &'a AdjacencyMap) -> Self {
        Self {
            title: title.into(),
            root: Some(root),
            reverse: true,
            graph,
        }
    }
}

/// Renders graph views as trees, DOT text or JSON
pub struct GraphRenderer {
    format: GraphFormat,
}

impl GraphRenderer {
    pub fn new(format: GraphFormat) -> Self {
        Self { format }
    }

    /// Render every view in the configured format
    pub fn render_views(&self, views: &[GraphView<'_>], output: &mut dyn Write) -> Result<()> {
        match self.format {
            GraphFormat::Tree => {
                for view in views {
                    self.render_tree(view, output)?;
                }
            }
            GraphFormat::Dot => {
                for (i, view) in views.iter().enumerate() {
                    if i > 0 {
                        writeln_out!(output)?;
                    }
                    writeln_out!(output, "// {}", view.title)?;
                    self.render_dot(view.graph, view.reverse, output)?;
                }
            }
            GraphFormat::Json => self.render_json(views, output)?,
        }
        Ok(())
    }

    /// Titled ASCII tree of one view
    pub fn render_tree(&self, view: &GraphView<'_>, output: &mut dyn Write) -> Result<()> {
        let rule = "=".repeat(TITLE_RULE_WIDTH);
        writeln_out!(output)?;
        writeln_out!(output, "{rule}")?;
        writeln_out!(output, "{}", view.title)?;
        writeln_out!(output, "{rule}")?;
        match view.root {
            Some(ref root) => TreeRenderer::render(view.graph, root, output),
            None => self.render_overview(view.graph, output),
        }
    }

    /// Every component of `graph`, one tree per root
    pub fn render_overview(&self, graph: &AdjacencyMap, output: &mut dyn Write) -> Result<()> {
        if graph.is_empty() {
            writeln_out!(output, "The graph is empty")?;
            return Ok(());
        }

        for root in graph.roots() {
            writeln_out!(output)?;
            writeln_out!(output, "Component from '{root}':")?;
            TreeRenderer::render(graph, root, output)?;
        }
        Ok(())
    }

    /// Node and edge statements for `graph`, deduplicated across the whole
    /// graph, in first-encountered order
    ///
    /// With `reverse` set every edge is flipped, which turns a map of
    /// dependents back into dependency arrows.
    pub fn render_dot(
        &self,
        graph: &AdjacencyMap,
        reverse: bool,
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "digraph G {{")?;

        let mut nodes: HashSet<&NodeId> = HashSet::new();
        let mut edges: HashSet<(&NodeId, &NodeId)> = HashSet::new();

        for (node, neighbours) in graph.iter() {
            if nodes.insert(node) {
                writeln_out!(output, "    \"{}\";", escape_dot(node))?;
            }
            for neighbour in neighbours {
                if nodes.insert(neighbour) {
                    writeln_out!(output, "    \"{}\";", escape_dot(neighbour))?;
                }
                let (from, to) = if reverse {
                    (neighbour, node)
                } else {
                    (node, neighbour)
                };
                if edges.insert((from, to)) {
                    writeln_out!(
                        output,
                        "    \"{}\" -> \"{}\";",
                        escape_dot(from),
                        escape_dot(to)
                    )?;
                }
            }
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    /// Pretty JSON array of the views
    pub fn render_json(&self, views: &[GraphView<'_>], output: &mut dyn Write) -> Result<()> {
        let json = serde_json::to_string_pretty(views).map_err(DeptraceError::from)?;
        writeln_out!(output, "{json}")?;
        Ok(())
    }
}

fn escape_dot(node: &NodeId) -> String {
    node.as_str().replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> AdjacencyMap {
        AdjacencyMap::from_adjacency([
            ("A", vec!["B", "C"]),
            ("B", vec!["D"]),
            ("C", vec!["D", "E"]),
            ("D", vec![]),
            ("E", vec!["B"]),
        ])
    }

    fn dot(graph: &AdjacencyMap, reverse: bool) -> String {
        let mut output = Vec::new();
        GraphRenderer::new(GraphFormat::Dot)
            .render_dot(graph, reverse, &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_dot_statements_in_first_seen_order() {
        let expected = r#"digraph G {
    "a";
    "b";
    "a" -> "b";
    "c";
    "a" -> "c";
    "d";
    "b" -> "d";
    "c" -> "d";
    "e";
    "c" -> "e";
    "e" -> "b";
}
"#;
        assert_eq!(dot(&sample(), false), expected);
    }

    #[test]
    fn test_dot_reverse_flips_edges() {
        let dependents = AdjacencyMap::from_adjacency([("d", vec!["b", "c"]), ("b", vec!["a"])]);
        let expected = r#"digraph G {
    "d";
    "b";
    "b" -> "d";
    "c";
    "c" -> "d";
    "a";
    "a" -> "b";
}
"#;
        assert_eq!(dot(&dependents, true), expected);
    }

    #[test]
    fn test_dot_escapes_quotes() {
        let graph = AdjacencyMap::from_adjacency([("we\"ird", Vec::<&str>::new())]);
        assert!(dot(&graph, false).contains(r#""we\"ird";"#));
    }

    #[test]
    fn test_render_views_as_dot_adds_titles() {
        let graph = sample();
        let views = [GraphView::forward("Forward", NodeId::new("a"), &graph)];
        let mut output = Vec::new();
        GraphRenderer::new(GraphFormat::Dot)
            .render_views(&views, &mut output)
            .unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("// Forward\ndigraph G {\n"));
    }

    #[test]
    fn test_render_views_as_tree() {
        let graph = AdjacencyMap::from_adjacency([("root", vec!["leaf"])]);
        let views = [GraphView::forward("Dependencies of root", NodeId::new("root"), &graph)];
        let mut output = Vec::new();
        GraphRenderer::new(GraphFormat::Tree)
            .render_views(&views, &mut output)
            .unwrap();

        let rule = "=".repeat(TITLE_RULE_WIDTH);
        let expected = format!("\n{rule}\nDependencies of root\n{rule}\nroot\n└── leaf\n");
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn test_render_views_as_json() {
        let graph = AdjacencyMap::from_adjacency([("root", vec!["leaf"])]);
        let views = [GraphView::reverse("Dependents", NodeId::new("root"), &graph)];
        let mut output = Vec::new();
        GraphRenderer::new(GraphFormat::Json)
            .render_views(&views, &mut output)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["title"], "Dependents");
        assert_eq!(value[0]["root"], "root");
        assert_eq!(value[0]["reverse"], true);
        assert_eq!(value[0]["graph"]["root"][0], "leaf");
    }

    #[test]
    fn test_overview_view_has_no_root_in_json() {
        let graph = AdjacencyMap::from_adjacency([("root", vec!["leaf"])]);
        let views = [GraphView::overview("Dependency graph", &graph)];
        let mut output = Vec::new();
        GraphRenderer::new(GraphFormat::Json)
            .render_views(&views, &mut output)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert!(value[0].get("root").is_none());
        assert_eq!(value[0]["reverse"], false);
    }

    #[test]
    fn test_overview_renders_each_root() {
        let graph = AdjacencyMap::from_adjacency([
            ("lib", vec!["core"]),
            ("app", vec!["core"]),
            ("core", vec![]),
        ]);
        let mut output = Vec::new();
        GraphRenderer::new(GraphFormat::Tree)
            .render_overview(&graph, &mut output)
            .unwrap();

        let expected = "\nComponent from 'app':\napp\n└── core\n\nComponent from 'lib':\nlib\n└── core\n";
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }
}
