//! Hand-written graph files
//!
//! One node per line, `NODE: dep1 dep2 ...`. Blank lines and lines starting
//! with `#` are skipped; `NODE:` declares a node without dependencies.

use std::path::Path;

use miette::{NamedSource, Result, SourceSpan};
use tracing::debug;

use crate::constants::SAMPLE_GRAPH;
use crate::core::NodeId;
use crate::error::{DeptraceError, GraphFileParseError};
use crate::graph::DependencyGraph;

const SAMPLE_NAME: &str = "<sample>";

pub struct GraphFile;

impl GraphFile {
    /// Read and parse the graph file at `path`
    pub fn load(path: &Path) -> Result<DependencyGraph> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DeptraceError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self::parse(&path.display().to_string(), &content)?)
    }

    /// The built-in example graph
    pub fn sample() -> Result<DependencyGraph> {
        Ok(Self::parse(SAMPLE_NAME, SAMPLE_GRAPH)?)
    }

    /// Parse graph file text; `name` labels diagnostics
    ///
    /// A node listed twice keeps its first position and takes the later
    /// dependency list.
    pub fn parse(name: &str, content: &str) -> Result<DependencyGraph, DeptraceError> {
        let mut graph = DependencyGraph::new();
        let mut offset = 0;

        for (index, raw_line) in content.split_inclusive('\n').enumerate() {
            let line_start = offset;
            offset += raw_line.len();

            let line = raw_line.trim_end_matches(['\n', '\r']);
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let invalid = |reason: &str| {
                DeptraceError::GraphFileParseError(Box::new(GraphFileParseError {
                    file: name.to_string(),
                    line: index + 1,
                    source_code: NamedSource::new(name, content.to_string()),
                    span: SourceSpan::new(line_start.into(), line.len()),
                    reason: reason.to_string(),
                }))
            };

            let Some((node, dependencies)) = line.split_once(':') else {
                return Err(invalid("missing ':' after the node name"));
            };
            let node = NodeId::new(node);
            if node.is_empty() {
                return Err(invalid("empty node name"));
            }

            let dependencies: Vec<NodeId> =
                dependencies.split_whitespace().map(NodeId::new).collect();
            if graph.contains_key(&node) {
                debug!("{name}: line {} redefines '{node}'", index + 1);
            }
            graph.insert(node, dependencies);
        }

        if graph.is_empty() {
            return Err(DeptraceError::ConfigurationError {
                message: format!("Graph file '{name}' declares no nodes"),
            });
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    fn keys(graph: &DependencyGraph) -> Vec<&str> {
        graph.keys().map(NodeId::as_str).collect()
    }

    #[test]
    fn test_parse_sample() {
        let graph = GraphFile::sample().unwrap();

        assert_eq!(keys(&graph), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(
            graph.neighbours(&NodeId::new("C")),
            [NodeId::new("d"), NodeId::new("e")]
        );
        assert!(graph.neighbours(&NodeId::new("D")).is_empty());
    }

    #[test]
    fn test_comments_blank_lines_and_crlf() {
        let content = "# header\r\n\r\napp: web  db\r\n   # indented comment\nweb:\n";
        let graph = GraphFile::parse("test.graph", content).unwrap();

        assert_eq!(keys(&graph), vec!["app", "web"]);
        assert_eq!(graph.neighbours(&NodeId::new("app")).len(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_redefinition_replaces_in_place() {
        let content = "a: b\nc: a\na: c d\n";
        let graph = GraphFile::parse("test.graph", content).unwrap();

        assert_eq!(keys(&graph), vec!["a", "c"]);
        assert_eq!(
            graph.neighbours(&NodeId::new("a")),
            [NodeId::new("c"), NodeId::new("d")]
        );
    }

    #[test]
    fn test_missing_colon_points_at_line() {
        let content = "a: b\nbroken line\n";
        let err = GraphFile::parse("test.graph", content).unwrap_err();

        let DeptraceError::GraphFileParseError(parse_error) = err else {
            panic!("expected a graph file parse error");
        };
        assert_eq!(parse_error.line, 2);
        assert_eq!(parse_error.span.offset(), 5);
        assert_eq!(parse_error.span.len(), "broken line".len());
    }

    #[test]
    fn test_empty_node_name_is_rejected() {
        let err = GraphFile::parse("test.graph", "  : b c\n").unwrap_err();
        assert!(matches!(err, DeptraceError::GraphFileParseError(_)));
        assert!(err.to_string().contains("empty node name"));
    }

    #[test]
    fn test_file_without_nodes_is_rejected() {
        let err = GraphFile::parse("test.graph", "# nothing here\n\n").unwrap_err();
        assert!(matches!(err, DeptraceError::ConfigurationError { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Root: Child").unwrap();
        writeln!(file, "Child:").unwrap();

        let graph = GraphFile::load(file.path()).unwrap();
        assert_eq!(keys(&graph), vec!["root", "child"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = GraphFile::load(&dir.path().join("missing.graph"));
        assert!(result.is_err());
    }
}
