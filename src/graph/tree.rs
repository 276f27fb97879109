//! ASCII tree rendering with per-path cycle detection

use std::io::Write;
use std::rc::Rc;

use miette::Result;

use super::types::AdjacencyMap;
use crate::constants::output::CYCLE_MARKER;
use crate::core::NodeId;
use crate::error::DeptraceError;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const INDENT: &str = "│   ";
const LAST_INDENT: &str = "    ";

/// One printed line of a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// Indentation and branch connector drawn before the label
    pub prefix: String,
    pub node: NodeId,
    /// The node already appears on its own path from the root and is not
    /// expanded again
    pub cycle: bool,
    /// Whether the node is a key of the rendered map (false for boundary
    /// nodes, which always render as leaves)
    pub expanded: bool,
}

impl TreeLine {
    pub fn render(&self) -> String {
        if self.cycle {
            format!("{}{} {}", self.prefix, self.node, CYCLE_MARKER)
        } else {
            format!("{}{}", self.prefix, self.node)
        }
    }
}

/// Ancestors of a stack frame, shared between siblings
struct Ancestry<'g> {
    node: &'g NodeId,
    parent: Option<Rc<Ancestry<'g>>>,
}

impl Ancestry<'_> {
    fn contains(self: &Rc<Self>, node: &NodeId) -> bool {
        let mut current = Some(self);
        while let Some(link) = current {
            if link.node == node {
                return true;
            }
            current = link.parent.as_ref();
        }
        false
    }
}

struct Frame<'g> {
    node: &'g NodeId,
    prefix: String,
    indent: String,
    ancestors: Option<Rc<Ancestry<'g>>>,
}

/// Prints a graph as a tree rooted at one node
///
/// Cycle detection is per path: a node shared by two branches (a diamond) is
/// expanded under each of them, while a node that reappears among its own
/// ancestors is printed once more with a cycle marker and not descended into.
pub struct TreeRenderer;

impl TreeRenderer {
    /// Lines of the tree rooted at `start`, in depth-first pre-order
    pub fn lines(graph: &AdjacencyMap, start: &NodeId) -> Vec<TreeLine> {
        let mut lines = Vec::new();
        let mut stack = vec![Frame {
            node: start,
            prefix: String::new(),
            indent: String::new(),
            ancestors: None,
        }];

        while let Some(frame) = stack.pop() {
            let on_path = frame
                .ancestors
                .as_ref()
                .is_some_and(|ancestors| ancestors.contains(frame.node));

            lines.push(TreeLine {
                prefix: frame.prefix,
                node: frame.node.clone(),
                cycle: on_path,
                expanded: graph.contains_key(frame.node),
            });

            if on_path {
                continue;
            }

            let path = Rc::new(Ancestry {
                node: frame.node,
                parent: frame.ancestors,
            });

            let children = graph.neighbours(frame.node);
            for (i, child) in children.iter().enumerate().rev() {
                let is_last = i + 1 == children.len();
                let (branch, indent) = if is_last {
                    (LAST_BRANCH, LAST_INDENT)
                } else {
                    (BRANCH, INDENT)
                };
                stack.push(Frame {
                    node: child,
                    prefix: format!("{}{branch}", frame.indent),
                    indent: format!("{}{indent}", frame.indent),
                    ancestors: Some(Rc::clone(&path)),
                });
            }
        }

        lines
    }

    /// Write the tree rooted at `start` to `output`
    pub fn render(graph: &AdjacencyMap, start: &NodeId, output: &mut dyn Write) -> Result<()> {
        for line in Self::lines(graph, start) {
            writeln!(output, "{}", line.render()).map_err(DeptraceError::from)?;
        }
        Ok(())
    }

    /// The tree rooted at `start` as a string
    pub fn render_to_string(graph: &AdjacencyMap, start: &NodeId) -> String {
        Self::lines(graph, start)
            .iter()
            .map(|line| line.render() + "\n")
            .collect()
    }
}
