use std::collections::{HashSet, VecDeque};

use tracing::{debug, warn};

use super::types::DependencyGraph;
use crate::core::NodeId;
use crate::error::DeptraceError;
use crate::metadata::DependencyExtractor;
use crate::progress::ProgressReporter;
use crate::registry::PackageSource;

/// A node whose dependencies could not be read
///
/// The node is still part of the graph, expanded with zero dependencies.
#[derive(Debug)]
pub struct NodeFailure {
    pub node: NodeId,
    pub depth: usize,
    pub error: DeptraceError,
}

/// Result of one registry build
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub graph: DependencyGraph,
    pub failures: Vec<NodeFailure>,
    /// Number of distinct nodes dequeued and processed
    pub visited: usize,
}

/// Builder for dependency graphs discovered from a package registry
///
/// Runs a breadth-first search from a root package. Each dequeued node is
/// resolved, its archive downloaded and its declared dependencies extracted;
/// any failure along the way leaves the node expanded with no dependencies.
/// Nodes further than `max_depth` hops from the root are never expanded:
/// dependencies found at `max_depth` stay in their parent's list as boundary
/// nodes.
pub struct DependencyGraphBuilder<S> {
    source: S,
    max_depth: usize,
}

impl<S: PackageSource> DependencyGraphBuilder<S> {
    /// Create a new dependency graph builder
    ///
    /// # Arguments
    /// * `source` - Registry to resolve and download packages from
    /// * `max_depth` - Largest distance from the root that is still expanded
    pub fn new(source: S, max_depth: usize) -> Self {
        Self { source, max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build the graph rooted at `root`, optionally pinned to `version`
    ///
    /// Never fails: per-node errors are recorded in
    /// [`BuildOutcome::failures`].
    pub fn build(
        &self,
        root: &NodeId,
        version: Option<&str>,
        mut progress: Option<&mut ProgressReporter>,
    ) -> BuildOutcome {
        if let Some(p) = progress.as_deref_mut() {
            p.start_build(root, self.max_depth);
        }

        let mut graph = DependencyGraph::new();
        let mut failures = Vec::new();
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue: VecDeque<(NodeId, Option<String>, usize)> =
            VecDeque::from([(root.clone(), version.map(str::to_string), 0)]);

        while let Some((node, version, depth)) = queue.pop_front() {
            if visited.contains(&node) || depth > self.max_depth {
                continue;
            }
            visited.insert(node.clone());

            if let Some(p) = progress.as_deref() {
                p.expanding(&node, depth, queue.len());
            }

            let dependencies = match self.expand(&node, version.as_deref()) {
                Ok(dependencies) => dependencies,
                Err(error) => {
                    warn!("{node}: {error}; recording it without dependencies");
                    if let Some(p) = progress.as_deref() {
                        p.node_degraded(&node, &error.to_string());
                    }
                    failures.push(NodeFailure {
                        node: node.clone(),
                        depth,
                        error,
                    });
                    Vec::new()
                }
            };

            if depth < self.max_depth {
                for dependency in &dependencies {
                    if !visited.contains(dependency) {
                        queue.push_back((dependency.clone(), None, depth + 1));
                    }
                }
            }

            graph.insert(node, dependencies);
        }

        if let Some(p) = progress {
            p.finish_build(graph.len(), failures.len());
        }

        BuildOutcome {
            graph,
            failures,
            visited: visited.len(),
        }
    }

    /// Resolve, download and read the dependencies of one node
    fn expand(&self, node: &NodeId, version: Option<&str>) -> Result<Vec<NodeId>, DeptraceError> {
        let artifact = self.source.resolve_package(node, version)?;
        debug!(
            "{node} resolved to {} ({})",
            artifact.version, artifact.filename
        );

        let archive = self.source.download_archive(&artifact.url)?;
        let dependencies = DependencyExtractor::try_extract_dependencies(&archive)?;
        debug!("{node} declares {} dependencies", dependencies.len());

        Ok(dependencies)
    }
}
