//! Local graph command configuration

use std::path::PathBuf;

use crate::cli::GraphFormat;
use crate::common::missing_field;
use crate::core::NodeId;
use crate::error::DeptraceError;

#[derive(Debug, Clone)]
pub struct LocalGraphConfig {
    /// Graph file; the built-in sample graph when `None`
    pub path: Option<PathBuf>,
    pub node: Option<NodeId>,
    pub max_depth: usize,
    pub format: GraphFormat,
    pub output: Option<PathBuf>,
}

impl LocalGraphConfig {
    pub fn builder() -> LocalGraphConfigBuilder {
        LocalGraphConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct LocalGraphConfigBuilder {
    path: Option<PathBuf>,
    node: Option<String>,
    max_depth: Option<usize>,
    format: Option<GraphFormat>,
    output: Option<PathBuf>,
}

impl LocalGraphConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    pub fn with_node(mut self, node: Option<String>) -> Self {
        self.node = node;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}

impl crate::common::ConfigBuilder for LocalGraphConfigBuilder {
    type Config = LocalGraphConfig;

    fn build(self) -> Result<Self::Config, DeptraceError> {
        let node = self.node.map(NodeId::new);
        if node.as_ref().is_some_and(NodeId::is_empty) {
            return Err(DeptraceError::ConfigurationError {
                message: "Node name must not be empty".to_string(),
            });
        }

        Ok(LocalGraphConfig {
            path: self.path,
            node,
            max_depth: self.max_depth.ok_or_else(|| missing_field("max_depth"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            output: self.output,
        })
    }
}
