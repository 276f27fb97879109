//! Trace command configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::GraphFormat;
use crate::common::missing_field;
use crate::constants::registry::{DOWNLOAD_TIMEOUT, METADATA_TIMEOUT};
use crate::core::NodeId;
use crate::error::DeptraceError;

#[derive(Debug, Clone)]
pub struct TraceConfig {
    pub package: NodeId,
    pub version: Option<String>,
    pub max_depth: usize,
    pub reverse: Option<NodeId>,
    pub registry_url: String,
    pub metadata_timeout: Duration,
    pub download_timeout: Duration,
    pub format: GraphFormat,
    pub output: Option<PathBuf>,
}

impl TraceConfig {
    pub fn builder() -> TraceConfigBuilder {
        TraceConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct TraceConfigBuilder {
    package: Option<String>,
    version: Option<String>,
    max_depth: Option<usize>,
    reverse: Option<String>,
    registry_url: Option<String>,
    metadata_timeout: Option<Duration>,
    download_timeout: Option<Duration>,
    format: Option<GraphFormat>,
    output: Option<PathBuf>,
}

impl TraceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_reverse(mut self, reverse: Option<String>) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_registry_url(mut self, registry_url: impl Into<String>) -> Self {
        self.registry_url = Some(registry_url.into());
        self
    }

    /// Defaults to the built-in metadata timeout when `None`
    pub fn with_metadata_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.metadata_timeout = timeout;
        self
    }

    /// Defaults to the built-in download timeout when `None`
    pub fn with_download_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.download_timeout = timeout;
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

impl crate::common::ConfigBuilder for TraceConfigBuilder {
    type Config = TraceConfig;

    fn build(self) -> Result<Self::Config, DeptraceError> {
        let package = NodeId::new(self.package.ok_or_else(|| missing_field("package"))?);
        if package.is_empty() {
            return Err(DeptraceError::ConfigurationError {
                message: "Package name must not be empty".to_string(),
            });
        }

        let registry_url = self
            .registry_url
            .ok_or_else(|| missing_field("registry_url"))?;
        if !(registry_url.starts_with("http://") || registry_url.starts_with("https://")) {
            return Err(DeptraceError::ConfigurationError {
                message: format!("Registry URL must start with http:// or https://: {registry_url}"),
            });
        }

        let metadata_timeout = self.metadata_timeout.unwrap_or(METADATA_TIMEOUT);
        let download_timeout = self.download_timeout.unwrap_or(DOWNLOAD_TIMEOUT);
        if metadata_timeout.is_zero() || download_timeout.is_zero() {
            return Err(DeptraceError::ConfigurationError {
                message: "Timeouts must be greater than zero".to_string(),
            });
        }

        let reverse = self.reverse.map(NodeId::new);
        if reverse.as_ref().is_some_and(NodeId::is_empty) {
            return Err(DeptraceError::ConfigurationError {
                message: "Reverse target must not be empty".to_string(),
            });
        }

        Ok(TraceConfig {
            package,
            version: self.version.map(|v| v.trim().to_string()),
            max_depth: self.max_depth.ok_or_else(|| missing_field("max_depth"))?,
            reverse,
            registry_url,
            metadata_timeout,
            download_timeout,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            output: self.output,
        })
    }
}
