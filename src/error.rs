use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid graph file syntax in '{file}' at line {line}: {reason}")]
#[diagnostic(
    code(deptrace::graph_file_parse_error),
    help("Each line must look like `NODE: dep1 dep2 ...`; use `#` for comments")
)]
pub struct GraphFileParseError {
    pub file: String,
    pub line: usize,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("invalid line")]
    pub span: SourceSpan,
    pub reason: String,
}

#[derive(Error, Debug, Diagnostic)]
pub enum DeptraceError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(deptrace::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    GraphFileParseError(Box<GraphFileParseError>),

    #[error("Package '{package}' was not found in the registry")]
    #[diagnostic(
        code(deptrace::package_not_found),
        help("Check the package name spelling")
    )]
    PackageNotFound { package: String },

    #[error("Version {version} of package '{package}' is not available")]
    #[diagnostic(code(deptrace::version_not_found))]
    VersionNotFound { package: String, version: String },

    #[error("No usable archive for {package}=={version}")]
    #[diagnostic(
        code(deptrace::no_usable_artifact),
        help("Only wheels and zip source archives can be inspected")
    )]
    NoUsableArtifact { package: String, version: String },

    #[error("Registry request for '{package}' failed: {message}")]
    #[diagnostic(code(deptrace::registry_error))]
    RegistryError { package: String, message: String },

    #[error("Failed to download '{url}': {message}")]
    #[diagnostic(code(deptrace::fetch_error))]
    FetchError { url: String, message: String },

    #[error("Archive could not be opened: {message}")]
    #[diagnostic(code(deptrace::archive_error))]
    ArchiveError { message: String },

    #[error("Archive contains no metadata descriptor")]
    #[diagnostic(code(deptrace::metadata_not_found))]
    MetadataNotFound,

    #[error("Node '{node}' is not part of the graph")]
    #[diagnostic(code(deptrace::unknown_node))]
    UnknownNode {
        node: String,
        #[help]
        available: String,
    },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(deptrace::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("IO error")]
    #[diagnostic(
        code(deptrace::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(deptrace::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}

impl DeptraceError {
    /// Build an [`DeptraceError::UnknownNode`] listing the nodes that do exist
    pub fn unknown_node<'a, I>(node: &str, available: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names: Vec<&str> = available.into_iter().collect();
        names.sort_unstable();
        names.dedup();
        let available = if names.is_empty() {
            "The graph is empty".to_string()
        } else {
            format!("Available nodes: {}", names.join(", "))
        };
        Self::UnknownNode {
            node: node.to_string(),
            available,
        }
    }

    /// Whether the error means the registry has nothing usable for a package
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PackageNotFound { .. }
                | Self::VersionNotFound { .. }
                | Self::NoUsableArtifact { .. }
        )
    }
}
