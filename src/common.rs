//! Common functionality shared across commands

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::GraphFormat;

/// Common output arguments
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "DEPTRACE_FORMAT")]
    pub format: GraphFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long, env = "DEPTRACE_OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Open the output destination: a buffered file when `path` is given,
/// stdout otherwise
pub fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn io::Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to create output file '{}'", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::DeptraceError>;
}

/// Trait for configurations that can be created from CLI commands
/// This trait simplifies command-to-config conversions
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands) -> Result<Self, crate::error::DeptraceError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::DeptraceError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}

/// Error for a builder field that was never set
pub(crate) fn missing_field(field: &str) -> crate::error::DeptraceError {
    crate::error::DeptraceError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_open_output_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.dot");

        {
            let mut output = open_output(Some(&path)).unwrap();
            writeln!(output, "digraph G {{}}").unwrap();
            output.flush().unwrap();
        }

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "digraph G {}\n");
    }

    #[test]
    fn test_open_output_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("graph.dot");
        assert!(open_output(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_field_message() {
        let err = missing_field("package");
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field: package"
        );
    }
}
