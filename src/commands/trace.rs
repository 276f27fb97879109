//! Trace command implementation

use std::time::Duration;

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::TraceConfig;
use crate::error::DeptraceError;

impl FromCommand for TraceConfig {
    fn from_command(command: Commands) -> Result<Self, DeptraceError> {
        match command {
            Commands::Trace {
                package,
                version,
                max_depth,
                reverse,
                registry,
                metadata_timeout,
                download_timeout,
                output,
            } => TraceConfig::builder()
                .with_package(package)
                .with_version(version)
                .with_max_depth(max_depth)
                .with_reverse(reverse)
                .with_registry_url(registry)
                .with_metadata_timeout(metadata_timeout.map(Duration::from_secs))
                .with_download_timeout(download_timeout.map(Duration::from_secs))
                .with_format(output.format)
                .with_output(output.output)
                .build(),
            _ => Err(DeptraceError::ConfigurationError {
                message: "Invalid command type for TraceConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(TraceConfig);

/// Execute the trace command for registry dependency graphs
pub fn execute_trace_command(command: Commands) -> Result<()> {
    let config = TraceConfig::from_command(command)
        .wrap_err("Failed to parse trace command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::trace::TraceExecutor;
    TraceExecutor::execute(config)
}
