//! Local command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::LocalGraphConfig;
use crate::error::DeptraceError;

impl FromCommand for LocalGraphConfig {
    fn from_command(command: Commands) -> Result<Self, DeptraceError> {
        match command {
            Commands::Local {
                path,
                node,
                max_depth,
                output,
            } => LocalGraphConfig::builder()
                .with_path(path)
                .with_node(node)
                .with_max_depth(max_depth)
                .with_format(output.format)
                .with_output(output.output)
                .build(),
            _ => Err(DeptraceError::ConfigurationError {
                message: "Invalid command type for LocalGraphConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(LocalGraphConfig);

/// Execute the local command for hand-written graph files
pub fn execute_local_command(command: Commands) -> Result<()> {
    let config = LocalGraphConfig::from_command(command)
        .wrap_err("Failed to parse local command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::local::LocalGraphExecutor;
    LocalGraphExecutor::execute(config)
}
