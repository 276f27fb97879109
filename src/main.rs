use miette::Result;
use tracing_subscriber::EnvFilter;

/// Main entry point for the deptrace CLI tool
fn main() -> Result<()> {
    // Install miette's panic and error handler for beautiful error reporting
    miette::set_panic_hook();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DEPTRACE_LOG")
                .unwrap_or_else(|_| EnvFilter::new("deptrace=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Run the library's main function
    deptrace::run()
}
