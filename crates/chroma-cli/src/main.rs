//! Chroma CLI - color asset compiler
//!
//! Main entry point for the `chroma` binary.

use std::process::ExitCode;

use chroma_cli::cli::Cli;
use chroma_cli::CliError;
use chroma_common_log::{LogConfig, LogFormat, LogLevel};
use clap::Parser;

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();
    let format = cli.format;

    // Initialize tracing based on verbosity
    init_tracing(&cli);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return Exit::GeneralError.into();
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            e.report(format);
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    cli.execute().await
}

fn init_tracing(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }
    if std::env::var_os(chroma_common_log::vars::LOG_FORMAT).is_none() {
        config.format = LogFormat::Compact;
    }
    config.source_location |= cli.verbose >= 3;

    if let Err(e) = chroma_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
