//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use chroma_common_config::{ChromaConfig, ConfigLoader, Environment};
use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::commands::{BuildCommand, CheckCommand, ListCommand};
use crate::error::CliError;

/// Chroma - color asset compiler
///
/// Turns a directory of color definition files into generated modules.
#[derive(Debug, Parser)]
#[command(
    name = "chroma",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "CHROMA_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_enum,
        help = "Output format (text, json)"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan the colors directory and write every generated module
    Build(BuildCommand),

    /// Scan the colors directory and report problems without writing
    Check(CheckCommand),

    /// Print the color table
    #[command(visible_alias = "ls")]
    List(ListCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsCommand),
}

/// Shell completions generation
#[derive(Debug, Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

impl Cli {
    /// Load configuration from the given file or the working directory.
    pub async fn load_config(&self) -> Result<ChromaConfig, CliError> {
        Environment::init()?;

        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::default(),
        };
        tracing::debug!(base = %loader.base_path().display(), "loading configuration");
        Ok(loader.load()?)
    }

    /// Execute the selected command
    pub async fn execute(self) -> Result<(), CliError> {
        // Completions need no configuration
        if let Command::Completions(cmd) = &self.command {
            return cmd.execute();
        }

        let config = self.load_config().await?;
        let ctx = CommandContext {
            config,
            format: self.format,
            quiet: self.quiet,
        };

        match self.command {
            Command::Build(cmd) => cmd.execute(&ctx).await,
            Command::Check(cmd) => cmd.execute(&ctx).await,
            Command::List(cmd) => cmd.execute(&ctx).await,
            Command::Completions(cmd) => cmd.execute(),
        }
    }
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self) -> Result<(), CliError> {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, &mut io::stdout());
        Ok(())
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: ChromaConfig,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl CommandContext {
    /// Whether human-oriented progress output should be shown.
    pub fn interactive(&self) -> bool {
        self.format == OutputFormat::Text && !self.quiet
    }
}
