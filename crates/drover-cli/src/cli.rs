//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Drover - batch-oriented, reversible SQL schema migrations
#[derive(Parser, Debug)]
#[command(name = "drover")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new Drover project
    Init(InitArgs),

    /// Create a migration file pair in the migrations directory
    New(NewArgs),

    /// Apply all pending migrations as one batch
    Up(UpArgs),

    /// Run the reverse script of every registered migration
    Down(DownArgs),

    /// Roll back the most recently applied batches
    Rollback(RollbackArgs),

    /// Show applied/drifted state per migration
    Status(StatusArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name (also the directory to create)
    pub name: String,

    /// Database file path written into the generated config
    #[arg(long, default_value = "drover.duckdb")]
    pub database_path: String,
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Migration name, appended to the generated prefix
    pub name: String,

    /// Use a UTC timestamp prefix instead of a sequence number
    #[arg(long)]
    pub timestamp: bool,
}

/// Arguments for the up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Continue past script failures, leaving them unrecorded
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the down command
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Continue past script failures
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the rollback command
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Number of most-recent batches to roll back
    #[arg(short = 'n', long, default_value_t = 1)]
    pub batches: usize,

    /// Ignore drift between the ledger and current definitions
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Aligned text table
    Table,
    /// JSON array
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
