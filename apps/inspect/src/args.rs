use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments of `portico-inspect`.
#[derive(Debug, Parser)]
#[command(name = "portico-inspect")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shows which operations a model exposes once its endpoints are attached")]
pub struct Cli {
    /// Model definition JSON (`name`, `relations`, `scopes`, `acls`)
    #[arg(long, value_name = "FILE")]
    pub manifest: PathBuf,

    /// Mixin options JSON (`_meta`, `whitelist`, `blacklist`); replaces the config entry
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Binding config (TOML, JSON, YAML), overridable with PORTICO__* variables
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Endpoint definitions JSON; defaults to the model's conventional file
    #[arg(long, value_name = "FILE")]
    pub definitions: Option<PathBuf>,

    /// Fail when a suppressed name is unknown to the model
    #[arg(long)]
    pub strict: bool,

    /// Log every registered endpoint and suppressed operation to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write logs to rolling files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
