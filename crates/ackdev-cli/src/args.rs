use crate::types::LogLevel;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ackdev")]
#[command(about = "Edit generator.yaml for ACK controllers", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Append logs to this file (discarded otherwise)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Wizard settings file (TOML)")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactively build <service>-generator.yaml
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Service alias, e.g. s3
    pub service: Option<String>,

    #[arg(
        long,
        default_value = "models",
        help = "Directory of per-service model manifests"
    )]
    pub models_dir: PathBuf,

    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long, help = "Run the wizard for every service in --models-dir")]
    pub all: bool,

    #[arg(long, value_delimiter = ',', help = "Services to skip with --all")]
    pub ignore: Vec<String>,

    #[arg(long, help = "Start a new document with no resource ignored")]
    pub include_all: bool,

    #[arg(long, help = "Replay keys from a script instead of the terminal")]
    pub script: Option<PathBuf>,
}
