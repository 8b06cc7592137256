use std::path::PathBuf;

use clap::Parser;

/// deployto - generate a deployment script for files changed since the last deploy
#[derive(Parser, Debug)]
#[command(name = "deployto")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "The script is printed to stdout unless --output is given. It is never executed.")]
pub struct Cli {
    /// Server name or alias from the config file
    pub target: String,

    /// Files, directories or `*.ext` patterns to scan (default: config `paths`, then `.`)
    pub paths: Vec<String>,

    /// Config file (default: ./deploy-to.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bash script template (overrides config `template`)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Directory remote paths are relative to (default: config `base`, then the working directory)
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Only deploy files modified after this time (unix seconds or RFC 3339)
    #[arg(short, long)]
    pub since: Option<String>,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output NDJSON events for CI
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
