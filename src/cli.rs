use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Incremental rating ledger for four-player ranked matches")]
pub struct Cli {
    /// Session results file (prompted for when omitted)
    pub input: Option<PathBuf>,

    /// Delta ledger to update, overriding the settings
    #[arg(long)]
    pub delta_ledger: Option<PathBuf>,

    /// Rating ledger to update, overriding the settings
    #[arg(long)]
    pub rating_ledger: Option<PathBuf>,

    /// JSON settings file (roster, rating constants, ledger paths)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_pause: bool,
}
