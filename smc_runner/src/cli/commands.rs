use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use smc_engine::Timeframe;

#[derive(Parser)]
#[command(author, version, about = "Market-structure analysis runner")]
pub struct Cli {
    /// Path to the runner config (smc_runner.toml). Falls back to $SMC_RUNNER_CONFIG.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse a single bar file
    Analyze(AnalyzeArgs),

    /// Run every job of the config file, in file order
    Batch,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// JSON bar file (array of {time, open, high, low, close})
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Instrument name, e.g. "EURUSD"
    #[arg(long)]
    pub symbol: String,

    /// Timeframe in terminal notation: M1, M5, M15, M30, H1, H4, D1, W1, MN1
    #[arg(long)]
    pub timeframe: Timeframe,

    /// Output directory (defaults to [output].dir of the config, else ".")
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Bars required on each side of a swing
    #[arg(long)]
    pub strength: Option<usize>,

    /// Bars scanned back from a break for its order block
    #[arg(long)]
    pub lookback: Option<usize>,

    /// Maximum number of order blocks kept
    #[arg(long)]
    pub max_order_blocks: Option<usize>,

    /// Analyse only the latest N bars
    #[arg(long)]
    pub bars: Option<usize>,
}
