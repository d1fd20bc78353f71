//! screener CLI - Filter ticker lists by price and average volume.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod progress;

use progress::FetchProgress;

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Filter ticker lists by price and average volume", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (warnings and errors only, no progress bar)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch quotes for every ticker in a sheet and keep the liquid ones
    Filter(FilterArgs),

    /// Convert a gaps sheet into a TradingView watchlist
    Watchlist {
        /// Gaps sheet exported as CSV
        input: PathBuf,

        /// Watchlist output file
        #[arg(default_value = "complete_list.csv")]
        output: PathBuf,
    },

    /// Inspect or remove the quote cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,

        /// Directory holding the cache files
        #[arg(long, default_value = ".", global = true)]
        cache_dir: PathBuf,
    },
}

/// Arguments of the `filter` command.
#[derive(Args, Debug)]
pub(crate) struct FilterArgs {
    /// Ticker sheet to read
    #[arg(default_value = "complete_list.csv")]
    pub(crate) input: PathBuf,

    /// Filtered sheet to write
    #[arg(default_value = "filtered_list.csv")]
    pub(crate) output: PathBuf,

    /// Use cached quotes only, without any network requests
    #[arg(long, conflicts_with = "refresh")]
    pub(crate) cache_only: bool,

    /// Re-fetch every ticker and overwrite the cache
    #[arg(long)]
    pub(crate) refresh: bool,

    /// Directory holding the cache files
    #[arg(long, default_value = ".")]
    pub(crate) cache_dir: PathBuf,

    /// Requests per batch
    #[arg(long)]
    pub(crate) concurrency: Option<usize>,

    /// Retries per failed request
    #[arg(long)]
    pub(crate) max_retries: Option<u32>,

    /// Delay before the first retry in milliseconds, doubled on each retry
    #[arg(long)]
    pub(crate) base_delay_ms: Option<u64>,

    /// Pause between batches in milliseconds
    #[arg(long)]
    pub(crate) batch_delay_ms: Option<u64>,

    /// Minimum average daily volume
    #[arg(long)]
    pub(crate) min_volume: Option<f64>,

    /// Minimum share price
    #[arg(long)]
    pub(crate) min_price: Option<f64>,

    /// Maximum share price
    #[arg(long)]
    pub(crate) max_price: Option<f64>,
}

/// Actions on the quote cache.
#[derive(Subcommand)]
enum CacheAction {
    /// Show cache files and entry counts
    Show,

    /// Delete the cache files
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = FetchProgress::new(cli.quiet);
    progress::init_logging(cli.verbose, cli.quiet, &progress)?;

    match cli.command {
        Commands::Filter(args) => commands::filter::filter(args, &progress, cli.quiet).await,
        Commands::Watchlist { input, output } => {
            commands::watchlist::watchlist(&input, &output, cli.quiet)
        }
        Commands::Cache { action, cache_dir } => match action {
            CacheAction::Show => commands::cache::show(&cache_dir),
            CacheAction::Clear => commands::cache::clear(&cache_dir),
        },
    }
}
