//! Filter command implementation.
//!
//! Reads a ticker sheet, resolves price and average volume for every
//! ticker, then writes the sheet back with the failing tickers blanked and
//! a text report next to it.

use crate::FilterArgs;
use crate::progress::FetchProgress;
use anyhow::{Context, Result};
use screener_lib::prelude::*;
use screener_lib::{BatchScheduler, QuoteClient};
use std::collections::HashSet;
use std::time::Instant;
use tracing::info;

impl FilterArgs {
    fn cache_policy(&self) -> CachePolicy {
        if self.cache_only {
            CachePolicy::CacheOnly
        } else if self.refresh {
            CachePolicy::Refresh
        } else {
            CachePolicy::Use
        }
    }

    fn fetch_config(&self) -> FetchConfig {
        let defaults = FetchConfig::default();
        FetchConfig {
            concurrency: self.concurrency.unwrap_or(defaults.concurrency),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            base_delay_ms: self.base_delay_ms.unwrap_or(defaults.base_delay_ms),
            batch_delay_ms: self.batch_delay_ms.unwrap_or(defaults.batch_delay_ms),
            ..defaults
        }
    }

    fn thresholds(&self) -> Thresholds {
        let defaults = Thresholds::default();
        Thresholds {
            min_avg_volume: self.min_volume.unwrap_or(defaults.min_avg_volume),
            min_price: self.min_price.unwrap_or(defaults.min_price),
            max_price: self.max_price.unwrap_or(defaults.max_price),
        }
    }
}

/// Run the filter pipeline.
pub(crate) async fn filter(args: FilterArgs, progress: &FetchProgress, quiet: bool) -> Result<()> {
    let started = Instant::now();
    info!("Starting ticker filter process");

    let input = TickerInput::load(&args.input)?;
    let tickers = &input.tickers;

    let config = args.fetch_config();
    let client = QuoteClient::http(&config).context("Failed to create HTTP client")?;
    let scheduler = BatchScheduler::new(client, &config).with_observer(progress.observer());
    let orchestrator = FetchOrchestrator::new(CacheStore::new(&args.cache_dir), scheduler);

    let resolved = orchestrator.resolve(tickers, args.cache_policy()).await;

    let filter_started = Instant::now();
    let thresholds = args.thresholds();
    let outcome = filter_tickers(tickers, &resolved.prices, &resolved.volumes, &thresholds);
    info!("Filter tickers: {:.2?}", filter_started.elapsed());

    let write_started = Instant::now();
    let kept: HashSet<Ticker> = outcome.kept_tickers().into_iter().collect();
    let sheet = rewrite_csv(&input.content, &kept).context("Failed to rewrite ticker sheet")?;
    std::fs::write(&args.output, sheet)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Filtered CSV saved to {}", args.output.display());

    let report_file = report_path(&args.output);
    Report::new(&args.input, &args.output, &thresholds, &outcome)
        .write_to(&report_file)
        .with_context(|| format!("Failed to write {}", report_file.display()))?;
    info!("Write output: {:.2?}", write_started.elapsed());
    info!("Detailed report saved to {}", report_file.display());
    info!("Total execution time: {:.2?}", started.elapsed());

    if !quiet {
        println!(
            "Kept {} of {} tickers. Output written to: {}",
            outcome.kept.len(),
            outcome.total(),
            args.output.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: FilterArgs,
    }

    fn parse(argv: &[&str]) -> FilterArgs {
        let mut full = vec!["screener"];
        full.extend_from_slice(argv);
        TestCli::parse_from(full).args
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.input.to_str(), Some("complete_list.csv"));
        assert_eq!(args.output.to_str(), Some("filtered_list.csv"));
        assert_eq!(args.cache_policy(), CachePolicy::Use);
        assert_eq!(args.fetch_config(), FetchConfig::default());
        assert_eq!(args.thresholds(), Thresholds::default());
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "in.csv",
            "out.csv",
            "--refresh",
            "--concurrency",
            "5",
            "--max-retries",
            "1",
            "--batch-delay-ms",
            "0",
            "--min-volume",
            "1000",
            "--max-price",
            "50",
        ]);
        assert_eq!(args.cache_policy(), CachePolicy::Refresh);

        let config = args.fetch_config();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.batch_delay_ms, 0);
        assert_eq!(config.base_delay_ms, FetchConfig::default().base_delay_ms);

        let thresholds = args.thresholds();
        assert_eq!(thresholds.min_avg_volume, 1000.0);
        assert_eq!(thresholds.min_price, 2.0);
        assert_eq!(thresholds.max_price, 50.0);
    }

    #[test]
    fn test_cache_only_conflicts_with_refresh() {
        let result = TestCli::try_parse_from(["screener", "--cache-only", "--refresh"]);
        assert!(result.is_err());
    }
}
