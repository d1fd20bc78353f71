//! Progress bar and log output.
//!
//! Log lines are written through the progress display so an active bar is
//! hidden while a line is printed and redrawn afterwards.

use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use screener_lib::{BatchProgress, ProgressObserver};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Renders fetch progress, one bar per attribute pass.
#[derive(Debug, Clone)]
pub(crate) struct FetchProgress {
    multi: MultiProgress,
    current: Arc<Mutex<Option<ProgressBar>>>,
}

impl FetchProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        let multi = if quiet {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        } else {
            MultiProgress::new()
        };
        Self {
            multi,
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns an observer to attach to the batch scheduler.
    pub(crate) fn observer(&self) -> ProgressObserver {
        let this = self.clone();
        Arc::new(move |progress| this.update(progress))
    }

    fn update(&self, progress: BatchProgress) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };

        let bar = current.get_or_insert_with(|| {
            let bar = self.multi.add(ProgressBar::new(progress.total as u64));
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg} ({percent}%)")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            bar.set_message(format!("{} quotes", progress.kind));
            bar
        });
        bar.set_position(progress.processed as u64);

        if progress.is_done() {
            bar.finish_and_clear();
            *current = None;
        }
    }
}

/// Writes to stderr with the progress display suspended.
#[derive(Debug)]
struct SuspendingWriter {
    multi: MultiProgress,
}

impl Write for SuspendingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi.suspend(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Maps `-v` count and `-q` to a maximum log level.
pub(crate) const fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::WARN;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global log subscriber.
pub(crate) fn init_logging(verbose: u8, quiet: bool, progress: &FetchProgress) -> Result<()> {
    let multi = progress.multi.clone();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(verbose, quiet))
        .with_target(verbose > 0)
        .with_writer(move || SuspendingWriter {
            multi: multi.clone(),
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set log subscriber")
}
