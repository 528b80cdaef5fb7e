// src/cli.rs
//
// Command-line surfaces for both binaries. Flags map 1:1 onto the option
// structs in `config::options`; anything not given keeps its default.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::{
    config::{
        consts::{LOG_FILE, SOURCE_URL, TICK_INTERVAL_SECS, TOP_N, USER_AGENT},
        options::default_data_path,
        FetchOptions, LoopOptions, PersistOptions, ViewerOptions,
    },
    error::Result,
    progress::Progress,
    runner::{self, RunSummary},
    scrape::Fetcher,
    store::Persister,
};

/// Scrape the top listings on a fixed interval and append them to a CSV file.
#[derive(Debug, Parser)]
#[command(name = "crypto_track", version, about)]
pub struct TrackArgs {
    /// Listing page to scrape.
    #[arg(long, env = "CRYPTO_TRACK_URL", default_value = SOURCE_URL)]
    pub url: String,

    /// User-Agent header sent with each request.
    #[arg(long, env = "CRYPTO_TRACK_USER_AGENT", default_value = USER_AGENT)]
    pub user_agent: String,

    /// CSV file to append to.
    #[arg(short, long, env = "CRYPTO_TRACK_OUT", default_value_os_t = default_data_path())]
    pub out: PathBuf,

    /// Seconds between ticks.
    #[arg(long, env = "CRYPTO_TRACK_INTERVAL", default_value_t = TICK_INTERVAL_SECS)]
    pub interval: u64,

    /// Rows to keep per tick.
    #[arg(long, default_value_t = TOP_N)]
    pub limit: usize,

    /// Stop after this many ticks (default: run forever).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..), conflicts_with = "once")]
    pub ticks: Option<u64>,

    /// Single tick, then exit.
    #[arg(long)]
    pub once: bool,

    /// Request timeout in seconds (default: none).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Also append logs to this file.
    #[arg(long, env = "CRYPTO_TRACK_LOG")]
    pub log_file: Option<PathBuf>,
}

impl TrackArgs {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            url: self.url.clone(),
            user_agent: self.user_agent.clone(),
            limit: self.limit,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }

    pub fn persist_options(&self) -> PersistOptions {
        PersistOptions { path: self.out.clone() }
    }

    pub fn loop_options(&self) -> LoopOptions {
        LoopOptions {
            interval: Duration::from_secs(self.interval),
            max_ticks: if self.once { Some(1) } else { self.ticks },
        }
    }
}

/// Browse the scraped CSV and compare it with the last viewed snapshot.
#[derive(Debug, Parser)]
#[command(name = "crypto_view", version, about)]
pub struct ViewArgs {
    /// CSV to open.
    #[arg(long, env = "CRYPTO_VIEW_DATA")]
    pub data: Option<PathBuf>,

    /// Tried when --data does not exist.
    #[arg(long)]
    pub fallback: Option<PathBuf>,

    /// Snapshot file compared against and then overwritten.
    #[arg(long, env = "CRYPTO_VIEW_PREVIOUS")]
    pub previous: Option<PathBuf>,

    /// Log file (a windowed app has no console).
    #[arg(long, default_value = LOG_FILE)]
    pub log_file: PathBuf,
}

impl ViewArgs {
    pub fn viewer_options(&self) -> ViewerOptions {
        let mut opts = ViewerOptions::default();
        if let Some(p) = &self.data { opts.data_path = p.clone(); }
        if let Some(p) = &self.fallback { opts.fallback_path = Some(p.clone()); }
        if let Some(p) = &self.previous { opts.previous_path = p.clone(); }
        opts
    }
}

/// Prints one line per tick, like a console scraper would.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn tick_done(&mut self, _tick: u64, rows: usize) {
        println!("[{}] Saved {} entries", crate::scrape::capture_timestamp(), rows);
    }
}

pub fn run(args: &TrackArgs) -> Result<RunSummary> {
    let mut fetcher = Fetcher::new(args.fetch_options())?;
    let persister = Persister::new(args.persist_options());
    let mut progress = ConsoleProgress;

    runner::run(&mut fetcher, &persister, &args.loop_options(), Some(&mut progress))
}
