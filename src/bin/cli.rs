// src/bin/cli.rs
use clap::Parser;
use crypto_track::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = cli::TrackArgs::parse();
    log::init(args.log_file.as_deref())?;

    let summary = cli::run(&args)?;
    println!("Done: {} tick(s), {} row(s)", summary.ticks, summary.rows_written);
    Ok(())
}
