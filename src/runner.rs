// src/runner.rs
//
// The scrape loop: fetch → append → sleep, until killed (or `max_ticks`).
// A failed tick ends the loop with its error; restarting is left to whatever
// supervises the process.

use std::thread;

use crate::{
    config::LoopOptions,
    error::Result,
    progress::Progress,
    scrape::Source,
    store::Persister,
};

/// Summary of what a bounded run produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub rows_written: usize,
}

/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run<S: Source + ?Sized>(
    source: &mut S,
    persister: &Persister,
    opts: &LoopOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(opts.max_ticks);
        p.log(&format!("Appending to {}", persister.path().display()));
    }
    logf!(
        "Loop: Begin out={} interval={:?} ticks={:?}",
        persister.path().display(),
        opts.interval,
        opts.max_ticks
    );

    loop {
        let written = tick(source, persister)?;
        summary.ticks += 1;
        summary.rows_written += written;

        logf!("Loop: Saved {} entries (tick {})", written, summary.ticks);
        if let Some(p) = progress.as_deref_mut() {
            p.tick_done(summary.ticks, written);
        }

        if opts.max_ticks.is_some_and(|max| summary.ticks >= max) {
            break;
        }
        thread::sleep(opts.interval);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!("Loop: Done ticks={} rows={}", summary.ticks, summary.rows_written);
    Ok(summary)
}

/// One fetch + append.
pub fn tick<S: Source + ?Sized>(source: &mut S, persister: &Persister) -> Result<usize> {
    let rows = source.fetch()?;
    persister.append(&rows)
}
