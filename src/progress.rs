// src/progress.rs
/// Lightweight progress reporting for the scrape loop.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once before the first tick; `total` is `None` when unbounded.
    fn begin(&mut self, _total: Option<u64>) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called after a tick's rows are on disk.
    fn tick_done(&mut self, _tick: u64, _rows: usize) {}

    /// Called when a bounded run completes.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
