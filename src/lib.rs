// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod csvio;
pub mod data;
pub mod diff;
pub mod error;
pub mod gui;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod store;
pub mod viewer;

pub use data::{DataSet, SnapshotRow};
pub use diff::{diff, Comparison, Direction, SummaryTable};
pub use error::{Error, Result};
pub use store::{append, Persister};
