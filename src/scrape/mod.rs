// src/scrape/mod.rs

pub mod fetcher;
pub mod listing;

pub use fetcher::{capture_timestamp, Fetcher, Source};
pub use listing::parse_listing;
