// src/scrape/fetcher.rs

use chrono::Local;
use reqwest::blocking::Client;

use crate::config::{consts::TIMESTAMP_FORMAT, FetchOptions};
use crate::core::net;
use crate::data::SnapshotRow;
use crate::error::Result;

use super::listing::parse_listing;

/// Where a scrape tick gets its rows from.
pub trait Source {
    fn fetch(&mut self) -> Result<Vec<SnapshotRow>>;
}

/// Live listing page over HTTP. One request per `fetch`, no retries.
pub struct Fetcher {
    opts: FetchOptions,
    client: Client,
}

impl Fetcher {
    pub fn new(opts: FetchOptions) -> Result<Self> {
        let client = net::client(opts.timeout)?;
        Ok(Self { opts, client })
    }

    pub fn options(&self) -> &FetchOptions {
        &self.opts
    }
}

impl Source for Fetcher {
    fn fetch(&mut self) -> Result<Vec<SnapshotRow>> {
        logd!("Fetch: GET {}", self.opts.url);
        let body = net::http_get(&self.client, &self.opts.url, &self.opts.user_agent)?;
        let rows = parse_listing(&body, &capture_timestamp(), self.opts.limit);
        logd!("Fetch: parsed {} row(s) from {} bytes", rows.len(), body.len());
        Ok(rows)
    }
}

/// Local wall-clock time as `YYYY-MM-DD HH:MM:SS`.
pub fn capture_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn timestamp_has_fixed_format() {
        let ts = capture_timestamp();
        assert_eq!(ts.len(), 19);
        assert!(NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }
}
