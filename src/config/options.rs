// src/config/options.rs
//
// Explicit configuration for every component. Defaults come from `consts`;
// the binaries override them from the command line, tests inject their own.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub url: String,
    pub user_agent: String,
    /// How many ranked rows to keep after the header row.
    pub limit: usize,
    /// `None` leaves the transport without a request timeout.
    pub timeout: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            url: s!(SOURCE_URL),
            user_agent: s!(USER_AGENT),
            limit: TOP_N,
            timeout: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistOptions {
    pub path: PathBuf,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self { path: default_data_path() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopOptions {
    pub interval: Duration,
    /// `None` runs until the process is killed.
    pub max_ticks: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(TICK_INTERVAL_SECS),
            max_ticks: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerOptions {
    pub data_path: PathBuf,
    pub fallback_path: Option<PathBuf>,
    pub previous_path: PathBuf,
    /// Where "Download CSV" proposes to save.
    pub download_dir: PathBuf,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            fallback_path: Some(PathBuf::from(FALLBACK_DATA_DIR).join(DATA_FILE)),
            previous_path: PathBuf::from(DATA_DIR).join(PREVIOUS_FILE),
            download_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl ViewerOptions {
    /// First existing candidate: the canonical path, then the fallback.
    pub fn resolve_data_path(&self) -> Option<PathBuf> {
        std::iter::once(self.data_path.as_path())
            .chain(self.fallback_path.as_deref())
            .find(|p| p.is_file())
            .map(Path::to_path_buf)
    }

    /// Human-readable list of the places `resolve_data_path` looks.
    pub fn search_list(&self) -> String {
        let mut out = self.data_path.display().to_string();
        if let Some(fb) = &self.fallback_path {
            out.push_str(", ");
            out.push_str(&fb.display().to_string());
        }
        out
    }
}

pub fn default_data_path() -> PathBuf {
    PathBuf::from(DATA_DIR).join(DATA_FILE)
}
