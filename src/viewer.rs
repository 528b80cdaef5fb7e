// src/viewer.rs
//
// What one viewer invocation does, independent of any UI toolkit:
//
//   load current table (data file, else an upload)
//     → diff against the previous snapshot
//     → overwrite the previous snapshot with the current table
//     → hand the current table back for display/download
//
// Everything recoverable ends up in `notices`; only an unreadable current
// table is an error.

use std::path::{Path, PathBuf};

use crate::config::{consts::DOWNLOAD_NAME, ViewerOptions};
use crate::csvio;
use crate::data::DataSet;
use crate::diff::{self, Comparison};
use crate::error::Result;
use crate::store::{self, Loaded};

/// Requests from the UI to whatever hosts it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerCommand {
    /// Shut the viewer down now. In-flight writes are not waited for.
    Close,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableSource {
    Disk(PathBuf),
    /// An uploaded file, by its display name.
    Upload(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(s) | Notice::Warning(s) => s,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub source: TableSource,
    pub table: DataSet,
    pub comparison: Comparison,
    pub notices: Vec<Notice>,
}

impl Session {
    /// Load from the data file (or its fallback). `Ok(None)` means neither
    /// exists and the caller should ask for an upload.
    pub fn open(opts: &ViewerOptions) -> Result<Option<Session>> {
        let Some(path) = opts.resolve_data_path() else {
            logf!("Viewer: No data file in {}", opts.search_list());
            return Ok(None);
        };

        let loaded = store::load_table(&path)?;
        logf!("Viewer: Loaded {} (rows={})", path.display(), loaded.table.row_count());

        let notices = vec![Notice::Info(format!("Loaded: {}", path.display()))];
        Ok(Some(Self::build(opts, TableSource::Disk(path), loaded, notices)))
    }

    /// Load from uploaded bytes.
    pub fn from_upload(opts: &ViewerOptions, name: &str, bytes: &[u8]) -> Result<Session> {
        let loaded = store::load_bytes(bytes)?;
        logf!("Viewer: Loaded upload {} (rows={})", name, loaded.table.row_count());

        let notices = vec![Notice::Info(format!("Loaded upload: {name}"))];
        Ok(Self::build(opts, TableSource::Upload(s!(name)), loaded, notices))
    }

    fn build(
        opts: &ViewerOptions,
        source: TableSource,
        loaded: Loaded,
        mut notices: Vec<Notice>,
    ) -> Session {
        if let Some(w) = loaded.warning() {
            logw!("Viewer: {}", w);
            notices.push(Notice::Warning(w));
        }
        let table = loaded.table;

        let previous = load_previous(&opts.previous_path, &mut notices);
        let comparison = diff::diff(&table, previous.as_ref());
        logd!("Viewer: Diff → {}", comparison.message());

        match store::save_table(&opts.previous_path, &table) {
            Ok(()) => logd!("Viewer: Snapshot saved → {}", opts.previous_path.display()),
            Err(e) => {
                logw!("Viewer: Snapshot save failed {}: {}", opts.previous_path.display(), e);
                notices.push(Notice::Warning(format!("Could not save snapshot: {e}")));
            }
        }

        Session { source, table, comparison, notices }
    }

    /// The current table as CSV bytes.
    pub fn download_bytes(&self) -> Result<Vec<u8>> {
        csvio::to_bytes(&self.table)
    }

    /// The loaded file's name, or the default for uploads.
    pub fn download_name(&self) -> String {
        match &self.source {
            TableSource::Disk(p) => p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| s!(DOWNLOAD_NAME)),
            TableSource::Upload(_) => s!(DOWNLOAD_NAME),
        }
    }

    /// Write the download to `path`. Returns the path written.
    pub fn save_download(&self, path: &Path) -> Result<PathBuf> {
        let bytes = self.download_bytes()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                store::ensure_directory(parent)?;
            }
        }
        std::fs::write(path, bytes)?;
        logf!("Viewer: Download written → {}", path.display());
        Ok(path.to_path_buf())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().filter_map(|n| match n {
            Notice::Warning(s) => Some(s.as_str()),
            Notice::Info(_) => None,
        })
    }
}

/// Missing → None. Present but unreadable → None plus a warning.
fn load_previous(path: &Path, notices: &mut Vec<Notice>) -> Option<DataSet> {
    if !path.exists() {
        return None;
    }
    match store::load_table_strict(path) {
        Ok(t) => Some(t),
        Err(e) => {
            logw!("Viewer: Previous snapshot unreadable {}: {}", path.display(), e);
            notices.push(Notice::Warning(format!(
                "Previous snapshot could not be read ({e}); comparing as first run"
            )));
            None
        }
    }
}
