// src/store.rs
//
// On-disk side of the tracker: the append-only data file written by the
// scrape loop, and whole-table reads/writes used by the viewer.

use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use csv::WriterBuilder;

use crate::config::{consts::HEADERS, PersistOptions};
use crate::csvio;
use crate::data::{DataSet, SnapshotRow};
use crate::error::Result;

/// Appends snapshot rows to the data file. Single writer; no locking.
#[derive(Clone, Debug)]
pub struct Persister {
    path: PathBuf,
}

impl Persister {
    pub fn new(opts: PersistOptions) -> Self {
        Self { path: opts.path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// See [`append`].
    pub fn append(&self, rows: &[SnapshotRow]) -> Result<usize> {
        append(rows, &self.path)
    }
}

/// Append `rows` to `path`, creating parent dirs, and the file with its
/// header line, on first use. The header is never written twice.
/// Returns the number of rows written.
pub fn append(rows: &[SnapshotRow], path: &Path) -> Result<usize> {
    ensure_parent(path)?;

    let needs_header = match fs::metadata(path) {
        Ok(m) => m.len() == 0,
        Err(_) => true,
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    // a write cut short by a kill can leave the last line unterminated
    if !needs_header && !ends_with_newline(path)? {
        file.write_all(b"\n")?;
    }
    let mut wtr = WriterBuilder::new().from_writer(BufWriter::new(file));
    if needs_header {
        wtr.write_record(HEADERS)?;
    }
    for row in rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;

    logd!("Store: appended {} row(s) → {}", rows.len(), path.display());
    Ok(rows.len())
}

fn ends_with_newline(path: &Path) -> Result<bool> {
    let mut f = File::open(path)?;
    if f.metadata()?.len() == 0 {
        return Ok(true);
    }
    f.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    f.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// A table read from CSV, noting whether the lenient fallback was needed.
#[derive(Clone, Debug)]
pub struct Loaded {
    pub table: DataSet,
    /// Strict parsing failed and the lenient reader produced `table`.
    pub recovered: bool,
    /// Records the lenient reader skipped.
    pub dropped: usize,
}

impl Loaded {
    pub fn warning(&self) -> Option<String> {
        self.recovered.then(|| {
            format!("CSV is malformed; read it while skipping {} bad line(s)", self.dropped)
        })
    }
}

/// Strict parse, falling back once to a lenient parse on malformed input.
pub fn load_bytes(bytes: &[u8]) -> Result<Loaded> {
    match csvio::read_strict(bytes) {
        Ok(table) => Ok(Loaded { table, recovered: false, dropped: 0 }),
        Err(e) if e.is_recoverable_parse() => {
            logw!("CSV: strict parse failed ({}); retrying leniently", e);
            let (table, dropped) = csvio::read_lenient(bytes)?;
            Ok(Loaded { table, recovered: true, dropped })
        }
        Err(e) => Err(e),
    }
}

pub fn load_table(path: &Path) -> Result<Loaded> {
    let bytes = fs::read(path)?;
    load_bytes(&bytes)
}

/// Strict read only; used for the previous snapshot, which this program wrote itself.
pub fn load_table_strict(path: &Path) -> Result<DataSet> {
    let bytes = fs::read(path)?;
    csvio::read_strict(bytes.as_slice())
}

/// Overwrite `path` with `table` (header included).
pub fn save_table(path: &Path, table: &DataSet) -> Result<()> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?); // truncate/overwrite
    csvio::write_table(&mut out, table)?;
    out.flush()?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )
        .into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
