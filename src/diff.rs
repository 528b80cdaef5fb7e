// src/diff.rs
//! Snapshot differ: compares the table the viewer just loaded against the
//! one it saved last time.
//!
//! Policy, in order:
//! 1. No previous table → [`Comparison::FirstRun`].
//! 2. Alignment key: the first of `coin`, `name`, `symbol`, `id` present in
//!    both tables (header match is ASCII case-insensitive). With no key, rows
//!    are paired by position, which only means something when both tables
//!    list the same entries in the same order. That weakness is accepted.
//! 3. Value column: the first column (current table order, key excluded) that
//!    is numeric in the current table and exists by name in the previous one.
//!    None → [`Comparison::NothingNumeric`]. Only that one column is compared.
//!    The key is left out even when numeric: an `id,price` table compares
//!    `price`, never `id`.
//! 4. Rows: keys present in both tables, in current-table order. A key that
//!    repeats (the data file is a time series) uses its last row in each
//!    table. Empty intersection → [`Comparison::NoOverlap`].
//! 5. `delta = cur - prev` as f64; cells that do not parse count as NaN,
//!    which yields `no change`.
//!
//! Pure and deterministic: the same two tables always give the same summary.

use std::collections::HashMap;
use std::fmt;

use crate::config::consts::KEY_CANDIDATES;
use crate::data::DataSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    NoChange,
}

impl Direction {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Up
        } else if delta < 0.0 {
            Direction::Down
        } else {
            Direction::NoChange
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::NoChange => "no change",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How rows were paired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Alignment {
    /// By this column (named as in the current table).
    Key(String),
    /// By row index.
    Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub key: String,
    pub prev: f64,
    pub cur: f64,
    pub delta: f64,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryTable {
    pub alignment: Alignment,
    /// The compared column.
    pub value_column: String,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// `key, prev_<col>, cur_<col>, delta, direction`
    pub fn headers(&self) -> Vec<String> {
        vec![
            s!("key"),
            join!("prev_", &self.value_column),
            join!("cur_", &self.value_column),
            s!("delta"),
            s!("direction"),
        ]
    }

    /// String form for display/export.
    pub fn to_dataset(&self) -> DataSet {
        let rows = self
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.key.clone(),
                    r.prev.to_string(),
                    r.cur.to_string(),
                    r.delta.to_string(),
                    s!(r.direction.as_str()),
                ]
            })
            .collect();
        DataSet::new(self.headers(), rows)
    }
}

/// Outcome of a diff. Everything but `Available` means "no comparison".
#[derive(Clone, Debug, PartialEq)]
pub enum Comparison {
    Available(SummaryTable),
    FirstRun,
    NothingNumeric,
    NoOverlap,
}

impl Comparison {
    pub fn summary(&self) -> Option<&SummaryTable> {
        match self {
            Comparison::Available(t) => Some(t),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Comparison::Available(_) => "Compared against previous snapshot",
            Comparison::FirstRun => "First run: no previous snapshot to compare",
            Comparison::NothingNumeric => "No shared numeric column to compare",
            Comparison::NoOverlap => "No overlapping rows between snapshots",
        }
    }
}

pub fn diff(current: &DataSet, previous: Option<&DataSet>) -> Comparison {
    let Some(previous) = previous else {
        return Comparison::FirstRun;
    };

    let key = alignment_key(current, previous);

    let Some((cur_col, prev_col)) = value_column(current, previous, key.map(|(c, _)| c)) else {
        return Comparison::NothingNumeric;
    };

    let pairs = match key {
        Some((ck, pk)) => keyed_pairs(current, ck, previous, pk),
        None => positional_pairs(current, previous),
    };
    if pairs.is_empty() {
        return Comparison::NoOverlap;
    }

    let rows = pairs
        .into_iter()
        .map(|(key, ci, pi)| {
            let prev = coerce(previous.cell(pi, prev_col));
            let cur = coerce(current.cell(ci, cur_col));
            let delta = cur - prev;
            SummaryRow { key, prev, cur, delta, direction: Direction::from_delta(delta) }
        })
        .collect();

    let alignment = match key {
        Some((ck, _)) => Alignment::Key(current.headers[ck].clone()),
        None => Alignment::Position,
    };

    Comparison::Available(SummaryTable {
        alignment,
        value_column: current.headers[cur_col].clone(),
        rows,
    })
}

/// (current index, previous index) of the first key candidate both tables have.
fn alignment_key(current: &DataSet, previous: &DataSet) -> Option<(usize, usize)> {
    KEY_CANDIDATES.iter().find_map(|name| {
        Some((current.column_index_ci(name)?, previous.column_index_ci(name)?))
    })
}

fn value_column(
    current: &DataSet,
    previous: &DataSet,
    key_col: Option<usize>,
) -> Option<(usize, usize)> {
    (0..current.header_count())
        .filter(|&c| Some(c) != key_col)
        .filter(|&c| current.is_numeric_column(c))
        .find_map(|c| Some((c, previous.column_index(&current.headers[c])?)))
}

/// (key, current row, previous row) for every key in both tables.
fn keyed_pairs(
    current: &DataSet,
    cur_key: usize,
    previous: &DataSet,
    prev_key: usize,
) -> Vec<(String, usize, usize)> {
    let prev_last = last_row_by_key(previous, prev_key);

    // current keys in first-seen order, each pointing at its last row
    let mut order: Vec<&str> = Vec::new();
    let cur_last = {
        let mut m: HashMap<&str, usize> = HashMap::new();
        for (ix, row) in current.rows.iter().enumerate() {
            let Some(k) = row.get(cur_key).map(|k| k.trim()) else { continue };
            if k.is_empty() { continue; }
            if m.insert(k, ix).is_none() {
                order.push(k);
            }
        }
        m
    };

    order
        .into_iter()
        .filter_map(|k| Some((s!(k), cur_last[k], *prev_last.get(k)?)))
        .collect()
}

fn last_row_by_key(table: &DataSet, col: usize) -> HashMap<&str, usize> {
    let mut m = HashMap::new();
    for (ix, row) in table.rows.iter().enumerate() {
        if let Some(k) = row.get(col).map(|k| k.trim()) {
            if !k.is_empty() {
                m.insert(k, ix);
            }
        }
    }
    m
}

fn positional_pairs(current: &DataSet, previous: &DataSet) -> Vec<(String, usize, usize)> {
    (0..current.row_count().min(previous.row_count()))
        .map(|ix| (ix.to_string(), ix, ix))
        .collect()
}

fn coerce(cell: Option<&str>) -> f64 {
    cell.and_then(|c| c.trim().parse::<f64>().ok()).unwrap_or(f64::NAN)
}
