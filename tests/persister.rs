// tests/persister.rs
//
// Append-only data file: header once, rows accumulate.
use std::fs;

use crypto_track::config::PersistOptions;
use crypto_track::{Persister, SnapshotRow};

fn row(name: &str, ts: &str) -> SnapshotRow {
    SnapshotRow {
        name: name.into(),
        price: "$1,000.00".into(),
        change: "0.50%".into(),
        timestamp: ts.into(),
    }
}

fn lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(String::from).collect()
}

#[test]
fn first_append_creates_dirs_and_single_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/data/crypto_data.csv");
    let p = Persister::new(PersistOptions { path: path.clone() });

    let n = p.append(&[row("BTC", "2024-01-01 00:00:00")]).unwrap();
    assert_eq!(n, 1);

    let ls = lines(&path);
    assert_eq!(ls[0], "Name,Price,Change,Timestamp");
    assert_eq!(ls[1], "BTC,\"$1,000.00\",0.50%,2024-01-01 00:00:00");
    assert_eq!(ls.len(), 2);
}

#[test]
fn n_appends_of_k_rows_give_nk_plus_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crypto_data.csv");
    let p = Persister::new(PersistOptions { path: path.clone() });

    let k = 10;
    let n = 7;
    for tick in 0..n {
        let ts = format!("2024-01-01 00:{:02}:00", tick);
        let rows: Vec<_> = (0..k).map(|i| row(&format!("C{i}"), &ts)).collect();
        p.append(&rows).unwrap();
    }

    let ls = lines(&path);
    assert_eq!(ls.len(), n * k + 1);
    assert_eq!(ls.iter().filter(|l| l.starts_with("Name,")).count(), 1);
}

#[test]
fn duplicate_rows_across_runs_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crypto_data.csv");
    let r = row("ETH", "2024-01-01 00:00:00");

    crypto_track::append(&[r.clone()], &path).unwrap();
    crypto_track::append(&[r], &path).unwrap();

    assert_eq!(lines(&path).len(), 3);
}

#[test]
fn empty_append_still_creates_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crypto_data.csv");
    assert_eq!(crypto_track::append(&[], &path).unwrap(), 0);
    assert_eq!(lines(&path), vec!["Name,Price,Change,Timestamp"]);

    // an existing header is not repeated
    crypto_track::append(&[row("SOL", "t")], &path).unwrap();
    assert_eq!(lines(&path).len(), 2);
}

#[test]
fn unterminated_last_line_gets_its_own_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crypto_data.csv");
    fs::write(&path, "Name,Price,Change,Timestamp\nA,1,2,t").unwrap();

    crypto_track::append(&[row("B", "t")], &path).unwrap();

    assert_eq!(
        lines(&path),
        vec!["Name,Price,Change,Timestamp", "A,1,2,t", "B,\"$1,000.00\",0.50%,t"]
    );
}
