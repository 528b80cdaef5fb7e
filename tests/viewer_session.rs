// tests/viewer_session.rs
//
// Viewer orchestration end to end on a temp directory, no UI.
use std::fs;
use std::path::Path;

use crypto_track::config::ViewerOptions;
use crypto_track::viewer::{Notice, Session, TableSource};
use crypto_track::Comparison;

fn opts(dir: &Path) -> ViewerOptions {
    ViewerOptions {
        data_path: dir.join("data/crypto_data.csv"),
        fallback_path: Some(dir.join("venv/data/crypto_data.csv")),
        previous_path: dir.join("data/previous_snapshot.csv"),
        download_dir: dir.join("downloads"),
    }
}

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

#[test]
fn missing_data_asks_for_upload() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Session::open(&opts(dir.path())).unwrap().is_none());
}

#[test]
fn first_run_then_compare_then_snapshot_rotates() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path());

    write(&o.data_path, "coin,price\nBTC,90\nETH,10\n");
    let first = Session::open(&o).unwrap().unwrap();
    assert_eq!(first.comparison, Comparison::FirstRun);
    assert_eq!(first.notices[0], Notice::Info(format!("Loaded: {}", o.data_path.display())));
    assert_eq!(fs::read_to_string(&o.previous_path).unwrap(), "coin,price\nBTC,90\nETH,10\n");

    write(&o.data_path, "coin,price\nBTC,100\nETH,10\n");
    let second = Session::open(&o).unwrap().unwrap();
    let s = second.comparison.summary().expect("comparison");
    assert_eq!(s.rows.len(), 2);
    assert_eq!(s.rows[0].delta, 10.0);

    // previous snapshot now mirrors the second load
    assert_eq!(fs::read_to_string(&o.previous_path).unwrap(), "coin,price\nBTC,100\nETH,10\n");
}

#[test]
fn fallback_path_is_used_when_canonical_missing() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path());
    write(o.fallback_path.as_ref().unwrap(), "coin,price\nBTC,1\n");

    let s = Session::open(&o).unwrap().unwrap();
    assert_eq!(s.source, TableSource::Disk(o.fallback_path.clone().unwrap()));
}

#[test]
fn unreadable_previous_degrades_to_first_run_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path());
    write(&o.data_path, "coin,price\nBTC,1\n");
    write(&o.previous_path, "coin,price\nBTC,1,extra\n");

    let s = Session::open(&o).unwrap().unwrap();
    assert_eq!(s.comparison, Comparison::FirstRun);
    assert_eq!(s.warnings().count(), 1);
    assert!(s.warnings().next().unwrap().contains("Previous snapshot"));
}

#[test]
fn one_corrupt_line_in_a_hundred_is_dropped_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path());

    let mut text = String::from("Name,Price,Change,Timestamp\n");
    for i in 0..100 {
        if i == 42 {
            text.push_str("BROKEN,$1,2%,2024-01-01 00:00:00,surplus\n");
        } else {
            text.push_str(&format!("C{i},$1,2%,2024-01-01 00:00:00\n"));
        }
    }
    write(&o.data_path, &text);

    let s = Session::open(&o).unwrap().unwrap();
    assert_eq!(s.table.row_count(), 99);
    let warnings: Vec<_> = s.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("1 bad line"));
}

#[test]
fn upload_loads_and_downloads_same_table() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path());
    let csv = "Name,Price,Change,Timestamp\nBTC,\"$67,000.00\",1.2%,2024-01-01 00:00:00\n";

    let s = Session::from_upload(&o, "upload.csv", csv.as_bytes()).unwrap();
    assert_eq!(s.source, TableSource::Upload("upload.csv".into()));
    assert_eq!(s.download_bytes().unwrap(), csv.as_bytes());

    let target = o.download_dir.join(s.download_name());
    let written = s.save_download(&target).unwrap();
    assert_eq!(fs::read_to_string(written).unwrap(), csv);

    // uploads also become the previous snapshot
    assert!(o.previous_path.exists());
}

#[test]
fn empty_upload_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Session::from_upload(&opts(dir.path()), "empty.csv", b"").is_err());
}

#[test]
fn stray_quote_line_does_not_swallow_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path());

    let mut text = String::from("Name,Price,Change,Timestamp\n");
    for i in 0..100 {
        if i == 42 {
            // a write cut short inside a quoted price
            text.push_str("BROKEN,\"$1,2%,2024-01-01 00:00:00\n");
        } else {
            text.push_str(&format!("C{i},\"$1,000.00\",2%,2024-01-01 00:00:00\n"));
        }
    }
    write(&o.data_path, &text);

    let s = Session::open(&o).unwrap().unwrap();
    assert_eq!(s.table.row_count(), 99);
    assert_eq!(s.table.rows[98][0], "C99");
    assert_eq!(s.table.rows[98][1], "$1,000.00");
    let warnings: Vec<_> = s.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("1 bad line"));
}

#[test]
fn unwritable_snapshot_is_a_warning_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut o = opts(dir.path());
    write(&o.data_path, "coin,price\nBTC,1\n");

    // a regular file where the snapshot's directory should be
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "x").unwrap();
    o.previous_path = blocker.join("previous_snapshot.csv");

    let s = Session::open(&o).unwrap().unwrap();
    assert_eq!(s.comparison, Comparison::FirstRun);
    assert_eq!(s.table.row_count(), 1);
    let warnings: Vec<_> = s.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Could not save snapshot"));
}
