// src/csvio.rs
//
// CSV codec on top of the `csv` crate. Tables always carry a header row.

use std::io::{Read, Write};

use csv::{ByteRecord, ReaderBuilder, StringRecord, WriterBuilder};

use crate::data::DataSet;
use crate::error::{Error, Result};

/* ---------------- Parsing ---------------- */

/// Strict read: the first record is the header and every row must match its width.
pub fn read_strict<R: Read>(src: R) -> Result<DataSet> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(src);

    let headers = string_cells(rdr.headers()?);
    if headers.is_empty() {
        return Err(Error::EmptyTable);
    }

    let mut rows = Vec::new();
    for rec in rdr.records() {
        rows.push(string_cells(&rec?));
    }
    Ok(DataSet::new(headers, rows))
}

/// Lenient read, one physical line at a time: a line that fails to parse, has
/// invalid UTF-8, or differs from the header's width is dropped and counted.
/// Blank lines are ignored. Quoted fields cannot span lines here, so an
/// unclosed quote costs only its own line.
pub fn read_lenient<R: Read>(mut src: R) -> Result<(DataSet, usize)> {
    let mut bytes = Vec::new();
    src.read_to_end(&mut bytes)?;

    let mut lines = bytes
        .split(|b| *b == b'\n')
        .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
        .filter(|l| !l.is_empty());

    let headers = match lines
        .next()
        .map(|l| l.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(l))
        .and_then(parse_line)
    {
        Some(h) => lossy_cells(&h),
        None => return Err(Error::EmptyTable),
    };

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for line in lines {
        let row = parse_line(line)
            .filter(|r| r.len() == headers.len())
            .and_then(|r| StringRecord::from_byte_record(r).ok());
        match row {
            Some(r) => rows.push(string_cells(&r)),
            None => {
                logd!("CSV: skipping malformed line: {}", String::from_utf8_lossy(line));
                dropped += 1;
            }
        }
    }
    Ok((DataSet::new(headers, rows), dropped))
}

/// Exactly one record from one line, or None.
fn parse_line(line: &[u8]) -> Option<ByteRecord> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line);

    let mut rec = ByteRecord::new();
    match rdr.read_byte_record(&mut rec) {
        Ok(true) => {}
        _ => return None,
    }
    // a stray `\r` mid-line splits it into two records
    let mut extra = ByteRecord::new();
    match rdr.read_byte_record(&mut extra) {
        Ok(false) => Some(rec),
        _ => None,
    }
}

fn string_cells(rec: &StringRecord) -> Vec<String> {
    rec.iter().map(String::from).collect()
}

fn lossy_cells(rec: &ByteRecord) -> Vec<String> {
    rec.iter().map(|f| String::from_utf8_lossy(f).into_owned()).collect()
}

/* ---------------- Writing ---------------- */

/// Header + rows, quoting only where needed.
pub fn write_table<W: Write>(w: W, table: &DataSet) -> Result<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(w);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// The table as UTF-8 CSV bytes (what "Download CSV" hands out).
pub fn to_bytes(table: &DataSet) -> Result<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::new();
    write_table(&mut buf, table)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_rejects_ragged_rows() {
        let src = "a,b\n1,2\n3,4,5\n";
        assert!(matches!(read_strict(src.as_bytes()), Err(Error::Csv(_))));
    }

    #[test]
    fn lenient_drops_ragged_rows_and_counts_them() {
        let src = "a,b\n1,2\n3,4,5\n6\n7,8\n";
        let (t, dropped) = read_lenient(src.as_bytes()).unwrap();
        assert_eq!(dropped, 2);
        assert_eq!(t.rows, vec![vec!["1", "2"], vec!["7", "8"]]);
    }

    #[test]
    fn unclosed_quote_costs_only_its_own_line() {
        let src = "a,b,c\n1,2,3\nX,\"$1,2\n4,5,6\n7,8,9\n";
        let (t, dropped) = read_lenient(src.as_bytes()).unwrap();
        assert_eq!(dropped, 1);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.rows[2], vec!["7", "8", "9"]);
    }

    #[test]
    fn lenient_keeps_quoted_commas_and_skips_blank_lines() {
        let src = "Name,Price\r\nBTC,\"$67,000.00\"\r\n\r\nETH,\"$3,000.00\"\r\n";
        let (t, dropped) = read_lenient(src.as_bytes()).unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(t.rows, vec![vec!["BTC", "$67,000.00"], vec!["ETH", "$3,000.00"]]);
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(read_strict("".as_bytes()), Err(Error::EmptyTable)));
        assert!(matches!(read_lenient("".as_bytes()), Err(Error::EmptyTable)));
    }

    #[test]
    fn written_cells_are_quoted_only_when_needed() {
        let t = DataSet::new(
            vec![s!("Name"), s!("Price")],
            vec![vec![s!("BTC"), s!("$67,000.00")]],
        );
        let out = String::from_utf8(to_bytes(&t).unwrap()).unwrap();
        assert_eq!(out, "Name,Price\nBTC,\"$67,000.00\"\n");
    }
}
