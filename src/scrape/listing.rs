// src/scrape/listing.rs
//
// Listing page → snapshot rows.
//
// Assumptions about the third-party markup (best effort, may drift):
// - every ranked coin is a <tr>; the first <tr> on the page is the header
// - a usable row has more than 4 <td> cells
// - cell 2 holds <p class="coin-item-symbol">SYMBOL</p>
// - cell 3 is the displayed price, cell 4 the displayed % change
//
// Rows that do not fit are skipped silently: no error, no count.

use crate::config::consts::NAME_CLASS;
use crate::core::html::{self, TagBlocks};
use crate::data::SnapshotRow;

const NAME_CELL: usize = 2;
const PRICE_CELL: usize = 3;
const CHANGE_CELL: usize = 4;

/// Skip the header row, look at the next `limit` rows, keep the ones that parse.
/// Every kept row is stamped with `captured_at`.
pub fn parse_listing(html: &str, captured_at: &str, limit: usize) -> Vec<SnapshotRow> {
    TagBlocks::new(html, "tr")
        .skip(1)
        .take(limit)
        .filter_map(|tr| parse_row(tr.inner, captured_at))
        .collect()
}

fn parse_row(tr: &str, captured_at: &str) -> Option<SnapshotRow> {
    let cells: Vec<_> = TagBlocks::new(tr, "td").collect();
    if cells.len() <= CHANGE_CELL {
        return None;
    }

    let name = html::first_with_class(cells[NAME_CELL].inner, "p", NAME_CLASS)?.text();
    let price = cells[PRICE_CELL].text();
    let change = cells[CHANGE_CELL].text();

    if name.is_empty() || price.is_empty() || change.is_empty() {
        return None;
    }

    Some(SnapshotRow { name, price, change, timestamp: s!(captured_at) })
}
