// tests/listing_parse.rs
//
// Listing page parsing against synthetic markup shaped like the live page.
use chrono::NaiveDateTime;

use crypto_track::config::consts::{TIMESTAMP_FORMAT, TOP_N};
use crypto_track::scrape::{capture_timestamp, parse_listing};

fn coin_row(rank: usize) -> String {
    format!(
        r#"<tr><td><span class="icon-Star"></span></td><td><p>{rank}</p></td>
<td><div class="sc-4c05d6ef-0"><a href="/currencies/coin-{rank}/" class="cmc-link">
<p class="sc-65e7f566-0 coin-item-name">Coin {rank}</p>
<p class="sc-65e7f566-0 coin-item-symbol" color="text3">C{rank}</p></a></div></td>
<td><div class="sc-b3fc6b7-0"><span>${rank},000.00</span></div></td>
<td><span class="sc-a59753b0-0 ivvJzO"><span class="icon-Caret-up"></span>{rank}.25%</span></td>
<td><span>$1.2B</span></td></tr>"#
    )
}

fn page(n: usize) -> String {
    let body: String = (1..=n).map(coin_row).collect();
    format!(
        "<html><body><table class=\"cmc-table\"><thead><tr><th>#</th><th>Name</th><th>Price</th></tr></thead>\
         <tbody>{body}</tbody></table></body></html>"
    )
}

#[test]
fn eleven_plus_rows_yield_exactly_ten() {
    let html = page(25);
    let ts = capture_timestamp();
    let rows = parse_listing(&html, &ts, TOP_N);

    assert_eq!(rows.len(), 10);
    for (i, r) in rows.iter().enumerate() {
        assert_eq!(r.name, format!("C{}", i + 1));
        assert!(!r.price.is_empty());
        assert!(!r.change.is_empty());
        assert!(NaiveDateTime::parse_from_str(&r.timestamp, TIMESTAMP_FORMAT).is_ok());
    }
    assert_eq!(rows[2].price, "$3,000.00");
    assert_eq!(rows[2].change, "3.25%");
}

#[test]
fn short_page_yields_what_it_has() {
    let rows = parse_listing(&page(4), "2024-01-01 00:00:00", TOP_N);
    assert_eq!(rows.len(), 4);
}

#[test]
fn changed_markup_is_skipped_not_an_error() {
    // symbol class renamed upstream
    let html = page(12).replace("coin-item-symbol", "coin-symbol-v2");
    assert!(parse_listing(&html, "t", TOP_N).is_empty());
    assert!(parse_listing("", "t", TOP_N).is_empty());
}
