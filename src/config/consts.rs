// src/config/consts.rs

// Net config
pub const SOURCE_URL: &str = "https://coinmarketcap.com/";
pub const USER_AGENT: &str = "Mozilla/5.0";

// Scrape
pub const TOP_N: usize = 10;
pub const TICK_INTERVAL_SECS: u64 = 60;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const NAME_CLASS: &str = "coin-item-symbol";

// Storage
pub const DATA_DIR: &str = "data";
pub const DATA_FILE: &str = "crypto_data.csv";
pub const FALLBACK_DATA_DIR: &str = "venv/data";
pub const PREVIOUS_FILE: &str = "previous_snapshot.csv";
pub const HEADERS: [&str; 4] = ["Name", "Price", "Change", "Timestamp"];

// Viewer
pub const KEY_CANDIDATES: [&str; 4] = ["coin", "name", "symbol", "id"];
pub const DOWNLOAD_NAME: &str = "crypto_data.csv";
pub const LOG_FILE: &str = ".store/debug.log";
