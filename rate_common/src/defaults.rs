//! Default settings shared by the feed and the dashboard.
use std::time::Duration;

/// Quote source polled when no `--source` is given.
pub const DEFAULT_SOURCE: &str = "data.json";
/// Fixed polling cadence, measured from pipeline start.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);
/// Per-request timeout for HTTP sources.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Rows per table page.
pub const PAGE_SIZE: usize = 10;
/// Most recent quotes kept in the table.
pub const TABLE_LIMIT: usize = 100;
/// File holding the persisted theme preference.
pub const THEME_FILE: &str = "theme.json";

/// Base asset of the tracked pair.
pub const BASE_ASSET: &str = "USDT";
/// Quote asset of the tracked pair.
pub const QUOTE_ASSET: &str = "BOB";
/// Where the upstream publisher takes its prices from.
pub const PRICE_ORIGIN: &str = "Binance P2P";
