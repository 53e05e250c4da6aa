//! Command-line arguments for the rate dashboard.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use rate_common::Theme;
use rate_common::defaults::{
    DEFAULT_SOURCE, PAGE_SIZE, POLL_INTERVAL, REQUEST_TIMEOUT, TABLE_LIMIT, THEME_FILE,
};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Quote source: an http(s) URL or a path to a JSON file.
    #[clap(long, default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Seconds between polls.
    #[clap(long, default_value_t = POLL_INTERVAL.as_secs())]
    pub interval_secs: u64,

    /// HTTP request timeout in seconds.
    #[clap(long, default_value_t = REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Table page to show (1-based).
    #[clap(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per table page.
    #[clap(long, default_value_t = PAGE_SIZE)]
    pub page_size: usize,

    /// Most recent quotes kept in the table.
    #[clap(long, default_value_t = TABLE_LIMIT)]
    pub table_limit: usize,

    /// Theme to use; overrides and updates the saved preference.
    #[clap(long, value_enum)]
    pub theme: Option<Theme>,

    /// File holding the saved theme preference.
    #[clap(long, default_value = THEME_FILE)]
    pub theme_file: String,

    /// Flip the saved theme before rendering.
    #[clap(long)]
    pub toggle_theme: bool,

    /// Page URL to build WhatsApp/Telegram share links for.
    #[clap(long)]
    pub share_url: Option<String>,

    /// Print chart points as JSON lines.
    #[clap(long)]
    pub chart: bool,

    /// Exit after the first snapshot or error instead of polling forever.
    #[clap(long)]
    pub once: bool,
}
