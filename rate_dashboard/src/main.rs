//! Rate Dashboard: a terminal client that follows the USDT/BOB exchange-rate feed
//! and prints the latest month of quotes as a summary plus a paginated table.
//!
//! It subscribes to the shared polling pipeline, shows a loading line until the
//! first snapshot arrives, and re-renders whenever the source publishes changed
//! data. On a fetch failure it prints a static error message, waits one interval
//! and subscribes again. While it runs, stdin commands page through the table and
//! toggle the theme (see `input`).
//!
//! Usage example (CLI):
//! ```bash
//! rate_dashboard --source https://example.com/data.json --page 2 --share-url https://example.com/
//! ```
//!
//! The theme preference is stored in a small JSON file (see `model::theme_store`).
#![warn(missing_docs)]
mod args;
mod input;
mod model;
mod render;

use crate::args::Args;
use crate::input::{Input, spawn_stdin_reader};
use crate::model::pager::Pager;
use crate::model::share::{share_text, telegram_link, whatsapp_link};
use crate::model::theme_store::ThemeStore;
use crate::model::view::DashboardView;
use crate::render::{ERROR_MESSAGE, LOADING_MESSAGE, render_dashboard};
use chrono::Local;
use clap::Parser;
use crossbeam_channel::{Receiver, never, select};
use log::{debug, error, info, warn};
use rate_common::{FeedError, QuoteSeries, Result, Theme};
use rate_feed::{FeedEvent, PollingPipeline, QuoteSource, source_from};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};

/// How often the main loop checks for Ctrl+C while waiting.
const WAKE_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<(), FeedError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down dashboard...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| FeedError::Config(format!("failed to set Ctrl+C handler: {}", e)))?;
    }

    let store = ThemeStore::new(normalize_path(&args.theme_file));
    let theme = resolve_theme(&args, &store)?;
    info!("Theme: {} (saved in {})", theme, store.path().display());

    let source = source_from(
        &normalize_path(&args.source),
        Duration::from_secs(args.timeout_secs),
    )?;
    let pipeline =
        PollingPipeline::with_interval(source, Duration::from_secs(args.interval_secs))?;
    info!("Polling {} every {:?}", args.source.trim(), pipeline.interval());

    let inputs = if args.once {
        never()
    } else {
        info!("Commands: n (next), p (prev), <page>, t (theme), q (quit)");
        spawn_stdin_reader()
    };

    run(&pipeline, &args, &store, theme, &inputs, &shutdown)
}

/// Picks the theme from the CLI or the store, applying `--toggle-theme`.
fn resolve_theme(args: &Args, store: &ThemeStore) -> Result<Theme> {
    let mut theme = match args.theme {
        Some(theme) => theme,
        None => store.load()?,
    };
    if args.toggle_theme {
        theme = theme.toggle();
    }
    if args.theme.is_some() || args.toggle_theme {
        store.save(theme)?;
    }
    Ok(theme)
}

/// Subscribes and renders snapshots until shutdown, resubscribing after failures.
///
/// Keyboard commands re-render the last snapshot with a new page or theme.
fn run<S: QuoteSource>(
    pipeline: &PollingPipeline<S>,
    args: &Args,
    store: &ThemeStore,
    mut theme: Theme,
    inputs: &Receiver<Input>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut page = args.page;
    let mut inputs_open = true;

    while !shutdown.load(Ordering::Relaxed) {
        let subscription = pipeline.subscribe()?;
        println!("{}", LOADING_MESSAGE);
        let mut latest: Option<Arc<QuoteSeries>> = None;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                info!("Dashboard stopping...");
                return Ok(());
            }
            let input_rx = if inputs_open { inputs.clone() } else { never() };

            select! {
                recv(subscription.receiver()) -> msg => match msg {
                    Ok(FeedEvent::Snapshot(series)) => {
                        page = show_snapshot(&series, args, page, theme);
                        if args.once {
                            return Ok(());
                        }
                        latest = Some(series);
                    }
                    Ok(FeedEvent::Failed(err)) => {
                        error!("Quote feed failed: {}", err);
                        println!("{}", ERROR_MESSAGE);
                        if args.once {
                            return Err(into_feed_error(err));
                        }
                        break;
                    }
                    Err(_) => {
                        warn!("Quote feed closed");
                        break;
                    }
                },
                recv(input_rx) -> input => match input {
                    Ok(Input::Quit) => {
                        info!("Quit requested");
                        return Ok(());
                    }
                    Ok(Input::ToggleTheme) => {
                        theme = theme.toggle();
                        if let Err(e) = store.save(theme) {
                            error!("Failed to save theme: {}", e);
                        }
                        if let Some(series) = &latest {
                            page = show_snapshot(series, args, page, theme);
                        }
                    }
                    Ok(input) => {
                        if let Some(series) = &latest {
                            let view = DashboardView::new(series, Local::now().naive_local());
                            let rows = view.table(args.table_limit).len();
                            page = navigate(page, rows, args.page_size, input);
                            page = show_snapshot(series, args, page, theme);
                        }
                    }
                    Err(_) => inputs_open = false,
                },
                default(WAKE_INTERVAL) => {},
            }
        }

        drop(subscription);
        wait(Duration::from_secs(args.interval_secs), shutdown);
    }
    Ok(())
}

/// Renders one snapshot on `page` (clamped to the available pages) and returns
/// the page actually shown.
fn show_snapshot(series: &QuoteSeries, args: &Args, page: usize, theme: Theme) -> usize {
    let view = DashboardView::new(series, Local::now().naive_local());
    debug!("Snapshot with {} quotes, {} in window", series.len(), view.quotes().len());
    let rows = view.table(args.table_limit).len();
    let mut pager = Pager::new(rows, args.page_size);
    let target = page.clamp(1, pager.total_pages());
    if target != page {
        warn!("Page {} out of range 1..={}, showing page {}", page, pager.total_pages(), target);
    }
    pager.go_to(target);
    println!("{}", render_dashboard(&view, args.table_limit, &pager, theme));

    if args.chart {
        for point in view.chart_points() {
            match serde_json::to_string(&point) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to serialize chart point: {}", e),
            }
        }
    }

    if let Some(url) = args.share_url.as_deref() {
        let text = share_text(view.last());
        if !text.is_empty() {
            println!("{}", text);
            println!("WhatsApp: {}", whatsapp_link(&text, url));
            println!("Telegram: {}", telegram_link(&text, url));
        }
    }
    pager.current()
}

/// Applies a navigation command to `page` over `rows` table rows.
fn navigate(page: usize, rows: usize, page_size: usize, input: Input) -> usize {
    let mut pager = Pager::new(rows, page_size);
    let current = page.clamp(1, pager.total_pages());
    pager.go_to(current);
    match input {
        Input::Next => pager.next(),
        Input::Prev => pager.prev(),
        Input::Page(target) => {
            if !pager.go_to(target) {
                warn!("Page {} out of range 1..={}", target, pager.total_pages());
            }
        }
        Input::ToggleTheme | Input::Quit => {}
    }
    pager.current()
}

/// Recovers the typed error when this subscriber holds the only reference.
fn into_feed_error(err: Arc<FeedError>) -> FeedError {
    Arc::try_unwrap(err).unwrap_or_else(|shared| FeedError::Format(shared.to_string()))
}

/// Sleeps for `duration` in short steps so Ctrl+C stays responsive.
fn wait(duration: Duration, shutdown: &AtomicBool) {
    let deadline = Instant::now() + duration;
    while !shutdown.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep(WAKE_INTERVAL.min(deadline - now));
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}
