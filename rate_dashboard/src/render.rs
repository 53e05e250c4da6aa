//! Plain-text rendering of the dashboard for the terminal.
use std::fmt::Write;

use rate_common::Theme;
use rate_common::defaults::{BASE_ASSET, QUOTE_ASSET};

use crate::model::pager::{PageItem, Pager};
use crate::model::view::DashboardView;

/// Shown until the first snapshot or error arrives.
pub const LOADING_MESSAGE: &str = "Cargando cotizaciones...";
/// Shown when the feed reports a failure.
pub const ERROR_MESSAGE: &str = "Error al cargar las cotizaciones";

/// Renders the summary block and the current table page.
pub fn render_dashboard(view: &DashboardView, table_limit: usize, pager: &Pager, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {} / {}", theme.class_name(), BASE_ASSET, QUOTE_ASSET);

    match view.last() {
        Some(last) => {
            let _ = writeln!(out, "Last:      {:.2} ({})", last.rate, last.datetime);
            let _ = writeln!(out, "Variation: {:+.2}%", view.variation());
            let _ = writeln!(out, "High/Low:  {:.2} / {:.2}", view.max_rate(), view.min_rate());
        }
        None => {
            let _ = writeln!(out, "No quotes in the last month");
        }
    }

    let rows = view.table(table_limit);
    let _ = writeln!(out, "{:>4}  {:<20}  {:>8}", "#", "Fecha", QUOTE_ASSET);
    for (i, quote) in pager.page(rows).iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<20}  {:>8.2}",
            pager.offset() + i + 1,
            quote.datetime,
            quote.rate
        );
    }

    let pages: Vec<String> = pager
        .visible_pages()
        .iter()
        .map(|p| match p {
            PageItem::Page(n) if *n == pager.current() => format!("[{}]", n),
            other => other.to_string(),
        })
        .collect();
    let _ = write!(out, "Page {}/{}: {}", pager.current(), pager.total_pages(), pages.join(" "));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rate_common::{Quote, QuoteSeries};

    #[test]
    fn renders_summary_rows_and_pages() {
        let series: QuoteSeries = (0..12)
            .map(|m| Quote::new(format!("2026-10-19 10:{:02}:00", m), 6.90 + m as f64 / 100.0))
            .collect::<Vec<_>>()
            .into();
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let view = DashboardView::new(&series, now);
        let mut pager = Pager::new(view.table(100).len(), 10);
        pager.go_to(2);

        let text = render_dashboard(&view, 100, &pager, Theme::Light);
        assert!(text.starts_with("[theme-light] USDT / BOB"));
        assert!(text.contains("Last:      7.01 (2026-10-19 10:11:00)"));
        assert!(text.contains("  11  2026-10-19 10:10:00"));
        assert!(!text.contains("2026-10-19 10:09:00"));
        assert!(text.ends_with("Page 2/2: 1 [2]"));
    }

    #[test]
    fn renders_placeholder_without_quotes() {
        let view = DashboardView::default();
        let pager = Pager::new(0, 10);
        let text = render_dashboard(&view, 100, &pager, Theme::Dark);
        assert!(text.contains("No quotes in the last month"));
        assert!(text.ends_with("Page 1/1: [1]"));
    }
}
