//! Dashboard view of one snapshot.
//!
//! The view keeps the quotes of the last calendar month and derives the summary
//! figures, the table rows and the chart points from them. It never mutates the
//! snapshot it was built from.

use chrono::{Months, NaiveDateTime, NaiveTime};
use rate_common::{Quote, QuoteSeries};
use serde::Serialize;

/// One point of the rate chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// `HH:MM` label for the x axis.
    pub label: String,
    /// Rate for the y axis.
    pub rate: f64,
}

/// Quotes inside the display window plus derived figures.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    quotes: Vec<Quote>,
}

/// Midnight of the same day one month before `now`.
///
/// Days missing from the shorter month clamp to its last day, so Mar 31 gives
/// Feb 28. A day-overflowing calendar would roll over to Mar 3 instead and show
/// a shorter window.
pub fn window_start(now: NaiveDateTime) -> NaiveDateTime {
    let date = now.date();
    date.checked_sub_months(Months::new(1))
        .unwrap_or(date)
        .and_time(NaiveTime::MIN)
}

impl DashboardView {
    /// Keeps the quotes of `series` at or after `window_start(now)`.
    ///
    /// Quotes whose timestamp cannot be parsed are left out.
    pub fn new(series: &QuoteSeries, now: NaiveDateTime) -> Self {
        let start = window_start(now);
        let quotes = series
            .iter()
            .filter(|q| q.datetime().is_some_and(|dt| dt >= start))
            .cloned()
            .collect();
        Self { quotes }
    }

    /// Windowed quotes, oldest first.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// The most recent `limit` windowed quotes.
    pub fn table(&self, limit: usize) -> &[Quote] {
        let skip = self.quotes.len().saturating_sub(limit);
        &self.quotes[skip..]
    }

    /// Oldest windowed quote.
    pub fn first(&self) -> Option<&Quote> {
        self.quotes.first()
    }

    /// Newest windowed quote.
    pub fn last(&self) -> Option<&Quote> {
        self.quotes.last()
    }

    /// Percentage change from the first to the last quote, 0 without data.
    pub fn variation(&self) -> f64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => (last.rate - first.rate) / first.rate * 100.0,
            _ => 0.0,
        }
    }

    /// Highest rate, 0 without data.
    pub fn max_rate(&self) -> f64 {
        self.rates().reduce(f64::max).unwrap_or(0.0)
    }

    /// Lowest rate, 0 without data.
    pub fn min_rate(&self) -> f64 {
        self.rates().reduce(f64::min).unwrap_or(0.0)
    }

    /// `(HH:MM, rate)` per windowed quote, for any plotting backend.
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.quotes
            .iter()
            .map(|q| ChartPoint {
                label: q
                    .datetime()
                    .map(|dt| dt.format("%H:%M").to_string())
                    .unwrap_or_else(|| q.datetime.clone()),
                rate: q.rate,
            })
            .collect()
    }

    fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.quotes.iter().map(|q| q.rate)
    }
}
