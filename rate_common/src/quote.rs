//! Quote data model shared by the feed and the dashboard.
//!
//! A `Quote` is one `(timestamp, rate)` observation published by the quote source.
//! A `QuoteSeries` is the full ordered list returned by one poll. Both are
//! decoded straight from the source's JSON array and compared field by field, so
//! key order in the upstream payload never affects equality.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::Result;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Single exchange-rate observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Timestamp in the source's timezone, kept verbatim.
    #[serde(alias = "timestamp")]
    pub datetime: String,
    /// Exchange rate (units of quote asset per one base asset).
    #[serde(rename = "cotizacion", alias = "rate")]
    pub rate: f64,
}

impl Quote {
    /// Creates a quote from its raw parts.
    pub fn new(datetime: impl Into<String>, rate: f64) -> Self {
        Quote {
            datetime: datetime.into(),
            rate,
        }
    }

    /// Parses the timestamp as a wall-clock date and time.
    ///
    /// RFC 3339 values keep their local wall-clock time and drop the offset.
    /// Returns `None` when the text is not a recognised date-time.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        let raw = self.datetime.trim();
        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.naive_local())
            })
    }
}

/// Ordered list of quotes returned by one poll, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteSeries(Vec<Quote>);

impl QuoteSeries {
    /// Wraps quotes exactly as received.
    pub fn new(quotes: Vec<Quote>) -> Self {
        QuoteSeries(quotes)
    }

    /// Decodes a series from the source's JSON array.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encodes the series back to a JSON array.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Quotes in poll order.
    pub fn quotes(&self) -> &[Quote] {
        &self.0
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the poll returned no quotes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Oldest quote.
    pub fn first(&self) -> Option<&Quote> {
        self.0.first()
    }

    /// Most recent quote.
    pub fn last(&self) -> Option<&Quote> {
        self.0.last()
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.0.iter()
    }
}

impl From<Vec<Quote>> for QuoteSeries {
    fn from(quotes: Vec<Quote>) -> Self {
        QuoteSeries(quotes)
    }
}

impl<'a> IntoIterator for &'a QuoteSeries {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn decodes_source_payload() {
        let json = br#"[
            {"datetime": "2026-10-01 10:00:00", "cotizacion": 6.96},
            {"cotizacion": 6.97, "datetime": "2026-10-01 10:01:00", "extra": true}
        ]"#;
        let series = QuoteSeries::from_json_slice(json).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.first(), Some(&Quote::new("2026-10-01 10:00:00", 6.96)));
        assert_eq!(series.last().unwrap().rate, 6.97);
    }

    #[test]
    fn accepts_alternate_field_names() {
        let json = br#"[{"timestamp": "10:00", "rate": 6.96}]"#;
        let series = QuoteSeries::from_json_slice(json).unwrap();
        assert_eq!(series, QuoteSeries::new(vec![Quote::new("10:00", 6.96)]));
    }

    #[test]
    fn key_order_does_not_affect_equality() {
        let a = QuoteSeries::from_json_slice(br#"[{"datetime":"10:00","cotizacion":6.96}]"#).unwrap();
        let b = QuoteSeries::from_json_slice(br#"[{"cotizacion":6.96,"datetime":"10:00"}]"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_array_is_a_valid_series() {
        let series = QuoteSeries::from_json_slice(b"[]").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn rejects_non_array_payload() {
        assert!(QuoteSeries::from_json_slice(br#"{"datetime":"10:00"}"#).is_err());
    }

    #[test]
    fn serializes_with_source_field_names() {
        let series = QuoteSeries::new(vec![Quote::new("10:00", 6.5)]);
        let json = String::from_utf8(series.to_json_bytes().unwrap()).unwrap();
        assert_eq!(json, r#"[{"datetime":"10:00","cotizacion":6.5}]"#);
    }

    #[test]
    fn parses_supported_datetime_forms() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        assert_eq!(Quote::new("2026-10-01 10:00:00", 1.0).datetime(), Some(expected));
        assert_eq!(Quote::new("2026-10-01T10:00:00", 1.0).datetime(), Some(expected));
        assert_eq!(Quote::new("2026-10-01T10:00:00-04:00", 1.0).datetime(), Some(expected));
        assert_eq!(Quote::new("10:00", 1.0).datetime(), None);
    }
}
