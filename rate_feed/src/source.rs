//! Quote sources polled by the pipeline.
//!
//! A source returns the full recent history on every call. Two implementations
//! are provided:
//! - `HttpQuoteSource`: blocking HTTP GET of a JSON resource.
//! - `FileQuoteSource`: reads the same JSON array from a local file.
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rate_common::{FeedError, QuoteSeries, Result};
use reqwest::blocking::Client;

/// Anything that can produce a complete quote series on demand.
///
/// `fetch` is called from a background thread, once per tick.
pub trait QuoteSource: Send + Sync + 'static {
    /// Fetches the current series. Errors are not retried by the caller.
    fn fetch(&self) -> Result<QuoteSeries>;
}

/// Quote source served over HTTP.
pub struct HttpQuoteSource {
    url: String,
    client: Client,
}

impl HttpQuoteSource {
    /// Builds a source for `url` with a per-request `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// The polled resource.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch(&self) -> Result<QuoteSeries> {
        debug!("GET {}", self.url);
        let resp = self.client.get(&self.url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        let body = resp.bytes()?;
        QuoteSeries::from_json_slice(&body)
    }
}

/// Quote source backed by a JSON file on disk.
pub struct FileQuoteSource {
    path: PathBuf,
}

impl FileQuoteSource {
    /// Builds a source reading `path` on every fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuoteSource for FileQuoteSource {
    fn fetch(&self) -> Result<QuoteSeries> {
        debug!("Reading {}", self.path.display());
        let bytes = fs::read(&self.path)?;
        QuoteSeries::from_json_slice(&bytes)
    }
}

/// Picks a source for `location`: `http(s)://` URLs go over HTTP, anything else
/// is treated as a file path.
pub fn source_from(location: &str, timeout: Duration) -> Result<Box<dyn QuoteSource>> {
    let location = location.trim();
    if location.is_empty() {
        return Err(FeedError::Config("quote source location is empty".to_string()));
    }
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpQuoteSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileQuoteSource::new(location)))
    }
}

impl<T: QuoteSource> QuoteSource for Arc<T> {
    fn fetch(&self) -> Result<QuoteSeries> {
        (**self).fetch()
    }
}

impl QuoteSource for Box<dyn QuoteSource> {
    fn fetch(&self) -> Result<QuoteSeries> {
        (**self).fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rate_common::Quote;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Serves one HTTP response on a local port and returns the resource URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{}/data.json", addr)
    }

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("rate_feed_{}_{}_{}", std::process::id(), nanos, name))
    }

    #[test]
    fn file_source_reads_series() {
        let path = temp_path("quotes.json");
        fs::write(&path, r#"[{"datetime":"10:00","cotizacion":6.96}]"#).unwrap();

        let series = FileQuoteSource::new(&path).fetch().unwrap();
        assert_eq!(series, QuoteSeries::new(vec![Quote::new("10:00", 6.96)]));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn file_source_reports_missing_file() {
        let err = FileQuoteSource::new(temp_path("missing.json")).fetch().unwrap_err();
        assert!(matches!(err, FeedError::Io(_)));
    }

    #[test]
    fn file_source_reports_bad_json() {
        let path = temp_path("broken.json");
        fs::write(&path, "not json").unwrap();

        let err = FileQuoteSource::new(&path).fetch().unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn source_from_rejects_empty_location() {
        let err = source_from("  ", Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, FeedError::Config(_)));
    }

    #[test]
    fn http_source_keeps_url() {
        let source = HttpQuoteSource::new("http://127.0.0.1:9/data.json", Duration::from_secs(1)).unwrap();
        assert_eq!(source.url(), "http://127.0.0.1:9/data.json");
    }

    #[test]
    fn http_source_decodes_success_body() {
        let url = serve_once("200 OK", r#"[{"datetime":"10:00","cotizacion":6.96}]"#);
        let series = HttpQuoteSource::new(url, Duration::from_secs(5)).unwrap().fetch().unwrap();
        assert_eq!(series, QuoteSeries::new(vec![Quote::new("10:00", 6.96)]));
    }

    #[test]
    fn http_source_maps_error_status() {
        let url = serve_once("500 Internal Server Error", "oops");
        let err = HttpQuoteSource::new(url, Duration::from_secs(5)).unwrap().fetch().unwrap_err();
        assert!(matches!(err, FeedError::Status(500)));
    }

    #[test]
    fn http_source_reports_malformed_body() {
        let url = serve_once("200 OK", "{not json");
        let err = HttpQuoteSource::new(url, Duration::from_secs(5)).unwrap().fetch().unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));
    }
}
