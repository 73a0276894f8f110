// HTTP implementation of the CSV source
use crate::application::csv_source::{CsvSource, FetchError};
use crate::infrastructure::config::SourceSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate, Utc};
use reqwest::header::{ACCEPT, CACHE_CONTROL, EXPIRES, PRAGMA};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    /// A fixed export such as `export.csv`.
    Fixed(String),
    /// Station endpoint taking the day to export as query parameters.
    Station(String),
}

#[derive(Debug, Clone)]
pub struct HttpCsvSource {
    client: reqwest::Client,
    location: ResourceLocation,
}

impl HttpCsvSource {
    pub fn new(settings: &SourceSettings) -> Result<Self> {
        let location = match (&settings.station, &settings.url) {
            (Some(station), _) => ResourceLocation::Station(station.base_url.clone()),
            (None, Some(url)) => ResourceLocation::Fixed(url.clone()),
            (None, None) => anyhow::bail!("no CSV source configured"),
        };

        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, location })
    }

    fn resource_url(&self, today: NaiveDate) -> String {
        match &self.location {
            ResourceLocation::Fixed(url) => url.clone(),
            ResourceLocation::Station(base) => station_url(base, today),
        }
    }
}

/// Station export for a single day: `gg`/`mm`/`aa` open the range and
/// `gg2`/`mm2`/`aa2` close it. Year is two digits, nothing is zero-padded.
pub fn station_url(base: &str, day: NaiveDate) -> String {
    let (d, m, y) = (day.day(), day.month(), day.year() % 100);
    format!(
        "{}?gg={d}&mm={m}&aa={y}&gg2={d}&mm2={m}&aa2={y}",
        base.trim_end_matches('?')
    )
}

/// Append a `t=<millis>` parameter so no cache along the way can answer.
pub fn cache_busted(url: &str, millis: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, millis)
}

#[async_trait]
impl CsvSource for HttpCsvSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let url = cache_busted(
            &self.resource_url(Local::now().date_naive()),
            Utc::now().timestamp_millis(),
        );
        tracing::debug!(%url, "fetching station CSV");

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
            .header(PRAGMA, "no-cache")
            .header(EXPIRES, "0")
            .header(ACCEPT, "text/csv,text/plain,*/*")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let text = response
            .text()
            .await
            .map_err(|source| FetchError::Body {
                url: url.clone(),
                source,
            })?;

        tracing::debug!(%url, bytes = text.len(), "station CSV received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::StationSettings;

    fn settings(url: Option<&str>, station: Option<&str>) -> SourceSettings {
        SourceSettings {
            url: url.map(str::to_string),
            station: station.map(|base| StationSettings {
                base_url: base.to_string(),
            }),
            user_agent: "test".to_string(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn test_cache_busted() {
        assert_eq!(
            cache_busted("http://localhost/export.csv", 1709303400000),
            "http://localhost/export.csv?t=1709303400000"
        );
        assert_eq!(
            cache_busted("http://localhost/csv.php?gg=1", 5),
            "http://localhost/csv.php?gg=1&t=5"
        );
    }

    #[test]
    fn test_station_url() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            station_url("https://station.example/dati/csv.php", day),
            "https://station.example/dati/csv.php?gg=1&mm=3&aa=24&gg2=1&mm2=3&aa2=24"
        );

        let day = NaiveDate::from_ymd_opt(2005, 12, 31).unwrap();
        assert_eq!(
            station_url("https://station.example/csv.php?", day),
            "https://station.example/csv.php?gg=31&mm=12&aa=5&gg2=31&mm2=12&aa2=5"
        );
    }

    #[test]
    fn test_location_prefers_station() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let fixed = HttpCsvSource::new(&settings(Some("http://localhost/export.csv"), None)).unwrap();
        assert_eq!(fixed.resource_url(day), "http://localhost/export.csv");

        let station = HttpCsvSource::new(&settings(
            Some("http://localhost/export.csv"),
            Some("http://station/csv.php"),
        ))
        .unwrap();
        assert_eq!(
            station.resource_url(day),
            "http://station/csv.php?gg=1&mm=3&aa=24&gg2=1&mm2=3&aa2=24"
        );

        assert!(HttpCsvSource::new(&settings(None, None)).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let source = HttpCsvSource::new(&settings(Some("http://127.0.0.1:9/export.csv"), None)).unwrap();
        match source.fetch().await {
            Err(FetchError::Transport { url, .. }) => {
                assert!(url.starts_with("http://127.0.0.1:9/export.csv?t="));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    /// Accept one connection, answer it with `response` and hand back the
    /// raw request head.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        (format!("http://{}/export.csv", addr), handle)
    }

    #[tokio::test]
    async fn test_error_status_and_request_headers() {
        let (url, server) =
            serve_once("HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;
        let source = HttpCsvSource::new(&settings(Some(&url), None)).unwrap();

        match source.fetch().await {
            Err(FetchError::Status { status, url: failed }) => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
                assert!(failed.starts_with(&format!("{}?t=", url)));
            }
            other => panic!("expected status error, got {:?}", other),
        }

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /export.csv?t="), "{}", request);
        assert!(request.contains("cache-control: no-cache, no-store, must-revalidate"));
        assert!(request.contains("pragma: no-cache"));
        assert!(request.contains("expires: 0"));
        assert!(request.contains("user-agent: test"));
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: 9\r\nConnection: close\r\n\r\nData;Ora\n",
        )
        .await;
        let source = HttpCsvSource::new(&settings(Some(&url), None)).unwrap();

        assert_eq!(source.fetch().await.unwrap(), "Data;Ora\n");
        server.await.unwrap();
    }
}
