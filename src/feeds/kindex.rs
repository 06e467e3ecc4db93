//! NOAA SWPC planetary K-index feed (1-minute cadence).

use crate::feeds::FeedSource;
use crate::types::{HttpConfig, Result, WatchError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const K_INDEX_URL: &str = "https://services.swpc.noaa.gov/json/planetary_k_index_1m.json";

/// One entry of the 1-minute K-index series.
#[derive(Debug, Deserialize)]
struct KIndexEntry {
    time_tag: String,
    kp_index: f64,
}

/// Global planetary K-index source. The reading is the most recent entry.
pub struct KIndexFeed {
    client: Client,
    url: String,
}

impl KIndexFeed {
    /// Create a new K-index feed client.
    pub fn new(http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .user_agent(&http.user_agent)
            .build()?;

        Ok(Self {
            client,
            url: K_INDEX_URL.to_string(),
        })
    }

    /// Pick the most recent entry from the series.
    fn latest(entries: &[KIndexEntry]) -> Result<(&str, f64)> {
        entries
            .last()
            .map(|e| (e.time_tag.as_str(), e.kp_index))
            .ok_or_else(|| WatchError::FeedError("empty K-index series".to_string()))
    }
}

impl FeedSource for KIndexFeed {
    async fn fetch(&self) -> Result<f64> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(WatchError::HttpError(
                response.error_for_status().unwrap_err(),
            ));
        }

        let series: Vec<KIndexEntry> = response.json().await?;
        let (time_tag, kp) = Self::latest(&series)?;

        debug!(kp, time_tag, "k-index fetched");

        Ok(kp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_entry_wins() {
        let series: Vec<KIndexEntry> = serde_json::from_str(
            r#"[
                {"time_tag": "2026-03-01T17:58:00", "kp_index": 4.33},
                {"time_tag": "2026-03-01T17:59:00", "kp_index": 4.67},
                {"time_tag": "2026-03-01T18:00:00", "kp_index": 5.00}
            ]"#,
        )
        .unwrap();

        let (time_tag, kp) = KIndexFeed::latest(&series).unwrap();
        assert_eq!(time_tag, "2026-03-01T18:00:00");
        assert_eq!(kp, 5.0);
    }

    #[test]
    fn test_empty_series_is_feed_error() {
        let err = KIndexFeed::latest(&[]).unwrap_err();
        assert!(matches!(err, WatchError::FeedError(_)));
    }

    #[test]
    fn test_entry_parses_integer_kp() {
        // The feed sometimes emits whole-number indices without a decimal.
        let series: Vec<KIndexEntry> =
            serde_json::from_str(r#"[{"time_tag": "2026-03-01T18:00:00", "kp_index": 3}]"#)
                .unwrap();
        assert_eq!(series[0].kp_index, 3.0);
    }
}
