//! NOAA SWPC OVATION aurora probability feed.
//!
//! The feed publishes a full 360x181 grid of aurora probabilities as
//! `[longitude, latitude, value]` triples; the reading for a cycle is the
//! value at the configured observer location.

use crate::feeds::FeedSource;
use crate::types::{HttpConfig, Location, Result, WatchError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const OVATION_URL: &str = "https://services.swpc.noaa.gov/json/ovation_aurora_latest.json";

/// OVATION grid response. Longitudes run 0..359 east, latitudes -90..90.
#[derive(Debug, Deserialize)]
struct OvationResponse {
    coordinates: Vec<(i32, i32, f64)>,
    #[serde(rename = "Forecast Time")]
    forecast_time: Option<String>,
}

/// Location-scoped aurora probability source.
pub struct OvationFeed {
    client: Client,
    url: String,
    location: Location,
}

impl OvationFeed {
    /// Create a new feed client for the given observer location.
    pub fn new(location: Location, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .user_agent(&http.user_agent)
            .build()?;

        Ok(Self {
            client,
            url: OVATION_URL.to_string(),
            location,
        })
    }

    /// Grid cell for a location: longitude normalized to 0..359 east,
    /// both axes rounded to the nearest grid degree.
    fn grid_cell(location: Location) -> (i32, i32) {
        let mut lon = location.longitude.round() as i32;
        if lon < 0 {
            lon += 360;
        }
        let lat = location.latitude.round() as i32;
        (lon % 360, lat)
    }

    /// Extract the local reading (and the grid maximum, as a diagnostic)
    /// from a parsed response.
    fn local_value(response: &OvationResponse, location: Location) -> Result<(f64, f64)> {
        if response.coordinates.is_empty() {
            return Err(WatchError::FeedError(
                "no aurora data available".to_string(),
            ));
        }

        let cell = Self::grid_cell(location);
        let mut local = None;
        let mut max = f64::MIN;

        for &(lon, lat, value) in &response.coordinates {
            if (lon, lat) == cell {
                local = Some(value);
            }
            if value > max {
                max = value;
            }
        }

        let local = local.unwrap_or_else(|| {
            warn!("grid cell {:?} missing from OVATION response", cell);
            0.0
        });

        Ok((local, max))
    }
}

impl FeedSource for OvationFeed {
    async fn fetch(&self) -> Result<f64> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(WatchError::HttpError(
                response.error_for_status().unwrap_err(),
            ));
        }

        let body: OvationResponse = response.json().await?;
        let (local, max) = Self::local_value(&body, self.location)?;

        debug!(
            local,
            max,
            forecast_time = body.forecast_time.as_deref().unwrap_or("unknown"),
            "ovation grid fetched"
        );

        Ok(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> OvationResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_local_value_at_configured_cell() {
        let response = parse(
            r#"{
                "Forecast Time": "2026-03-01T18:05:00Z",
                "coordinates": [[17, 60, 12], [18, 60, 45], [19, 60, 8], [120, 65, 88]]
            }"#,
        );
        let location = Location::new(60.0, 18.0).unwrap();

        let (local, max) = OvationFeed::local_value(&response, location).unwrap();
        assert_eq!(local, 45.0);
        assert_eq!(max, 88.0);
    }

    #[test]
    fn test_negative_longitude_normalized_to_east_grid() {
        // 75°W is stored at 285°E in the OVATION grid.
        let response = parse(r#"{"coordinates": [[285, 45, 33], [75, 45, 99]]}"#);
        let location = Location::new(45.0, -75.0).unwrap();

        let (local, _) = OvationFeed::local_value(&response, location).unwrap();
        assert_eq!(local, 33.0);
    }

    #[test]
    fn test_missing_cell_defaults_to_zero() {
        let response = parse(r#"{"coordinates": [[0, 0, 7]]}"#);
        let location = Location::new(60.0, 18.0).unwrap();

        let (local, max) = OvationFeed::local_value(&response, location).unwrap();
        assert_eq!(local, 0.0);
        assert_eq!(max, 7.0);
    }

    #[test]
    fn test_empty_grid_is_feed_error() {
        let response = parse(r#"{"coordinates": []}"#);
        let location = Location::new(60.0, 18.0).unwrap();

        let err = OvationFeed::local_value(&response, location).unwrap_err();
        assert!(matches!(err, WatchError::FeedError(_)));
    }

    #[test]
    fn test_grid_cell_rounding() {
        assert_eq!(
            OvationFeed::grid_cell(Location::new(59.6, 17.8).unwrap()),
            (18, 60)
        );
        assert_eq!(
            OvationFeed::grid_cell(Location::new(45.0, -0.4).unwrap()),
            (0, 45)
        );
    }
}
