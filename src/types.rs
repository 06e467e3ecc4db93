//! Core types and errors for the aurora monitor.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while monitoring.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Feed error: {0}")]
    FeedError(String),

    #[error("Notification error: {0}")]
    NotifyError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, WatchError>;

/// Identity of a monitored data feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Feed {
    /// OVATION aurora probability grid, scoped to a location.
    Aurora,
    /// Planetary K-index, global.
    KIndex,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Aurora => write!(f, "aurora"),
            Feed::KIndex => write!(f, "k-index"),
        }
    }
}

/// Observer location for the aurora feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Validate coordinate ranges. Longitudes are accepted in either the
    /// -180..180 or the 0..360 east convention used by the OVATION grid.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WatchError::ConfigError(format!(
                "latitude {} out of range [-90, 90]",
                latitude
            )));
        }
        if !(-180.0..=360.0).contains(&longitude) {
            return Err(WatchError::ConfigError(format!(
                "longitude {} out of range [-180, 360]",
                longitude
            )));
        }
        Ok(Self { latitude, longitude })
    }
}

/// Pushover API credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub user_key: String,
}

/// Configuration for HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "aurorawatch/0.1".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_validates_latitude() {
        assert!(Location::new(91.0, 18.0).is_err());
        assert!(Location::new(-90.5, 18.0).is_err());
        assert!(Location::new(60.0, 18.0).is_ok());
    }

    #[test]
    fn test_location_accepts_east_longitudes() {
        assert!(Location::new(60.0, -75.0).is_ok());
        assert!(Location::new(60.0, 285.0).is_ok());
        assert!(Location::new(60.0, 361.0).is_err());
    }

    #[test]
    fn test_feed_display() {
        assert_eq!(Feed::Aurora.to_string(), "aurora");
        assert_eq!(Feed::KIndex.to_string(), "k-index");
    }
}
