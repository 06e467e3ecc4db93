//! Configuration handling for the monitor.
//!
//! CLI flags double as environment variables for the values the service has
//! always taken from the environment (`API_KEY`, `USER_KEY`, `LATITUDE`,
//! `LONGITUDE`, `LANGUAGE`). Validation happens once at startup; the
//! resulting [`Settings`] struct is immutable afterwards.

use crate::clock::{DaySchedule, PollIntervals};
use crate::monitor::DebouncePolicy;
use crate::thresholds::Language;
use crate::types::{Credentials, HttpConfig, Location, Result, WatchError};
use chrono::NaiveTime;
use clap::Parser;
use std::time::Duration;

/// Aurora and geomagnetic activity monitor with push notifications.
#[derive(Parser, Debug, Clone)]
#[command(name = "aurorawatch")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Pushover application API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Pushover user key
    #[arg(long, env = "USER_KEY", hide_env_values = true)]
    pub user_key: Option<String>,

    /// Observer latitude in degrees
    #[arg(long, env = "LATITUDE", allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Observer longitude in degrees, east positive
    #[arg(long, env = "LONGITUDE", allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Notification language (en, pl)
    #[arg(long, env = "LANGUAGE", default_value = "en")]
    pub language: String,

    /// Aurora feed poll interval during the day, in seconds
    #[arg(long, default_value = "300")]
    pub aurora_day_interval: u64,

    /// Aurora feed poll interval at night, in seconds
    #[arg(long, default_value = "60")]
    pub aurora_night_interval: u64,

    /// K-index feed poll interval during the day, in seconds
    #[arg(long, default_value = "300")]
    pub kindex_day_interval: u64,

    /// K-index feed poll interval at night, in seconds
    #[arg(long, default_value = "60")]
    pub kindex_night_interval: u64,

    /// Start of the local daytime window (HH:MM)
    #[arg(long, default_value = "06:00")]
    pub day_start: String,

    /// End of the local daytime window (HH:MM)
    #[arg(long, default_value = "19:00")]
    pub day_end: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Keep an alerted bucket when readings drop below all buckets
    #[arg(long)]
    pub hold_after_clear: bool,

    /// Re-send an alert that persists longer than this many seconds
    #[arg(long)]
    pub renotify_after: Option<u64>,

    /// Only print alerts and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated, immutable runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub location: Location,
    pub language: Language,
    pub schedule: DaySchedule,
    pub aurora_intervals: PollIntervals,
    pub kindex_intervals: PollIntervals,
    pub http: HttpConfig,
    pub policy: DebouncePolicy,
    pub quiet: bool,
}

impl Settings {
    /// Validate the raw configuration. Every failure here is fatal and
    /// happens before any network call.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = require(&config.api_key, "Pushover API key (set API_KEY)")?;
        let user_key = require(&config.user_key, "Pushover user key (set USER_KEY)")?;

        let latitude = config
            .latitude
            .ok_or_else(|| missing("observer latitude (set LATITUDE)"))?;
        let longitude = config
            .longitude
            .ok_or_else(|| missing("observer longitude (set LONGITUDE)"))?;
        let location = Location::new(latitude, longitude)?;

        let language: Language = config.language.parse()?;

        let schedule = DaySchedule {
            start: parse_day_boundary(&config.day_start, "--day-start")?,
            end: parse_day_boundary(&config.day_end, "--day-end")?,
        };
        if schedule.start >= schedule.end {
            return Err(WatchError::ConfigError(format!(
                "day window start {} must be before end {}",
                config.day_start, config.day_end
            )));
        }

        let aurora_intervals = intervals(config.aurora_day_interval, config.aurora_night_interval)?;
        let kindex_intervals = intervals(config.kindex_day_interval, config.kindex_night_interval)?;

        Ok(Self {
            credentials: Credentials {
                api_key: api_key.to_string(),
                user_key: user_key.to_string(),
            },
            location,
            language,
            schedule,
            aurora_intervals,
            kindex_intervals,
            http: HttpConfig {
                timeout_secs: config.timeout,
                ..HttpConfig::default()
            },
            policy: DebouncePolicy {
                hold_after_clear: config.hold_after_clear,
                renotify_after: config.renotify_after.map(Duration::from_secs),
            },
            quiet: config.quiet,
        })
    }
}

fn require<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing(what)),
    }
}

fn missing(what: &str) -> WatchError {
    WatchError::ConfigError(format!("missing {}", what))
}

fn parse_day_boundary(value: &str, flag: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| {
        WatchError::ConfigError(format!("invalid {} '{}': {}", flag, value, e))
    })
}

fn intervals(day_secs: u64, night_secs: u64) -> Result<PollIntervals> {
    if day_secs == 0 || night_secs == 0 {
        return Err(WatchError::ConfigError(
            "poll intervals must be at least 1 second".to_string(),
        ));
    }
    Ok(PollIntervals {
        day: Duration::from_secs(day_secs),
        night: Duration::from_secs(night_secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "aurorawatch",
            "--api-key",
            "app-token",
            "--user-key",
            "user-key",
            "--latitude",
            "60",
            "--longitude",
            "18",
        ]
    }

    fn parse(extra: &[&str]) -> Config {
        let mut args = base_args();
        args.extend_from_slice(extra);
        Config::parse_from(args)
    }

    #[test]
    fn test_valid_settings() {
        let settings = Settings::from_config(&parse(&[])).unwrap();
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.location.latitude, 60.0);
        assert_eq!(settings.aurora_intervals.night, Duration::from_secs(60));
        assert_eq!(settings.http.timeout_secs, 30);
        assert!(!settings.policy.hold_after_clear);
        assert_eq!(settings.policy.renotify_after, None);
    }

    #[test]
    fn test_missing_credentials_is_config_error() {
        let config = Config::parse_from([
            "aurorawatch",
            "--user-key",
            "user-key",
            "--latitude",
            "60",
            "--longitude",
            "18",
        ]);
        let err = Settings::from_config(&config).unwrap_err();
        match err {
            WatchError::ConfigError(msg) => assert!(msg.contains("API_KEY")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_language_fails_at_startup() {
        let config = parse(&["--language", "de"]);
        let err = Settings::from_config(&config).unwrap_err();
        assert!(matches!(err, WatchError::ConfigError(_)));
    }

    #[test]
    fn test_day_window_must_be_ordered() {
        let config = parse(&["--day-start", "20:00", "--day-end", "06:00"]);
        assert!(Settings::from_config(&config).is_err());
    }

    #[test]
    fn test_invalid_day_boundary_format() {
        let config = parse(&["--day-start", "6am"]);
        assert!(Settings::from_config(&config).is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = parse(&["--aurora-night-interval", "0"]);
        assert!(Settings::from_config(&config).is_err());
    }

    #[test]
    fn test_policy_knobs() {
        let config = parse(&["--hold-after-clear", "--renotify-after", "3600"]);
        let settings = Settings::from_config(&config).unwrap();
        assert!(settings.policy.hold_after_clear);
        assert_eq!(
            settings.policy.renotify_after,
            Some(Duration::from_secs(3600))
        );
    }

    #[test]
    fn test_negative_latitude_parses() {
        let config = Config::parse_from([
            "aurorawatch",
            "--api-key",
            "a",
            "--user-key",
            "u",
            "--latitude",
            "-45.5",
            "--longitude",
            "170",
        ]);
        let settings = Settings::from_config(&config).unwrap();
        assert_eq!(settings.location.latitude, -45.5);
    }
}
