//! Threshold tables mapping feed readings to localized alert messages.
//!
//! Each feed has a static table of severity buckets ordered descending by
//! lower bound; evaluation picks the highest bucket the reading satisfies.

use crate::types::{Feed, Result, WatchError};
use std::fmt;
use std::str::FromStr;

/// Notification language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Pl,
}

impl FromStr for Language {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "pl" => Ok(Language::Pl),
            other => Err(WatchError::ConfigError(format!(
                "unsupported language '{}' (supported: en, pl)",
                other
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Pl => write!(f, "pl"),
        }
    }
}

/// One severity tier: readings at or above `bucket` qualify.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdEntry {
    pub bucket: f64,
    pub message: &'static str,
    /// Pushover priority: 1 for the top tier, 0 otherwise.
    pub priority: i8,
}

/// Immutable per-feed threshold table, ordered descending by bucket.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    feed: Feed,
    language: Language,
    entries: Vec<ThresholdEntry>,
}

impl ThresholdTable {
    /// Build the table for a feed in the given language.
    pub fn new(feed: Feed, language: Language) -> Self {
        let entries = match (feed, language) {
            (Feed::Aurora, Language::En) => aurora_en(),
            (Feed::Aurora, Language::Pl) => aurora_pl(),
            (Feed::KIndex, Language::En) => kindex_en(),
            (Feed::KIndex, Language::Pl) => kindex_pl(),
        };
        debug_assert!(entries.windows(2).all(|w| w[0].bucket > w[1].bucket));
        Self { feed, language, entries }
    }

    /// Return the highest entry whose bucket is at or below the reading,
    /// or `None` when the reading is below the lowest bucket.
    pub fn evaluate(&self, reading: f64) -> Option<&ThresholdEntry> {
        self.entries.iter().find(|e| reading >= e.bucket)
    }

    /// Notification title for this feed and language.
    pub fn title(&self) -> &'static str {
        match (self.feed, self.language) {
            (Feed::Aurora, Language::En) => "Aurora activity",
            (Feed::Aurora, Language::Pl) => "Zorza polarna",
            (Feed::KIndex, Language::En) => "Geomagnetic activity",
            (Feed::KIndex, Language::Pl) => "Aktywność geomagnetyczna",
        }
    }

    pub fn feed(&self) -> Feed {
        self.feed
    }
}

fn aurora_en() -> Vec<ThresholdEntry> {
    vec![
        entry(90.0, "Overhead right now. Go outside!", 1),
        entry(80.0, "Very likely!", 0),
        entry(70.0, "Very likely.", 0),
        entry(50.0, "Something might show up. Keep watching.", 0),
        entry(30.0, "Only with a lot of luck.", 0),
    ]
}

fn aurora_pl() -> Vec<ThresholdEntry> {
    vec![
        entry(90.0, "Masz ją nad głową!", 1),
        entry(80.0, "Ogromna szansa!", 0),
        entry(70.0, "Bardzo duża szansa.", 0),
        entry(50.0, "Może coś się pojawi. Wypatruj.", 0),
        entry(30.0, "Jeżeli będziesz mieć bardzo dużo szczęścia.", 0),
    ]
}

fn kindex_en() -> Vec<ThresholdEntry> {
    vec![
        entry(9.0, "You have to see it!", 1),
        entry(8.0, "Very likely!", 0),
        entry(7.0, "There is a lot of chance today.", 0),
        entry(6.0, "There is a chance today.", 0),
        entry(5.0, "There might be a chance today.", 0),
    ]
}

fn kindex_pl() -> Vec<ThresholdEntry> {
    vec![
        entry(9.0, "Musisz ją widzieć!", 1),
        entry(8.0, "Duża szansa!", 0),
        entry(7.0, "Dzisiaj jest spora szansa.", 0),
        entry(6.0, "Dzisiaj jest szansa.", 0),
        entry(5.0, "Jakaś tam szansa dzisiaj jest.", 0),
    ]
}

fn entry(bucket: f64, message: &'static str, priority: i8) -> ThresholdEntry {
    ThresholdEntry { bucket, message, priority }
}
