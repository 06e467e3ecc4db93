//! aurorawatch - aurora and geomagnetic activity monitor.
//!
//! A long-lived foreground daemon that polls two NOAA SWPC feeds — the
//! OVATION aurora probability grid (scoped to an observer location) and the
//! global planetary K-index — evaluates each reading against a localized
//! threshold table, and sends a Pushover push notification when a new,
//! higher severity bucket is crossed. Debounce state is in-memory for the
//! process lifetime.
//!
//! ```no_run
//! use aurorawatch::clock::SystemClock;
//! use aurorawatch::feeds::KIndexFeed;
//! use aurorawatch::monitor::Monitor;
//! use aurorawatch::notify::PushoverNotifier;
//! use aurorawatch::thresholds::{Language, ThresholdTable};
//! use aurorawatch::types::{Credentials, Feed, HttpConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let http = HttpConfig::default();
//!     let credentials = Credentials {
//!         api_key: "app-token".into(),
//!         user_key: "user-key".into(),
//!     };
//!     let mut monitor = Monitor::new(
//!         ThresholdTable::new(Feed::KIndex, Language::En),
//!         KIndexFeed::new(&http).unwrap(),
//!         PushoverNotifier::new(credentials, &http).unwrap(),
//!         SystemClock,
//!     );
//!     monitor.run_cycle().await;
//! }
//! ```

pub mod clock;
pub mod config;
pub mod feeds;
pub mod monitor;
pub mod notify;
pub mod thresholds;
pub mod types;

pub use config::{Config, Settings};
pub use monitor::{AlertState, CycleOutcome, DebouncePolicy, Monitor};
pub use thresholds::{Language, ThresholdEntry, ThresholdTable};
pub use types::{Credentials, Feed, HttpConfig, Location, Result, WatchError};
