//! External data feeds polled by the monitor loops.
//!
//! Each feed exposes a single "fetch the current value" operation; transport
//! and parse failures surface as errors the monitor recovers from locally.

pub mod kindex;
pub mod ovation;

pub use kindex::KIndexFeed;
pub use ovation::OvationFeed;

use crate::types::Result;

/// A polled external data source yielding one numeric reading per cycle.
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    /// Fetch the current reading.
    async fn fetch(&self) -> Result<f64>;
}
