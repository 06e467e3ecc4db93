//! Notification module for alerts and console output.
//!
//! This module handles:
//! - Pushover push notifications
//! - Colored per-cycle console output

pub mod console;
pub mod pushover;

pub use console::ConsoleOutput;
pub use pushover::PushoverNotifier;

use crate::types::Result;

/// A push-notification sink. Fire-and-forget; failures are reported but
/// not retried here.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Send one notification.
    async fn send(&self, title: &str, message: &str, priority: i8) -> Result<()>;
}
