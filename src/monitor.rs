//! Threshold-debounced monitor loop, one per feed.
//!
//! Each cycle fetches a reading, evaluates it against the feed's threshold
//! table, and notifies only when a new, higher bucket is crossed. A cycle
//! failure is logged and skipped; it never terminates the loop.

use crate::clock::{poll_interval, Clock, DaySchedule, PollIntervals};
use crate::feeds::FeedSource;
use crate::notify::{ConsoleOutput, Notifier};
use crate::thresholds::ThresholdTable;
use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Debounce policy knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebouncePolicy {
    /// Keep the alerted bucket when a reading matches no bucket, instead of
    /// re-arming. Off by default: a drop below all buckets re-arms the feed.
    pub hold_after_clear: bool,
    /// Re-arm an alert older than this at evaluation time, so activity that
    /// persists across hours produces a reminder notification.
    pub renotify_after: Option<Duration>,
}

/// Per-feed alert state. Reset only by process restart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertState {
    /// No bucket currently notified.
    Idle,
    /// `bucket` was notified at `since`; equal or lower matches stay silent.
    Alerted { bucket: f64, since: DateTime<Local> },
}

/// Outcome of a single cycle, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// A new, higher bucket was crossed and the notification went out.
    Notified { bucket: f64 },
    /// A bucket matched but is already covered by the current alert.
    Suppressed { bucket: f64 },
    /// No bucket matched; an alerted state was re-armed to idle.
    Cleared,
    /// No bucket matched and there was nothing to clear.
    Quiet,
    /// The fetch failed; state untouched.
    FetchFailed,
    /// The notification failed; state untouched so the next matching cycle
    /// retries the same bucket.
    NotifyFailed { bucket: f64 },
}

/// Monitor loop for one feed, generic over its collaborators so the debounce
/// state machine can be driven by mocks in tests.
pub struct Monitor<F, N, C> {
    feed: F,
    notifier: N,
    clock: C,
    table: ThresholdTable,
    schedule: DaySchedule,
    intervals: PollIntervals,
    policy: DebouncePolicy,
    console: ConsoleOutput,
    state: AlertState,
}

impl<F: FeedSource, N: Notifier, C: Clock> Monitor<F, N, C> {
    /// Create a monitor with default schedule, intervals and policy.
    pub fn new(table: ThresholdTable, feed: F, notifier: N, clock: C) -> Self {
        Self {
            feed,
            notifier,
            clock,
            table,
            schedule: DaySchedule::default(),
            intervals: PollIntervals::default(),
            policy: DebouncePolicy::default(),
            console: ConsoleOutput::default(),
            state: AlertState::Idle,
        }
    }

    /// Set the daytime window.
    pub fn with_schedule(mut self, schedule: DaySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Set the day/night poll intervals.
    pub fn with_intervals(mut self, intervals: PollIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    /// Set the debounce policy.
    pub fn with_policy(mut self, policy: DebouncePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the console output handler.
    pub fn with_console(mut self, console: ConsoleOutput) -> Self {
        self.console = console;
        self
    }

    /// Current alert state.
    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Run one fetch-evaluate-notify cycle.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let now = self.clock.now();
        let stamp = now.format("%H:%M").to_string();
        let feed_id = self.table.feed();

        let reading = match self.feed.fetch().await {
            Ok(r) => r,
            Err(e) => {
                warn!(%feed_id, "fetch failed: {}", e);
                self.console.print_failure(&stamp, feed_id, &e.to_string());
                return CycleOutcome::FetchFailed;
            }
        };

        // A failed cycle never touches state, so the re-arm check waits
        // until after a successful fetch.
        if let Some(window) = self.policy.renotify_after {
            if let AlertState::Alerted { since, bucket } = self.state {
                let expired = now
                    .signed_duration_since(since)
                    .to_std()
                    .map_or(false, |age| age >= window);
                if expired {
                    debug!(%feed_id, bucket, "re-arming alert after renotify window");
                    self.state = AlertState::Idle;
                }
            }
        }

        let notified_bucket = match self.state {
            AlertState::Idle => None,
            AlertState::Alerted { bucket, .. } => Some(bucket),
        };

        match self.table.evaluate(reading) {
            Some(entry) if notified_bucket.map_or(true, |b| entry.bucket > b) => {
                match self
                    .notifier
                    .send(self.table.title(), entry.message, entry.priority)
                    .await
                {
                    Ok(()) => {
                        info!(%feed_id, reading, bucket = entry.bucket, "notification sent");
                        self.console
                            .print_alert(&stamp, feed_id, entry.bucket, entry.message);
                        self.state = AlertState::Alerted {
                            bucket: entry.bucket,
                            since: now,
                        };
                        CycleOutcome::Notified { bucket: entry.bucket }
                    }
                    Err(e) => {
                        warn!(%feed_id, bucket = entry.bucket, "notify failed: {}", e);
                        self.console.print_failure(&stamp, feed_id, &e.to_string());
                        CycleOutcome::NotifyFailed { bucket: entry.bucket }
                    }
                }
            }
            Some(entry) => {
                let status = format!("alerted >= {}", notified_bucket.unwrap_or(entry.bucket));
                self.console.print_cycle(&stamp, feed_id, reading, &status);
                CycleOutcome::Suppressed { bucket: entry.bucket }
            }
            None => {
                if notified_bucket.is_some() && !self.policy.hold_after_clear {
                    debug!(%feed_id, reading, "reading below all buckets, re-arming");
                    self.state = AlertState::Idle;
                    self.console.print_cycle(&stamp, feed_id, reading, "cleared");
                    CycleOutcome::Cleared
                } else {
                    let status = if notified_bucket.is_some() { "held" } else { "idle" };
                    self.console.print_cycle(&stamp, feed_id, reading, status);
                    CycleOutcome::Quiet
                }
            }
        }
    }

    /// Run cycles until the shutdown channel flips. The sleep between cycles
    /// is day/night-aware and is the only suspension point the shutdown
    /// signal races against, so an in-flight notification is never abandoned
    /// halfway.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        let feed_id = self.table.feed();
        info!(%feed_id, "monitor started");

        loop {
            self.run_cycle().await;

            let sleep_for =
                poll_interval(self.clock.now().time(), &self.schedule, &self.intervals);
            debug!(%feed_id, ?sleep_for, "sleeping until next cycle");

            tokio::select! {
                _ = tokio::time::sleep(sleep_for) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!(%feed_id, "shutdown requested, stopping monitor");
                        return;
                    }
                }
            }
        }
    }
}
