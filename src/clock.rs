//! Clock abstraction and day/night-aware poll interval selection.
//!
//! Interval selection is a pure function of local time so it can be tested
//! without a real clock.

use chrono::{DateTime, Local, NaiveTime};
use std::time::Duration;

/// Source of the current local time, injectable for tests.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Local daytime window during which polling slows down.
///
/// Auroral visibility is implausible in daylight, so daytime cycles use the
/// longer interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySchedule {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(6, 0, 0).expect("valid time"),
            end: NaiveTime::from_hms_opt(19, 0, 0).expect("valid time"),
        }
    }
}

impl DaySchedule {
    /// Whether the given local time falls within the daytime window.
    /// Both boundaries are inclusive.
    pub fn is_daytime(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Per-feed sleep durations for day and night cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollIntervals {
    pub day: Duration,
    pub night: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            day: Duration::from_secs(300),
            night: Duration::from_secs(60),
        }
    }
}

/// Map a local time to the sleep duration for the next cycle.
pub fn poll_interval(
    time: NaiveTime,
    schedule: &DaySchedule,
    intervals: &PollIntervals,
) -> Duration {
    if schedule.is_daytime(time) {
        intervals.day
    } else {
        intervals.night
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_default_window_boundaries_inclusive() {
        let schedule = DaySchedule::default();
        assert!(schedule.is_daytime(at(6, 0)));
        assert!(schedule.is_daytime(at(19, 0)));
        assert!(!schedule.is_daytime(at(5, 59)));
        assert!(!schedule.is_daytime(at(19, 1)));
    }

    #[test]
    fn test_poll_interval_day_vs_night() {
        let schedule = DaySchedule::default();
        let intervals = PollIntervals {
            day: Duration::from_secs(300),
            night: Duration::from_secs(60),
        };

        assert_eq!(
            poll_interval(at(12, 0), &schedule, &intervals),
            Duration::from_secs(300)
        );
        assert_eq!(
            poll_interval(at(23, 30), &schedule, &intervals),
            Duration::from_secs(60)
        );
        assert_eq!(
            poll_interval(at(3, 0), &schedule, &intervals),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn test_custom_window() {
        let schedule = DaySchedule {
            start: at(8, 0),
            end: at(16, 0),
        };
        assert!(!schedule.is_daytime(at(7, 59)));
        assert!(schedule.is_daytime(at(8, 0)));
        assert!(!schedule.is_daytime(at(16, 1)));
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
