use core::cell::Cell;
use core::time::Duration;
use std::time::Instant;

/// Default minimum spacing between two progress reports (10 Hz).
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_millis(100);

/// Decides whether enough wall-clock time has passed to emit another progress report.
///
/// The first call to [`ReportThrottle::report_now`] is always allowed. After each
/// allowed report, further reports are suppressed until `interval` has elapsed,
/// measured from the moment of the allowed report rather than from the missed
/// deadline, so a slow consumer never receives a burst of catch-up reports.
///
/// A zero interval disables suppression entirely.
///
/// The throttle uses a [`Cell`] so it can be consulted through a shared reference. It is
/// meant to be owned by a single-threaded task and is therefore not `Sync`.
#[derive(Debug, Clone)]
pub struct ReportThrottle {
    interval: Duration,
    last_report: Cell<Option<Instant>>,
}

impl ReportThrottle {
    /// Create a throttle that allows at most one report per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_report: Cell::new(None),
        }
    }

    /// The configured minimum spacing between reports.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns whether the throttle never suppresses anything.
    #[must_use]
    pub const fn is_unthrottled(&self) -> bool {
        self.interval.is_zero()
    }

    /// Forget the last report so the next call to [`report_now`](Self::report_now) is allowed.
    pub fn arm(&self) {
        self.last_report.set(None);
    }

    /// Returns `true` if a report may be emitted now, and if so starts a new interval.
    #[must_use]
    pub fn report_now(&self) -> bool {
        self.report_now_at(Instant::now())
    }

    /// Same as [`report_now`](Self::report_now), but against an explicit point in time.
    #[must_use]
    pub fn report_now_at(&self, now: Instant) -> bool {
        if self.is_unthrottled() {
            return true;
        }

        // The next report is allowed once `last + interval` has been reached.
        if self
            .last_report
            .get()
            .is_some_and(|last| now.saturating_duration_since(last) < self.interval)
        {
            return false;
        }

        self.last_report.set(Some(now));
        true
    }
}

impl Default for ReportThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_INTERVAL)
    }
}
