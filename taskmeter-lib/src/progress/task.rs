use super::{ReportFunctions, ReportThrottle};
use core::cell::Cell;
use core::ops::AddAssign;
use core::time::Duration;
use std::time::Instant;

const LOG_TARGET: &str = "  progress";

/// Tracks progress toward a fixed number of units and reports it through [`ReportFunctions`].
///
/// A task starts out unstarted. [`start`](Self::start) sets the number of units to
/// complete and fires the start hook, each [`advance`](Self::advance) adds completed
/// units and fires the progress hook whenever the report throttle allows it, and
/// finalization (an explicit [`finish`](Self::finish) or simply dropping the task)
/// fires the finish hook exactly once with whether the target was reached.
///
/// A task that was never started reports nothing at all, not even on drop.
///
/// All operations take `&self` so that any number of iteration cursors can borrow the
/// same task while a loop runs. The state lives in [`Cell`]s, which makes the task
/// usable from one thread only.
///
/// ```
/// use taskmeter_lib::progress::{ProgressTask, ReportFunctions};
///
/// let task = ProgressTask::with_report("resize", ReportFunctions::default().on_finish(|ok| assert!(ok)));
/// task.start(3);
/// for _ in 0..3 {
///     task.increment();
/// }
/// assert!(task.finish());
/// ```
#[derive(Debug)]
pub struct ProgressTask<'a> {
    name: String,
    target: Cell<usize>,
    progress: Cell<usize>,
    finished: Cell<bool>,
    report: ReportFunctions<'a>,
    throttle: ReportThrottle,
}

impl<'a> ProgressTask<'a> {
    /// Create an unstarted task with no-op hooks and the default report interval.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_report(name, ReportFunctions::default())
    }

    /// Create an unstarted task reporting through `report`.
    #[must_use]
    pub fn with_report(name: impl Into<String>, report: ReportFunctions<'a>) -> Self {
        Self {
            name: name.into(),
            target: Cell::new(0),
            progress: Cell::new(0),
            finished: Cell::new(false),
            report,
            throttle: ReportThrottle::default(),
        }
    }

    /// Set the minimum spacing between two progress reports. Zero reports every advance.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.throttle = ReportThrottle::new(interval);
        self
    }

    pub fn set_start_callback(&mut self, f: impl Fn(&str) + 'a) {
        self.report.start = Box::new(f);
    }

    pub fn set_progress_callback(&mut self, f: impl Fn(f64) + 'a) {
        self.report.progress = Box::new(f);
    }

    pub fn set_finish_callback(&mut self, f: impl Fn(bool) + 'a) {
        self.report.finish = Box::new(f);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of units the current run has to complete, or 0 if the task was never started.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target.get()
    }

    /// Number of units completed in the current run.
    #[must_use]
    pub fn progress(&self) -> usize {
        self.progress.get()
    }

    #[must_use]
    pub const fn report_interval(&self) -> Duration {
        self.throttle.interval()
    }

    #[must_use]
    pub fn started(&self) -> bool {
        self.target.get() > 0
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.progress.get() >= self.target.get()
    }

    /// Completion of the current run as a percentage, `0.0` for an unstarted task.
    ///
    /// Exceeds `100.0` if the task was advanced past its target.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "unit counts far beyond 2^52 are not meaningful progress")]
    pub fn percent(&self) -> f64 {
        let target = self.target.get();
        if target == 0 {
            return 0.0;
        }

        (100.0 * self.progress.get() as f64) / target as f64
    }

    /// Begin a run of `target` units.
    ///
    /// Resets progress, re-arms the report throttle and fires the start hook. Starting an
    /// already started task begins a fresh run; the finish hook still fires only once.
    ///
    /// # Panics
    ///
    /// Panics if `target` is zero. An empty workload has no meaningful percentage.
    pub fn start(&self, target: usize) {
        assert!(target > 0, "there is no point in starting task '{}' with a zero target", self.name);

        log::debug!(target: LOG_TARGET, "Starting task '{}' with a target of {target} unit(s)", self.name);

        self.target.set(target);
        self.progress.set(0);
        self.throttle.arm();
        (self.report.start)(&self.name);
    }

    /// Record one completed unit.
    pub fn increment(&self) {
        self.advance(1);
    }

    /// Record `n` completed units and report progress if the throttle allows it.
    ///
    /// The task must have been started. Debug builds assert this; release builds ignore
    /// advances on an unstarted task.
    pub fn advance(&self, n: usize) {
        self.advance_at(n, Instant::now());
    }

    /// Same as [`advance`](Self::advance), but evaluates the throttle at `now`.
    pub fn advance_at(&self, n: usize, now: Instant) {
        debug_assert!(self.started(), "task '{}' advanced before being started", self.name);
        if !self.started() {
            return;
        }

        self.progress.set(self.progress.get().saturating_add(n));

        if self.throttle.report_now_at(now) {
            (self.report.progress)(self.percent());
        } else {
            log::trace!(
                target: LOG_TARGET,
                "Suppressed report for task '{}' at {}/{}",
                self.name,
                self.progress.get(),
                self.target.get()
            );
        }
    }

    /// Finalize the task now and return whether it reached its target.
    ///
    /// Fires the finish hook if the task was started. Dropping the task without calling
    /// this has the same effect.
    pub fn finish(self) -> bool {
        self.finalize();
        self.success()
    }

    fn finalize(&self) {
        if self.finished.replace(true) || !self.started() {
            return;
        }

        let success = self.success();
        log::debug!(
            target: LOG_TARGET,
            "Task '{}' finished at {}/{} ({})",
            self.name,
            self.progress.get(),
            self.target.get(),
            if success { "success" } else { "incomplete" }
        );

        (self.report.finish)(success);
    }
}

impl Default for ProgressTask<'_> {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl AddAssign<usize> for ProgressTask<'_> {
    fn add_assign(&mut self, n: usize) {
        self.advance(n);
    }
}

impl Drop for ProgressTask<'_> {
    fn drop(&mut self) {
        self.finalize();
    }
}
