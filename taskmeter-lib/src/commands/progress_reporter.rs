use super::config::ReporterKind;
use crate::progress::ReportFunctions;
use core::cell::{Cell, RefCell};
use core::fmt::{Debug, Formatter};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const LOG_TARGET: &str = " taskmeter";

/// Refresh rate of the progress bar (10 Hz).
const REFRESH_RATE_HZ: u8 = 10;

/// Binds a task's hooks to the console, either as a progress bar or as log records.
///
/// The bar stays hidden until the task starts, so an unstarted task leaves no trace on
/// the terminal. The reporter also remembers what it was told so the caller can print
/// a summary once the task is finalized.
pub struct ConsoleReporter {
    kind: ReporterKind,
    bar: ProgressBar,
    bar_width: u16,
    use_colors: bool,
    task_name: RefCell<String>,
    reports: Cell<usize>,
    last_percent: Cell<Option<f64>>,
    outcome: Cell<Option<bool>>,
}

impl ConsoleReporter {
    /// Create a reporter. When `use_colors` is false, the bar is rendered without ANSI styling.
    #[must_use]
    pub fn new(kind: ReporterKind, bar_width: u16, use_colors: bool) -> Self {
        Self {
            kind,
            bar: ProgressBar::hidden(),
            bar_width,
            use_colors,
            task_name: RefCell::new(String::new()),
            reports: Cell::new(0),
            last_percent: Cell::new(None),
            outcome: Cell::new(None),
        }
    }

    /// Hooks that feed this reporter, for use with [`ProgressTask::with_report`](crate::progress::ProgressTask::with_report).
    #[must_use]
    pub fn report_functions(&self) -> ReportFunctions<'_> {
        ReportFunctions::default()
            .on_start(move |name| self.started(name))
            .on_progress(move |percent| self.progressed(percent))
            .on_finish(move |success| self.finished(success))
    }

    /// Number of progress reports received so far.
    #[must_use]
    pub fn reports(&self) -> usize {
        self.reports.get()
    }

    /// Whether the task finished successfully, or `None` if no finish was reported.
    ///
    /// An unstarted task never reports a finish.
    #[must_use]
    pub fn outcome(&self) -> Option<bool> {
        self.outcome.get()
    }

    fn started(&self, name: &str) {
        name.clone_into(&mut self.task_name.borrow_mut());
        self.reports.set(0);
        self.last_percent.set(None);

        match self.kind {
            ReporterKind::Bar => {
                self.bar.set_style(self.bar_style());
                self.bar.set_prefix(name.to_string());
                self.bar.set_length(100);
                self.bar.set_position(0);
                self.bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(REFRESH_RATE_HZ));
            }
            ReporterKind::Log => log::info!(target: LOG_TARGET, "Started '{name}'"),
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "value is clamped to 0..=100")]
    fn progressed(&self, percent: f64) {
        self.reports.set(self.reports.get() + 1);
        self.last_percent.set(Some(percent));

        match self.kind {
            ReporterKind::Bar => {
                self.bar.set_position(percent.clamp(0.0, 100.0).round() as u64);
                self.bar.set_message(format!("{percent:5.1}%"));
            }
            ReporterKind::Log => log::info!(target: LOG_TARGET, "{}: {percent:.1}%", self.task_name.borrow()),
        }
    }

    fn finished(&self, success: bool) {
        self.outcome.set(Some(success));

        match self.kind {
            ReporterKind::Bar => {
                if success {
                    self.bar.finish_and_clear();
                } else {
                    self.bar.abandon_with_message("incomplete");
                }
            }
            ReporterKind::Log if success => log::info!(target: LOG_TARGET, "Finished '{}'", self.task_name.borrow()),
            ReporterKind::Log => log::warn!(
                target: LOG_TARGET,
                "'{}' finished before reaching its target, last report at {:.1}%",
                self.task_name.borrow(),
                self.last_percent.get().unwrap_or(0.0)
            ),
        }
    }

    fn bar_style(&self) -> ProgressStyle {
        let width = self.bar_width;
        let template = if self.use_colors {
            format!("{{prefix:>12.bold.cyan}} [{{bar:{width}}}] {{msg}}")
        } else {
            format!("{{prefix:>12}} [{{bar:{width}}}] {{msg}}")
        };

        ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }
}

impl Debug for ConsoleReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConsoleReporter")
            .field("kind", &self.kind)
            .field("bar", &self.bar)
            .field("bar_width", &self.bar_width)
            .field("use_colors", &self.use_colors)
            .field("task_name", &self.task_name)
            .field("reports", &self.reports)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressTask;
    use core::time::Duration;

    #[test]
    fn test_log_reporter_tracks_a_full_run() {
        let reporter = ConsoleReporter::new(ReporterKind::Log, 25, false);
        {
            let task = ProgressTask::with_report("logged", reporter.report_functions()).with_interval(Duration::ZERO);
            task.start(4);
            task.advance(4);
        }

        assert_eq!(reporter.reports(), 1);
        assert_eq!(reporter.last_percent.get(), Some(100.0));
        assert_eq!(reporter.outcome(), Some(true));
        assert_eq!(*reporter.task_name.borrow(), "logged");
    }

    #[test]
    fn test_bar_reporter_tracks_a_partial_run() {
        let reporter = ConsoleReporter::new(ReporterKind::Bar, 10, true);
        {
            let task = ProgressTask::with_report("drawn", reporter.report_functions()).with_interval(Duration::ZERO);
            task.start(4);
            task.increment();
        }

        assert_eq!(reporter.reports(), 1);
        assert_eq!(reporter.last_percent.get(), Some(25.0));
        assert_eq!(reporter.outcome(), Some(false));
        assert_eq!(reporter.bar.position(), 25);
        assert_eq!(reporter.bar.length(), Some(100));
    }

    #[test]
    fn test_unstarted_task_leaves_reporter_untouched() {
        let reporter = ConsoleReporter::new(ReporterKind::Bar, 25, false);
        {
            let _task = ProgressTask::with_report("idle", reporter.report_functions());
        }

        assert_eq!(reporter.reports(), 0);
        assert_eq!(reporter.outcome(), None);
        assert!(reporter.bar.is_hidden());
    }

    #[test]
    fn test_restart_resets_report_count() {
        let reporter = ConsoleReporter::new(ReporterKind::Log, 25, false);
        let task = ProgressTask::with_report("twice", reporter.report_functions()).with_interval(Duration::ZERO);
        task.start(2);
        task.advance(2);
        task.start(3);
        task.increment();

        assert_eq!(reporter.reports(), 1);
        assert!(!task.finish());
        assert_eq!(reporter.outcome(), Some(false));
    }
}
