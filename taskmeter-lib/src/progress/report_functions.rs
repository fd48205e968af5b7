use core::fmt::{Debug, Formatter};

/// Called once per run with the task's name when the task is started.
pub type StartCallback<'a> = Box<dyn Fn(&str) + 'a>;

/// Called with the completion percentage (`0.0..=100.0`) when a report is due.
pub type ProgressCallback<'a> = Box<dyn Fn(f64) + 'a>;

/// Called once at finalization with whether the task reached its target.
pub type FinishCallback<'a> = Box<dyn Fn(bool) + 'a>;

/// The three hooks a [`ProgressTask`](super::ProgressTask) reports through.
///
/// Every hook defaults to a no-op, so callers only install what they care about:
///
/// ```
/// use taskmeter_lib::progress::ReportFunctions;
///
/// let report = ReportFunctions::default()
///     .on_progress(|percent| println!("{percent:.0}%"))
///     .on_finish(|success| println!("done: {success}"));
/// ```
///
/// The lifetime `'a` lets hooks borrow state owned by the caller, such as counters
/// or a progress bar, for as long as the task lives.
pub struct ReportFunctions<'a> {
    pub(crate) start: StartCallback<'a>,
    pub(crate) progress: ProgressCallback<'a>,
    pub(crate) finish: FinishCallback<'a>,
}

impl<'a> ReportFunctions<'a> {
    /// Install the hook called when the task starts.
    #[must_use]
    pub fn on_start(mut self, f: impl Fn(&str) + 'a) -> Self {
        self.start = Box::new(f);
        self
    }

    /// Install the hook called when a progress report is due.
    #[must_use]
    pub fn on_progress(mut self, f: impl Fn(f64) + 'a) -> Self {
        self.progress = Box::new(f);
        self
    }

    /// Install the hook called when a started task is finalized.
    #[must_use]
    pub fn on_finish(mut self, f: impl Fn(bool) + 'a) -> Self {
        self.finish = Box::new(f);
        self
    }
}

impl Default for ReportFunctions<'_> {
    fn default() -> Self {
        Self {
            start: Box::new(|_| {}),
            progress: Box::new(|_| {}),
            finish: Box::new(|_| {}),
        }
    }
}

impl Debug for ReportFunctions<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReportFunctions")
            .field("start", &"<callback>")
            .field("progress", &"<callback>")
            .field("finish", &"<callback>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};

    #[test]
    fn test_defaults_are_callable_no_ops() {
        let report = ReportFunctions::default();
        (report.start)("anything");
        (report.progress)(42.0);
        (report.finish)(true);
    }

    #[test]
    fn test_builder_installs_each_hook() {
        let name = RefCell::new(String::new());
        let percent = Cell::new(0.0);
        let success = Cell::new(false);

        let report = ReportFunctions::default()
            .on_start(|n| name.borrow_mut().push_str(n))
            .on_progress(|p| percent.set(p))
            .on_finish(|s| success.set(s));

        (report.start)("copy");
        (report.progress)(12.5);
        (report.finish)(true);

        assert_eq!(*name.borrow(), "copy");
        assert!((percent.get() - 12.5).abs() < f64::EPSILON);
        assert!(success.get());
    }

    #[test]
    fn test_debug_hides_closures() {
        let text = format!("{:?}", ReportFunctions::default());
        assert!(text.contains("ReportFunctions"));
        assert!(text.contains("<callback>"));
    }
}
