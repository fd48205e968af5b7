//! Progress tracking for bounded units of work
//!
//! This module turns a loop over a finite sequence into start, progress and finish
//! notifications without any reporting code in the loop body.
//!
//! # Implementation Model
//!
//! Data flows one way:
//!
//! ```text
//! sequence -> BoundedIteration -> IterationCursor -> ProgressTask -> ReportFunctions
//! ```
//!
//! - [`ReportThrottle`] decides whether enough time has passed since the last progress
//!   report. A zero interval reports every time.
//! - [`ProgressTask`] owns the target and progress counters, the task name, the three
//!   hooks in [`ReportFunctions`] and a throttle. It fires the finish hook exactly once
//!   when it is finished or dropped, and only if it was ever started.
//! - [`IterationCursor`] wraps an iterator and advances the task by one unit for each
//!   element the consumer is done with. It borrows the task and never owns it.
//! - [`BoundedIteration`] adapts a sequence of known length and starts the task with
//!   that length. [`TrackProgress::with_task`] is the usual way to create one.
//!
//! Everything here is single-threaded and synchronous. Hooks run inline on the thread
//! that drives the iteration.

mod bounded;
mod cursor;
mod report_functions;
mod report_throttle;
mod task;

pub use bounded::{BoundedIteration, TrackProgress};
pub use cursor::IterationCursor;
pub use report_functions::{FinishCallback, ProgressCallback, ReportFunctions, StartCallback};
pub use report_throttle::{DEFAULT_REPORT_INTERVAL, ReportThrottle};
pub use task::ProgressTask;
