#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Progress reporting for bounded units of work
//!
//! This library instruments a loop over a finite sequence so that callers receive
//! start, progress and finish notifications without threading any reporting logic
//! through their own iteration code.
//!
//! ```
//! use taskmeter_lib::progress::{ProgressTask, ReportFunctions, TrackProgress};
//!
//! let report = ReportFunctions::default()
//!     .on_start(|name| println!("{name}: started"))
//!     .on_progress(|percent| println!("{percent:.0}%"))
//!     .on_finish(|success| println!("success: {success}"));
//!
//! let task = ProgressTask::with_report("thumbnails", report);
//! for image in ["a.png", "b.png", "c.png"].iter().with_task(&task) {
//!     let _ = image;
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`progress`]: The task state machine, its report throttle and the iteration adapters
//! - `commands`: The `taskmeter` command-line tool, which renders progress on the console

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod progress;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub use crate::commands::{Host, run};
