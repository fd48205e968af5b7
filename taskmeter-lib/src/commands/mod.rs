//! Command-line interface for taskmeter
//!
//! This module is the console collaborator of [`crate::progress`]: it binds a task's
//! start, progress and finish hooks to a terminal progress bar or to log records, and
//! wraps that in a small command-line tool.
//!
//! ## Commands
//!
//! - **batch**: Process a simulated batch of work items through
//!   [`TrackProgress::with_task`](crate::progress::TrackProgress::with_task), reporting
//!   progress as configured, and print a summary
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! Configuration is read from a TOML file (`taskmeter.toml` by default) holding the
//! report interval, the per-item delay of the batch command, the reporter kind and
//! the progress bar width. Command-line flags override the file.

mod batch;
mod common;
mod config;
mod host;
mod init;
mod progress_reporter;
mod run;
mod validate;

pub use batch::{BatchArgs, process_batch};
#[cfg(any(debug_assertions, test))]
pub use config::{Config, ReporterKind};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ConsoleReporter;
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
