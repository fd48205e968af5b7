use super::common::{ColorMode, LogLevel, init_logging};
use super::config::{Config, ReporterKind};
use super::{ConsoleReporter, Host};
use crate::Result;
use crate::progress::{ProgressTask, TrackProgress};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use core::time::Duration;
use ohno::app_err;
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Write, stderr, stdout};
use std::thread;
use std::time::Instant;

const LOG_TARGET: &str = "     batch";

#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Number of work items to process
    #[arg(long, short = 'n', value_name = "COUNT", default_value_t = 20)]
    pub items: usize,

    /// Name shown for the task
    #[arg(long, value_name = "NAME", default_value = "batch")]
    pub name: String,

    /// Time spent on each item, such as `50ms` or `1s` (default from configuration)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub delay: Option<Duration>,

    /// Minimum time between two progress reports, `0s` to report every item (default from configuration)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Abandon the batch after this many items
    #[arg(long, value_name = "COUNT")]
    pub stop_after: Option<usize>,

    /// How progress is shown (default from configuration)
    #[arg(long, value_name = "KIND")]
    pub reporter: Option<ReporterKind>,

    /// Path to configuration file (default is `taskmeter.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Outcome of a batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub reports: usize,
    pub elapsed: Duration,
    pub success: bool,
}

/// Process a simulated batch of work items while reporting progress on the console
///
/// Prints a one-line summary to the host's output once the task is finalized.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the batch stopped before
/// processing every item
pub fn process_batch<H: Host>(host: &mut H, args: &BatchArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let reporter = ConsoleReporter::new(
        args.reporter.unwrap_or(config.reporter),
        config.bar_width,
        args.color.use_colors(stderr().is_terminal()),
    );

    let summary = run_batch(args, &config, &reporter);

    let use_colors = args.color.use_colors(stdout().is_terminal());
    let _ = writeln!(host.output(), "{}", format_summary(&summary, use_colors));

    if summary.success {
        Ok(())
    } else {
        Err(app_err!(
            "task '{}' stopped after {} of {} item(s)",
            summary.name,
            summary.completed,
            summary.total
        ))
    }
}

fn run_batch(args: &BatchArgs, config: &Config, reporter: &ConsoleReporter) -> BatchSummary {
    let delay = args.delay.unwrap_or(config.item_delay);
    let interval = args.interval.unwrap_or(config.report_interval);
    let limit = args.stop_after.unwrap_or(usize::MAX);

    log::info!(
        target: LOG_TARGET,
        "Processing {} item(s) with a delay of {} and a report interval of {}",
        args.items,
        humantime::format_duration(delay),
        humantime::format_duration(interval)
    );

    let start = Instant::now();
    let task = ProgressTask::with_report(args.name.as_str(), reporter.report_functions()).with_interval(interval);

    for _ in (0..args.items).with_task(&task).into_iter().take(limit) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    let completed = task.progress();
    let total = task.target();
    if completed < total {
        log::warn!(target: LOG_TARGET, "Abandoned the batch after {completed} of {total} item(s)");
    }

    drop(task);
    let success = reporter.outcome().unwrap_or(true);

    BatchSummary {
        name: args.name.clone(),
        completed,
        total,
        reports: reporter.reports(),
        elapsed: start.elapsed(),
        success,
    }
}

fn format_summary(summary: &BatchSummary, use_colors: bool) -> String {
    let status = if summary.success { "succeeded" } else { "incomplete" };
    let status = match (use_colors, summary.success) {
        (false, _) => status.to_string(),
        (true, true) => status.green().bold().to_string(),
        (true, false) => status.red().bold().to_string(),
    };

    format!(
        "Task '{}' {status}: {}/{} item(s) in {:.2}s, {} progress report(s)",
        summary.name,
        summary.completed,
        summary.total,
        summary.elapsed.as_secs_f64(),
        summary.reports
    )
}
