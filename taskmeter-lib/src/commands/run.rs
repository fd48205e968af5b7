//! Command dispatch logic for taskmeter

use super::{BatchArgs, InitArgs, ValidateArgs, init_config, process_batch, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "taskmeter", version, author, long_about = None)]
#[command(about = "Report progress of bounded batch work")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: TaskmeterSubcommand,
}

#[derive(Subcommand, Debug)]
enum TaskmeterSubcommand {
    /// Process a simulated batch of work items with progress reporting
    Batch(Box<BatchArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        TaskmeterSubcommand::Batch(batch_args) => process_batch(host, batch_args),
        TaskmeterSubcommand::Init(init_args) => init_config(host, init_args),
        TaskmeterSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
