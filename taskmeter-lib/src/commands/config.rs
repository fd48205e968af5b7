use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::ValueEnum;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the base directory
pub const CONFIG_FILE_NAME: &str = "taskmeter.toml";

/// Longest report interval accepted from a configuration file
const MAX_REPORT_INTERVAL: Duration = Duration::from_secs(60 * 60);

const MIN_BAR_WIDTH: u16 = 5;
const MAX_BAR_WIDTH: u16 = 200;

/// How task progress is presented on the console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReporterKind {
    /// Draw a progress bar on stderr
    #[default]
    Bar,

    /// Emit progress as log records
    Log,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Minimum time between two progress reports; zero reports after every item
    #[serde(default = "default_report_interval", with = "humantime_serde")]
    pub report_interval: Duration,

    /// Time the batch command spends on each simulated work item
    #[serde(default = "default_item_delay", with = "humantime_serde")]
    pub item_delay: Duration,

    /// How progress is presented
    #[serde(default)]
    pub reporter: ReporterKind,

    /// Width of the progress bar, in characters
    #[serde(default = "default_bar_width")]
    pub bar_width: u16,
}

const fn default_report_interval() -> Duration {
    crate::progress::DEFAULT_REPORT_INTERVAL
}

const fn default_item_delay() -> Duration {
    Duration::from_millis(50)
}

const fn default_bar_width() -> u16 {
    25
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// When `config_path` is `None`, `taskmeter.toml` is looked up in `base_dir` and the
    /// built-in defaults are used if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading taskmeter configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("No configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading taskmeter configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!("Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// The file [`load`](Self::load) would read, or `None` if it would use the defaults
    #[must_use]
    pub fn locate(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Option<Utf8PathBuf> {
        config_path.cloned().or_else(|| {
            let path = base_dir.join(CONFIG_FILE_NAME);
            path.is_file().then_some(path)
        })
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.report_interval > MAX_REPORT_INTERVAL {
            return Err(app_err!(
                "report_interval must be at most {}, got {}",
                humantime::format_duration(MAX_REPORT_INTERVAL),
                humantime::format_duration(self.report_interval)
            ));
        }

        if !(MIN_BAR_WIDTH..=MAX_BAR_WIDTH).contains(&self.bar_width) {
            return Err(app_err!(
                "bar_width must be between {MIN_BAR_WIDTH} and {MAX_BAR_WIDTH}, got {}",
                self.bar_width
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
