use chrono::NaiveDateTime;
use serde::Deserialize;
use std::fmt::Write;
use std::path::Path;
use thiserror::Error;
use tracing::Level;

pub const DEFAULT_CONFIG_NAME: &str = "task-cli";
pub const ENV_PREFIX: &str = "TASK_CLI";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration")]
    Load(#[from] config::ConfigError),
    #[error("Invalid date format {0:?}")]
    InvalidDateFormat(String),
    #[error("Invalid log level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Settings {
    /// strftime pattern used to render due dates.
    pub date_format: String,
    pub log_level: String,
    /// Wait for Enter after printing a list of tasks.
    pub pause_after_listing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            log_level: "warn".to_string(),
            pause_after_listing: true,
        }
    }
}

impl Settings {
    /// Loads settings from defaults, then the config file, then `TASK_CLI_*` variables.
    ///
    /// Without an explicit path, `task-cli.{toml,yaml,json,...}` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };
        Self::from_builder(config::Config::builder().add_source(file))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Error> {
        let defaults = Settings::default();
        let settings: Settings = builder
            .set_default("date_format", defaults.date_format)?
            .set_default("log_level", defaults.log_level)?
            .set_default("pause_after_listing", defaults.pause_after_listing)?
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), Error> {
        // Some valid specifiers (offsets, time zones) still fail on a naive date.
        let mut sample = String::new();
        if write!(sample, "{}", NaiveDateTime::default().format(&self.date_format)).is_err() {
            return Err(Error::InvalidDateFormat(self.date_format.clone()));
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<Level, Error> {
        self.log_level
            .parse()
            .map_err(|_| Error::InvalidLogLevel(self.log_level.clone()))
    }
}
