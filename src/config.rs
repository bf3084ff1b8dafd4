//! Planner configuration

use std::path::PathBuf;

use clap::Args;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    fixtures::{FixtureCatalog, FixtureError},
    prices::currency_from_code,
    storage::FileStore,
    trip::snapshot::SNAPSHOT_KEY,
};

/// Errors resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured currency isn't supported.
    #[error("unsupported currency: {0}")]
    UnknownCurrency(String),

    /// The logging subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl LoggingConfig {
    /// Installs the global tracing subscriber. Logs go to stderr.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Logging`] if a subscriber is already installed.
    pub fn init(&self) -> Result<(), ConfigError> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_str()));

        match self.log_format {
            LogFormat::Compact => tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .try_init()?,
            LogFormat::Json => tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .try_init()?,
        }

        Ok(())
    }
}

/// Where the planner keeps its trip and where it gets its offers.
#[derive(Debug, Args)]
pub struct PlannerConfig {
    /// Directory trip snapshots are stored in
    #[arg(long, env = "VOYAGE_DATA_DIR", default_value = ".voyage")]
    pub data_dir: PathBuf,

    /// Key the trip snapshot is saved under
    #[arg(long, env = "VOYAGE_SNAPSHOT_KEY", default_value = SNAPSHOT_KEY)]
    pub snapshot_key: String,

    /// Currency prices are quoted in (EUR, GBP, USD)
    #[arg(long, env = "VOYAGE_CURRENCY", default_value = "EUR")]
    pub currency: String,

    /// Catalog fixture file; the bundled European catalog when omitted
    #[arg(long, env = "VOYAGE_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl PlannerConfig {
    /// Resolves the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for unsupported codes.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        currency_from_code(&self.currency)
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }

    /// Snapshot store in the data directory.
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }

    /// Loads the configured catalog fixture, or the bundled one.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the fixture cannot be loaded.
    pub fn catalog(&self) -> Result<FixtureCatalog, FixtureError> {
        match &self.fixture {
            Some(path) => FixtureCatalog::load(path),
            None => FixtureCatalog::bundled(),
        }
    }
}
