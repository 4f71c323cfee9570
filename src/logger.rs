//! # Logger
//!
//! Installs the global `tracing` subscriber from [`config::Logger`]: an
//! optional stdout layer, an optional rolling file layer, and an
//! [`EnvFilter`] shared by both.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_variant::to_variant_name;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::{config, Error, Result};

pub const MODULE_WHITELIST: &[&str] = &["tower_http", "ontology_service"];

// Keeps the non-blocking writer alive for the lifetime of the process.
static NONBLOCKING_WORK_GUARD_KEEP: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum LogLevel {
    /// The "off" level.
    #[serde(rename = "off")]
    Off,
    /// The "trace" level.
    #[serde(rename = "trace")]
    Trace,
    /// The "debug" level.
    #[serde(rename = "debug")]
    Debug,
    /// The "info" level.
    #[serde(rename = "info")]
    #[default]
    Info,
    /// The "warn" level.
    #[serde(rename = "warn")]
    Warn,
    /// The "error" level.
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum Format {
    #[serde(rename = "compact")]
    #[default]
    Compact,
    #[serde(rename = "pretty")]
    Pretty,
    #[serde(rename = "json")]
    Json,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum Rotation {
    #[serde(rename = "minutely")]
    Minutely,
    #[serde(rename = "hourly")]
    Hourly,
    #[serde(rename = "daily")]
    #[default]
    Daily,
    #[serde(rename = "never")]
    Never,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        to_variant_name(self).expect("only enum supported").fmt(f)
    }
}

/// Initializes the global subscriber.
///
/// Resolution order for the filter: `RUST_LOG`, then
/// `logger.override_filter`, then the configured level applied to this crate
/// and `tower_http`.
///
/// # Errors
/// When the filter is invalid, the file appender cannot be created, or a
/// global subscriber was already installed.
pub fn init(config: &config::Logger) -> Result<()> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Sync + Send>> = Vec::new();

    if let Some(file_appender_config) = config.file_appender.as_ref() {
        if file_appender_config.enable {
            let dir = file_appender_config
                .dir
                .as_ref()
                .map_or_else(|| "./logs".to_string(), ToString::to_string);

            let rotation = match file_appender_config.rotation {
                Rotation::Minutely => tracing_appender::rolling::Rotation::MINUTELY,
                Rotation::Hourly => tracing_appender::rolling::Rotation::HOURLY,
                Rotation::Daily => tracing_appender::rolling::Rotation::DAILY,
                Rotation::Never => tracing_appender::rolling::Rotation::NEVER,
            };

            let file_appender = tracing_appender::rolling::Builder::default()
                .rotation(rotation)
                .max_log_files(file_appender_config.max_log_files)
                .filename_prefix(
                    file_appender_config
                        .filename_prefix
                        .as_ref()
                        .map_or_else(String::new, ToString::to_string),
                )
                .filename_suffix(
                    file_appender_config
                        .filename_suffix
                        .as_ref()
                        .map_or_else(String::new, ToString::to_string),
                )
                .build(dir)
                .map_err(Error::wrap)?;

            let file_appender_layer = if file_appender_config.non_blocking {
                let (non_blocking_file_appender, work_guard) =
                    tracing_appender::non_blocking(file_appender);
                NONBLOCKING_WORK_GUARD_KEEP
                    .set(work_guard)
                    .map_err(|_| Error::Message("cannot lock for appender".to_string()))?;
                init_layer(
                    non_blocking_file_appender,
                    &file_appender_config.format,
                    false,
                )
            } else {
                init_layer(file_appender, &file_appender_config.format, false)
            };
            layers.push(file_appender_layer);
        }
    }

    if config.enable {
        let stdout_layer = init_layer(std::io::stdout, &config.format, true);
        layers.push(stdout_layer);
    }

    if !layers.is_empty() {
        let env_filter = init_env_filter(config.override_filter.as_ref(), &config.level)?;
        tracing_subscriber::registry()
            .with(layers)
            .with(env_filter)
            .try_init()
            .map_err(Error::wrap)?;
    }
    Ok(())
}

/// Builds the filter described in [`init`].
///
/// # Errors
/// When the override filter does not parse.
pub fn init_env_filter(override_filter: Option<&String>, level: &LogLevel) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| {
            override_filter.map_or_else(
                || EnvFilter::try_new(default_filter(level)),
                EnvFilter::try_new,
            )
        })
        .map_err(Into::into)
}

fn default_filter(level: &LogLevel) -> String {
    MODULE_WHITELIST
        .iter()
        .map(|module| format!("{module}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn init_layer<W2>(
    make_writer: W2,
    format: &Format,
    ansi: bool,
) -> Box<dyn Layer<Registry> + Sync + Send>
where
    W2: for<'writer> MakeWriter<'writer> + Sync + Send + 'static,
{
    match format {
        Format::Compact => fmt::Layer::default()
            .with_ansi(ansi)
            .with_writer(make_writer)
            .compact()
            .boxed(),
        Format::Pretty => fmt::Layer::default()
            .with_ansi(ansi)
            .with_writer(make_writer)
            .pretty()
            .boxed(),
        Format::Json => fmt::Layer::default()
            .with_ansi(ansi)
            .with_writer(make_writer)
            .json()
            .boxed(),
    }
}
