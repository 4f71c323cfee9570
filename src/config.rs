//! # Configuration
//!
//! Configuration lives in `config/<environment>.yaml` (a sibling
//! `<environment>.local.yaml` takes precedence). Files are rendered with
//! `tera` before being parsed, so values can be taken from the process
//! environment:
//!
//! ```yaml
//! server:
//!   port: {{ get_env(name="PORT", default="8000") }}
//! ```
//!
//! Reasoner argument templates are rendered a second time when the reasoner
//! runs; wrap them in `{% raw %}` blocks inside configuration files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{environment::Environment, logger, Error, Result};

/// Main application configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub logger: Logger,
    pub server: Server,
    #[serde(default)]
    pub ontology: OntologySettings,
    #[serde(default)]
    pub reasoner: ReasonerSettings,
}

/// Logger configuration
///
/// Example (development):
/// ```yaml
/// logger:
///   enable: true
///   level: debug
///   format: compact
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logger {
    /// Enable log write to stdout
    pub enable: bool,

    /// Set the logger level.
    ///
    /// * options: `trace` | `debug` | `info` | `warn` | `error`
    pub level: logger::LogLevel,

    /// Set the logger format.
    ///
    /// * options: `compact` | `pretty` | `json`
    pub format: logger::Format,

    /// Override our custom tracing filter.
    ///
    /// Set this to your own filter if you want to see traces from internal
    /// libraries. See more [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives)
    pub override_filter: Option<String>,

    /// Set this if you want to write log to file
    pub file_appender: Option<LoggerFileAppender>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            enable: true,
            level: logger::LogLevel::Info,
            format: logger::Format::Compact,
            override_filter: None,
            file_appender: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggerFileAppender {
    /// Enable logger file appender
    pub enable: bool,

    /// Enable write log to file non-blocking
    #[serde(default)]
    pub non_blocking: bool,

    /// Set the logger file appender level.
    pub level: logger::LogLevel,

    /// Set the logger file appender format.
    pub format: logger::Format,

    /// Set the logger file appender rotation.
    pub rotation: logger::Rotation,

    /// Set the logger file appender dir
    ///
    /// default is `./logs`
    pub dir: Option<String>,

    /// Set log filename prefix
    pub filename_prefix: Option<String>,

    /// Set log filename suffix
    pub filename_suffix: Option<String>,

    /// Set the logger file appender keep max log files.
    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
}

fn default_max_log_files() -> usize {
    7
}

/// Server configuration structure.
///
/// Example (development):
/// ```yaml
/// server:
///   binding: 0.0.0.0
///   port: 8000
///   host: http://localhost
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Server {
    /// The address on which the server should listen on for incoming
    /// connections.
    #[serde(default = "default_binding")]
    pub binding: String,
    /// The port on which the server should listen for incoming connections.
    pub port: u16,
    /// The webserver host
    pub host: String,
}

fn default_binding() -> String {
    "0.0.0.0".to_string()
}

impl Default for Server {
    fn default() -> Self {
        Self {
            binding: default_binding(),
            port: 8000,
            host: "http://localhost".to_string(),
        }
    }
}

impl Server {
    #[must_use]
    pub fn full_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where ontology documents are discovered.
///
/// Example:
/// ```yaml
/// ontology:
///   directory: ontologies
///   extensions: [".owl"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OntologySettings {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Case-sensitive file name suffixes recognized as ontologies, including
    /// the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_directory() -> PathBuf {
    PathBuf::from("ontologies")
}

fn default_extensions() -> Vec<String> {
    vec![".owl".to_string()]
}

impl Default for OntologySettings {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            extensions: default_extensions(),
        }
    }
}

/// External reasoner invocation.
///
/// Every argument is a tera template rendered with `input` bound to the
/// `file://` URL of the merged N-Triples document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReasonerSettings {
    #[serde(default = "default_true")]
    pub enable: bool,
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_program() -> String {
    "java".to_string()
}

fn default_args() -> Vec<String> {
    [
        "-Xmx2000M",
        "-cp",
        "HermiT.jar",
        "org.semanticweb.HermiT.cli.CommandLine",
        "-c",
        "-O",
        "-D",
        "-I",
        "{{ input }}",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

impl Default for ReasonerSettings {
    fn default() -> Self {
        Self {
            enable: default_true(),
            program: default_program(),
            args: default_args(),
        }
    }
}

impl Config {
    /// Loads configuration settings from a folder for the specified
    /// environment.
    ///
    /// # Errors
    /// Returns error when no configuration file exists or when rendering or
    /// parsing it fails.
    pub fn from_folder(env: &Environment, path: &Path) -> Result<Self> {
        let files = [
            path.join(format!("{env}.local.yaml")),
            path.join(format!("{env}.yaml")),
        ];

        let selected_path = files.iter().find(|p| p.exists()).ok_or_else(|| {
            Error::Message(format!(
                "no configuration file found in folder: {}",
                path.display()
            ))
        })?;

        info!(selected_path =? selected_path, "loading environment from");

        let content = fs::read_to_string(selected_path)?;
        Self::from_yaml(&content)
            .map_err(|err| match err {
                Error::YAML(err) => {
                    Error::YAMLFile(err, selected_path.to_string_lossy().to_string())
                }
                err => err,
            })
    }

    /// Renders and parses a YAML configuration document.
    ///
    /// # Errors
    /// Returns error when the template cannot be rendered or the YAML is
    /// invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let rendered = crate::tera::render_string(content, &serde_json::json!({}))?;
        Ok(serde_yaml::from_str(&rendered)?)
    }

    /// Pretty YAML rendering of the resolved configuration.
    ///
    /// # Errors
    /// Returns error when serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::logger::{Format, LogLevel};

    #[test]
    fn parses_minimal_document_with_defaults() {
        let config = Config::from_yaml(
            r"
logger:
  enable: true
  level: debug
  format: json
server:
  port: 9000
  host: http://localhost
",
        )
        .expect("valid config");

        assert_eq!(config.logger.level, LogLevel::Debug);
        assert_eq!(config.logger.format, Format::Json);
        assert_eq!(config.server.binding, "0.0.0.0");
        assert_eq!(config.server.full_url(), "http://localhost:9000");
        assert_eq!(config.ontology.directory.to_str(), Some("ontologies"));
        assert_eq!(config.ontology.extensions, [".owl"]);
        assert!(config.reasoner.enable);
        assert_eq!(config.reasoner.args.last().map(String::as_str), Some("{{ input }}"));
    }

    #[test]
    fn renders_environment_lookups() {
        let config = Config::from_yaml(
            r#"
logger:
  enable: false
  level: info
  format: compact
server:
  port: {{ get_env(name="ONTOLOGY_SERVICE_TEST_UNSET_PORT", default="8123") }}
  host: http://localhost
reasoner:
  enable: false
  args: ["-I", "{% raw %}{{ input }}{% endraw %}"]
"#,
        )
        .expect("valid config");

        assert_eq!(config.server.port, 8123);
        assert!(!config.reasoner.enable);
        assert_eq!(config.reasoner.args, ["-I", "{{ input }}"]);
    }
}
