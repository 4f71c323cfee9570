use std::path::Path;

use crate::{
    config::{self, Config, OntologySettings, ReasonerSettings},
    logger,
};

/// Quiet configuration with the reasoner disabled.
#[must_use]
pub fn test_config() -> Config {
    Config {
        logger: config::Logger {
            enable: false,
            level: logger::LogLevel::Off,
            format: logger::Format::Json,
            override_filter: None,
            file_appender: None,
        },
        server: config::Server {
            binding: "localhost".to_string(),
            port: 5555,
            host: "http://localhost".to_string(),
        },
        ontology: OntologySettings::default(),
        reasoner: ReasonerSettings {
            enable: false,
            ..ReasonerSettings::default()
        },
    }
}

/// Ontology settings scanning `directory` for `.owl` files.
#[must_use]
pub fn ontology_settings(directory: &Path) -> OntologySettings {
    OntologySettings {
        directory: directory.to_path_buf(),
        ..OntologySettings::default()
    }
}
