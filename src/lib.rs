#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
//! Ontology service.
//!
//! Loads OWL ontologies from a directory, runs an external reasoner over them
//! once at boot and answers ancestor-class queries over HTTP.

pub use self::errors::Error;

pub mod app;
pub mod boot;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod controller;
pub mod environment;
pub mod errors;
pub mod logger;
pub mod ontology;
pub mod tera;

#[cfg(any(test, feature = "testing"))]
pub mod tests_cfg;

#[cfg(feature = "testing")]
pub use axum_test::{TestServer, TestServerConfig};

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;
