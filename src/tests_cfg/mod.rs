//! Fixtures shared by unit and integration tests (`testing` feature).

pub mod app;
pub mod config;
pub mod ontology;
