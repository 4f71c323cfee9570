//! Application state shared by every request handler.

use std::sync::Arc;

use crate::{config::Config, environment::Environment, ontology::OntologyService};

/// Everything a handler needs, cloned cheaply into each request.
#[derive(Clone)]
pub struct AppContext {
    /// The environment in which the application is running.
    pub environment: Environment,
    /// Configuration settings for the application
    pub config: Config,
    /// Reasoned ontologies, frozen at boot.
    pub ontology: Arc<OntologyService>,
}

impl AppContext {
    #[must_use]
    pub fn new(environment: Environment, config: Config, ontology: OntologyService) -> Self {
        Self {
            environment,
            config,
            ontology: Arc::new(ontology),
        }
    }
}
