use crate::{
    app::AppContext,
    environment::Environment,
    ontology::{OntologyService, OntologyStore, ReasoningStatus},
};

use super::{config::test_config, ontology::animals};

/// Context serving the `animals` fixture, reasoning skipped.
#[must_use]
pub fn get_app_context() -> AppContext {
    let config = test_config();
    let mut store = OntologyStore::empty(config.ontology.directory.clone());
    store.insert(animals());
    AppContext::new(
        Environment::Test,
        config,
        OntologyService::new(store, ReasoningStatus::Skipped),
    )
}

/// Context with nothing loaded.
#[must_use]
pub fn get_empty_app_context() -> AppContext {
    let config = test_config();
    let store = OntologyStore::empty(config.ontology.directory.clone());
    AppContext::new(
        Environment::Test,
        config,
        OntologyService::new(store, ReasoningStatus::Skipped),
    )
}
