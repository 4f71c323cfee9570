use std::sync::Arc;

use super::{
    query::{self, QueryError},
    reasoner::{ExternalReasoner, Reasoner},
    store::{OntologyStore, ReasoningStatus},
};
use crate::config::{OntologySettings, ReasonerSettings};

/// Immutable snapshot of the reasoned ontologies shared by every request.
#[derive(Clone, Debug)]
pub struct OntologyService {
    store: Arc<OntologyStore>,
    reasoning: ReasoningStatus,
}

impl OntologyService {
    /// Freezes an already populated store.
    #[must_use]
    pub fn new(store: OntologyStore, reasoning: ReasoningStatus) -> Self {
        Self {
            store: Arc::new(store),
            reasoning,
        }
    }

    /// Runs the initialization phase: load every ontology, classify them once
    /// with the configured external reasoner, then freeze the result.
    pub async fn boot(ontology: &OntologySettings, reasoner: &ReasonerSettings) -> Self {
        if reasoner.enable {
            let external = ExternalReasoner::from_settings(reasoner);
            Self::boot_with(ontology, Some(&external as &dyn Reasoner)).await
        } else {
            tracing::info!("reasoner disabled, serving asserted knowledge only");
            Self::boot_with(ontology, None).await
        }
    }

    /// Same as [`Self::boot`] with an explicit reasoner, or none.
    pub async fn boot_with(ontology: &OntologySettings, reasoner: Option<&dyn Reasoner>) -> Self {
        let mut store = OntologyStore::load_all(ontology);
        let reasoning = match reasoner {
            Some(reasoner) => store.reason_all(reasoner).await,
            None => ReasoningStatus::Skipped,
        };
        Self::new(store, reasoning)
    }

    #[must_use]
    pub fn store(&self) -> &OntologyStore {
        &self.store
    }

    #[must_use]
    pub fn reasoning(&self) -> &ReasoningStatus {
        &self.reasoning
    }

    /// Loaded ontology names in lexical order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.store.names()
    }

    /// Labels of every ancestor of `class_name`, sorted lexicographically.
    pub fn superclass_labels(
        &self,
        ontology_name: &str,
        class_name: &str,
    ) -> Result<Vec<String>, QueryError> {
        let mut labels: Vec<String> =
            query::fetch_superclasses(&self.store, ontology_name, class_name)?
                .iter()
                .map(query::resolve_label)
                .collect();
        labels.sort();
        Ok(labels)
    }
}
