//! Ontology domain: in-memory models, directory loading, one-shot external
//! reasoning and ancestor queries.
//!
//! Boot builds an [`OntologyStore`], runs the reasoner over it once and
//! freezes the result into an [`OntologyService`] shared by request handlers.

pub mod entities;
pub mod loader;
pub mod query;
pub mod reasoner;
pub mod service;
pub mod store;
pub mod value_objects;

pub use entities::{Class, Ontology};
pub use loader::LoadError;
pub use query::{fetch_superclasses, resolve_label, QueryError};
pub use reasoner::{ExternalReasoner, Reasoner, ReasonerError, Subsumption};
pub use service::OntologyService;
pub use store::{OntologyStore, ReasoningStatus};
pub use value_objects::{Iri, IriError};
