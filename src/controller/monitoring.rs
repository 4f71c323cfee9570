//! This module contains a base routes related to readiness checks and status
//! reporting. These routes are commonly used to monitor the readiness of the
//! application and its dependencies.

use axum::{extract::State, response::Response, routing::get};
use serde::Serialize;

use super::{format, Routes};
use crate::{app::AppContext, ontology::ReasoningStatus, Result};

/// Represents the health status of the application.
#[derive(Serialize)]
pub struct Health {
    pub ok: bool,
}

/// Readiness report: how much knowledge was loaded and whether it was
/// reasoned over.
#[derive(Serialize)]
pub struct Readiness<'a> {
    pub ok: bool,
    pub ontologies: usize,
    pub reasoning: &'a ReasoningStatus,
}

/// Check application ping endpoint
///
/// # Errors
/// This function always returns `Ok` with a JSON response indicating the
/// service is up.
pub async fn ping() -> Result<Response> {
    format::json(Health { ok: true })
}

/// Check application health endpoint
///
/// # Errors
/// This function always returns `Ok` with a JSON response indicating the
/// service is up.
pub async fn health() -> Result<Response> {
    format::json(Health { ok: true })
}

/// The service is ready once at least one ontology is loaded. A failed or
/// skipped reasoning phase is reported but does not make it unready.
///
/// # Errors
/// This function always returns `Ok`.
pub async fn readiness(State(ctx): State<AppContext>) -> Result<Response> {
    let store = ctx.ontology.store();
    if store.is_empty() {
        tracing::warn!(directory = %store.directory().display(), "readiness_no_ontologies");
    }
    format::json(Readiness {
        ok: !store.is_empty(),
        ontologies: store.len(),
        reasoning: ctx.ontology.reasoning(),
    })
}

/// Defines and returns the readiness-related routes.
pub fn routes() -> Routes {
    Routes::new()
        .add("/_readiness", get(readiness))
        .add("/_ping", get(ping))
        .add("/_health", get(health))
}
