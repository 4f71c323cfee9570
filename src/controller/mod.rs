//! HTTP access layer.
//!
//! Controllers translate requests into [`crate::ontology::OntologyService`]
//! calls and [`Error`]s into status codes. Lookup misses become `404` with
//! a `detail` message; anything else becomes an opaque `500` whose details
//! only reach the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Router,
};
use serde::Serialize;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{app::AppContext, Error};

pub mod docs;
pub mod format;
pub mod monitoring;
pub mod ontologies;

/// Public message returned for every unexpected failure.
pub const INTERNAL_ERROR_DETAIL: &str =
    "An unexpected error occurred while processing the request.";

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Self::Query(_) => (StatusCode::NOT_FOUND, self.to_string()),
            _ => {
                tracing::error!(
                    err.msg = %self,
                    err.details = ?self,
                    "controller_error"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_DETAIL.to_string(),
                )
            }
        };
        if status != StatusCode::INTERNAL_SERVER_ERROR {
            tracing::debug!(err.msg = %self, status = status.as_u16(), "request rejected");
        }
        (status, axum::Json(ErrorDetail::new(detail))).into_response()
    }
}

/// A single route registration.
#[derive(Clone)]
pub struct Handler {
    pub uri: String,
    pub method: MethodRouter<AppContext>,
}

/// Collection of routes contributed by one controller.
#[derive(Clone, Default)]
pub struct Routes {
    pub prefix: Option<String>,
    pub handlers: Vec<Handler>,
}

impl Routes {
    /// Creates an empty route set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a prefix prepended to every uri added afterwards.
    #[must_use]
    pub fn prefix(mut self, uri: &str) -> Self {
        self.prefix = Some(uri.to_owned());
        self
    }

    /// Registers `method` under `uri`.
    #[must_use]
    pub fn add(mut self, uri: &str, method: MethodRouter<AppContext>) -> Self {
        let uri = match &self.prefix {
            Some(prefix) if uri == "/" => prefix.clone(),
            Some(prefix) => format!("{}/{}", prefix.trim_end_matches('/'), uri.trim_start_matches('/')),
            None => uri.to_owned(),
        };
        self.handlers.push(Handler { uri, method });
        self
    }

    /// Appends every handler of `other`.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.handlers.extend(other.handlers);
        self
    }

    /// Registered uris, in registration order.
    #[must_use]
    pub fn uris(&self) -> Vec<&str> {
        self.handlers.iter().map(|handler| handler.uri.as_str()).collect()
    }
}

/// Every route the service exposes.
#[must_use]
pub fn app_routes() -> Routes {
    Routes::new()
        .merge(docs::routes())
        .merge(ontologies::routes())
        .merge(monitoring::routes())
}

/// Builds the axum router with tracing and panic middlewares.
#[must_use]
pub fn router(ctx: AppContext) -> Router {
    let mut app = Router::new();
    for handler in app_routes().handlers {
        tracing::debug!(uri = %handler.uri, "registering route");
        app = app.route(&handler.uri, handler.method);
    }
    app.layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let err = err.downcast_ref::<String>().map_or_else(
        || err.downcast_ref::<&str>().map_or("no error details", |s| s),
        String::as_str,
    );

    tracing::error!(err.msg = err, "server_panic");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(ErrorDetail::new(INTERNAL_ERROR_DETAIL)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::{app_routes, Routes, INTERNAL_ERROR_DETAIL};
    use crate::{ontology::QueryError, Error};

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn query_misses_are_not_found() {
        let error = Error::Query(QueryError::ClassNotFound {
            ontology: "animals".to_string(),
            class: "Unicorn".to_string(),
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await["detail"],
            "Class 'Unicorn' not found in the ontology 'animals'."
        );
    }

    #[tokio::test]
    async fn unexpected_errors_hide_details() {
        let error = Error::Message("disk exploded at /secret/path".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["detail"], INTERNAL_ERROR_DETAIL);
    }

    #[test]
    fn prefixes_are_joined() {
        let routes = Routes::new()
            .prefix("/ontologies")
            .add("/", axum::routing::get(|| async { "" }))
            .add("/{ontology_name}", axum::routing::get(|| async { "" }));
        assert_eq!(routes.uris(), ["/ontologies", "/ontologies/{ontology_name}"]);
    }

    #[test]
    fn exposes_every_endpoint() {
        let routes = app_routes();
        let uris = routes.uris();
        for expected in [
            "/",
            "/docs",
            "/ontologies",
            "/ontologies/{ontology_name}/superclasses/{class_name}",
            "/_ping",
            "/_health",
            "/_readiness",
        ] {
            assert!(uris.contains(&expected), "missing {expected}");
        }
    }
}
