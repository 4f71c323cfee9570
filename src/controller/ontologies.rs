//! Ontology listing and ancestor queries.

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
};
use serde::{Deserialize, Serialize};

use super::{format, Routes};
use crate::{app::AppContext, Result};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OntologiesResponse {
    Available { available_ontologies: Vec<String> },
    Empty { message: String },
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuperclassesResponse {
    pub superclasses: Vec<String>,
}

/// Lists the successfully loaded ontology names.
pub async fn list(State(ctx): State<AppContext>) -> Result<Response> {
    let names = ctx.ontology.names();
    if names.is_empty() {
        let extensions = ctx.config.ontology.extensions.join(", ");
        return format::json(OntologiesResponse::Empty {
            message: format!(
                "No ontologies found or loaded. Please add {extensions} files to the '{}' directory.",
                ctx.ontology.store().directory().display()
            ),
        });
    }
    format::json(OntologiesResponse::Available {
        available_ontologies: names,
    })
}

/// Returns the labels of every ancestor of a class, itself included.
pub async fn superclasses(
    State(ctx): State<AppContext>,
    Path((ontology_name, class_name)): Path<(String, String)>,
) -> Result<Response> {
    let superclasses = ctx
        .ontology
        .superclass_labels(&ontology_name, &class_name)?;
    format::json(SuperclassesResponse { superclasses })
}

pub fn routes() -> Routes {
    Routes::new()
        .prefix("/ontologies")
        .add("/", get(list))
        .add(
            "/{ontology_name}/superclasses/{class_name}",
            get(superclasses),
        )
}
