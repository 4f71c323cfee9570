//! Response helpers shared by controllers.

use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Serialize;

use crate::Result;

/// Returns a JSON response
///
/// # Errors
///
/// Currently this function doesn't return any error. this is for feature
/// functionality
pub fn json<T: Serialize>(t: T) -> Result<Response> {
    Ok(axum::Json(t).into_response())
}

/// Returns an HTML response
///
/// # Errors
///
/// Currently this function doesn't return any error. this is for feature
/// functionality
pub fn html(content: &str) -> Result<Response> {
    Ok(Html(content.to_string()).into_response())
}

/// Returns a temporary redirect to `to`.
///
/// # Errors
///
/// Currently this function doesn't return any error. this is for feature
/// functionality
pub fn redirect(to: &str) -> Result<Response> {
    Ok(Redirect::temporary(to).into_response())
}
