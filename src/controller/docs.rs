//! Landing redirect and a static description of the API.

use axum::{extract::State, response::Response, routing::get};

use super::{format, Routes};
use crate::{app::AppContext, Result};

const DOCS_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Ontology Service</title></head>
<body>
<h1>Ontology Service</h1>
<p>A service to provide ontological information by querying multiple local ontologies.</p>
<h2>Endpoints</h2>
<ul>
  <li><code>GET /ontologies</code>: names of the loaded ontologies.</li>
  <li><code>GET /ontologies/{ontology_name}/superclasses/{class_name}</code>: labels of every ancestor of a class, itself included.</li>
  <li><code>GET /_ping</code>, <code>GET /_health</code>, <code>GET /_readiness</code>: monitoring.</li>
</ul>
<h2>Loaded ontologies</h2>
{% if ontologies %}<ul>
{% for name in ontologies %}  <li><code>{{ name | escape }}</code></li>
{% endfor %}</ul>{% else %}<p>None. Add files to <code>{{ directory | escape }}</code> and restart the service.</p>{% endif %}
</body>
</html>
"#;

pub async fn root() -> Result<Response> {
    format::redirect("/docs")
}

/// Renders the documentation page.
pub async fn docs(State(ctx): State<AppContext>) -> Result<Response> {
    let page = crate::tera::render_string(
        DOCS_TEMPLATE,
        &serde_json::json!({
            "ontologies": ctx.ontology.names(),
            "directory": ctx.ontology.store().directory().display().to_string(),
        }),
    )?;
    format::html(&page)
}

pub fn routes() -> Routes {
    Routes::new().add("/", get(root)).add("/docs", get(docs))
}
