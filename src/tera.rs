//! Thin wrapper over `tera` used for configuration files, reasoner argument
//! templates and the documentation page.

use crate::Result;

/// Render a one-off template with `locals` as its context.
///
/// Autoescaping is off; callers rendering HTML escape values themselves.
///
/// # Errors
///
/// When the template cannot be parsed or rendered.
pub fn render_string(tera_template: &str, locals: &serde_json::Value) -> Result<String> {
    let text = tera::Tera::one_off(
        tera_template,
        &tera::Context::from_serialize(locals)?,
        false,
    )?;
    Ok(text)
}
