//! Embedded artifact templates.
//!
//! Every template is compiled into the binary and registered once, on first use.

use crate::error::GeneratorError;
use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};

pub const COMPOSE_TEMPLATE: &str = "compose/docker-compose.yml";
pub const README_TEMPLATE: &str = "readme/README.md";

const TEMPLATE_SOURCES: [(&str, &str); 12] = [
    (
        "dockerfile/node.Dockerfile",
        include_str!("../../templates/dockerfile/node.Dockerfile"),
    ),
    (
        "dockerfile/python.Dockerfile",
        include_str!("../../templates/dockerfile/python.Dockerfile"),
    ),
    (
        "dockerfile/java.Dockerfile",
        include_str!("../../templates/dockerfile/java.Dockerfile"),
    ),
    (
        "dockerfile/php.Dockerfile",
        include_str!("../../templates/dockerfile/php.Dockerfile"),
    ),
    (
        "dockerfile/go.Dockerfile",
        include_str!("../../templates/dockerfile/go.Dockerfile"),
    ),
    (
        "dockerfile/ruby.Dockerfile",
        include_str!("../../templates/dockerfile/ruby.Dockerfile"),
    ),
    (
        "dockerfile/rust.Dockerfile",
        include_str!("../../templates/dockerfile/rust.Dockerfile"),
    ),
    (
        "dockerfile/dotnet.Dockerfile",
        include_str!("../../templates/dockerfile/dotnet.Dockerfile"),
    ),
    (
        "dockerfile/flutter.Dockerfile",
        include_str!("../../templates/dockerfile/flutter.Dockerfile"),
    ),
    (
        "dockerfile/generic.Dockerfile",
        include_str!("../../templates/dockerfile/generic.Dockerfile"),
    ),
    (
        COMPOSE_TEMPLATE,
        include_str!("../../templates/compose/docker-compose.yml"),
    ),
    (README_TEMPLATE, include_str!("../../templates/readme/README.md")),
];

static TEMPLATES: Lazy<Result<Tera, String>> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATE_SOURCES.to_vec())
        .map_err(|e| GeneratorError::from(e).to_string())?;
    log::debug!("Registered {} templates", TEMPLATE_SOURCES.len());
    Ok(tera)
});

/// Renders a registered template from any serializable context
pub fn render<T: Serialize>(name: &str, data: &T) -> Result<String, GeneratorError> {
    let tera = TEMPLATES
        .as_ref()
        .map_err(|e| GeneratorError::TemplateRendering(e.clone()))?;
    let context = Context::from_serialize(data)?;
    Ok(tera.render(name, &context)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_register() {
        assert!(TEMPLATES.is_ok(), "{:?}", TEMPLATES.as_ref().err());
        let tera = TEMPLATES.as_ref().unwrap();
        for (name, _) in TEMPLATE_SOURCES {
            assert!(tera.get_template_names().any(|n| n == name), "{}", name);
        }
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let result = render("dockerfile/cobol.Dockerfile", &serde_json::json!({}));
        assert!(matches!(result, Err(GeneratorError::TemplateRendering(_))));
    }
}
