//! # Generator Module
//!
//! Synthesizes the deployment artifacts an [`Analysis`] reports as missing: a Dockerfile, a
//! Docker Compose file and a README. Rendering is pure; nothing is written to disk here.

use crate::analyzer::Analysis;
use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};

pub mod compose_gen;
pub mod dockerfile_gen;
pub mod ecosystem;
pub mod readme_gen;
pub mod templates;

pub use compose_gen::DatabaseEngine;
pub use ecosystem::Ecosystem;

/// Artifacts produced for one analysis; `None` where the artifact already existed
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFiles {
    pub dockerfile: Option<String>,
    pub compose: Option<String>,
    pub readme: Option<String>,
}

impl GeneratedFiles {
    pub fn is_empty(&self) -> bool {
        self.dockerfile.is_none() && self.compose.is_none() && self.readme.is_none()
    }
}

/// Generates every artifact the analysis reports as absent.
///
/// Existing artifacts are never regenerated.
pub fn generate(analysis: &Analysis) -> Result<GeneratedFiles> {
    let port = primary_port(analysis)?;
    log::info!(
        "Generating missing artifacts for {} project (port {})",
        analysis.project_type,
        port
    );

    let mut generated = GeneratedFiles::default();
    if !analysis.dockerfile.exists {
        generated.dockerfile = Some(dockerfile_gen::generate(analysis, port)?);
    }
    if !analysis.compose.exists {
        generated.compose = Some(compose_gen::generate(analysis, port)?);
    }
    if !analysis.readme.exists {
        generated.readme = Some(readme_gen::generate(analysis, port)?);
    }
    Ok(generated)
}

/// Renders a Dockerfile regardless of whether one exists
pub fn generate_dockerfile(analysis: &Analysis) -> Result<String> {
    Ok(dockerfile_gen::generate(analysis, primary_port(analysis)?)?)
}

/// Renders a Docker Compose file regardless of whether one exists
pub fn generate_compose(analysis: &Analysis) -> Result<String> {
    Ok(compose_gen::generate(analysis, primary_port(analysis)?)?)
}

/// Renders a README regardless of whether one exists
pub fn generate_readme(analysis: &Analysis) -> Result<String> {
    Ok(readme_gen::generate(analysis, primary_port(analysis)?)?)
}

fn primary_port(analysis: &Analysis) -> std::result::Result<u16, GeneratorError> {
    analysis.ports.first().copied().ok_or_else(|| {
        GeneratorError::InvalidContext("analysis has no candidate ports".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{ArtifactInfo, ProjectType};
    use crate::error::RepolensError;

    #[test]
    fn test_generates_only_missing_artifacts() {
        let mut analysis = Analysis::new(ProjectType::Go);
        analysis.compose = ArtifactInfo {
            exists: true,
            path: Some("docker-compose.yml".to_string()),
            content: Some("services: {}".to_string()),
            is_valid: true,
        };

        let generated = generate(&analysis).unwrap();
        assert!(generated.dockerfile.is_some());
        assert!(generated.compose.is_none());
        assert!(generated.readme.is_some());
    }

    #[test]
    fn test_nothing_missing() {
        let mut analysis = Analysis::new(ProjectType::NodeJs);
        analysis.dockerfile.exists = true;
        analysis.compose.exists = true;
        analysis.readme.exists = true;

        assert!(generate(&analysis).unwrap().is_empty());
    }

    #[test]
    fn test_empty_ports_rejected() {
        let mut analysis = Analysis::new(ProjectType::NodeJs);
        analysis.ports.clear();

        let result = generate(&analysis);
        assert!(matches!(
            result,
            Err(RepolensError::Generation(GeneratorError::InvalidContext(_)))
        ));
        assert!(generate_dockerfile(&analysis).is_err());
    }

    #[test]
    fn test_forced_generation_ignores_existence() {
        let mut analysis = Analysis::new(ProjectType::Python);
        analysis.dockerfile.exists = true;
        analysis.ports = vec![5000];

        let dockerfile = generate_dockerfile(&analysis).unwrap();
        assert!(dockerfile.contains("EXPOSE 5000"));
    }

    #[test]
    fn test_json_uses_null_for_skipped() {
        let generated = GeneratedFiles {
            dockerfile: Some("FROM scratch".to_string()),
            ..GeneratedFiles::default()
        };
        let json = serde_json::to_value(&generated).unwrap();
        assert!(json["compose"].is_null());
        assert_eq!(json["dockerfile"], "FROM scratch");
    }
}
