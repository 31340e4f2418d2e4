//! # Pipeline
//!
//! Analyze, then generate and check concurrently over the shared [`Analysis`].

use crate::analyzer::{analyze_project_with_config, Analysis};
use crate::checker::{check, Issue};
use crate::config::Config;
use crate::error::Result;
use crate::generator::{self, GeneratedFiles};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything one run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub analysis: Analysis,
    pub generated: GeneratedFiles,
    pub issues: Vec<Issue>,
    pub generated_at: DateTime<Utc>,
}

/// Runs analysis, generation and checking for one repository.
///
/// Generation and checking run in parallel over the same analysis, so issues describe the
/// repository as found. Generation failures abort the run.
pub fn run_pipeline(path: &Path, config: &Config) -> Result<PipelineReport> {
    let analysis = analyze_project_with_config(path, &config.analysis)?;

    let (generated, issues) = rayon::join(
        || generator::generate(&analysis),
        || check(&analysis),
    );
    let generated = generated?;

    log::info!(
        "Pipeline finished: {} ({} issue(s))",
        analysis.project_type,
        issues.len()
    );

    Ok(PipelineReport {
        analysis,
        generated,
        issues,
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pipeline_on_node_repo() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("package.json"), r#"{"name":"demo-svc"}"#).unwrap();

        let report = run_pipeline(temp_dir.path(), &Config::default()).unwrap();
        assert_eq!(report.analysis.project_type.as_str(), "nodejs");
        assert!(report.generated.dockerfile.is_some());
        assert!(report.issues.iter().any(|i| i.title == "Missing README"));
        assert!(report.issues.iter().any(|i| i.title == "Missing Dockerfile"));
        assert!(report.generated.readme.unwrap().contains("demo-svc"));
    }

    #[test]
    fn test_pipeline_rejects_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let result = run_pipeline(&temp_dir.path().join("nope"), &Config::default());
        assert!(result.is_err());
    }
}
