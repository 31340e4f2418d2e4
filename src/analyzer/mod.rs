//! # Analyzer Module
//!
//! Walks a checked-out repository and builds an immutable [`Analysis`]:
//! - Project type (first-match-wins marker decision list)
//! - Inventories of Dockerfile, compose file, README, `.gitignore` and env files
//! - The primary dependency manifest and categorized dependencies
//! - Conventional directories, entry points and candidate ports
//! - Database, framework, build, test, lint and CI tooling

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod dependency_parser;
pub mod display;
pub mod docker_analyzer;
pub mod framework_detector;
pub mod project_context;
pub mod project_files;
pub mod project_type;

pub use dependency_parser::{DependencyCategories, DependencyKeywords};
pub use docker_analyzer::ArtifactInfo;
pub use project_context::ProjectStructure;
pub use project_files::{EnvFile, EnvInfo, GitignoreInfo, ManifestContent, PackageInfo, ReadmeInfo};
pub use project_type::ProjectType;

/// Ports reported when nothing could be scraped from scripts or entry files
pub const DEFAULT_PORTS: [u16; 3] = [3000, 8000, 8080];

/// Structured description of one repository snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub project_type: ProjectType,
    pub total_files: usize,
    pub dockerfile: ArtifactInfo,
    pub compose: ArtifactInfo,
    pub readme: ReadmeInfo,
    pub gitignore: GitignoreInfo,
    pub env: EnvInfo,
    pub package: PackageInfo,
    pub structure: ProjectStructure,
    pub dependencies: DependencyCategories,
    pub entry_points: Vec<String>,
    pub ports: Vec<u16>,
    pub database: Vec<String>,
    pub frameworks: Vec<String>,
    pub build_tools: Vec<String>,
    pub test_framework: Vec<String>,
    pub linter: Vec<String>,
    pub ci: Vec<String>,
    pub has_dockerignore: bool,
    pub sensitive_files: Vec<String>,
    pub large_files: Vec<String>,
}

impl Analysis {
    /// Analysis of an empty repository of the given type: every inventory absent, default ports
    pub fn new(project_type: ProjectType) -> Self {
        Self {
            project_type,
            total_files: 0,
            dockerfile: ArtifactInfo::default(),
            compose: ArtifactInfo::default(),
            readme: ReadmeInfo::default(),
            gitignore: GitignoreInfo::default(),
            env: EnvInfo::default(),
            package: PackageInfo::default(),
            structure: ProjectStructure::default(),
            dependencies: DependencyCategories::default(),
            entry_points: Vec::new(),
            ports: DEFAULT_PORTS.to_vec(),
            database: Vec::new(),
            frameworks: Vec::new(),
            build_tools: Vec::new(),
            test_framework: Vec::new(),
            linter: Vec::new(),
            ci: Vec::new(),
            has_dockerignore: false,
            sensitive_files: Vec::new(),
            large_files: Vec::new(),
        }
    }
}

/// Configuration for repository analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory names never descended into
    pub exclude_dirs: Vec<String>,
    /// Upper bound for files read into memory
    pub max_file_size: usize,
    /// Files above this size are reported as large
    pub large_file_threshold: u64,
    pub keywords: DependencyKeywords,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
                "build".to_string(),
                ".next".to_string(),
                "target".to_string(),
            ],
            max_file_size: 1024 * 1024, // 1MB
            large_file_threshold: 1024 * 1024,
            keywords: DependencyKeywords::default(),
        }
    }
}

/// Analyzes a repository directory with the default configuration.
///
/// # Examples
/// ```no_run
/// use repolens::analyzer::analyze_project;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let analysis = analyze_project(Path::new("./my-project"))?;
/// println!("Project type: {}", analysis.project_type);
/// # Ok(())
/// # }
/// ```
pub fn analyze_project(path: &Path) -> Result<Analysis> {
    analyze_project_with_config(path, &AnalysisConfig::default())
}

/// Analyzes a repository directory with custom configuration.
///
/// Only a missing or non-directory root is fatal; every per-file failure is logged and the
/// affected field falls back to "absent".
pub fn analyze_project_with_config(path: &Path, config: &AnalysisConfig) -> Result<Analysis> {
    let start_time = std::time::Instant::now();

    let root = crate::common::file_utils::validate_project_path(path)?;
    log::info!("Starting analysis of repository: {}", root.display());

    let project_type = project_type::detect_project_type(&root);
    log::debug!("Detected project type: {}", project_type);

    let tree = crate::common::file_utils::scan_tree(&root, config);

    let dependencies = dependency_parser::analyze_dependencies(&root, config);
    let tooling = framework_detector::detect_tooling(&root, &dependencies);

    let analysis = Analysis {
        project_type,
        total_files: tree.total_files,
        dockerfile: docker_analyzer::analyze_dockerfile(&root, config),
        compose: docker_analyzer::analyze_compose(&root, config),
        readme: project_files::analyze_readme(&root, config),
        gitignore: project_files::analyze_gitignore(&root, config),
        env: project_files::analyze_env_files(&root, config),
        package: project_files::analyze_package_file(&root, config),
        structure: project_context::analyze_structure(&root),
        dependencies,
        entry_points: project_context::find_entry_points(&root),
        ports: project_context::detect_ports(&root, config),
        database: tooling.database,
        frameworks: tooling.frameworks,
        build_tools: tooling.build_tools,
        test_framework: tooling.test_framework,
        linter: tooling.linter,
        ci: tooling.ci,
        has_dockerignore: root.join(".dockerignore").is_file(),
        sensitive_files: tree.sensitive_files,
        large_files: tree.large_files,
    };

    log::info!(
        "Analysis completed in {}ms: type={}, files={}, dockerfile={}, compose={}, readme={}",
        start_time.elapsed().as_millis(),
        analysis.project_type,
        analysis.total_files,
        analysis.dockerfile.exists,
        analysis.compose.exists,
        analysis.readme.exists
    );

    Ok(analysis)
}

/// Returns an error when `path` is not an existing directory
pub(crate) fn invalid_root(path: &Path, reason: impl Into<String>) -> AnalysisError {
    AnalysisError::InvalidRoot {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let result = analyze_project(&missing);
        assert!(matches!(
            result,
            Err(crate::error::RepolensError::Analysis(AnalysisError::InvalidRoot { .. }))
        ));
    }

    #[test]
    fn test_file_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("package.json");
        fs::write(&file, "{}").unwrap();

        assert!(analyze_project(&file).is_err());
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let analysis = analyze_project(temp_dir.path()).unwrap();

        assert_eq!(analysis.project_type, ProjectType::Unknown);
        assert_eq!(analysis.total_files, 0);
        assert!(!analysis.dockerfile.exists);
        assert!(!analysis.package.exists);
        assert!(analysis.entry_points.is_empty());
        assert_eq!(analysis.ports, DEFAULT_PORTS.to_vec());
        assert_eq!(analysis, Analysis::new(ProjectType::Unknown));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("package.json"),
            r#"{"name":"svc","scripts":{"start":"node server.js --port 4000"},"dependencies":{"express":"^4","pg":"^8","redis":"^4"}}"#,
        )
        .unwrap();
        fs::write(root.join("server.js"), "const port = 4000;\napp.listen(port);").unwrap();
        fs::create_dir_all(root.join("src/lib")).unwrap();
        fs::write(root.join("src/lib/a.js"), "").unwrap();

        let first = serde_json::to_string(&analyze_project(root).unwrap()).unwrap();
        let second = serde_json::to_string(&analyze_project(root).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let temp_dir = TempDir::new().unwrap();
        let analysis = analyze_project(temp_dir.path()).unwrap();
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["projectType"], "unknown");
        assert!(json.get("totalFiles").is_some());
        assert!(json.get("entryPoints").is_some());
        assert!(json["dependencies"].get("webFramework").is_some());
        assert!(json["dockerfile"].get("isValid").is_some());
    }
}
