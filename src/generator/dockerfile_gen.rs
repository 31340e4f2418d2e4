use crate::analyzer::{Analysis, ProjectType};
use crate::error::GeneratorError;
use crate::generator::ecosystem::Ecosystem;
use crate::generator::templates;
use serde::Serialize;

/// Project types whose Node image needs an asset build stage
const NODE_BUILD_FRAMEWORKS: [&str; 5] = ["react", "vue", "angular", "nextjs", "nuxt"];

/// Values consumed by the Dockerfile templates; each ecosystem reads the fields it needs
#[derive(Debug, Clone, Serialize)]
pub struct DockerfileContext {
    pub project_type: ProjectType,
    pub ecosystem: Ecosystem,
    pub port: u16,
    pub entry_point: Option<String>,
    pub binary_name: String,
    pub health_path: &'static str,
    pub frameworks: String,
    pub build_step: bool,
    pub nextjs: bool,
    pub requirements: bool,
    pub django: bool,
    pub gradle: bool,
    pub laravel: bool,
}

impl DockerfileContext {
    pub fn from_analysis(analysis: &Analysis, port: u16) -> Self {
        let ecosystem = Ecosystem::for_project_type(analysis.project_type);
        let has_framework = |name: &str| {
            analysis.project_type.as_str() == name || analysis.frameworks.iter().any(|f| f == name)
        };

        let entry_point = select_entry_point(ecosystem, &analysis.entry_points);
        let binary_name = match ecosystem {
            Ecosystem::Rust => cargo_binary_name(analysis).unwrap_or_else(|| "app".to_string()),
            Ecosystem::Go => entry_point
                .as_deref()
                .and_then(|entry| entry.strip_suffix(".go"))
                .unwrap_or("main")
                .to_string(),
            _ => "app".to_string(),
        };

        let build_step = NODE_BUILD_FRAMEWORKS.iter().any(|f| has_framework(*f));
        let build_frameworks: Vec<&str> = NODE_BUILD_FRAMEWORKS
            .iter()
            .copied()
            .filter(|f| has_framework(*f))
            .collect();

        Self {
            project_type: analysis.project_type,
            ecosystem,
            port,
            entry_point,
            binary_name,
            health_path: if has_framework("spring") {
                "/actuator/health"
            } else {
                "/health"
            },
            frameworks: build_frameworks.join(", "),
            build_step,
            nextjs: has_framework("nextjs"),
            requirements: analysis.package.is_manifest("requirements.txt"),
            django: has_framework("django"),
            gradle: analysis.package.is_manifest("build.gradle"),
            laravel: has_framework("laravel"),
        }
    }
}

pub fn generate(analysis: &Analysis, port: u16) -> Result<String, GeneratorError> {
    let context = DockerfileContext::from_analysis(analysis, port);
    log::debug!(
        "Rendering {} Dockerfile for {}",
        context.ecosystem,
        analysis.project_type
    );
    templates::render(context.ecosystem.dockerfile_template(), &context)
}

/// First analysed entry point the ecosystem can run, else its default
fn select_entry_point(ecosystem: Ecosystem, entry_points: &[String]) -> Option<String> {
    let candidates = ecosystem.entry_candidates();
    entry_points
        .iter()
        .find(|entry| candidates.contains(&entry.as_str()))
        .cloned()
        .or_else(|| ecosystem.default_entry().map(str::to_string))
}

/// `[package].name` from an analysed `Cargo.toml`
fn cargo_binary_name(analysis: &Analysis) -> Option<String> {
    if !analysis.package.is_manifest("Cargo.toml") {
        return None;
    }
    let manifest: toml::Value = match toml::from_str(analysis.package.text()?) {
        Ok(manifest) => manifest,
        Err(e) => {
            log::warn!("Cannot read crate name from Cargo.toml: {}", e);
            return None;
        }
    };
    manifest
        .get("package")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}
