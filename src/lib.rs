//! # repolens
//!
//! Analyzes a checked-out repository, generates the deployment artifacts it is missing
//! (Dockerfile, Docker Compose file, README) and reports best-practice and security issues.
//!
//! ## Features
//!
//! - **Project Detection**: Resolves the project type from marker files at the repository root
//! - **Inventory**: Reports Docker, README, `.gitignore`, env and manifest files plus tooling
//! - **Generation**: Renders missing artifacts from embedded templates, one family per ecosystem
//! - **Checking**: Runs ordered rule groups and reports issues with a fixed severity
//!
//! ## Example
//!
//! ```rust,no_run
//! use repolens::{analyze_project, check, generate};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analysis = analyze_project(Path::new("./my-project"))?;
//! let generated = generate(&analysis)?;
//! if let Some(dockerfile) = &generated.dockerfile {
//!     println!("{}", dockerfile);
//! }
//! for issue in check(&analysis) {
//!     println!("[{}] {}", issue.severity, issue.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod checker;
pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod generator;
pub mod pipeline;

// Re-export commonly used types and functions
pub use analyzer::{analyze_project, analyze_project_with_config, Analysis, AnalysisConfig, ProjectType};
pub use checker::{check, check_with_generated, Issue, IssueCategory, Severity};
pub use config::{load_config, Config};
pub use error::{RepolensError, Result};
pub use generator::{generate, generate_compose, generate_dockerfile, generate_readme, GeneratedFiles};
pub use pipeline::{run_pipeline, PipelineReport};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
