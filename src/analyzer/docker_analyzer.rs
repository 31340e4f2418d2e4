//! # Docker Analyzer Module
//!
//! Locates the repository's Dockerfile and Docker Compose file, captures their content and
//! runs the syntactic smoke tests used by the rest of the pipeline. Also provides a small
//! instruction splitter shared with the Dockerfile rules.

use crate::analyzer::AnalysisConfig;
use crate::common::file_utils::read_candidate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DOCKERFILE_CANDIDATES: [&str; 3] = ["Dockerfile", "Dockerfile.dev", "Dockerfile.prod"];
pub const COMPOSE_CANDIDATES: [&str; 3] = [
    "docker-compose.yml",
    "docker-compose.yaml",
    "docker-compose.override.yml",
];

const DOCKERFILE_TOKENS: [&str; 5] = ["FROM", "WORKDIR", "COPY", "RUN", "CMD"];

/// Inventory entry for an artifact the generator can synthesize
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactInfo {
    pub exists: bool,
    pub path: Option<String>,
    pub content: Option<String>,
    pub is_valid: bool,
}

impl ArtifactInfo {
    fn found(path: &str, content: String, is_valid: bool) -> Self {
        Self {
            exists: true,
            path: Some(path.to_string()),
            content: Some(content),
            is_valid,
        }
    }
}

/// One logical Dockerfile instruction, continuation lines joined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub keyword: String,
    pub args: String,
}

pub fn analyze_dockerfile(root: &Path, config: &AnalysisConfig) -> ArtifactInfo {
    first_readable(root, &DOCKERFILE_CANDIDATES, config, validate_dockerfile)
}

pub fn analyze_compose(root: &Path, config: &AnalysisConfig) -> ArtifactInfo {
    first_readable(root, &COMPOSE_CANDIDATES, config, validate_compose)
}

/// First candidate that exists and can be read; unreadable candidates are skipped
fn first_readable(
    root: &Path,
    candidates: &[&str],
    config: &AnalysisConfig,
    validate: fn(&str) -> bool,
) -> ArtifactInfo {
    for candidate in candidates {
        if let Some(content) = read_candidate(&root.join(candidate), config.max_file_size) {
            let is_valid = validate(&content);
            log::debug!("Found {} (valid: {})", candidate, is_valid);
            return ArtifactInfo::found(candidate, content, is_valid);
        }
    }
    ArtifactInfo::default()
}

/// Smoke test: at least one core instruction token appears
pub fn validate_dockerfile(content: &str) -> bool {
    DOCKERFILE_TOKENS.iter().any(|token| content.contains(token))
}

/// Smoke test: a `services:` or `version:` line appears
pub fn validate_compose(content: &str) -> bool {
    content
        .lines()
        .any(|line| line.contains("services:") || line.contains("version:"))
}

/// Splits Dockerfile text into instructions, skipping comments and joining `\` continuations
pub fn parse_instructions(content: &str) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pending = String::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if pending.is_empty() && (trimmed.is_empty() || trimmed.starts_with('#')) {
            continue;
        }

        if let Some(stripped) = trimmed.strip_suffix('\\') {
            pending.push_str(stripped);
            pending.push(' ');
            continue;
        }

        pending.push_str(trimmed);
        push_instruction(&mut instructions, &pending);
        pending.clear();
    }

    if !pending.is_empty() {
        push_instruction(&mut instructions, &pending);
    }

    instructions
}

fn push_instruction(instructions: &mut Vec<Instruction>, line: &str) {
    let line = line.trim();
    let (keyword, args) = match line.split_once(char::is_whitespace) {
        Some((keyword, args)) => (keyword, args.trim()),
        None => (line, ""),
    };
    if keyword.is_empty() {
        return;
    }
    instructions.push(Instruction {
        keyword: keyword.to_uppercase(),
        args: args.to_string(),
    });
}
