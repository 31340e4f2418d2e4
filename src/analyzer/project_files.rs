//! Inventories of the repository's supporting files: README, `.gitignore`, env files and the
//! primary dependency manifest. Content heuristics are case-insensitive keyword tests, not
//! parsers.

use crate::analyzer::dependency_parser::KeywordSet;
use crate::analyzer::AnalysisConfig;
use crate::common::file_utils::read_candidate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

pub const README_CANDIDATES: [&str; 5] = ["README.md", "README", "Readme.md", "readme.md", "README.txt"];
pub const ENV_CANDIDATES: [&str; 5] = [
    ".env",
    ".env.local",
    ".env.development",
    ".env.production",
    ".env.example",
];
pub const ENV_EXAMPLE: &str = ".env.example";
pub const MANIFEST_CANDIDATES: [&str; 11] = [
    "package.json",
    "requirements.txt",
    "setup.py",
    "pyproject.toml",
    "pom.xml",
    "build.gradle",
    "composer.json",
    "go.mod",
    "Gemfile",
    "Cargo.toml",
    "pubspec.yaml",
];

static DOCKER_WORDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&["docker"]));
static INSTALL_WORDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&["install"]));
static USAGE_WORDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&["usage", "how to"]));
static DATABASE_WORDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&["database", "db_"]));
static API_KEY_WORDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&["api", "key"]));
static PORT_WORDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&["port"]));
static NODE_MODULES_WORDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&["node_modules"]));
static ENV_FILE_WORDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&[".env"]));
static LOG_WORDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&["logs"]));
static BUILD_WORDS: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(&["build", "dist"]));

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeInfo {
    pub exists: bool,
    pub path: Option<String>,
    pub content: Option<String>,
    pub is_valid: bool,
    pub has_docker_info: bool,
    pub has_installation: bool,
    pub has_usage: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GitignoreInfo {
    pub exists: bool,
    pub content: Option<String>,
    pub has_node_modules: bool,
    pub has_env_files: bool,
    pub has_logs: bool,
    pub has_build: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvFile {
    pub path: String,
    pub content: String,
    pub has_database_url: bool,
    pub has_api_keys: bool,
    pub has_port: bool,
}

impl EnvFile {
    pub fn is_example(&self) -> bool {
        self.path == ENV_EXAMPLE
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvInfo {
    pub exists: bool,
    pub files: Vec<EnvFile>,
    pub count: usize,
}

impl EnvInfo {
    pub fn has_file(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.path == path)
    }
}

/// Manifest body: parsed JSON for `package.json`, raw text for everything else
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ManifestContent {
    Text(String),
    Json(Value),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub exists: bool,
    pub path: Option<String>,
    pub content: Option<ManifestContent>,
    pub has_scripts: bool,
    pub has_dependencies: bool,
    pub has_dev_dependencies: bool,
}

impl PackageInfo {
    pub fn json(&self) -> Option<&Value> {
        match &self.content {
            Some(ManifestContent::Json(value)) => Some(value),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Some(ManifestContent::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// `name` field of a JSON manifest
    pub fn name(&self) -> Option<&str> {
        self.json()
            .and_then(|v| v.get("name"))
            .and_then(|n| n.as_str())
            .filter(|n| !n.is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        self.json()
            .and_then(|v| v.get("description"))
            .and_then(|d| d.as_str())
            .filter(|d| !d.is_empty())
    }

    pub fn script_names(&self) -> Vec<String> {
        self.json()
            .and_then(|v| v.get("scripts"))
            .and_then(|s| s.as_object())
            .map(|scripts| scripts.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_manifest(&self, file_name: &str) -> bool {
        self.exists && self.path.as_deref() == Some(file_name)
    }
}

pub fn analyze_readme(root: &Path, config: &AnalysisConfig) -> ReadmeInfo {
    for candidate in README_CANDIDATES {
        if let Some(content) = read_candidate(&root.join(candidate), config.max_file_size) {
            return ReadmeInfo {
                exists: true,
                path: Some(candidate.to_string()),
                is_valid: !content.trim().is_empty(),
                has_docker_info: DOCKER_WORDS.is_match(&content),
                has_installation: INSTALL_WORDS.is_match(&content),
                has_usage: USAGE_WORDS.is_match(&content),
                content: Some(content),
            };
        }
    }
    ReadmeInfo::default()
}

pub fn analyze_gitignore(root: &Path, config: &AnalysisConfig) -> GitignoreInfo {
    match read_candidate(&root.join(".gitignore"), config.max_file_size) {
        Some(content) => GitignoreInfo {
            exists: true,
            has_node_modules: NODE_MODULES_WORDS.is_match(&content),
            has_env_files: ENV_FILE_WORDS.is_match(&content),
            has_logs: LOG_WORDS.is_match(&content),
            has_build: BUILD_WORDS.is_match(&content),
            content: Some(content),
        },
        None => GitignoreInfo::default(),
    }
}

pub fn analyze_env_files(root: &Path, config: &AnalysisConfig) -> EnvInfo {
    let files: Vec<EnvFile> = ENV_CANDIDATES
        .iter()
        .filter_map(|candidate| {
            let content = read_candidate(&root.join(candidate), config.max_file_size)?;
            Some(EnvFile {
                path: candidate.to_string(),
                has_database_url: DATABASE_WORDS.is_match(&content),
                has_api_keys: API_KEY_WORDS.is_match(&content),
                has_port: PORT_WORDS.is_match(&content),
                content,
            })
        })
        .collect();

    EnvInfo {
        exists: !files.is_empty(),
        count: files.len(),
        files,
    }
}

/// First manifest that can be read (and, for `package.json`, parsed)
pub fn analyze_package_file(root: &Path, config: &AnalysisConfig) -> PackageInfo {
    for candidate in MANIFEST_CANDIDATES {
        let Some(content) = read_candidate(&root.join(candidate), config.max_file_size) else {
            continue;
        };

        if candidate != "package.json" {
            return PackageInfo {
                exists: true,
                path: Some(candidate.to_string()),
                content: Some(ManifestContent::Text(content)),
                ..PackageInfo::default()
            };
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(parsed) => {
                return PackageInfo {
                    exists: true,
                    path: Some(candidate.to_string()),
                    has_scripts: has_entries(&parsed, "scripts"),
                    has_dependencies: has_entries(&parsed, "dependencies"),
                    has_dev_dependencies: has_entries(&parsed, "devDependencies"),
                    content: Some(ManifestContent::Json(parsed)),
                };
            }
            Err(e) => log::warn!("Ignoring malformed package.json: {}", e),
        }
    }
    PackageInfo::default()
}

fn has_entries(manifest: &Value, key: &str) -> bool {
    manifest
        .get(key)
        .and_then(|v| v.as_object())
        .map_or(false, |map| !map.is_empty())
}
