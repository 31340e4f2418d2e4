//! Dependency name extraction and keyword categorization.
//!
//! Names are read from every manifest present at the repository root and sorted into
//! buckets by case-insensitive keyword substring matches. The keyword lists are plain data
//! and can be replaced through configuration.

use crate::analyzer::AnalysisConfig;
use crate::common::file_utils::read_candidate;
use crate::error::AnalysisError;
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Case-insensitive "contains any of" matcher over a fixed keyword list
#[derive(Debug, Clone)]
pub struct KeywordSet {
    matcher: Option<AhoCorasick>,
    lowered: Vec<String>,
}

impl KeywordSet {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let lowered: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().to_ascii_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let matcher = match AhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostFirst)
            .ascii_case_insensitive(true)
            .build(&lowered)
        {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                warn!("Failed to build keyword matcher, using plain scan: {}", e);
                None
            }
        };

        Self { matcher, lowered }
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        if self.lowered.is_empty() {
            return false;
        }
        match &self.matcher {
            Some(matcher) => matcher.is_match(haystack),
            None => {
                let haystack = haystack.to_ascii_lowercase();
                self.lowered.iter().any(|k| haystack.contains(k.as_str()))
            }
        }
    }
}

/// Keyword lists driving [`categorize`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DependencyKeywords {
    pub database: Vec<String>,
    pub web_framework: Vec<String>,
    pub testing: Vec<String>,
    pub build_tools: Vec<String>,
    pub utilities: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for DependencyKeywords {
    fn default() -> Self {
        Self {
            database: strings(&[
                "mysql", "postgres", "mongodb", "redis", "sqlite", "mariadb", "oracle", "sqlserver",
            ]),
            web_framework: strings(&[
                "express", "koa", "fastify", "hapi", "django", "flask", "fastapi", "laravel",
                "symfony", "spring", "gin", "echo",
            ]),
            testing: strings(&[
                "jest", "mocha", "chai", "cypress", "playwright", "pytest", "unittest", "junit",
                "testng",
            ]),
            build_tools: strings(&[
                "webpack", "vite", "rollup", "parcel", "gulp", "grunt", "babel", "typescript",
            ]),
            utilities: strings(&["lodash", "moment", "axios", "request", "fs-extra", "path", "util"]),
        }
    }
}

/// Dependency names sorted into buckets; a name may appear in several buckets
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DependencyCategories {
    pub database: Vec<String>,
    pub web_framework: Vec<String>,
    pub testing: Vec<String>,
    pub build_tools: Vec<String>,
    pub utilities: Vec<String>,
}

impl DependencyCategories {
    pub fn is_empty(&self) -> bool {
        self.database.is_empty()
            && self.web_framework.is_empty()
            && self.testing.is_empty()
            && self.build_tools.is_empty()
            && self.utilities.is_empty()
    }

    /// Every categorized name across buckets; a name in several buckets repeats
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.database
            .iter()
            .chain(&self.web_framework)
            .chain(&self.testing)
            .chain(&self.build_tools)
            .chain(&self.utilities)
            .map(String::as_str)
    }
}

type ManifestParser = fn(&str) -> Result<Vec<String>, String>;

/// Manifests that contribute dependency names, in collection order
const DEPENDENCY_MANIFESTS: [(&str, ManifestParser); 7] = [
    ("package.json", parse_package_json),
    ("requirements.txt", parse_requirements_txt),
    ("Cargo.toml", parse_cargo_toml),
    ("composer.json", parse_composer_json),
    ("go.mod", parse_go_mod),
    ("Gemfile", parse_gemfile),
    ("pom.xml", parse_pom_xml),
];

pub fn analyze_dependencies(root: &Path, config: &AnalysisConfig) -> DependencyCategories {
    let names = collect_dependency_names(root, config);
    debug!("Collected {} dependency names", names.len());
    categorize(&names, &config.keywords)
}

/// Dependency names from every readable manifest, first occurrence kept
pub fn collect_dependency_names(root: &Path, config: &AnalysisConfig) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for (file, parser) in DEPENDENCY_MANIFESTS {
        let Some(content) = read_candidate(&root.join(file), config.max_file_size) else {
            continue;
        };

        match parser(&content) {
            Ok(found) => {
                debug!("{}: {} dependencies", file, found.len());
                for name in found {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
            Err(reason) => {
                let error = AnalysisError::DependencyParsing {
                    file: file.to_string(),
                    reason,
                };
                warn!("{}", error);
            }
        }
    }

    names
}

/// Sorts names into keyword buckets, each bucket deduplicated in input order
pub fn categorize(names: &[String], keywords: &DependencyKeywords) -> DependencyCategories {
    let bucket = |list: &[String]| -> Vec<String> {
        let set = KeywordSet::new(list);
        let mut matched: Vec<String> = Vec::new();
        for name in names {
            if set.is_match(name) && !matched.contains(name) {
                matched.push(name.clone());
            }
        }
        matched
    };

    DependencyCategories {
        database: bucket(&keywords.database),
        web_framework: bucket(&keywords.web_framework),
        testing: bucket(&keywords.testing),
        build_tools: bucket(&keywords.build_tools),
        utilities: bucket(&keywords.utilities),
    }
}

fn json_keys(manifest: &Value, sections: &[&str]) -> Vec<String> {
    sections
        .iter()
        .filter_map(|section| manifest.get(section).and_then(|v| v.as_object()))
        .flat_map(|map| map.keys().cloned())
        .collect()
}

fn parse_package_json(content: &str) -> Result<Vec<String>, String> {
    let manifest: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    Ok(json_keys(&manifest, &["dependencies", "devDependencies"]))
}

fn parse_composer_json(content: &str) -> Result<Vec<String>, String> {
    let manifest: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    Ok(json_keys(&manifest, &["require", "require-dev"]))
}

fn parse_requirements_txt(content: &str) -> Result<Vec<String>, String> {
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| {
            let name = line
                .split(&['=', '>', '<', '~', '!', '[', ';', ' '][..])
                .next()
                .unwrap_or("")
                .trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect())
}

fn parse_cargo_toml(content: &str) -> Result<Vec<String>, String> {
    let parsed: toml::Value = toml::from_str(content).map_err(|e| e.to_string())?;
    Ok(["dependencies", "dev-dependencies"]
        .iter()
        .filter_map(|section| parsed.get(section).and_then(|v| v.as_table()))
        .flat_map(|table| table.keys().cloned())
        .collect())
}

fn parse_go_mod(content: &str) -> Result<Vec<String>, String> {
    let mut names = Vec::new();
    let mut in_require_block = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("require (") {
            in_require_block = true;
            continue;
        }
        if in_require_block && trimmed == ")" {
            in_require_block = false;
            continue;
        }

        if in_require_block || trimmed.starts_with("require ") {
            let parts: Vec<&str> = trimmed
                .trim_start_matches("require ")
                .split_whitespace()
                .collect();
            if parts.len() >= 2 {
                names.push(parts[0].to_string());
            }
        }
    }

    Ok(names)
}

fn parse_gemfile(content: &str) -> Result<Vec<String>, String> {
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("gem "))
        .filter_map(|line| {
            let quote_start = line.find(['\'', '"'])?;
            let rest = &line[quote_start + 1..];
            let quote_end = rest.find(['\'', '"'])?;
            Some(rest[..quote_end].to_string())
        })
        .collect())
}

fn parse_pom_xml(content: &str) -> Result<Vec<String>, String> {
    let mut names = Vec::new();
    let mut in_dependency = false;

    for line in content.lines() {
        if line.contains("<dependency>") {
            in_dependency = true;
        }
        if in_dependency {
            let artifact = extract_xml_value(line, "artifactId");
            if !artifact.is_empty() {
                names.push(artifact.to_string());
            }
        }
        if line.contains("</dependency>") {
            in_dependency = false;
        }
    }

    Ok(names)
}

fn extract_xml_value<'a>(line: &'a str, tag: &str) -> &'a str {
    let start_tag = format!("<{}>", tag);
    let end_tag = format!("</{}>", tag);

    if let Some(start) = line.find(&start_tag) {
        if let Some(end) = line.find(&end_tag) {
            if start + start_tag.len() <= end {
                return &line[start + start_tag.len()..end];
            }
        }
    }
    ""
}
