//! # Core Checker Types
//!
//! Issue model shared by every rule group.

use crate::analyzer::Analysis;
use crate::generator::GeneratedFiles;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue severity, most severe first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// True when `self` is as severe as `threshold` or more
    pub fn at_least(&self, threshold: Severity) -> bool {
        *self <= threshold
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown severity '{}'", s))
    }
}

/// Rule group an issue belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    Dockerfile,
    Compose,
    Readme,
    Security,
    Performance,
    BestPractice,
    MissingFile,
    Environment,
    Dependency,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Dockerfile => "dockerfile",
            IssueCategory::Compose => "compose",
            IssueCategory::Readme => "readme",
            IssueCategory::Security => "security",
            IssueCategory::Performance => "performance",
            IssueCategory::BestPractice => "best-practice",
            IssueCategory::MissingFile => "missing-file",
            IssueCategory::Environment => "environment",
            IssueCategory::Dependency => "dependency",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One best-practice or security finding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    #[serde(rename = "type")]
    pub category: IssueCategory,
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
    pub recommendation: Option<String>,
}

impl Issue {
    pub fn new(category: IssueCategory, severity: Severity, title: impl Into<String>) -> Self {
        Self {
            category,
            severity,
            title: title.into(),
            description: None,
            recommendation: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn recommend(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// What the rules look at: the analysis plus the artifact text to inspect.
///
/// Artifact text is the existing file's content, or generated content for artifacts the
/// repository lacks.
pub struct CheckContext<'a> {
    pub analysis: &'a Analysis,
    pub dockerfile: Option<&'a str>,
    pub compose: Option<&'a str>,
}

impl<'a> CheckContext<'a> {
    pub fn new(analysis: &'a Analysis, generated: Option<&'a GeneratedFiles>) -> Self {
        let pick = |existing: &'a Option<String>, fallback: Option<&'a Option<String>>| {
            existing
                .as_deref()
                .or_else(|| fallback.and_then(|content| content.as_deref()))
        };

        Self {
            analysis,
            dockerfile: pick(
                &analysis.dockerfile.content,
                generated.map(|g| &g.dockerfile),
            ),
            compose: pick(&analysis.compose.content, generated.map(|g| &g.compose)),
        }
    }
}

/// Findings for a group, collected in rule order
#[derive(Default)]
pub(crate) struct Findings(Vec<Issue>);

impl Findings {
    pub fn push_if(&mut self, condition: bool, issue: impl FnOnce() -> Issue) {
        if condition {
            self.0.push(issue());
        }
    }

    pub fn push(&mut self, issue: Issue) {
        self.0.push(issue);
    }

    pub fn into_vec(self) -> Vec<Issue> {
        self.0
    }
}
