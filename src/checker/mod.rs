//! # Checker Module
//!
//! Best-practice and security review of an [`Analysis`]. Rule groups run in a fixed order and
//! their findings are concatenated:
//! dockerfile, compose, readme, security, performance, best-practice, missing-file,
//! environment, dependency.
//!
//! Every rule is a pure predicate emitting at most one [`Issue`]. Missing optional data never
//! triggers a rule.

use crate::analyzer::Analysis;
use crate::generator::GeneratedFiles;

pub mod compose_rules;
pub mod core;
pub mod dockerfile_rules;
pub mod readme_rules;
pub mod repository_rules;
pub mod security_rules;

pub use core::{CheckContext, Issue, IssueCategory, Severity};

type RuleGroup = fn(&CheckContext) -> Vec<Issue>;

const RULE_GROUPS: [(&str, RuleGroup); 9] = [
    ("dockerfile", dockerfile_rules::check),
    ("compose", compose_rules::check),
    ("readme", readme_rules::check),
    ("security", security_rules::check),
    ("performance", repository_rules::performance),
    ("best-practice", repository_rules::best_practice),
    ("missing-file", repository_rules::missing_files),
    ("environment", repository_rules::environment),
    ("dependency", repository_rules::dependencies),
];

/// Checks the repository as analysed, without generated artifacts
pub fn check(analysis: &Analysis) -> Vec<Issue> {
    check_with_generated(analysis, None)
}

/// Checks the repository, inspecting generated Dockerfile and compose text where the
/// repository has none.
///
/// Existence rules always judge the analysed repository.
pub fn check_with_generated(analysis: &Analysis, generated: Option<&GeneratedFiles>) -> Vec<Issue> {
    let ctx = CheckContext::new(analysis, generated);
    let mut issues = Vec::new();

    for (group, rules) in RULE_GROUPS {
        let found = rules(&ctx);
        log::debug!("{} rules: {} issue(s)", group, found.len());
        issues.extend(found);
    }

    log::info!("Check complete: {} issue(s)", issues.len());
    issues
}

/// Keeps issues at or above `threshold`
pub fn filter_by_severity(issues: &[Issue], threshold: Severity) -> Vec<Issue> {
    issues
        .iter()
        .filter(|issue| issue.severity.at_least(threshold))
        .cloned()
        .collect()
}
