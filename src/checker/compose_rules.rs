use crate::analyzer::docker_analyzer::validate_compose;
use crate::checker::core::{CheckContext, Findings, Issue, IssueCategory, Severity};
use once_cell::sync::Lazy;
use regex::Regex;

static PRIVILEGED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*privileged[ \t]*:[ \t]*true\b").expect("valid privileged regex"));

static SECRET_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?mi)^[ \t]*(?:-[ \t]*)?["']?([a-z0-9_]*(?:password|secret|token|api_key|apikey)[a-z0-9_]*)["']?[ \t]*[:=][ \t]*["']?([^"'\s#]*)"#,
    )
    .expect("valid secret regex")
});

static VERSION_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^version\s*:").expect("valid version regex"));

fn issue(severity: Severity, title: &str) -> Issue {
    Issue::new(IssueCategory::Compose, severity, title)
}

pub fn check(ctx: &CheckContext) -> Vec<Issue> {
    let Some(content) = ctx.compose else {
        return Vec::new();
    };

    let mut findings = Findings::default();

    findings.push_if(!validate_compose(content), || {
        issue(Severity::High, "Invalid Docker Compose file")
            .describe("Neither a services: nor a version: key was found.")
            .recommend("Declare the application under a top-level services: key.")
    });

    if let Err(e) = serde_yaml::from_str::<serde_yaml::Value>(content) {
        log::debug!("Compose file is not valid YAML: {}", e);
        findings.push(
            issue(Severity::High, "Docker Compose file is not valid YAML")
                .describe(e.to_string())
                .recommend("Fix the YAML syntax; `docker compose config` reports the exact location."),
        );
    }

    findings.push_if(PRIVILEGED.is_match(content), || {
        issue(Severity::High, "Privileged container in Docker Compose")
            .describe("privileged: true gives the container full access to the host.")
            .recommend("Grant only the capabilities the service needs with cap_add.")
    });

    let secrets = inline_secrets(content);
    findings.push_if(!secrets.is_empty(), || {
        issue(Severity::High, "Hardcoded secrets in Docker Compose")
            .describe(format!("Inline values for: {}", secrets.join(", ")))
            .recommend("Reference secrets as ${VAR} and supply them from the environment or Docker secrets.")
    });

    findings.push_if(VERSION_KEY.is_match(content), || {
        issue(Severity::Low, "Obsolete version key in Docker Compose")
            .describe("The Compose specification ignores the top-level version key.")
            .recommend("Remove the version: line.")
    });

    findings.push_if(!content.contains("restart:"), || {
        issue(Severity::Low, "No restart policy in Docker Compose")
            .recommend("Add restart: unless-stopped to long-running services.")
    });

    findings.push_if(!content.contains("healthcheck:"), || {
        issue(Severity::Low, "No healthcheck in Docker Compose")
            .recommend("Add a healthcheck so dependent services wait for readiness.")
    });

    findings.into_vec()
}

/// Secret-looking keys assigned a literal value instead of a `${...}` reference
fn inline_secrets(content: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for captures in SECRET_ASSIGNMENT.captures_iter(content) {
        let key = &captures[1];
        let value = &captures[2];
        if key.to_ascii_uppercase().ends_with("_FILE") || value.is_empty() || value.starts_with("${")
        {
            continue;
        }
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}
