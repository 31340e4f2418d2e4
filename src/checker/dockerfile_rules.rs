use crate::analyzer::docker_analyzer::{parse_instructions, validate_dockerfile, Instruction};
use crate::checker::core::{CheckContext, Findings, Issue, IssueCategory, Severity};
use std::collections::HashSet;

fn issue(severity: Severity, title: &str) -> Issue {
    Issue::new(IssueCategory::Dockerfile, severity, title)
}

pub fn check(ctx: &CheckContext) -> Vec<Issue> {
    let Some(content) = ctx.dockerfile else {
        return Vec::new();
    };

    let mut findings = Findings::default();
    if !validate_dockerfile(content) {
        findings.push(
            issue(Severity::High, "Dockerfile has no recognizable instructions")
                .describe("None of FROM, WORKDIR, COPY, RUN or CMD appear in the Dockerfile.")
                .recommend("Rewrite the Dockerfile starting from a FROM instruction."),
        );
        return findings.into_vec();
    }

    let instructions = parse_instructions(content);
    let has = |keyword: &str| instructions.iter().any(|i| i.keyword == keyword);

    findings.push_if(!has("FROM"), || {
        issue(Severity::Critical, "Dockerfile missing FROM instruction")
            .describe("Every image build needs a base image.")
            .recommend("Add a FROM instruction with a pinned base image.")
    });

    let last_user = instructions.iter().rev().find(|i| i.keyword == "USER");
    findings.push_if(last_user.is_some_and(|user| is_root(&user.args)), || {
        issue(Severity::High, "Container runs as root")
            .describe("The final USER instruction switches to root.")
            .recommend("Switch to a dedicated non-root user after privileged setup steps.")
    });
    findings.push_if(last_user.is_none(), || {
        issue(Severity::Medium, "No USER instruction in Dockerfile")
            .describe("Without a USER instruction the container runs as root.")
            .recommend("Create an unprivileged user and switch to it with USER.")
    });

    let floating = floating_base_images(&instructions);
    findings.push_if(!floating.is_empty(), || {
        issue(Severity::Medium, "Base image uses latest or no tag")
            .describe(format!("Unpinned base images: {}", floating.join(", ")))
            .recommend("Pin base images to a specific version tag or digest.")
    });

    findings.push_if(
        instructions
            .iter()
            .any(|i| i.keyword == "ADD" && adds_local_files(&i.args)),
        || {
            issue(Severity::Low, "ADD used for local files")
                .describe("ADD has implicit archive extraction and remote fetch behavior.")
                .recommend("Use COPY for local files and directories.")
        },
    );

    findings.push_if(!has("HEALTHCHECK"), || {
        issue(Severity::Low, "No HEALTHCHECK instruction")
            .recommend("Add a HEALTHCHECK that probes the application's /health endpoint.")
    });

    findings.push_if(!has("EXPOSE"), || {
        issue(Severity::Low, "No EXPOSE instruction")
            .recommend("Document the listening port with EXPOSE.")
    });

    findings.into_vec()
}

fn is_root(user: &str) -> bool {
    let name = user.split(':').next().unwrap_or("").trim();
    name == "root" || name == "0"
}

/// Base image references without a pinned tag or digest
///
/// Stage aliases, `scratch` and build-arg references are not images and are skipped.
fn floating_base_images(instructions: &[Instruction]) -> Vec<String> {
    let mut stages: HashSet<String> = HashSet::new();
    let mut floating = Vec::new();

    for instruction in instructions.iter().filter(|i| i.keyword == "FROM") {
        let mut tokens = instruction
            .args
            .split_whitespace()
            .filter(|token| !token.starts_with("--"));
        let Some(image) = tokens.next() else {
            continue;
        };
        if let (Some(as_kw), Some(alias)) = (tokens.next(), tokens.next()) {
            if as_kw.eq_ignore_ascii_case("as") {
                stages.insert(alias.to_ascii_lowercase());
            }
        }

        let lowered = image.to_ascii_lowercase();
        if lowered == "scratch" || image.starts_with('$') || stages.contains(&lowered) {
            continue;
        }
        if image.contains('@') {
            continue;
        }

        let last_segment = image.rsplit('/').next().unwrap_or(image);
        match last_segment.split_once(':') {
            Some((_, "latest")) | None => floating.push(image.to_string()),
            Some(_) => {}
        }
    }

    floating
}

fn adds_local_files(args: &str) -> bool {
    let tokens: Vec<&str> = args
        .split_whitespace()
        .filter(|token| !token.starts_with("--"))
        .collect();
    let Some((_, sources)) = tokens.split_last() else {
        return false;
    };
    sources
        .iter()
        .any(|source| !(source.starts_with("http://") || source.starts_with("https://")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analysis, ProjectType};

    fn titles(dockerfile: &str) -> Vec<String> {
        let analysis = Analysis::new(ProjectType::NodeJs);
        let ctx = CheckContext {
            analysis: &analysis,
            dockerfile: Some(dockerfile),
            compose: None,
        };
        check(&ctx).into_iter().map(|i| i.title).collect()
    }

    #[test]
    fn test_no_dockerfile_no_issues() {
        let analysis = Analysis::new(ProjectType::NodeJs);
        let ctx = CheckContext::new(&analysis, None);
        assert!(check(&ctx).is_empty());
    }

    #[test]
    fn test_invalid_dockerfile_short_circuits() {
        let titles = titles("hello world\n");
        assert_eq!(titles, vec!["Dockerfile has no recognizable instructions"]);
    }

    #[test]
    fn test_minimal_dockerfile_findings() {
        let titles = titles("FROM node\nCOPY . .\nCMD [\"node\", \"app.js\"]\n");
        assert!(titles.contains(&"No USER instruction in Dockerfile".to_string()));
        assert!(titles.contains(&"Base image uses latest or no tag".to_string()));
        assert!(titles.contains(&"No HEALTHCHECK instruction".to_string()));
        assert!(titles.contains(&"No EXPOSE instruction".to_string()));
        assert!(!titles.contains(&"Dockerfile missing FROM instruction".to_string()));
    }

    #[test]
    fn test_missing_from() {
        let titles = titles("WORKDIR /app\nRUN make\n");
        assert!(titles.contains(&"Dockerfile missing FROM instruction".to_string()));
    }

    #[test]
    fn test_root_user_only_when_last() {
        let switched_back = titles("FROM alpine:3.19\nUSER root\nRUN apk add curl\nUSER 101\n");
        assert!(!switched_back.contains(&"Container runs as root".to_string()));

        let stays_root = titles("FROM alpine:3.19\nUSER app\nUSER root:root\n");
        assert!(stays_root.contains(&"Container runs as root".to_string()));
    }

    #[test]
    fn test_stage_aliases_and_scratch_not_flagged() {
        let content = "FROM golang:1.21 AS build\nFROM build AS test\nFROM scratch\nARG BASE\nFROM $BASE\n";
        let instructions = parse_instructions(content);
        assert!(floating_base_images(&instructions).is_empty());

        let content = "FROM --platform=linux/amd64 registry:5000/team/app:latest\nFROM ubuntu\n";
        let instructions = parse_instructions(content);
        assert_eq!(
            floating_base_images(&instructions),
            vec!["registry:5000/team/app:latest", "ubuntu"]
        );
    }

    #[test]
    fn test_add_remote_is_fine() {
        assert!(!adds_local_files("https://example.com/tool.tar.gz /opt/"));
        assert!(adds_local_files("--chown=app:app ./src /app/src"));
    }
}
