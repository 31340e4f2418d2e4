use crate::checker::core::{CheckContext, Findings, Issue, IssueCategory, Severity};

const MIN_README_CHARS: usize = 100;

fn issue(severity: Severity, title: &str) -> Issue {
    Issue::new(IssueCategory::Readme, severity, title)
}

pub fn check(ctx: &CheckContext) -> Vec<Issue> {
    let readme = &ctx.analysis.readme;
    if !readme.exists {
        return Vec::new();
    }

    let mut findings = Findings::default();
    let length = readme
        .content
        .as_deref()
        .map(|content| content.trim().chars().count())
        .unwrap_or(0);

    findings.push_if(!readme.is_valid, || {
        issue(Severity::Medium, "README is empty")
            .recommend("Describe what the project does and how to run it.")
    });
    findings.push_if(readme.is_valid && length < MIN_README_CHARS, || {
        issue(Severity::Low, "README is very short")
            .describe(format!("The README has only {} characters.", length))
            .recommend("Expand the README with setup, usage and deployment notes.")
    });
    findings.push_if(!readme.has_installation, || {
        issue(Severity::Low, "README lacks installation instructions")
            .recommend("Add an Installation section listing prerequisites and setup steps.")
    });
    findings.push_if(!readme.has_usage, || {
        issue(Severity::Low, "README lacks usage instructions")
            .recommend("Add a Usage section with example commands.")
    });
    findings.push_if(ctx.analysis.dockerfile.exists && !readme.has_docker_info, || {
        issue(Severity::Low, "README lacks Docker instructions")
            .describe("The repository has a Dockerfile but the README does not mention Docker.")
            .recommend("Document how to build and run the image.")
    });

    findings.into_vec()
}
