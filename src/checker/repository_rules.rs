//! Repository-level rule groups: performance, best-practice, missing-file, environment and
//! dependency hygiene.

use crate::analyzer::docker_analyzer::{parse_instructions, validate_dockerfile, Instruction};
use crate::analyzer::project_files::ENV_EXAMPLE;
use crate::analyzer::DEFAULT_PORTS;
use crate::checker::core::{CheckContext, Findings, Issue, IssueCategory, Severity};
use crate::generator::Ecosystem;

const COMMON_IGNORE_PATTERNS: [&str; 3] = [".DS_Store", ".env", "*.log"];
const DEPRECATED_PACKAGES: [&str; 2] = ["request", "moment"];

fn ecosystem_ignore_patterns(ecosystem: Ecosystem) -> &'static [&'static str] {
    match ecosystem {
        Ecosystem::Node => &["node_modules/", "dist/"],
        Ecosystem::Python => &["__pycache__/", "*.py[cod]", "venv/"],
        Ecosystem::Java => &["target/", "*.jar"],
        Ecosystem::Rust => &["target/"],
        _ => &[],
    }
}

/// Instructions of the Dockerfile under check, empty when there is none or it is invalid
fn dockerfile_instructions(ctx: &CheckContext) -> Vec<Instruction> {
    ctx.dockerfile
        .filter(|content| validate_dockerfile(content))
        .map(parse_instructions)
        .unwrap_or_default()
}

pub fn performance(ctx: &CheckContext) -> Vec<Issue> {
    let analysis = ctx.analysis;
    let issue = |severity, title: &str| Issue::new(IssueCategory::Performance, severity, title);
    let instructions = dockerfile_instructions(ctx);
    let runs = || instructions.iter().filter(|i| i.keyword == "RUN");
    let mut findings = Findings::default();

    findings.push_if(ctx.dockerfile.is_some() && !analysis.has_dockerignore, || {
        issue(Severity::Medium, "Missing .dockerignore")
            .describe("Without a .dockerignore the whole tree is sent as build context.")
            .recommend("Add a .dockerignore excluding .git, dependencies and build output.")
    });

    findings.push_if(!analysis.large_files.is_empty(), || {
        issue(Severity::Medium, "Large files in repository")
            .describe(format!(
                "Files over the size threshold: {}",
                analysis.large_files.join(", ")
            ))
            .recommend("Ignore generated files or track large assets with Git LFS.")
    });

    let stages = instructions.iter().filter(|i| i.keyword == "FROM").count();
    findings.push_if(!instructions.is_empty() && stages < 2, || {
        issue(Severity::Low, "Single-stage Dockerfile")
            .describe("Build tooling ends up in the runtime image.")
            .recommend("Use a multi-stage build and copy only runtime artifacts into the final stage.")
    });

    findings.push_if(runs().any(|run| run.args.contains("npm install")), || {
        issue(Severity::Low, "npm install used in Dockerfile")
            .recommend("Use npm ci for reproducible installs from package-lock.json.")
    });

    findings.push_if(
        runs().any(|run| {
            run.args.contains("apt-get install") && !run.args.contains("/var/lib/apt/lists")
        }),
        || {
            issue(Severity::Low, "apt cache not cleaned")
                .recommend("Remove /var/lib/apt/lists/* in the same RUN instruction as apt-get install.")
        },
    );

    findings.into_vec()
}

pub fn best_practice(ctx: &CheckContext) -> Vec<Issue> {
    let analysis = ctx.analysis;
    let issue = |title: &str| Issue::new(IssueCategory::BestPractice, Severity::Low, title);
    let structure = &analysis.structure;
    let mut findings = Findings::default();

    findings.push_if(!structure.has_src && !structure.has_app, || {
        issue("No src/ or app/ directory")
            .recommend("Move source code into a dedicated src/ or app/ directory.")
    });
    findings.push_if(!structure.has_tests, || {
        issue("No test directory")
            .recommend("Add a tests/ directory with automated tests.")
    });
    findings.push_if(analysis.linter.is_empty(), || {
        issue("No linter configured")
            .recommend("Add a linter configuration to keep code style consistent.")
    });
    findings.push_if(analysis.ci.is_empty(), || {
        issue("No CI configuration")
            .recommend("Add a CI workflow that builds and tests every change.")
    });

    if let Some(content) = analysis.gitignore.content.as_deref() {
        let ecosystem = Ecosystem::for_project_type(analysis.project_type);
        let missing: Vec<&str> = COMMON_IGNORE_PATTERNS
            .iter()
            .chain(ecosystem_ignore_patterns(ecosystem))
            .copied()
            .filter(|pattern| !content.contains(pattern.trim_end_matches('/')))
            .collect();
        findings.push_if(!missing.is_empty(), || {
            issue(".gitignore missing common patterns")
                .describe(format!("Missing patterns: {}", missing.join(", ")))
                .recommend("Add these patterns to .gitignore.")
        });
    }

    findings.push_if(
        analysis.package.is_manifest("package.json") && !analysis.package.has_scripts,
        || {
            issue("package.json has no scripts")
                .recommend("Add start, build and test scripts to package.json.")
        },
    );

    findings.into_vec()
}

pub fn missing_files(ctx: &CheckContext) -> Vec<Issue> {
    let analysis = ctx.analysis;
    let issue = |severity, title: &str| Issue::new(IssueCategory::MissingFile, severity, title);
    let mut findings = Findings::default();

    findings.push_if(!analysis.readme.exists, || {
        issue(Severity::High, "Missing README")
            .recommend("Add a README.md describing the project, setup and deployment.")
    });
    findings.push_if(!analysis.gitignore.exists, || {
        issue(Severity::Medium, "Missing .gitignore")
            .describe("Secrets and build output can be committed by accident.")
            .recommend("Add a .gitignore with patterns for your project type.")
    });
    findings.push_if(!analysis.dockerfile.exists, || {
        issue(Severity::Medium, "Missing Dockerfile")
            .recommend("Add a Dockerfile so the project can be built as a container image.")
    });
    findings.push_if(!analysis.compose.exists, || {
        issue(Severity::Low, "Missing docker-compose.yml")
            .recommend("Add a compose file for local development and multi-service setups.")
    });
    findings.push_if(!analysis.env.has_file(ENV_EXAMPLE), || {
        issue(Severity::Low, "Missing .env.example")
            .recommend("Document required environment variables with placeholder values in .env.example.")
    });

    findings.into_vec()
}

pub fn environment(ctx: &CheckContext) -> Vec<Issue> {
    let analysis = ctx.analysis;
    let issue = |severity, title: &str| Issue::new(IssueCategory::Environment, severity, title);
    let mut findings = Findings::default();

    let without_port: Vec<&str> = analysis
        .env
        .files
        .iter()
        .filter(|file| !file.has_port)
        .map(|file| file.path.as_str())
        .collect();
    findings.push_if(!without_port.is_empty(), || {
        issue(Severity::Low, "PORT not set in environment files")
            .describe(format!("No PORT variable in: {}", without_port.join(", ")))
            .recommend("Declare PORT so the listening port is configurable.")
    });

    findings.push_if(analysis.ports.as_slice() == DEFAULT_PORTS.as_slice(), || {
        issue(Severity::Low, "No explicit port detected")
            .describe("Falling back to the default candidate ports.")
            .recommend("Read the port from the PORT environment variable.")
    });

    let has_database_url = analysis.env.files.iter().any(|file| file.has_database_url);
    findings.push_if(
        !analysis.dependencies.database.is_empty() && !has_database_url,
        || {
            issue(Severity::Medium, "Database URL not configured")
                .describe("Database dependencies were found but no env file sets a database URL.")
                .recommend("Add DATABASE_URL to .env.example.")
        },
    );

    findings.into_vec()
}

pub fn dependencies(ctx: &CheckContext) -> Vec<Issue> {
    let analysis = ctx.analysis;
    let issue = |severity, title: &str| Issue::new(IssueCategory::Dependency, severity, title);
    let mut findings = Findings::default();

    findings.push_if(!analysis.package.exists, || {
        issue(Severity::Medium, "No dependency manifest")
            .recommend("Declare dependencies in a manifest such as package.json or requirements.txt.")
    });
    findings.push_if(analysis.dependencies.testing.is_empty(), || {
        issue(Severity::Medium, "No test framework")
            .recommend("Add a test framework and cover the main code paths.")
    });

    let mut deprecated: Vec<&str> = Vec::new();
    for name in analysis.dependencies.all_names() {
        if DEPRECATED_PACKAGES.contains(&name) && !deprecated.contains(&name) {
            deprecated.push(name);
        }
    }
    findings.push_if(!deprecated.is_empty(), || {
        issue(Severity::Low, "Deprecated packages in use")
            .describe(format!("Deprecated: {}", deprecated.join(", ")))
            .recommend("Replace request with the built-in fetch or axios, and moment with date-fns or dayjs.")
    });

    findings.into_vec()
}
