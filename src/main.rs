use clap::Parser;
use colored::*;
use prettytable::{format, Cell, Row, Table};
use repolens::{
    analyzer::{self, display::display_analysis, Analysis, ProjectType},
    checker::{self, Issue, Severity},
    cli::{ArtifactSelection, Cli, Commands, SeverityThreshold},
    config::{self, Config},
    error::GeneratorError,
    generator::{self, Ecosystem},
    pipeline,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// Exit status when `check --fail-on` finds a qualifying issue
const EXIT_ISSUES_FOUND: i32 = 2;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> repolens::Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    match cli.command {
        Commands::Analyze { path, json } => handle_analyze(&path, json, &config).map(|_| 0),
        Commands::Generate {
            path,
            output,
            dockerfile,
            compose,
            readme,
            all,
            dry_run,
            force,
        } => {
            let selection = ArtifactSelection::from_flags(dockerfile, compose, readme, all);
            let force = force || config.generation.overwrite_existing;
            handle_generate(&path, output, selection, dry_run, force, &config).map(|_| 0)
        }
        Commands::Check {
            path,
            json,
            min_severity,
            fail_on,
        } => handle_check(&path, json, min_severity, fail_on, &config),
        Commands::Run { path } => handle_run(&path, &config).map(|_| 0),
        Commands::Support => {
            handle_support();
            Ok(0)
        }
    }
}

fn handle_analyze(path: &Path, json: bool, config: &Config) -> repolens::Result<()> {
    let analysis = analyzer::analyze_project_with_config(path, &config.analysis)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("🔍 Analyzed project: {}", path.display());
        display_analysis(&analysis);
    }

    Ok(())
}

/// One artifact kind the CLI can write
struct ArtifactKind {
    file_name: &'static str,
    label: &'static str,
    selected: fn(&ArtifactSelection) -> bool,
    exists: fn(&Analysis) -> bool,
    render: fn(&Analysis) -> repolens::Result<String>,
}

const ARTIFACT_KINDS: [ArtifactKind; 3] = [
    ArtifactKind {
        file_name: "Dockerfile",
        label: "Dockerfile",
        selected: |s| s.dockerfile,
        exists: |a| a.dockerfile.exists,
        render: generator::generate_dockerfile,
    },
    ArtifactKind {
        file_name: "docker-compose.yml",
        label: "Docker Compose file",
        selected: |s| s.compose,
        exists: |a| a.compose.exists,
        render: generator::generate_compose,
    },
    ArtifactKind {
        file_name: "README.md",
        label: "README",
        selected: |s| s.readme,
        exists: |a| a.readme.exists,
        render: generator::generate_readme,
    },
];

fn handle_generate(
    path: &Path,
    output: Option<PathBuf>,
    selection: ArtifactSelection,
    dry_run: bool,
    force: bool,
    config: &Config,
) -> repolens::Result<()> {
    println!("🔍 Analyzing project for generation: {}", path.display());
    let analysis = analyzer::analyze_project_with_config(path, &config.analysis)?;
    println!(
        "✅ Detected {} project. Generating files...",
        analysis.project_type.to_string().bright_cyan()
    );

    let output_dir = output.unwrap_or_else(|| path.to_path_buf());
    if !dry_run {
        fs::create_dir_all(&output_dir).map_err(|e| {
            log::error!("Cannot create {}: {}", output_dir.display(), e);
            GeneratorError::OutputCreation {
                path: output_dir.clone(),
            }
        })?;
    }

    let mut written = 0;
    for kind in ARTIFACT_KINDS.iter().filter(|kind| (kind.selected)(&selection)) {
        if (kind.exists)(&analysis) && !force {
            println!(
                "⏭️  {} already exists, skipping (use --force to regenerate)",
                kind.label
            );
            continue;
        }

        let content = (kind.render)(&analysis)?;
        if dry_run {
            println!("\n--- {} (dry run) ---", kind.file_name);
            println!("{}", content);
            continue;
        }

        let target = output_dir.join(kind.file_name);
        fs::write(&target, content).map_err(|e| {
            log::error!("Cannot write {}: {}", target.display(), e);
            GeneratorError::OutputCreation {
                path: target.clone(),
            }
        })?;
        println!("✅ {} written to {}", kind.label, target.display());
        written += 1;
    }

    if !dry_run {
        println!("\n🎉 Generation complete! {} file(s) written.", written);
    }

    Ok(())
}

fn handle_check(
    path: &Path,
    json: bool,
    min_severity: SeverityThreshold,
    fail_on: Option<SeverityThreshold>,
    config: &Config,
) -> repolens::Result<i32> {
    let analysis = analyzer::analyze_project_with_config(path, &config.analysis)?;
    let all_issues = checker::check(&analysis);
    let issues = checker::filter_by_severity(&all_issues, min_severity.into());

    if json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
    } else {
        print_issue_table(&issues);
    }

    let failed = fail_on
        .map(Severity::from)
        .is_some_and(|threshold| all_issues.iter().any(|issue| issue.severity.at_least(threshold)));
    Ok(if failed { EXIT_ISSUES_FOUND } else { 0 })
}

fn severity_style(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Frb",
        Severity::High => "Fr",
        Severity::Medium => "Fy",
        Severity::Low => "Fb",
    }
}

fn print_issue_table(issues: &[Issue]) {
    if issues.is_empty() {
        println!("{}", "✅ No issues found".green());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("Severity").style_spec("b"),
        Cell::new("Type").style_spec("b"),
        Cell::new("Issue").style_spec("b"),
        Cell::new("Recommendation").style_spec("b"),
    ]));

    for issue in issues {
        table.add_row(Row::new(vec![
            Cell::new(issue.severity.as_str()).style_spec(severity_style(issue.severity)),
            Cell::new(issue.category.as_str()),
            Cell::new(&issue.title),
            Cell::new(issue.recommendation.as_deref().unwrap_or("")),
        ]));
    }
    table.printstd();

    let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
    println!(
        "{} critical, {} high, {} medium, {} low",
        count(Severity::Critical).to_string().red().bold(),
        count(Severity::High).to_string().red(),
        count(Severity::Medium).to_string().yellow(),
        count(Severity::Low).to_string().blue()
    );
}

fn handle_run(path: &Path, config: &Config) -> repolens::Result<()> {
    let report = pipeline::run_pipeline(path, config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn handle_support() {
    println!("🌐 Supported Project Types:");
    let last = ProjectType::ALL.len() - 1;
    for (index, project_type) in ProjectType::ALL.iter().enumerate() {
        let branch = if index == last { "└──" } else { "├──" };
        println!(
            "{} {:<10} → {} Dockerfile",
            branch,
            project_type.as_str(),
            Ecosystem::for_project_type(*project_type)
        );
    }
}
