use crate::checker::Severity;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repolens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analyze a repository, generate missing Docker and README files, and review it")]
#[command(long_about = "Analyzes a checked-out repository, generates the Dockerfile, Docker Compose file and README it is missing, and reports best-practice and security issues with a severity for each.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a project and display what was found
    Analyze {
        /// Path to the project directory to analyze
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,

        /// Output analysis results in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Generate missing Dockerfile, Docker Compose and README files
    Generate {
        /// Path to the project directory to analyze
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,

        /// Output directory for generated files (defaults to the project directory)
        #[arg(short, long, value_name = "OUTPUT_DIR")]
        output: Option<PathBuf>,

        /// Generate Dockerfile
        #[arg(long)]
        dockerfile: bool,

        /// Generate Docker Compose file
        #[arg(long)]
        compose: bool,

        /// Generate README
        #[arg(long)]
        readme: bool,

        /// Generate every supported file
        #[arg(long, conflicts_with_all = ["dockerfile", "compose", "readme"])]
        all: bool,

        /// Print generated files instead of writing them
        #[arg(long)]
        dry_run: bool,

        /// Regenerate files that already exist
        #[arg(long)]
        force: bool,
    },

    /// Check a project against best-practice and security rules
    Check {
        /// Path to the project directory to check
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,

        /// Output issues in JSON format
        #[arg(short, long)]
        json: bool,

        /// Show only issues with severity >= threshold
        #[arg(long, value_enum, default_value = "low")]
        min_severity: SeverityThreshold,

        /// Exit with status 2 when an issue with severity >= threshold exists
        #[arg(long, value_enum)]
        fail_on: Option<SeverityThreshold>,
    },

    /// Analyze, generate and check in one pass, printing a JSON report
    Run {
        /// Path to the project directory
        #[arg(value_name = "PROJECT_PATH")]
        path: PathBuf,
    },

    /// Show supported project types and their Dockerfile families
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityThreshold {
    Low,
    Medium,
    High,
    Critical,
}

impl From<SeverityThreshold> for Severity {
    fn from(threshold: SeverityThreshold) -> Self {
        match threshold {
            SeverityThreshold::Low => Severity::Low,
            SeverityThreshold::Medium => Severity::Medium,
            SeverityThreshold::High => Severity::High,
            SeverityThreshold::Critical => Severity::Critical,
        }
    }
}

/// Artifacts selected for `generate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSelection {
    pub dockerfile: bool,
    pub compose: bool,
    pub readme: bool,
}

impl ArtifactSelection {
    /// No explicit flag selects everything, as does `--all`
    pub fn from_flags(dockerfile: bool, compose: bool, readme: bool, all: bool) -> Self {
        if all || !(dockerfile || compose || readme) {
            Self {
                dockerfile: true,
                compose: true,
                readme: true,
            }
        } else {
            Self {
                dockerfile,
                compose,
                readme,
            }
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level; an explicit `RUST_LOG` wins
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        let mut builder = env_logger::Builder::from_default_env();
        if std::env::var_os("RUST_LOG").is_none() {
            builder.filter_level(level);
        }
        builder.init();
    }
}
