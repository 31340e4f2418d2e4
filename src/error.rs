use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepolensError {
    #[error("Repository analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Artifact generation failed: {0}")]
    Generation(#[from] GeneratorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid repository root {path}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("Dependency parsing failed for {file}: {reason}")]
    DependencyParsing { file: String, reason: String },
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Template rendering failed: {0}")]
    TemplateRendering(String),

    #[error("Invalid generation context: {0}")]
    InvalidContext(String),

    #[error("Output file creation failed: {path}")]
    OutputCreation { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Configuration parsing failed: {0}")]
    ParsingFailed(String),
}

impl From<tera::Error> for GeneratorError {
    fn from(err: tera::Error) -> Self {
        // tera nests the useful message in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        GeneratorError::TemplateRendering(message)
    }
}

pub type Result<T> = std::result::Result<T, RepolensError>;
