use crate::analyzer::Analysis;
use crate::error::GeneratorError;
use crate::generator::compose_gen::{service_name, DatabaseEngine};
use crate::generator::templates::{self, README_TEMPLATE};
use serde::Serialize;

const DEFAULT_NAME: &str = "Your Project";
const DEFAULT_DESCRIPTION: &str = "Description of your project";
const NONE_DETECTED: &str = "None detected";

#[derive(Debug, Clone, Serialize)]
struct ReadmeContext {
    name: String,
    description: String,
    project_type: String,
    image_name: String,
    port: u16,
    frameworks: String,
    databases: String,
    database_url: Option<&'static str>,
    scripts: Vec<String>,
    testing: Vec<String>,
    show_dependencies: bool,
    web_frameworks: Vec<String>,
    database_dependencies: Vec<String>,
    build_tools: Vec<String>,
}

fn joined_or_none(items: &[String]) -> String {
    if items.is_empty() {
        NONE_DETECTED.to_string()
    } else {
        items.join(", ")
    }
}

pub fn generate(analysis: &Analysis, port: u16) -> Result<String, GeneratorError> {
    let dependencies = &analysis.dependencies;
    let scripts = if analysis.package.has_scripts {
        analysis.package.script_names()
    } else {
        Vec::new()
    };

    let context = ReadmeContext {
        name: analysis.package.name().unwrap_or(DEFAULT_NAME).to_string(),
        description: analysis
            .package
            .description()
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        project_type: analysis.project_type.to_string(),
        image_name: service_name(analysis).to_ascii_lowercase(),
        port,
        frameworks: joined_or_none(&analysis.frameworks),
        databases: joined_or_none(&analysis.database),
        database_url: DatabaseEngine::from_detected(&analysis.database).map(|e| e.connection_url()),
        scripts,
        testing: dependencies.testing.clone(),
        show_dependencies: !dependencies.web_framework.is_empty()
            || !dependencies.database.is_empty()
            || !dependencies.build_tools.is_empty(),
        web_frameworks: dependencies.web_framework.clone(),
        database_dependencies: dependencies.database.clone(),
        build_tools: dependencies.build_tools.clone(),
    };

    templates::render(README_TEMPLATE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{ManifestContent, PackageInfo, ProjectType};

    #[test]
    fn test_defaults_and_omitted_sections() {
        let readme = generate(&Analysis::new(ProjectType::Unknown), 3000).unwrap();

        assert!(readme.starts_with("# Your Project\n"));
        assert!(readme.contains("Description of your project"));
        assert!(readme.contains("docker run -p 3000:3000 app"));
        assert!(readme.contains("http://localhost:3000/health"));
        assert!(!readme.contains("## Available Scripts"));
        assert!(!readme.contains("## Testing"));
        assert!(!readme.contains("## Dependencies"));
        assert!(!readme.contains("DATABASE_URL"));
    }

    #[test]
    fn test_sections_from_manifest_and_dependencies() {
        let mut analysis = Analysis::new(ProjectType::Express);
        analysis.package = PackageInfo {
            exists: true,
            path: Some("package.json".to_string()),
            content: Some(ManifestContent::Json(serde_json::json!({
                "name": "Billing-API",
                "description": "Invoices and payments",
                "scripts": { "start": "node app.js", "lint": "eslint ." }
            }))),
            has_scripts: true,
            ..PackageInfo::default()
        };
        analysis.dependencies.testing = vec!["jest".to_string()];
        analysis.dependencies.web_framework = vec!["express".to_string()];
        analysis.database = vec!["mysql2".to_string()];

        let readme = generate(&analysis, 4000).unwrap();
        assert!(readme.starts_with("# Billing-API\n\nInvoices and payments"));
        assert!(readme.contains("docker build -t billing_api ."));
        assert!(readme.contains("npm run start"));
        assert!(readme.contains("npm run lint"));
        assert!(readme.contains("- jest"));
        assert!(readme.contains("**Web frameworks:**\n\n- express"));
        assert!(!readme.contains("**Build tools:**"));
        assert!(readme.contains("DATABASE_URL=mysql://"));
        assert!(readme.contains("- **Database:** mysql2"));
    }
}
