//! Tooling detection from dependency buckets plus marker files at the repository root.

use crate::analyzer::DependencyCategories;
use std::path::Path;

/// Files whose presence implies a database configuration; each one found adds an entry
const DATABASE_CONFIG_MARKERS: [&str; 3] = ["database.yml", "db.yml", "config/database.yml"];
const DATABASE_CONFIG: &str = "database_config";

const FRAMEWORK_MARKERS: &[(&str, &str)] = &[
    ("angular.json", "angular"),
    ("vue.config.js", "vue"),
    ("next.config.js", "nextjs"),
    ("nuxt.config.js", "nuxt"),
    ("manage.py", "django"),
    ("artisan", "laravel"),
];

const BUILD_TOOL_MARKERS: &[(&str, &str)] = &[
    ("webpack.config.js", "webpack"),
    ("vite.config.js", "vite"),
    ("rollup.config.js", "rollup"),
    ("tsconfig.json", "typescript"),
    ("babel.config.js", "babel"),
];

const TEST_FRAMEWORK_MARKERS: &[(&str, &str)] = &[
    ("jest.config.js", "jest"),
    ("cypress.json", "cypress"),
    ("pytest.ini", "pytest"),
];

const LINTER_MARKERS: &[(&str, &str)] = &[
    (".eslintrc.js", "eslint"),
    (".eslintrc.json", "eslint"),
    (".eslintrc", "eslint"),
    (".prettierrc", "prettier"),
    ("flake8", "flake8"),
    (".flake8", "flake8"),
    ("pylintrc", "pylint"),
    (".pylintrc", "pylint"),
    (".rubocop.yml", "rubocop"),
    (".golangci.yml", "golangci-lint"),
];

const CI_MARKERS: &[(&str, &str)] = &[
    (".github/workflows", "github-actions"),
    (".gitlab-ci.yml", "gitlab-ci"),
    (".travis.yml", "travis-ci"),
    ("Jenkinsfile", "jenkins"),
    ("azure-pipelines.yml", "azure-devops"),
];

/// Derived tooling lists reported on the analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tooling {
    pub database: Vec<String>,
    pub frameworks: Vec<String>,
    pub build_tools: Vec<String>,
    pub test_framework: Vec<String>,
    pub linter: Vec<String>,
    pub ci: Vec<String>,
}

pub fn detect_tooling(root: &Path, dependencies: &DependencyCategories) -> Tooling {
    let exists = |relative: &str| root.join(relative).exists();

    let mut database = dependencies.database.clone();
    for marker in DATABASE_CONFIG_MARKERS {
        if exists(marker) {
            database.push(DATABASE_CONFIG.to_string());
        }
    }

    let tooling = Tooling {
        database,
        frameworks: with_markers(&dependencies.web_framework, FRAMEWORK_MARKERS, &exists),
        build_tools: with_markers(&dependencies.build_tools, BUILD_TOOL_MARKERS, &exists),
        test_framework: with_markers(&dependencies.testing, TEST_FRAMEWORK_MARKERS, &exists),
        linter: with_markers(&[], LINTER_MARKERS, &exists),
        ci: with_markers(&[], CI_MARKERS, &exists),
    };

    log::debug!(
        "Tooling: frameworks={:?}, linter={:?}, ci={:?}",
        tooling.frameworks,
        tooling.linter,
        tooling.ci
    );
    tooling
}

/// Dependency-derived names followed by marker names, each marker name added at most once
fn with_markers(
    from_dependencies: &[String],
    markers: &[(&str, &str)],
    exists: &dyn Fn(&str) -> bool,
) -> Vec<String> {
    let mut names = from_dependencies.to_vec();
    for (file, name) in markers {
        if exists(file) && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_markers_extend_dependency_buckets() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("tsconfig.json"), "{}").unwrap();
        fs::write(root.join("jest.config.js"), "").unwrap();
        fs::write(root.join("next.config.js"), "").unwrap();

        let dependencies = DependencyCategories {
            web_framework: vec!["express".to_string()],
            testing: vec!["jest".to_string()],
            ..DependencyCategories::default()
        };
        let tooling = detect_tooling(root, &dependencies);

        assert_eq!(tooling.frameworks, vec!["express", "nextjs"]);
        assert_eq!(tooling.build_tools, vec!["typescript"]);
        assert_eq!(tooling.test_framework, vec!["jest"]);
        assert!(tooling.linter.is_empty());
    }

    #[test]
    fn test_database_config_per_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("database.yml"), "").unwrap();
        fs::create_dir_all(root.join("config")).unwrap();
        fs::write(root.join("config/database.yml"), "").unwrap();

        let dependencies = DependencyCategories {
            database: vec!["pg".to_string()],
            ..DependencyCategories::default()
        };
        let tooling = detect_tooling(root, &dependencies);
        assert_eq!(tooling.database, vec!["pg", "database_config", "database_config"]);
    }

    #[test]
    fn test_linters_and_ci_once_each() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".eslintrc.js"), "").unwrap();
        fs::write(root.join(".eslintrc.json"), "").unwrap();
        fs::write(root.join(".pylintrc"), "").unwrap();
        fs::create_dir_all(root.join(".github/workflows")).unwrap();
        fs::write(root.join("Jenkinsfile"), "").unwrap();

        let tooling = detect_tooling(root, &DependencyCategories::default());
        assert_eq!(tooling.linter, vec!["eslint", "pylint"]);
        assert_eq!(tooling.ci, vec!["github-actions", "jenkins"]);
    }
}
