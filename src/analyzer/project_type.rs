//! Project-type detection.
//!
//! Detection is an ordered, first-match-wins decision list. Each ecosystem has a guard marker
//! (its manifest) followed by framework variants checked in order, then a fallback. Ecosystems
//! are tried top to bottom, so a Node project that also ships a `requirements.txt` stays Node.

use crate::common::file_utils::find_root_files_with_extensions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Closed set of project types the analyzer can report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    NodeJs,
    React,
    Vue,
    Angular,
    NextJs,
    Nuxt,
    Express,
    Python,
    Django,
    Flask,
    Java,
    Spring,
    Php,
    Laravel,
    Go,
    Ruby,
    Rust,
    DotNet,
    Flutter,
    Unknown,
}

impl ProjectType {
    pub const ALL: [ProjectType; 20] = [
        ProjectType::NodeJs,
        ProjectType::React,
        ProjectType::Vue,
        ProjectType::Angular,
        ProjectType::NextJs,
        ProjectType::Nuxt,
        ProjectType::Express,
        ProjectType::Python,
        ProjectType::Django,
        ProjectType::Flask,
        ProjectType::Java,
        ProjectType::Spring,
        ProjectType::Php,
        ProjectType::Laravel,
        ProjectType::Go,
        ProjectType::Ruby,
        ProjectType::Rust,
        ProjectType::DotNet,
        ProjectType::Flutter,
        ProjectType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::NodeJs => "nodejs",
            ProjectType::React => "react",
            ProjectType::Vue => "vue",
            ProjectType::Angular => "angular",
            ProjectType::NextJs => "nextjs",
            ProjectType::Nuxt => "nuxt",
            ProjectType::Express => "express",
            ProjectType::Python => "python",
            ProjectType::Django => "django",
            ProjectType::Flask => "flask",
            ProjectType::Java => "java",
            ProjectType::Spring => "spring",
            ProjectType::Php => "php",
            ProjectType::Laravel => "laravel",
            ProjectType::Go => "go",
            ProjectType::Ruby => "ruby",
            ProjectType::Rust => "rust",
            ProjectType::DotNet => "dotnet",
            ProjectType::Flutter => "flutter",
            ProjectType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence a detection rule can ask for
#[derive(Debug)]
pub enum Marker {
    /// A file or directory at this root-relative path
    Exists(&'static str),
    /// A root-level file with one of these extensions
    Extension(&'static [&'static str]),
    Any(&'static [Marker]),
    All(&'static [Marker]),
}

/// Answers marker questions about one repository
pub trait MarkerProbe {
    fn exists(&self, relative: &str) -> bool;
    fn has_extension(&self, extensions: &[&str]) -> bool;
}

impl Marker {
    pub fn matches(&self, probe: &dyn MarkerProbe) -> bool {
        match self {
            Marker::Exists(path) => probe.exists(path),
            Marker::Extension(extensions) => probe.has_extension(extensions),
            Marker::Any(markers) => markers.iter().any(|m| m.matches(probe)),
            Marker::All(markers) => markers.iter().all(|m| m.matches(probe)),
        }
    }
}

/// One ecosystem in the decision list
#[derive(Debug)]
pub struct DetectionRule {
    pub guard: Marker,
    pub variants: &'static [(Marker, ProjectType)],
    pub fallback: ProjectType,
}

pub static DETECTION_RULES: &[DetectionRule] = &[
    DetectionRule {
        guard: Marker::Exists("package.json"),
        variants: &[
            (Marker::Exists("angular.json"), ProjectType::Angular),
            (Marker::Exists("vue.config.js"), ProjectType::Vue),
            (Marker::Exists("next.config.js"), ProjectType::NextJs),
            (Marker::Exists("nuxt.config.js"), ProjectType::Nuxt),
            (
                Marker::All(&[Marker::Exists("src"), Marker::Exists("public")]),
                ProjectType::React,
            ),
            (
                Marker::Any(&[Marker::Exists("app.js"), Marker::Exists("server.js")]),
                ProjectType::Express,
            ),
        ],
        fallback: ProjectType::NodeJs,
    },
    DetectionRule {
        guard: Marker::Any(&[Marker::Exists("requirements.txt"), Marker::Exists("setup.py")]),
        variants: &[
            (Marker::Exists("manage.py"), ProjectType::Django),
            (Marker::Exists("app.py"), ProjectType::Flask),
        ],
        fallback: ProjectType::Python,
    },
    DetectionRule {
        guard: Marker::Any(&[Marker::Exists("pom.xml"), Marker::Exists("build.gradle")]),
        variants: &[(Marker::Exists("src/main/java"), ProjectType::Spring)],
        fallback: ProjectType::Java,
    },
    DetectionRule {
        guard: Marker::Exists("composer.json"),
        variants: &[(Marker::Exists("artisan"), ProjectType::Laravel)],
        fallback: ProjectType::Php,
    },
    DetectionRule {
        guard: Marker::Exists("go.mod"),
        variants: &[],
        fallback: ProjectType::Go,
    },
    DetectionRule {
        guard: Marker::Exists("Gemfile"),
        variants: &[],
        fallback: ProjectType::Ruby,
    },
    DetectionRule {
        guard: Marker::Exists("Cargo.toml"),
        variants: &[],
        fallback: ProjectType::Rust,
    },
    DetectionRule {
        guard: Marker::Exists("pubspec.yaml"),
        variants: &[],
        fallback: ProjectType::Flutter,
    },
    DetectionRule {
        guard: Marker::Extension(&["csproj", "vbproj", "fsproj"]),
        variants: &[],
        fallback: ProjectType::DotNet,
    },
];

/// Runs the decision list against any probe
pub fn resolve_project_type(rules: &[DetectionRule], probe: &dyn MarkerProbe) -> ProjectType {
    for rule in rules {
        if !rule.guard.matches(probe) {
            continue;
        }
        return rule
            .variants
            .iter()
            .find(|(marker, _)| marker.matches(probe))
            .map(|(_, project_type)| *project_type)
            .unwrap_or(rule.fallback);
    }
    ProjectType::Unknown
}

/// Probe backed by the repository on disk
struct FsProbe<'a> {
    root: &'a Path,
}

impl MarkerProbe for FsProbe<'_> {
    fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }

    fn has_extension(&self, extensions: &[&str]) -> bool {
        !find_root_files_with_extensions(self.root, extensions).is_empty()
    }
}

pub fn detect_project_type(root: &Path) -> ProjectType {
    resolve_project_type(DETECTION_RULES, &FsProbe { root })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct SetProbe(HashSet<&'static str>);

    impl SetProbe {
        fn new(paths: &[&'static str]) -> Self {
            Self(paths.iter().copied().collect())
        }
    }

    impl MarkerProbe for SetProbe {
        fn exists(&self, relative: &str) -> bool {
            self.0.contains(relative)
        }

        fn has_extension(&self, extensions: &[&str]) -> bool {
            self.0
                .iter()
                .any(|p| extensions.iter().any(|ext| p.ends_with(&format!(".{}", ext))))
        }
    }

    fn resolve(paths: &[&'static str]) -> ProjectType {
        resolve_project_type(DETECTION_RULES, &SetProbe::new(paths))
    }

    #[test]
    fn test_node_variants_in_order() {
        assert_eq!(resolve(&["package.json"]), ProjectType::NodeJs);
        assert_eq!(resolve(&["package.json", "angular.json", "vue.config.js"]), ProjectType::Angular);
        assert_eq!(resolve(&["package.json", "vue.config.js", "next.config.js"]), ProjectType::Vue);
        assert_eq!(resolve(&["package.json", "next.config.js"]), ProjectType::NextJs);
        assert_eq!(resolve(&["package.json", "nuxt.config.js"]), ProjectType::Nuxt);
        assert_eq!(resolve(&["package.json", "src", "public"]), ProjectType::React);
        assert_eq!(resolve(&["package.json", "src"]), ProjectType::NodeJs);
        assert_eq!(resolve(&["package.json", "server.js"]), ProjectType::Express);
        assert_eq!(resolve(&["package.json", "src", "public", "app.js"]), ProjectType::React);
    }

    #[test]
    fn test_ecosystem_order_wins() {
        assert_eq!(resolve(&["package.json", "requirements.txt"]), ProjectType::NodeJs);
        assert_eq!(resolve(&["requirements.txt", "pom.xml"]), ProjectType::Python);
        assert_eq!(resolve(&["go.mod", "Cargo.toml"]), ProjectType::Go);
        assert_eq!(resolve(&["Gemfile", "Cargo.toml"]), ProjectType::Ruby);
        assert_eq!(resolve(&["pubspec.yaml", "App.csproj"]), ProjectType::Flutter);
    }

    #[test]
    fn test_python_java_php_variants() {
        assert_eq!(resolve(&["setup.py"]), ProjectType::Python);
        assert_eq!(resolve(&["requirements.txt", "manage.py", "app.py"]), ProjectType::Django);
        assert_eq!(resolve(&["requirements.txt", "app.py"]), ProjectType::Flask);
        assert_eq!(resolve(&["build.gradle"]), ProjectType::Java);
        assert_eq!(resolve(&["pom.xml", "src/main/java"]), ProjectType::Spring);
        assert_eq!(resolve(&["composer.json"]), ProjectType::Php);
        assert_eq!(resolve(&["composer.json", "artisan"]), ProjectType::Laravel);
    }

    #[test]
    fn test_single_manifest_ecosystems() {
        assert_eq!(resolve(&["go.mod"]), ProjectType::Go);
        assert_eq!(resolve(&["Gemfile"]), ProjectType::Ruby);
        assert_eq!(resolve(&["Cargo.toml"]), ProjectType::Rust);
        assert_eq!(resolve(&["pubspec.yaml"]), ProjectType::Flutter);
        assert_eq!(resolve(&["Service.fsproj"]), ProjectType::DotNet);
        assert_eq!(resolve(&["README.md"]), ProjectType::Unknown);
        assert_eq!(resolve(&[]), ProjectType::Unknown);
    }

    #[test]
    fn test_manage_py_alone_is_not_python() {
        // variants only apply once the ecosystem guard matched
        assert_eq!(resolve(&["manage.py"]), ProjectType::Unknown);
        assert_eq!(resolve(&["artisan"]), ProjectType::Unknown);
    }

    #[test]
    fn test_serialized_names() {
        for project_type in ProjectType::ALL {
            let json = serde_json::to_string(&project_type).unwrap();
            assert_eq!(json, format!("\"{}\"", project_type.as_str()));
        }
    }
}
