use crate::analyzer::ProjectType;
use serde::Serialize;
use std::fmt;

/// Builder family that owns Dockerfile generation for a group of project types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Node,
    Python,
    Java,
    Php,
    Go,
    Ruby,
    Rust,
    DotNet,
    Flutter,
    Generic,
}

const ECOSYSTEM_TABLE: [(ProjectType, Ecosystem); 20] = [
    (ProjectType::NodeJs, Ecosystem::Node),
    (ProjectType::React, Ecosystem::Node),
    (ProjectType::Vue, Ecosystem::Node),
    (ProjectType::Angular, Ecosystem::Node),
    (ProjectType::NextJs, Ecosystem::Node),
    (ProjectType::Nuxt, Ecosystem::Node),
    (ProjectType::Express, Ecosystem::Node),
    (ProjectType::Python, Ecosystem::Python),
    (ProjectType::Django, Ecosystem::Python),
    (ProjectType::Flask, Ecosystem::Python),
    (ProjectType::Java, Ecosystem::Java),
    (ProjectType::Spring, Ecosystem::Java),
    (ProjectType::Php, Ecosystem::Php),
    (ProjectType::Laravel, Ecosystem::Php),
    (ProjectType::Go, Ecosystem::Go),
    (ProjectType::Ruby, Ecosystem::Ruby),
    (ProjectType::Rust, Ecosystem::Rust),
    (ProjectType::DotNet, Ecosystem::DotNet),
    (ProjectType::Flutter, Ecosystem::Flutter),
    (ProjectType::Unknown, Ecosystem::Generic),
];

impl Ecosystem {
    pub fn for_project_type(project_type: ProjectType) -> Self {
        ECOSYSTEM_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == project_type)
            .map(|(_, ecosystem)| *ecosystem)
            .unwrap_or(Ecosystem::Generic)
    }

    /// Name of the embedded Dockerfile template
    pub fn dockerfile_template(&self) -> &'static str {
        match self {
            Ecosystem::Node => "dockerfile/node.Dockerfile",
            Ecosystem::Python => "dockerfile/python.Dockerfile",
            Ecosystem::Java => "dockerfile/java.Dockerfile",
            Ecosystem::Php => "dockerfile/php.Dockerfile",
            Ecosystem::Go => "dockerfile/go.Dockerfile",
            Ecosystem::Ruby => "dockerfile/ruby.Dockerfile",
            Ecosystem::Rust => "dockerfile/rust.Dockerfile",
            Ecosystem::DotNet => "dockerfile/dotnet.Dockerfile",
            Ecosystem::Flutter => "dockerfile/flutter.Dockerfile",
            Ecosystem::Generic => "dockerfile/generic.Dockerfile",
        }
    }

    /// Root-level entry files the run command may use, in preference order
    pub fn entry_candidates(&self) -> &'static [&'static str] {
        match self {
            Ecosystem::Node => &["app.js", "server.js", "index.js", "main.js"],
            Ecosystem::Python => &["app.py", "main.py", "server.py", "manage.py"],
            Ecosystem::Go => &["main.go", "server.go"],
            Ecosystem::Ruby => &["app.rb", "main.rb", "server.rb"],
            Ecosystem::Php => &["index.php", "app.php", "main.php"],
            _ => &[],
        }
    }

    /// Entry used when the analysis found none of the candidates
    pub fn default_entry(&self) -> Option<&'static str> {
        match self {
            Ecosystem::Node => Some("app.js"),
            Ecosystem::Python => Some("app.py"),
            Ecosystem::Go => Some("main.go"),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Node => "node",
            Ecosystem::Python => "python",
            Ecosystem::Java => "java",
            Ecosystem::Php => "php",
            Ecosystem::Go => "go",
            Ecosystem::Ruby => "ruby",
            Ecosystem::Rust => "rust",
            Ecosystem::DotNet => "dotnet",
            Ecosystem::Flutter => "flutter",
            Ecosystem::Generic => "generic",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_project_type_has_a_family() {
        for project_type in ProjectType::ALL {
            let ecosystem = Ecosystem::for_project_type(project_type);
            let expected_generic = project_type == ProjectType::Unknown;
            assert_eq!(ecosystem == Ecosystem::Generic, expected_generic, "{}", project_type);
        }
    }

    #[test]
    fn test_framework_variants_share_builders() {
        assert_eq!(Ecosystem::for_project_type(ProjectType::NextJs), Ecosystem::Node);
        assert_eq!(Ecosystem::for_project_type(ProjectType::Django), Ecosystem::Python);
        assert_eq!(Ecosystem::for_project_type(ProjectType::Spring), Ecosystem::Java);
        assert_eq!(Ecosystem::for_project_type(ProjectType::Laravel), Ecosystem::Php);
    }
}
