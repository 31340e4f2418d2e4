use crate::analyzer::{AnalysisConfig, DEFAULT_PORTS};
use crate::common::file_utils::read_candidate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Root-level files treated as application entry points, in report order
pub const ENTRY_POINT_CANDIDATES: [&str; 17] = [
    "app.js", "server.js", "index.js", "main.js", "start.js", "app.py", "main.py", "server.py",
    "manage.py", "app.php", "index.php", "main.php", "main.go", "server.go", "app.rb", "main.rb",
    "server.rb",
];

/// Source files scanned for `port = N` style assignments
const PORT_SOURCE_FILES: [&str; 7] = [
    "app.js", "server.js", "index.js", "main.js", "app.py", "main.py", "server.py",
];

static SCRIPT_PORT_ASSIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)port\s*=\s*(\d+)").expect("valid port regex"));
static SCRIPT_PORT_SHORT_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-p\s+(\d+)").expect("valid port regex"));
static SCRIPT_PORT_LONG_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--port\s+(\d+)").expect("valid port regex"));
static SOURCE_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)port\s*[:=]\s*(\d+)").expect("valid port regex"));

/// Conventional directories present at the repository root
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructure {
    pub has_src: bool,
    pub has_app: bool,
    pub has_public: bool,
    pub has_static: bool,
    pub has_config: bool,
    pub has_tests: bool,
    pub has_docs: bool,
    pub has_logs: bool,
    pub has_tmp: bool,
    pub has_pages: bool,
    pub has_components: bool,
    pub has_views: bool,
    pub has_controllers: bool,
    pub has_models: bool,
    pub has_routes: bool,
    pub has_middleware: bool,
    pub has_utils: bool,
    pub has_assets: bool,
}

pub fn analyze_structure(root: &Path) -> ProjectStructure {
    let dir = |name: &str| root.join(name).is_dir();

    ProjectStructure {
        has_src: dir("src"),
        has_app: dir("app"),
        has_public: dir("public"),
        has_static: dir("static"),
        has_config: dir("config"),
        has_tests: dir("tests") || dir("__tests__") || dir("test"),
        has_docs: dir("docs"),
        has_logs: dir("logs"),
        has_tmp: dir("tmp"),
        has_pages: dir("pages"),
        has_components: dir("components"),
        has_views: dir("views"),
        has_controllers: dir("controllers"),
        has_models: dir("models"),
        has_routes: dir("routes"),
        has_middleware: dir("middleware"),
        has_utils: dir("utils") || dir("lib"),
        has_assets: dir("assets"),
    }
}

pub fn find_entry_points(root: &Path) -> Vec<String> {
    ENTRY_POINT_CANDIDATES
        .iter()
        .filter(|name| root.join(name).is_file())
        .map(|name| name.to_string())
        .collect()
}

/// Ports scraped from `package.json` scripts and common entry files.
///
/// Falls back to [`DEFAULT_PORTS`] when nothing is found. The source pattern also matches
/// identifiers such as `support = 1`, which is accepted.
pub fn detect_ports(root: &Path, config: &AnalysisConfig) -> Vec<u16> {
    let mut ports = Vec::new();

    if let Some(content) = read_candidate(&root.join("package.json"), config.max_file_size) {
        match serde_json::from_str::<Value>(&content) {
            Ok(manifest) => {
                if let Some(scripts) = manifest.get("scripts").and_then(|s| s.as_object()) {
                    for script in scripts.values().filter_map(|s| s.as_str()) {
                        if let Some(port) = script_port(script) {
                            push_port(&mut ports, port);
                        }
                    }
                }
            }
            Err(e) => log::debug!("Skipping script ports, package.json unparsable: {}", e),
        }
    }

    for file in PORT_SOURCE_FILES {
        if let Some(content) = read_candidate(&root.join(file), config.max_file_size) {
            for captures in SOURCE_PORT.captures_iter(&content) {
                push_port(&mut ports, &captures[1]);
            }
        }
    }

    if ports.is_empty() {
        log::debug!("No ports found, using defaults");
        return DEFAULT_PORTS.to_vec();
    }
    ports
}

/// First port mentioned by a script, by pattern priority
fn script_port(script: &str) -> Option<&str> {
    [&*SCRIPT_PORT_ASSIGN, &*SCRIPT_PORT_SHORT_FLAG, &*SCRIPT_PORT_LONG_FLAG]
        .iter()
        .find_map(|re| re.captures(script).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
}

fn push_port(ports: &mut Vec<u16>, digits: &str) {
    match digits.parse::<u16>() {
        Ok(port) if !ports.contains(&port) => ports.push(port),
        Ok(_) => {}
        Err(_) => log::debug!("Ignoring out-of-range port {}", digits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_structure_aliases() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("__tests__")).unwrap();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("docs"), "not a directory").unwrap();

        let structure = analyze_structure(root);
        assert!(structure.has_tests);
        assert!(structure.has_utils);
        assert!(structure.has_src);
        assert!(!structure.has_docs);
        assert!(!structure.has_app);
    }

    #[test]
    fn test_entry_points_keep_candidate_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for name in ["main.go", "server.js", "app.py"] {
            fs::write(root.join(name), "").unwrap();
        }

        assert_eq!(find_entry_points(root), vec!["server.js", "app.py", "main.go"]);
    }

    #[test]
    fn test_script_port_priority() {
        assert_eq!(script_port("PORT=4000 node app.js -p 5000"), Some("4000"));
        assert_eq!(script_port("next dev -p 5000 --port 6000"), Some("5000"));
        assert_eq!(script_port("vite --port 6000"), Some("6000"));
        assert_eq!(script_port("node app.js"), None);
    }

    #[test]
    fn test_detect_ports_dedups_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("package.json"),
            r#"{"scripts":{"dev":"PORT=4000 nodemon app.js"}}"#,
        )
        .unwrap();
        fs::write(
            root.join("app.js"),
            "const PORT = 5000;\nconst opts = { port: 4000 };\nconst big = { port: 70000 };",
        )
        .unwrap();

        let ports = detect_ports(root, &AnalysisConfig::default());
        assert_eq!(ports, vec![4000, 5000]);
    }

    #[test]
    fn test_detect_ports_follow_manifest_script_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("package.json"),
            r#"{"scripts":{"start":"PORT=5000 node server.js","dev":"PORT=3001 nodemon server.js"}}"#,
        )
        .unwrap();

        let ports = detect_ports(temp_dir.path(), &AnalysisConfig::default());
        assert_eq!(ports, vec![5000, 3001]);
    }

    #[test]
    fn test_detect_ports_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("main.py"), "print('hi')").unwrap();

        let ports = detect_ports(temp_dir.path(), &AnalysisConfig::default());
        assert_eq!(ports, vec![3000, 8000, 8080]);
    }
}
