use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn repolens() -> Command {
    let mut cmd = Command::cargo_bin("repolens").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn node_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("package.json"), r#"{"name":"demo-svc"}"#).unwrap();
    temp_dir
}

#[test]
fn test_analyze_json() {
    let repo = node_repo();
    let output = repolens()
        .args(["analyze", "--json"])
        .arg(repo.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let analysis: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(analysis["projectType"], "nodejs");
    assert_eq!(analysis["ports"], serde_json::json!([3000, 8000, 8080]));
}

#[test]
fn test_analyze_human_summary() {
    let repo = node_repo();
    repolens()
        .arg("analyze")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nodejs"));
}

#[test]
fn test_analyze_missing_path_fails() {
    repolens()
        .args(["analyze", "/definitely/not/here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid repository root"));
}

#[test]
fn test_generate_writes_missing_files() {
    let repo = node_repo();
    fs::write(repo.path().join("README.md"), "# keep me\n").unwrap();

    repolens()
        .arg("generate")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("README already exists"));

    let dockerfile = fs::read_to_string(repo.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("EXPOSE 3000"));
    assert!(repo.path().join("docker-compose.yml").is_file());
    assert_eq!(
        fs::read_to_string(repo.path().join("README.md")).unwrap(),
        "# keep me\n"
    );
}

#[test]
fn test_generate_dry_run_and_output_dir() {
    let repo = node_repo();
    let out = TempDir::new().unwrap();

    repolens()
        .args(["generate", "--dockerfile", "--dry-run"])
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("FROM node"));
    assert!(!repo.path().join("Dockerfile").exists());

    let target = out.path().join("artifacts");
    repolens()
        .args(["generate", "--readme", "--output"])
        .arg(&target)
        .arg(repo.path())
        .assert()
        .success();
    let readme = fs::read_to_string(target.join("README.md")).unwrap();
    assert!(readme.contains("demo-svc"));
    assert!(!target.join("Dockerfile").exists());
}

#[test]
fn test_generate_force_overwrites() {
    let repo = node_repo();
    fs::write(repo.path().join("Dockerfile"), "FROM scratch\n").unwrap();

    repolens()
        .args(["generate", "--dockerfile", "--force"])
        .arg(repo.path())
        .assert()
        .success();
    let dockerfile = fs::read_to_string(repo.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("FROM node"));
}

#[test]
fn test_check_json_and_fail_on() {
    let repo = node_repo();
    fs::write(repo.path().join(".env"), "API_KEY=xyz\n").unwrap();

    let output = repolens()
        .args(["check", "--json", "--min-severity", "high"])
        .arg(repo.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let issues: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let issues = issues.as_array().unwrap();
    assert!(!issues.is_empty());
    assert!(issues
        .iter()
        .all(|i| i["severity"] == "critical" || i["severity"] == "high"));

    repolens()
        .args(["check", "--fail-on", "critical"])
        .arg(repo.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains(".env file found in repository"));
}

#[test]
fn test_run_prints_report() {
    let repo = node_repo();
    let output = repolens().arg("run").arg(repo.path()).output().unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["analysis"]["projectType"], "nodejs");
    assert!(report["generated"]["dockerfile"].is_string());
    assert!(report["issues"].is_array());
}

#[test]
fn test_support_lists_project_types() {
    repolens()
        .arg("support")
        .assert()
        .success()
        .stdout(predicate::str::contains("laravel").and(predicate::str::contains("php")));
}

#[test]
fn test_config_file_applies() {
    let repo = node_repo();
    fs::write(repo.path().join("Dockerfile"), "FROM scratch\n").unwrap();
    let config = repo.path().join("repolens.toml");
    fs::write(&config, "[generation]\noverwrite_existing = true\n").unwrap();

    repolens()
        .args(["generate", "--dockerfile", "-c"])
        .arg(&config)
        .arg(repo.path())
        .assert()
        .success();
    let dockerfile = fs::read_to_string(repo.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("FROM node"));

    repolens()
        .args(["check", "-c", "/no/such/config.toml"])
        .arg(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
