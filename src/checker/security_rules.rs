use crate::analyzer::EnvFile;
use crate::checker::core::{CheckContext, Findings, Issue, IssueCategory, Severity};

fn issue(severity: Severity, title: &str) -> Issue {
    Issue::new(IssueCategory::Security, severity, title)
}

fn paths<'a>(files: impl Iterator<Item = &'a EnvFile>) -> Vec<&'a str> {
    files.map(|file| file.path.as_str()).collect()
}

pub fn check(ctx: &CheckContext) -> Vec<Issue> {
    let analysis = ctx.analysis;
    let env = &analysis.env;
    let committed = || env.files.iter().filter(|file| !file.is_example());
    let mut findings = Findings::default();

    findings.push_if(env.exists, || {
        issue(Severity::Critical, ".env file found in repository")
            .describe(format!(
                "Environment files often hold credentials: {}",
                paths(env.files.iter()).join(", ")
            ))
            .recommend("Remove env files from version control and commit a .env.example with placeholder values instead.")
    });

    let with_keys = paths(committed().filter(|file| file.has_api_keys));
    findings.push_if(!with_keys.is_empty(), || {
        issue(Severity::High, "API keys in environment file")
            .describe(format!("Possible API keys in: {}", with_keys.join(", ")))
            .recommend("Rotate the keys and load them from a secret store at runtime.")
    });

    let ignored = analysis.gitignore.exists && analysis.gitignore.has_env_files;
    findings.push_if(committed().next().is_some() && !ignored, || {
        issue(Severity::High, "Environment files not in .gitignore")
            .recommend("Add .env and .env.* (with !.env.example) to .gitignore.")
    });

    findings.push_if(!analysis.sensitive_files.is_empty(), || {
        issue(Severity::High, "Potential sensitive files found")
            .describe(format!(
                "These files may contain secrets: {}",
                analysis.sensitive_files.join(", ")
            ))
            .recommend("Remove them from version control and rotate any exposed credentials.")
    });

    let with_urls = paths(committed().filter(|file| file.has_database_url));
    findings.push_if(!with_urls.is_empty(), || {
        issue(Severity::Medium, "Database credentials in environment file")
            .describe(format!("Database settings found in: {}", with_urls.join(", ")))
            .recommend("Keep connection strings out of committed files.")
    });

    findings.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analysis, EnvInfo, GitignoreInfo, ProjectType};

    fn env_file(path: &str, content: &str) -> EnvFile {
        let lowered = content.to_lowercase();
        EnvFile {
            path: path.to_string(),
            content: content.to_string(),
            has_database_url: lowered.contains("database"),
            has_api_keys: lowered.contains("api") || lowered.contains("key"),
            has_port: lowered.contains("port"),
        }
    }

    fn with_env(files: Vec<EnvFile>) -> Analysis {
        let mut analysis = Analysis::new(ProjectType::NodeJs);
        analysis.env = EnvInfo {
            exists: !files.is_empty(),
            count: files.len(),
            files,
        };
        analysis
    }

    fn severities(analysis: &Analysis) -> Vec<(Severity, String)> {
        check(&CheckContext::new(analysis, None))
            .into_iter()
            .map(|i| (i.severity, i.title))
            .collect()
    }

    #[test]
    fn test_committed_env_with_key() {
        let analysis = with_env(vec![env_file(".env", "API_KEY=xyz")]);
        assert_eq!(
            severities(&analysis),
            vec![
                (Severity::Critical, ".env file found in repository".to_string()),
                (Severity::High, "API keys in environment file".to_string()),
                (Severity::High, "Environment files not in .gitignore".to_string()),
            ]
        );
    }

    #[test]
    fn test_example_only_is_not_a_leak() {
        let mut analysis = with_env(vec![env_file(".env.example", "API_KEY=\nDATABASE_URL=")]);
        analysis.gitignore = GitignoreInfo {
            exists: true,
            content: Some("node_modules\n".to_string()),
            ..GitignoreInfo::default()
        };
        let titles: Vec<String> = severities(&analysis).into_iter().map(|(_, t)| t).collect();
        assert_eq!(titles, vec![".env file found in repository"]);
    }

    #[test]
    fn test_sensitive_files_and_database_url() {
        let mut analysis = with_env(vec![env_file(".env.local", "DATABASE_URL=postgres://x")]);
        analysis.gitignore.exists = true;
        analysis.gitignore.has_env_files = true;
        analysis.sensitive_files = vec!["certs/server.pem".to_string()];

        let found = severities(&analysis);
        assert!(found.contains(&(Severity::High, "Potential sensitive files found".to_string())));
        assert!(found.contains(&(
            Severity::Medium,
            "Database credentials in environment file".to_string()
        )));
        assert!(!found.iter().any(|(_, t)| t == "Environment files not in .gitignore"));
    }
}
