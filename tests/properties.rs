use proptest::prelude::*;
use repolens::{check, generate, Analysis, ProjectType};

fn project_type() -> impl Strategy<Value = ProjectType> {
    proptest::sample::select(ProjectType::ALL.to_vec())
}

fn entry_points() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(
        vec!["app.js", "server.js", "main.py", "main.go", "server.go", "app.rb", "index.php"],
        0..4,
    )
    .prop_map(|entries| entries.into_iter().map(str::to_string).collect())
}

fn databases() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(vec!["pg", "mysql2", "mongoose", "redis", "sqlite3"], 0..3)
        .prop_map(|names| names.into_iter().map(str::to_string).collect())
}

prop_compose! {
    fn analysis()(
        project_type in project_type(),
        has_dockerfile in any::<bool>(),
        has_compose in any::<bool>(),
        has_readme in any::<bool>(),
        ports in proptest::collection::vec(1u16..=u16::MAX, 1..4),
        entry_points in entry_points(),
        database in databases(),
    ) -> Analysis {
        let mut analysis = Analysis::new(project_type);
        analysis.dockerfile.exists = has_dockerfile;
        analysis.compose.exists = has_compose;
        analysis.readme.exists = has_readme;
        analysis.ports = ports;
        analysis.entry_points = entry_points;
        analysis.database = database;
        analysis
    }
}

proptest! {
    #[test]
    fn generate_only_fills_missing_artifacts(analysis in analysis()) {
        let generated = generate(&analysis).unwrap();
        prop_assert_eq!(generated.dockerfile.is_some(), !analysis.dockerfile.exists);
        prop_assert_eq!(generated.compose.is_some(), !analysis.compose.exists);
        prop_assert_eq!(generated.readme.is_some(), !analysis.readme.exists);
    }

    #[test]
    fn dockerfile_exposes_first_port(mut analysis in analysis()) {
        analysis.dockerfile.exists = false;
        let generated = generate(&analysis).unwrap();
        let dockerfile = generated.dockerfile.unwrap();
        let expose = format!("EXPOSE {}\n", analysis.ports[0]);
        prop_assert!(dockerfile.contains(&expose), "missing {:?}", expose);
    }

    #[test]
    fn compose_maps_first_port(mut analysis in analysis()) {
        analysis.compose.exists = false;
        let compose = generate(&analysis).unwrap().compose.unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&compose).unwrap();
        prop_assert!(parsed.get("services").is_some());
        prop_assert_eq!(
            parsed["services"].get("db").is_some(),
            !analysis.database.is_empty()
        );
    }

    #[test]
    fn issues_serialize_with_known_severity(analysis in analysis()) {
        for issue in check(&analysis) {
            let json = serde_json::to_value(&issue).unwrap();
            let severity = json["severity"].as_str().unwrap().to_string();
            prop_assert!(["critical", "high", "medium", "low"].contains(&severity.as_str()));
        }
    }
}
