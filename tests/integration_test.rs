// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for uiscanbot

use std::path::Path;
use uiscanbot::config::Config;
use uiscanbot::exchange;
use uiscanbot::report::{generate_report, OutputFormat};
use uiscanbot::{IssueType, Scanner, Severity};

fn scanner() -> Scanner {
    let mut config = Config::default();
    config.rules.touch_target.density = 2.0;
    Scanner::from_config(&config).expect("default rules build")
}

#[test]
fn test_scan_accessible_fixture() {
    let result = scanner()
        .scan_file(Path::new("tests/fixtures/accessible.json"))
        .expect("scan should succeed");

    assert!(
        result.is_clean(),
        "Accessible fixture should have no issues, got: {:?}",
        result.issues.iter().map(|i| (&i.rule_id, &i.element_id)).collect::<Vec<_>>()
    );
    assert_eq!(result.activity_name, "accessible");
    assert_eq!(result.metadata.get("nodeCount").map(String::as_str), Some("6"));
}

#[test]
fn test_scan_inaccessible_fixture() {
    let result = scanner()
        .scan_file(Path::new("tests/fixtures/inaccessible.json"))
        .expect("scan should succeed");

    let found: Vec<(&str, &str)> = result
        .issues
        .iter()
        .map(|i| (i.element_id.as_str(), i.rule_id.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("btn_close", "TouchTargetSize"),
            ("btn_close", "MissingContentDescription"),
            ("card_offer", "DuplicateLabel"),
            ("card_offer_title", "TextContrast"),
            ("icon_share", "TouchTargetSize"),
            ("icon_share", "MissingContentDescription"),
        ]
    );
    assert_eq!(result.error_count(), 5);
    assert_eq!(result.warning_count(), 1);
    assert_eq!(result.by_rule("TextContrast")[0].issue_type, IssueType::Contrast);
    assert_eq!(result.by_rule("DuplicateLabel")[0].severity, Severity::Warning);
}

#[test]
fn test_scan_fixtures_directory() {
    let results = scanner()
        .scan_directory(Path::new("tests/fixtures"))
        .expect("scan should succeed");

    assert_eq!(results.len(), 2);
    assert_eq!(results.iter().map(|r| r.issue_count()).sum::<usize>(), 6);
}

#[test]
fn test_result_round_trip_reproduces_issues() {
    let scanner = scanner();
    let first = scanner
        .scan_file(Path::new("tests/fixtures/inaccessible.json"))
        .expect("scan should succeed");

    let json = exchange::to_json(&first).expect("serializes");
    let restored = exchange::result_from_json(&json).expect("deserializes");
    assert_eq!(restored.issues, first.issues);
    assert_eq!(restored.root_node, first.root_node);

    let rescanned = scanner
        .scan_tree(restored.root_node, "inaccessible")
        .expect("rescan should succeed");
    assert_eq!(rescanned.issues, first.issues);
}

#[test]
fn test_rerun_is_deterministic() {
    let scanner = scanner();
    let a = scanner.scan_file(Path::new("tests/fixtures/inaccessible.json")).unwrap();
    let b = scanner.scan_file(Path::new("tests/fixtures/inaccessible.json")).unwrap();
    assert_eq!(a.issues, b.issues);
}

#[test]
fn test_parallel_engine_matches_sequential() {
    let mut config = Config::default();
    config.rules.touch_target.density = 2.0;
    config.engine.parallel = true;
    let parallel = Scanner::from_config(&config).unwrap();

    let path = Path::new("tests/fixtures/inaccessible.json");
    let expected = scanner().scan_file(path).unwrap();
    let actual = parallel.scan_file(path).unwrap();
    assert_eq!(actual.issues, expected.issues);
}

#[test]
fn test_low_density_passes_small_targets() {
    // At density 1.0 a 60px target is 60dp
    let scanner = Scanner::from_config(&Config::default()).unwrap();
    let result = scanner
        .scan_file(Path::new("tests/fixtures/inaccessible.json"))
        .unwrap();
    assert!(result.by_rule("TouchTargetSize").is_empty());
}

#[test]
fn test_json_report_valid() {
    let result = scanner()
        .scan_file(Path::new("tests/fixtures/inaccessible.json"))
        .unwrap();
    let report = generate_report(&[result], OutputFormat::Json);
    let parsed: serde_json::Value =
        serde_json::from_str(&report).expect("JSON report should be valid JSON");

    assert_eq!(parsed["issueCount"], 6);
    assert_eq!(parsed["errorCount"], 5);
    assert!(parsed["rootNode"]["children"].is_array());
}

#[test]
fn test_sarif_report_valid() {
    let result = scanner()
        .scan_file(Path::new("tests/fixtures/inaccessible.json"))
        .unwrap();
    let report = generate_report(&[result], OutputFormat::Sarif);
    let parsed: serde_json::Value =
        serde_json::from_str(&report).expect("SARIF report should be valid JSON");

    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "uiscanbot");
    assert_eq!(parsed["runs"][0]["results"].as_array().map(|a| a.len()), Some(6));
}

#[test]
fn test_text_report_format() {
    let result = scanner()
        .scan_file(Path::new("tests/fixtures/inaccessible.json"))
        .unwrap();
    let report = generate_report(&[result], OutputFormat::Text);

    assert!(report.contains("Accessibility Scan: inaccessible"));
    assert!(report.contains("Found 6 issue(s): 5 error(s), 1 warning(s)"));
    assert!(report.contains("RESULT: FAILED"));
}
