// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for scan results.
//!
//! Supports multiple output formats:
//! - Text: human-readable issues grouped by severity
//! - JSON: the exchange format, for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::exchange;
use crate::result::{ScanResult, Severity};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report for one or more scan results
pub fn generate_report(results: &[ScanResult], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => results
            .iter()
            .map(generate_text_report)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => generate_json_report(results),
        OutputFormat::Sarif => generate_sarif_report(results),
    }
}

/// Generate human-readable text report
fn generate_text_report(result: &ScanResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "=== Accessibility Scan: {} ({} nodes, {}ms) ===\n\n",
        result.activity_name,
        result.root_node.node_count(),
        result.duration_ms
    ));

    if !result.faults.is_empty() {
        output.push_str(&format!(
            "{} rule fault(s); results may be incomplete:\n",
            result.faults.len()
        ));
        for fault in &result.faults {
            output.push_str(&format!(
                "  {} on {}: {}\n",
                fault.rule_id, fault.node_id, fault.message
            ));
        }
        output.push('\n');
    }

    if result.is_clean() {
        output.push_str("No accessibility issues found. All checks passed.\n");
        return output;
    }

    let errors = result.error_count();
    let warnings = result.warning_count();
    let total = result.issue_count();

    output.push_str(&format!(
        "Found {} issue(s): {} error(s), {} warning(s), {} info\n\n",
        total,
        errors,
        warnings,
        total - errors - warnings
    ));

    // Most urgent first
    for severity in &[Severity::Critical, Severity::Error, Severity::Warning, Severity::Info] {
        let sev_issues = result.by_severity(*severity);
        if sev_issues.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, sev_issues.len()));

        for issue in sev_issues {
            output.push_str(&format!("[{}] {}\n", issue.rule_id, issue.summary));
            output.push_str(&format!("  {}\n", issue.description));
            output.push_str(&format!("  Element: {}\n", issue.location_string()));

            if let Some(ref remediation) = issue.remediation {
                output.push_str(&format!("  Fix: {}\n", remediation));
            }

            if let Some(ref url) = issue.url {
                output.push_str(&format!("  See: {}\n", url));
            }

            output.push('\n');
        }
    }

    if errors > 0 {
        output.push_str("RESULT: FAILED (errors found)\n");
    } else if warnings > 0 {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

/// Generate JSON report; a single result is emitted bare, several as an array
fn generate_json_report(results: &[ScanResult]) -> String {
    let rendered: Result<Vec<String>, _> = results.iter().map(exchange::to_json).collect();
    match rendered {
        Ok(mut docs) if docs.len() == 1 => docs.remove(0),
        Ok(docs) => format!("[{}]", docs.join(",\n")),
        Err(e) => format!("{{\"error\": \"Failed to serialize results: {}\"}}", e),
    }
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "logicalLocations")]
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
struct SarifLogicalLocation {
    name: String,
    #[serde(rename = "fullyQualifiedName")]
    fully_qualified_name: String,
    kind: String,
}

/// Generate SARIF report, one run per scan result
fn generate_sarif_report(results: &[ScanResult]) -> String {
    let runs = results
        .iter()
        .map(|scan| {
            let results = scan
                .issues
                .iter()
                .map(|issue| {
                    let level = match issue.severity {
                        Severity::Critical | Severity::Error => "error",
                        Severity::Warning => "warning",
                        Severity::Info => "note",
                    };
                    SarifResult {
                        rule_id: issue.rule_id.clone(),
                        level: level.to_string(),
                        message: SarifMessage {
                            text: format!("{}: {}", issue.summary, issue.description),
                        },
                        locations: vec![SarifLocation {
                            logical_locations: vec![SarifLogicalLocation {
                                name: issue.element_id.clone(),
                                fully_qualified_name: format!(
                                    "{}/{}",
                                    scan.activity_name,
                                    issue.location_string()
                                ),
                                kind: "element".to_string(),
                            }],
                        }],
                    }
                })
                .collect();

            SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: "uiscanbot".to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    },
                },
                results,
            }
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs,
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
