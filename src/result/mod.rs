// SPDX-License-Identifier: PMPL-1.0-or-later
//! Issue and scan result types.
//!
//! An `Issue` carries denormalized copies of the offending node's id, bounds
//! and class so it stays meaningful after the tree is dropped. A
//! `ScanResult` owns the captured tree together with everything found in it.

use crate::model::{Rect, UiNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity levels for issues, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational
    Info,
    /// Should be addressed
    Warning,
    /// Fails the check
    Error,
    /// Blocks use of the element entirely
    Critical,
}

impl Severity {
    /// Error and Critical count towards the error total
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error | Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Broad category of an accessibility issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    TouchTarget,
    ContentLabel,
    Contrast,
    TraversalOrder,
    Custom,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::TouchTarget => write!(f, "TOUCH_TARGET"),
            IssueType::ContentLabel => write!(f, "CONTENT_LABEL"),
            IssueType::Contrast => write!(f, "CONTRAST"),
            IssueType::TraversalOrder => write!(f, "TRAVERSAL_ORDER"),
            IssueType::Custom => write!(f, "CUSTOM"),
        }
    }
}

/// A single violation reported by a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Id of the rule that produced this issue
    pub rule_id: String,
    /// One-line summary
    pub summary: String,
    /// Detailed message
    pub description: String,
    pub severity: Severity,
    pub issue_type: IssueType,
    pub element_id: String,
    pub element_bounds: Rect,
    pub element_class_name: String,
    /// Suggested fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
    /// Link to guideline or internal documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Issue {
    /// Create an issue against `node`, copying its identity, bounds and class
    pub fn for_node(
        rule_id: &str,
        node: &UiNode,
        severity: Severity,
        issue_type: IssueType,
        summary: &str,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            summary: summary.to_string(),
            description: summary.to_string(),
            severity,
            issue_type,
            element_id: node.id.clone(),
            element_bounds: node.bounds_in_screen,
            element_class_name: node.class_name.clone(),
            remediation: None,
            url: None,
        }
    }

    /// Set the detailed description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the remediation hint
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    /// Set the documentation link
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Location string for display, e.g. `btn_ok (Button) [0,0][50,50]`
    pub fn location_string(&self) -> String {
        format!(
            "{} ({}) {}",
            self.element_id, self.element_class_name, self.element_bounds
        )
    }
}

/// A rule that panicked while checking one node.
///
/// Faults are diagnostics about the scan itself, never violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFault {
    pub rule_id: String,
    pub node_id: String,
    pub message: String,
}

/// Outcome of one scan over one captured tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// When the scan finished
    pub timestamp: DateTime<Utc>,
    /// Free-form scope label, e.g. the screen or activity name
    pub activity_name: String,
    pub root_node: UiNode,
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faults: Vec<RuleFault>,
}

impl ScanResult {
    /// Wrap a tree and its issues, stamped with the current time
    pub fn new(activity_name: &str, root_node: UiNode, issues: Vec<Issue>) -> Self {
        Self {
            timestamp: Utc::now(),
            activity_name: activity_name.to_string(),
            root_node,
            issues,
            metadata: BTreeMap::new(),
            duration_ms: 0,
            faults: Vec::new(),
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_faults(mut self, faults: Vec<RuleFault>) -> Self {
        self.faults = faults;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl ToString) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Issues with severity Error or Critical
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.by_severity(Severity::Warning).len()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity.is_error())
    }

    pub fn by_severity(&self, severity: Severity) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }

    pub fn by_rule(&self, rule_id: &str) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.rule_id == rule_id).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> UiNode {
        UiNode::new("btn", Rect::new(0, 0, 40, 40), "android.widget.Button")
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
        assert!(Severity::Critical.is_error());
        assert!(!Severity::Warning.is_error());
    }

    #[test]
    fn test_issue_copies_node_identity() {
        let issue = Issue::for_node("r", &node(), Severity::Error, IssueType::Custom, "bad")
            .with_description("details")
            .with_remediation("fix it");
        assert_eq!(issue.element_id, "btn");
        assert_eq!(issue.element_bounds, Rect::new(0, 0, 40, 40));
        assert_eq!(issue.element_class_name, "android.widget.Button");
        assert_eq!(issue.description, "details");
        assert_eq!(issue.remediation.as_deref(), Some("fix it"));
        assert!(issue.url.is_none());
    }

    #[test]
    fn test_builders_accept_owned_strings() {
        let rule_doc = format!("https://example.com/rules/{}", "r");
        let issue = Issue::for_node("r", &node(), Severity::Info, IssueType::Custom, "note")
            .with_description(String::from("details"))
            .with_remediation(format!("resize {}", "btn"))
            .with_url(rule_doc);
        assert_eq!(issue.remediation.as_deref(), Some("resize btn"));
        assert_eq!(issue.url.as_deref(), Some("https://example.com/rules/r"));
    }

    #[test]
    fn test_result_counts() {
        let n = node();
        let issues = vec![
            Issue::for_node("a", &n, Severity::Error, IssueType::Custom, "e"),
            Issue::for_node("a", &n, Severity::Critical, IssueType::Custom, "c"),
            Issue::for_node("b", &n, Severity::Warning, IssueType::Custom, "w"),
            Issue::for_node("b", &n, Severity::Info, IssueType::Custom, "i"),
        ];
        let result = ScanResult::new("Main", n, issues);
        assert_eq!(result.issue_count(), 4);
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.by_rule("b").len(), 2);
        assert!(result.has_errors());
    }

    #[test]
    fn test_empty_result_is_clean() {
        let result = ScanResult::new("Main", node(), Vec::new());
        assert!(result.is_clean());
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_severity_serde_names() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"CRITICAL\"");
        assert_eq!(serde_json::to_string(&IssueType::TouchTarget).unwrap(), "\"TOUCH_TARGET\"");
    }
}
