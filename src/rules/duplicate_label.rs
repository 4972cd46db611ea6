// SPDX-License-Identifier: PMPL-1.0-or-later
//! Duplicate label rule
//!
//! A container that repeats the exact label of one of its children makes a
//! screen reader announce the same words twice. Only immediate children are
//! compared.

use crate::model::UiNode;
use crate::result::{Issue, IssueType, Severity};
use crate::rules::Rule;

/// Rule for labels shared between a node and its direct children
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateLabelRule;

impl Rule for DuplicateLabelRule {
    fn id(&self) -> &str {
        "DuplicateLabel"
    }

    fn description(&self) -> &str {
        "Avoid sharing the exact same label with children, causing double readout."
    }

    fn check(&self, node: &UiNode, _root: &UiNode) -> Vec<Issue> {
        let label = match node.effective_label() {
            Some(l) if !l.is_empty() => l,
            _ => return Vec::new(),
        };

        node.children
            .iter()
            .filter(|child| child.effective_label() == Some(label))
            .map(|child| {
                Issue::for_node(
                    self.id(),
                    node,
                    Severity::Warning,
                    IssueType::ContentLabel,
                    "Redundant duplicate label",
                )
                .with_description(format!(
                    "This node shares the exact same label '{}' with its child '{}'.",
                    label, child.id
                ))
                .with_remediation(
                    "Remove the content description from the container if the child already reads it.",
                )
            })
            .collect()
    }
}
