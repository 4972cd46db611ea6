// SPDX-License-Identifier: PMPL-1.0-or-later
//! Missing label rule - WCAG 4.1.2 Name, Role, Value (Level A)
//!
//! Actionable elements (clickable or focusable) need something a screen
//! reader can announce:
//! - their own text, content description or state description, or
//! - text or a content description somewhere in their subtree
//!   (a button wrapping a label is fine)

use crate::model::node::non_empty;
use crate::model::UiNode;
use crate::result::{Issue, IssueType, Severity};
use crate::rules::Rule;

/// Rule for actionable elements without an accessible label
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentLabelRule;

impl Rule for ContentLabelRule {
    fn id(&self) -> &str {
        "MissingContentDescription"
    }

    fn description(&self) -> &str {
        "Actionable items must have a label."
    }

    fn check(&self, node: &UiNode, _root: &UiNode) -> Vec<Issue> {
        if !node.is_clickable && !node.is_focusable {
            return Vec::new();
        }

        if node.has_readable_label() || non_empty(&node.state_description) {
            return Vec::new();
        }

        if node.any_descendant(UiNode::has_readable_label) {
            return Vec::new();
        }

        vec![Issue::for_node(
            self.id(),
            node,
            Severity::Error,
            IssueType::ContentLabel,
            "Missing accessible label",
        )
        .with_description(
            "This interactive element has no text, content description, or child with text.",
        )
        .with_remediation("Add a content description or ensure a child text element is present.")
        .with_url("https://www.w3.org/WAI/WCAG21/Understanding/name-role-value.html")]
    }
}
