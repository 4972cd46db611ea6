// SPDX-License-Identifier: PMPL-1.0-or-later
//! Captured UI tree nodes.
//!
//! A `UiNode` is the platform-neutral form of one element in a captured
//! hierarchy, whether it came from a native view tree or a declarative
//! framework's semantics graph. Nodes are built once by a capture adapter and
//! never mutated afterwards, so a tree can be shared read-only across threads
//! while rules run.

use super::rect::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scalar metadata attached to a node by the capture adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ExtraValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExtraValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ExtraValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ExtraValue::Int(i) => Some(*i as f64),
            ExtraValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExtraValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for ExtraValue {
    fn from(v: bool) -> Self {
        ExtraValue::Bool(v)
    }
}

impl From<i64> for ExtraValue {
    fn from(v: i64) -> Self {
        ExtraValue::Int(v)
    }
}

impl From<i32> for ExtraValue {
    fn from(v: i32) -> Self {
        ExtraValue::Int(v as i64)
    }
}

impl From<u32> for ExtraValue {
    fn from(v: u32) -> Self {
        ExtraValue::Int(v as i64)
    }
}

impl From<f64> for ExtraValue {
    fn from(v: f64) -> Self {
        ExtraValue::Float(v)
    }
}

impl From<&str> for ExtraValue {
    fn from(v: &str) -> Self {
        ExtraValue::Str(v.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(v: String) -> Self {
        ExtraValue::Str(v)
    }
}

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// One element of a captured UI tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiNode {
    /// Capture-assigned identifier. Not guaranteed unique.
    pub id: String,
    pub bounds_in_screen: Rect,
    /// Free-form classification, e.g. `android.widget.Button` or `Role.Button`
    pub class_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_description: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_clickable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_long_clickable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_focusable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_focused: bool,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_heading: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_checkable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_checked: bool,

    /// Ordered children; order is traversal order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UiNode>,

    /// Capture-specific metadata not promoted to a field
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, ExtraValue>,
}

impl UiNode {
    /// Create a leaf node with all optional attributes unset
    pub fn new(id: impl Into<String>, bounds: Rect, class_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bounds_in_screen: bounds,
            class_name: class_name.into(),
            text: None,
            content_description: None,
            hint_text: None,
            state_description: None,
            is_clickable: false,
            is_long_clickable: false,
            is_focusable: false,
            is_focused: false,
            is_enabled: true,
            is_heading: false,
            is_selected: false,
            is_checkable: false,
            is_checked: false,
            children: Vec::new(),
            extras: BTreeMap::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_content_description(mut self, desc: impl Into<String>) -> Self {
        self.content_description = Some(desc.into());
        self
    }

    pub fn with_hint_text(mut self, hint: impl Into<String>) -> Self {
        self.hint_text = Some(hint.into());
        self
    }

    pub fn with_state_description(mut self, state: impl Into<String>) -> Self {
        self.state_description = Some(state.into());
        self
    }

    pub fn clickable(mut self) -> Self {
        self.is_clickable = true;
        self
    }

    pub fn long_clickable(mut self) -> Self {
        self.is_long_clickable = true;
        self
    }

    pub fn focusable(mut self) -> Self {
        self.is_focusable = true;
        self
    }

    pub fn focused(mut self) -> Self {
        self.is_focused = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    pub fn heading(mut self) -> Self {
        self.is_heading = true;
        self
    }

    pub fn selected(mut self) -> Self {
        self.is_selected = true;
        self
    }

    /// Mark as checkable with the given checked state
    pub fn checkable(mut self, checked: bool) -> Self {
        self.is_checkable = true;
        self.is_checked = checked;
        self
    }

    pub fn with_child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = UiNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&ExtraValue> {
        self.extras.get(key)
    }

    /// Content description if set, otherwise text.
    ///
    /// An empty content description still takes precedence over text.
    pub fn effective_label(&self) -> Option<&str> {
        self.content_description
            .as_deref()
            .or(self.text.as_deref())
    }

    /// True if `text` or `content_description` is set and non-empty
    pub fn has_readable_label(&self) -> bool {
        non_empty(&self.text) || non_empty(&self.content_description)
    }

    /// Pre-order iterator over this node and all descendants
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![(0, self)] }
    }

    /// All nodes in the subtree (self included) matching `predicate`, in
    /// pre-order.
    pub fn find_all<F>(&self, predicate: F) -> Vec<&UiNode>
    where
        F: Fn(&UiNode) -> bool,
    {
        self.iter().map(|(_, n)| n).filter(|n| predicate(n)).collect()
    }

    /// Whether any strict descendant matches `predicate`.
    pub fn any_descendant<F>(&self, predicate: F) -> bool
    where
        F: Fn(&UiNode) -> bool,
    {
        self.iter().skip(1).any(|(_, n)| predicate(n))
    }

    /// Number of nodes in the subtree, self included
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Depth of the deepest node, counting the root as 0
    pub fn max_depth(&self) -> usize {
        self.iter().map(|(d, _)| d).max().unwrap_or(0)
    }
}

/// Depth-first pre-order walk yielding `(depth, node)`.
///
/// Uses an explicit stack so arbitrarily deep trees do not recurse.
pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a UiNode)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a UiNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}
