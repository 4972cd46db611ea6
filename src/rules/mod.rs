// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility rules run by the engine against every captured node.
//!
//! Each rule module focuses on one kind of problem. Rules are stateless apart
//! from parameters fixed at construction, so the same instance can be called
//! for any node, in any order, from any thread.

pub mod content_label;
pub mod duplicate_label;
pub mod text_contrast;
pub mod touch_target;

pub use content_label::ContentLabelRule;
pub use duplicate_label::DuplicateLabelRule;
pub use text_contrast::TextContrastRule;
pub use touch_target::TouchTargetRule;

use crate::model::UiNode;
use crate::result::Issue;

/// Trait implemented by all rules
pub trait Rule: Send + Sync {
    /// Stable identifier, copied into every issue the rule reports
    fn id(&self) -> &str;

    /// Short description of what this rule checks
    fn description(&self) -> &str;

    /// Check one node.
    ///
    /// `root` is the root of the tree being scanned, for rules that need
    /// context beyond the node's own subtree. Must not have side effects.
    fn check(&self, node: &UiNode, root: &UiNode) -> Vec<Issue>;
}
