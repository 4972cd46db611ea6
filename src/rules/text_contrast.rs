// SPDX-License-Identifier: PMPL-1.0-or-later
//! Text contrast rule - WCAG 1.4.3 Contrast (Minimum) (Level AA)
//!
//! Uses resolved colors the capture adapter stored in `extras`:
//! - `textColor` / `backgroundColor`: color string or packed ARGB integer
//! - `textSizeSp`: text size in scaled pixels (optional)
//! - `textBold`: whether the text is bold (optional)
//!
//! Nodes without both colors are skipped. Large text (18sp, or 14sp bold)
//! gets the relaxed threshold.

use crate::contrast::{self, Color, MAX_RATIO, MIN_RATIO};
use crate::error::{Result, ScanError};
use crate::model::{ExtraValue, UiNode};
use crate::result::{Issue, IssueType, Severity};
use crate::rules::Rule;

pub const TEXT_COLOR_KEY: &str = "textColor";
pub const BACKGROUND_COLOR_KEY: &str = "backgroundColor";
pub const TEXT_SIZE_KEY: &str = "textSizeSp";
pub const TEXT_BOLD_KEY: &str = "textBold";

/// AA minimum for normal text
pub const DEFAULT_MIN_RATIO: f64 = 4.5;
/// AA minimum for large text
pub const DEFAULT_LARGE_TEXT_MIN_RATIO: f64 = 3.0;

/// Rule for text drawn with too little contrast against its background
#[derive(Debug, Clone)]
pub struct TextContrastRule {
    min_ratio: f64,
    large_text_min_ratio: f64,
    backdrop: Color,
}

impl Default for TextContrastRule {
    fn default() -> Self {
        Self {
            min_ratio: DEFAULT_MIN_RATIO,
            large_text_min_ratio: DEFAULT_LARGE_TEXT_MIN_RATIO,
            backdrop: Color::WHITE,
        }
    }
}

impl TextContrastRule {
    /// Create the rule with explicit thresholds and the backdrop that
    /// translucent backgrounds are composited over.
    pub fn new(min_ratio: f64, large_text_min_ratio: f64, backdrop: Color) -> Result<Self> {
        for (name, value) in [("min_ratio", min_ratio), ("large_text_min_ratio", large_text_min_ratio)] {
            if !(MIN_RATIO..=MAX_RATIO).contains(&value) {
                return Err(ScanError::Config(format!(
                    "text contrast {} must be between {} and {}, got {}",
                    name, MIN_RATIO, MAX_RATIO, value
                )));
            }
        }
        Ok(Self {
            min_ratio,
            large_text_min_ratio,
            backdrop,
        })
    }

    fn threshold_for(&self, node: &UiNode) -> f64 {
        let size = node.extra(TEXT_SIZE_KEY).and_then(ExtraValue::as_f64);
        let bold = node
            .extra(TEXT_BOLD_KEY)
            .and_then(ExtraValue::as_bool)
            .unwrap_or(false);
        match size {
            Some(sp) if sp >= 18.0 || (bold && sp >= 14.0) => self.large_text_min_ratio,
            _ => self.min_ratio,
        }
    }
}

/// Read a color stored either as a string or as a packed ARGB integer.
///
/// Packed colors are accepted unsigned or as signed 32-bit ints, where
/// every opaque color is negative (`-1` is opaque white).
pub fn extra_color(node: &UiNode, key: &str) -> Option<Color> {
    match node.extra(key)? {
        ExtraValue::Str(s) => contrast::parse_color(s),
        ExtraValue::Int(i) => u32::try_from(*i)
            .ok()
            .or_else(|| i32::try_from(*i).ok().map(|v| v as u32))
            .map(Color::from_argb),
        _ => None,
    }
}

impl Rule for TextContrastRule {
    fn id(&self) -> &str {
        "TextContrast"
    }

    fn description(&self) -> &str {
        "Text must have sufficient contrast against its background."
    }

    fn check(&self, node: &UiNode, _root: &UiNode) -> Vec<Issue> {
        if !node.text.as_deref().is_some_and(|t| !t.is_empty()) {
            return Vec::new();
        }
        let (fg, bg) = match (
            extra_color(node, TEXT_COLOR_KEY),
            extra_color(node, BACKGROUND_COLOR_KEY),
        ) {
            (Some(fg), Some(bg)) => (fg, bg),
            _ => return Vec::new(),
        };

        let ratio = contrast::contrast_ratio_over(fg, bg, self.backdrop);
        let required = self.threshold_for(node);
        if ratio >= required {
            return Vec::new();
        }

        vec![Issue::for_node(
            self.id(),
            node,
            Severity::Error,
            IssueType::Contrast,
            "Insufficient text contrast",
        )
        .with_description(format!(
            "Text contrast ratio {:.2}:1 ({} on {}) is below the minimum of {:.1}:1.",
            ratio, fg, bg, required
        ))
        .with_remediation("Darken the text or lighten the background until the ratio meets the minimum.")
        .with_url("https://www.w3.org/WAI/WCAG21/Understanding/contrast-minimum.html")]
    }
}
