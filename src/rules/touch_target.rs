// SPDX-License-Identifier: PMPL-1.0-or-later
//! Touch target size rule - WCAG 2.5.5 Target Size
//!
//! Clickable and long-clickable elements must be at least 48dp on each side by default.
//! Every node is judged on its own bounds: a small clickable child inside a
//! large clickable parent is still reported.

use crate::error::{Result, ScanError};
use crate::model::UiNode;
use crate::result::{Issue, IssueType, Severity};
use crate::rules::Rule;

/// Minimum touch target side in density-independent pixels
pub const MIN_TOUCH_TARGET_DP: u32 = 48;

/// Rule for minimum touch target size
#[derive(Debug, Clone)]
pub struct TouchTargetRule {
    density: f32,
    min_dp: u32,
    description: String,
}

impl TouchTargetRule {
    /// Create the rule for a display with `density` physical pixels per dp.
    ///
    /// Zero, negative and non-finite densities are rejected.
    pub fn new(density: f32) -> Result<Self> {
        Self::with_min_dp(density, MIN_TOUCH_TARGET_DP)
    }

    /// Create the rule with a custom minimum side length
    pub fn with_min_dp(density: f32, min_dp: u32) -> Result<Self> {
        if !density.is_finite() || density <= 0.0 {
            return Err(ScanError::Config(format!(
                "touch target density must be a positive number, got {}",
                density
            )));
        }
        if min_dp == 0 {
            return Err(ScanError::Config(
                "touch target minimum size must be at least 1dp".to_string(),
            ));
        }
        Ok(Self {
            density,
            min_dp,
            description: format!("Clickable items must be at least {0}dp x {0}dp.", min_dp),
        })
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    /// Minimum side length in physical pixels
    pub fn min_size_px(&self) -> i32 {
        (self.min_dp as f32 * self.density) as i32
    }

    fn px_to_dp(&self, px: i64) -> i64 {
        (px as f64 / self.density as f64) as i64
    }
}

impl Rule for TouchTargetRule {
    fn id(&self) -> &str {
        "TouchTargetSize"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, node: &UiNode, _root: &UiNode) -> Vec<Issue> {
        if !node.is_clickable && !node.is_long_clickable {
            return Vec::new();
        }

        let min = i64::from(self.min_size_px());
        let width = node.bounds_in_screen.width();
        let height = node.bounds_in_screen.height();
        if width >= min && height >= min {
            return Vec::new();
        }

        vec![Issue::for_node(
            self.id(),
            node,
            Severity::Error,
            IssueType::TouchTarget,
            "Touch target too small",
        )
        .with_description(format!(
            "Element is {}dp x {}dp. Minimum required is {}dp x {}dp.",
            self.px_to_dp(width),
            self.px_to_dp(height),
            self.min_dp,
            self.min_dp
        ))
        .with_remediation(format!(
            "Ensure the view has a minimum size of {}dp or use a TouchDelegate.",
            self.min_dp
        ))
        .with_url("https://www.w3.org/WAI/WCAG21/Understanding/target-size.html")]
    }
}
