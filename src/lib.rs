// SPDX-License-Identifier: PMPL-1.0-or-later
//! uiscanbot - accessibility rule engine for captured UI trees
//!
//! Takes an immutable snapshot of a user-interface hierarchy, runs a set of
//! accessibility rules over every node and returns the violations in a
//! stable, reproducible order.
//!
//! ## Pipeline
//!
//! capture (external) -> [`UiNode`] tree -> [`RuleEngine::analyze`] ->
//! [`Issue`]s -> [`ScanResult`] -> report
//!
//! ## Rules
//!
//! - **TouchTargetSize** (2.5.5): clickable elements at least 48dp square
//! - **MissingContentDescription** (4.1.2): actionable elements need a label
//! - **DuplicateLabel**: containers repeating a direct child's label
//! - **TextContrast** (1.4.3): text color against its background
//!
//! ```
//! use uiscanbot::{Rect, RuleEngine, TouchTargetRule, UiNode};
//!
//! let mut engine = RuleEngine::default();
//! engine.add_rule(TouchTargetRule::new(2.0).unwrap());
//!
//! let root = UiNode::new("btn", Rect::new(0, 0, 50, 50), "Button").clickable();
//! let analysis = engine.analyze(&root).unwrap();
//! assert_eq!(analysis.issues.len(), 1);
//! ```

pub mod config;
pub mod contrast;
pub mod engine;
pub mod error;
pub mod exchange;
pub mod model;
pub mod report;
pub mod result;
pub mod rules;
pub mod scanner;

pub use config::Config;
pub use contrast::{contrast_ratio, relative_luminance, Color};
pub use engine::{Analysis, RuleEngine};
pub use error::{Result, ScanError};
pub use model::{ExtraValue, Rect, UiNode};
pub use result::{Issue, IssueType, RuleFault, ScanResult, Severity};
pub use rules::{ContentLabelRule, DuplicateLabelRule, Rule, TextContrastRule, TouchTargetRule};
pub use scanner::{Capture, MapperChain, NodeMapper, Scanner, SnapshotFile};
