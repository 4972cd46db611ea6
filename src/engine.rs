// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule engine: runs every registered rule against every node of a tree.
//!
//! Issues come back in canonical order: nodes in pre-order (a node before
//! its children, children left to right), and for each node the rules in
//! registration order. Parallel evaluation produces the same sequence.

use crate::error::{Result, ScanError};
use crate::model::UiNode;
use crate::result::{Issue, RuleFault};
use crate::rules::Rule;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default limit on tree depth before a scan is rejected
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Everything produced by one engine pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Violations in canonical order
    pub issues: Vec<Issue>,
    /// Rules that panicked, in the order they were hit
    pub faults: Vec<RuleFault>,
}

impl Analysis {
    pub fn is_complete(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Ordered set of rules plus evaluation settings
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn Rule>>,
    parallel: bool,
    max_depth: usize,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_ids())
            .field("parallel", &self.parallel)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl RuleEngine {
    pub fn new(rules: Vec<Arc<dyn Rule>>) -> Self {
        Self {
            rules,
            parallel: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Append a rule. Duplicate ids are allowed and both run.
    pub fn add_rule(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Arc::new(rule));
    }

    /// Append an already shared rule
    pub fn add_shared_rule(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Evaluate nodes on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Run all rules over the tree rooted at `root`.
    ///
    /// Fails only when the tree is deeper than the configured limit. A rule
    /// that panics is recorded as a fault and the scan continues.
    pub fn analyze(&self, root: &UiNode) -> Result<Analysis> {
        let nodes = self.flatten(root)?;
        info!(
            nodes = nodes.len(),
            rules = self.rules.len(),
            parallel = self.parallel,
            "Analyzing tree"
        );

        let per_node: Vec<Vec<Outcome>> = if self.parallel {
            // Indexed collect keeps pre-order positions
            nodes
                .par_iter()
                .map(|node| self.check_node(node, root))
                .collect()
        } else {
            nodes.iter().map(|node| self.check_node(node, root)).collect()
        };

        let mut analysis = Analysis::default();
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for outcome in per_node.into_iter().flatten() {
            match outcome {
                Outcome::Issues(rule_id, issues) => {
                    *counts.entry(rule_id).or_default() += issues.len();
                    analysis.issues.extend(issues);
                }
                Outcome::Fault(fault) => {
                    warn!(
                        rule = %fault.rule_id,
                        node = %fault.node_id,
                        "Rule panicked: {}",
                        fault.message
                    );
                    analysis.faults.push(fault);
                }
            }
        }

        for (rule_id, count) in &counts {
            debug!(rule = %rule_id, issues = count, "Rule finished");
        }
        info!(
            issues = analysis.issues.len(),
            faults = analysis.faults.len(),
            "Analysis complete"
        );

        Ok(analysis)
    }

    /// Pre-order node list, rejecting trees deeper than `max_depth`
    fn flatten<'a>(&self, root: &'a UiNode) -> Result<Vec<&'a UiNode>> {
        let mut nodes = Vec::new();
        for (depth, node) in root.iter() {
            if depth > self.max_depth {
                return Err(ScanError::TraversalTooDeep {
                    depth,
                    limit: self.max_depth,
                });
            }
            nodes.push(node);
        }
        Ok(nodes)
    }

    fn check_node<'a>(&'a self, node: &UiNode, root: &UiNode) -> Vec<Outcome<'a>> {
        self.rules
            .iter()
            .map(|rule| run_rule(rule.as_ref(), node, root))
            .collect()
    }
}

enum Outcome<'a> {
    Issues(&'a str, Vec<Issue>),
    Fault(RuleFault),
}

fn run_rule<'a>(rule: &'a dyn Rule, node: &UiNode, root: &UiNode) -> Outcome<'a> {
    match catch_unwind(AssertUnwindSafe(|| rule.check(node, root))) {
        Ok(issues) => Outcome::Issues(rule.id(), issues),
        Err(payload) => Outcome::Fault(RuleFault {
            rule_id: rule.id().to_string(),
            node_id: node.id.clone(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rule panicked".to_string()
    }
}
