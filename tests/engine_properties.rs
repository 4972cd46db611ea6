// SPDX-License-Identifier: PMPL-1.0-or-later
//! Property tests for the rule engine over generated trees

use proptest::prelude::*;
use std::sync::Arc;
use uiscanbot::exchange;
use uiscanbot::{
    ContentLabelRule, DuplicateLabelRule, Rect, Rule, RuleEngine, TextContrastRule, TouchTargetRule,
    UiNode,
};

fn label() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![Just(String::new()), "[AB]"])
}

fn node_fields() -> impl Strategy<Value = UiNode> {
    (
        "[a-c]{1,2}",
        (-10i32..150, -10i32..150, -10i32..250, -10i32..250),
        (label(), label(), label()),
        (any::<bool>(), any::<bool>(), any::<bool>()),
        prop::option::of(prop_oneof![Just("#000"), Just("#777"), Just("#fff"), Just("bogus")]),
    )
        .prop_map(|(id, (l, t, r, b), (text, desc, state), (click, long, focus), color)| {
            let mut node = UiNode::new(id, Rect::new(l, t, r, b), "View");
            node.text = text;
            node.content_description = desc;
            node.state_description = state;
            node.is_clickable = click;
            node.is_long_clickable = long;
            node.is_focusable = focus;
            if let Some(c) = color {
                node = node.with_extra("textColor", c).with_extra("backgroundColor", "#fff");
            }
            node
        })
}

fn tree() -> impl Strategy<Value = UiNode> {
    node_fields().prop_recursive(4, 48, 4, |inner| {
        (node_fields(), prop::collection::vec(inner, 0..4))
            .prop_map(|(node, children)| node.with_children(children))
    })
}

fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(TouchTargetRule::new(2.0).unwrap()),
        Arc::new(ContentLabelRule),
        Arc::new(DuplicateLabelRule),
        Arc::new(TextContrastRule::default()),
    ]
}

proptest! {
    #[test]
    fn empty_rule_set_finds_nothing(root in tree()) {
        let analysis = RuleEngine::default().analyze(&root).unwrap();
        prop_assert!(analysis.issues.is_empty());
    }

    #[test]
    fn issue_count_is_sum_of_rule_checks(root in tree()) {
        let rules = builtin_rules();
        let expected: usize = root
            .iter()
            .map(|(_, node)| rules.iter().map(|r| r.check(node, &root).len()).sum::<usize>())
            .sum();
        let analysis = RuleEngine::new(rules).analyze(&root).unwrap();
        prop_assert_eq!(analysis.issues.len(), expected);
    }

    #[test]
    fn analysis_is_deterministic_and_parallel_safe(root in tree()) {
        let engine = RuleEngine::new(builtin_rules());
        let first = engine.analyze(&root).unwrap();
        let second = engine.analyze(&root).unwrap();
        let parallel = engine.clone().with_parallel(true).analyze(&root).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &parallel);
    }

    #[test]
    fn exchange_round_trip_preserves_issues(root in tree()) {
        let engine = RuleEngine::new(builtin_rules());
        let restored = exchange::tree_from_json(&exchange::tree_to_json(&root).unwrap()).unwrap();
        prop_assert_eq!(&restored, &root);
        prop_assert_eq!(
            engine.analyze(&restored).unwrap().issues,
            engine.analyze(&root).unwrap().issues
        );
    }
}
