//! Stress collapse tests: the pattern table, robust signatures, and the
//! fixed threshold/behavior scenarios.

use verdict_analysis::detectors::stress::{
    detect_stress_patterns, match_robust_signature, RobustSignature, STRESS_PATTERNS,
};
use verdict_analysis::detectors::DetectionContext;
use verdict_analysis::evaluators::evaluate_stress_collapse;
use verdict_analysis::findings::{Finding, StressCollapseCondition};
use verdict_analysis::{EvidenceCollector, SourceUnit};
use verdict_core::EvaluationConfig;

fn with_context<R>(source: &str, f: impl FnOnce(&DetectionContext<'_>) -> R) -> R {
    let unit = SourceUnit::new(source, "test.tsx");
    let config = EvaluationConfig::default();
    let collector = EvidenceCollector::new(&config.evidence);
    let ctx = DetectionContext {
        unit: &unit,
        config: &config,
        evidence: &collector,
    };
    f(&ctx)
}

fn conditions(findings: Vec<Finding>) -> Vec<StressCollapseCondition> {
    findings
        .into_iter()
        .filter_map(|f| match f {
            Finding::StressCondition(c) => Some(c),
            _ => None,
        })
        .collect()
}

#[test]
fn fast_interval_references_the_frame_budget() {
    with_context("setInterval(tick, 10);\n", |ctx| {
        let found = conditions(detect_stress_patterns(ctx));
        assert_eq!(found.len(), 1);
        let condition = &found[0];

        assert_eq!(condition.id, "stress-high-frequency-interval");
        assert!(condition.threshold.contains("16ms"), "{}", condition.threshold);
        assert!(
            condition.expected_behavior.contains("CPU")
                && condition.expected_behavior.contains("jank"),
            "{}",
            condition.expected_behavior
        );
        assert!(!condition.reasoning.is_empty());
        assert!(!condition.code_pattern_references.is_empty());
    });
}

#[test]
fn slow_interval_passes() {
    with_context("setInterval(poll, 5000);\n", |ctx| {
        assert!(conditions(detect_stress_patterns(ctx)).is_empty());
    });
}

#[test]
fn nested_loops_get_the_combinatorial_threshold() {
    let source = r#"for (const a of left) {
  for (const b of right) {
    pairs.push([a, b]);
  }
}
"#;
    with_context(source, |ctx| {
        let found = conditions(detect_stress_patterns(ctx));
        let nested = found
            .iter()
            .find(|c| c.id == "stress-nested-loop")
            .expect("nested loop condition");
        assert!(nested.threshold.contains("1,000"));
        assert!(nested.expected_behavior.contains("freeze"));
    });
}

#[test]
fn network_calls_inside_a_loop_are_a_storm_risk() {
    let source = r#"for (const id of ids) {
  fetch(`/api/items/${id}`).then(collect);
}
"#;
    with_context(source, |ctx| {
        let found = conditions(detect_stress_patterns(ctx));
        assert!(found.iter().any(|c| c.id == "stress-network-in-loop"));
    });
}

#[test]
fn self_recursion_is_a_stack_risk() {
    let source = r#"function walk(node) {
  node.children.forEach((child) => walk(child));
  return node;
}
"#;
    with_context(source, |ctx| {
        let found = conditions(detect_stress_patterns(ctx));
        assert!(found.iter().any(|c| c.id == "stress-self-recursion"));
    });
}

#[test]
fn listener_without_removal_is_a_leak_risk() {
    with_context("element.addEventListener(\"scroll\", onScroll);\n", |ctx| {
        let found = conditions(detect_stress_patterns(ctx));
        assert!(found.iter().any(|c| c.id == "stress-listener-leak"));
    });
}

#[test]
fn paired_listener_registration_passes() {
    let source = "element.addEventListener(\"scroll\", onScroll);\nelement.removeEventListener(\"scroll\", onScroll);\n";
    with_context(source, |ctx| {
        let found = conditions(detect_stress_patterns(ctx));
        assert!(!found.iter().any(|c| c.id == "stress-listener-leak"));
    });
}

// ---- Robust signatures ----

#[test]
fn boolean_toggle_component_is_robust() {
    let source = r#"export function DarkModeToggle() {
  const [isDark, setIsDark] = useState(false);
  const flip = () => setIsDark(!isDark);
  return <button onClick={flip}>{isDark ? "Dark" : "Light"}</button>;
}
"#;
    with_context(source, |ctx| {
        let found = conditions(detect_stress_patterns(ctx));
        assert!(found.is_empty(), "toggle should match no stress patterns: {found:?}");

        let signature = match_robust_signature(ctx);
        assert_eq!(signature, Some(RobustSignature::BooleanToggle));

        let eval = evaluate_stress_collapse(found, signature);
        assert!(eval.is_robust);
        assert_eq!(eval.rating.label(), "Robust");
        let reason = eval.robust_reason.expect("robust reason");
        assert!(reason.contains("simple boolean toggle"), "{reason}");
    });
}

#[test]
fn static_content_is_robust() {
    let source = "export function Footer() {\n  return <footer>(c) 2025</footer>;\n}\n";
    with_context(source, |ctx| {
        let signature = match_robust_signature(ctx);
        assert_eq!(signature, Some(RobustSignature::StaticContent));
    });
}

#[test]
fn stress_conditions_produce_a_graded_rating() {
    // One condition: Stable. Three: Fragile.
    let one = with_context("setInterval(tick, 10);\n", |ctx| {
        conditions(detect_stress_patterns(ctx))
    });
    let eval = evaluate_stress_collapse(one, None);
    assert!(!eval.is_robust);
    assert_eq!(eval.rating.label(), "Stable");

    let source = r#"setInterval(tick, 10);
for (const a of xs) {
  for (const b of ys) {
    fetch(url(a, b));
  }
}
"#;
    let many = with_context(source, |ctx| conditions(detect_stress_patterns(ctx)));
    assert!(many.len() >= 3);
    let eval = evaluate_stress_collapse(many, None);
    assert_eq!(eval.rating.label(), "Fragile");
}

#[test]
fn pattern_table_is_complete() {
    assert_eq!(STRESS_PATTERNS.len(), 8);
    for spec in &STRESS_PATTERNS {
        assert!(!spec.threshold.is_empty());
        assert!(!spec.expected_behavior.is_empty());
        assert!(spec.reasoning.iter().all(|r| !r.is_empty()));
    }
}
