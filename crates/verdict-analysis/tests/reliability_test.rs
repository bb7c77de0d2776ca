//! Reliability tests: coverage computation, gap tiers, and the guarded
//! fetch scenario.

use verdict_analysis::analysis::analyze_reliability;
use verdict_analysis::detectors::registry::create_default_registry;
use verdict_analysis::detectors::DetectionContext;
use verdict_analysis::evaluators::evaluate_reliability;
use verdict_analysis::findings::RiskLevel;
use verdict_analysis::{EvidenceCollector, SourceUnit};
use verdict_core::EvaluationConfig;

fn analyze(source: &str) -> verdict_analysis::analysis::ReliabilityAnalysis {
    let unit = SourceUnit::new(source, "test.ts");
    let config = EvaluationConfig::default();
    let collector = EvidenceCollector::new(&config.evidence);
    let ctx = DetectionContext {
        unit: &unit,
        config: &config,
        evidence: &collector,
    };
    let registry = create_default_registry();
    analyze_reliability(&ctx, &registry)
}

#[test]
fn guarded_fetch_has_full_coverage() {
    let source = r#"async function load() {
  try {
    const res = await fetch("/api/data");
    return await res.json();
  } catch (e) {
    console.error(e);
    return null;
  }
}
"#;
    let analysis = analyze(source);

    assert!(analysis.risky_operation_count > 0);
    assert_eq!(analysis.coverage, 100.0);
    assert!(analysis.gaps.is_empty());
    assert!(
        analysis.instances.iter().any(|i| i.kind == "try/catch block"),
        "expected a try/catch instance, got {:?}",
        analysis.instances.iter().map(|i| &i.kind).collect::<Vec<_>>()
    );
}

#[test]
fn bare_fetch_is_a_high_risk_gap() {
    let source = "function load() {\n  return fetch(\"/api/data\");\n}\n";
    let analysis = analyze(source);

    assert_eq!(analysis.risky_operation_count, 1);
    assert_eq!(analysis.handled_count, 0);
    assert_eq!(analysis.coverage, 0.0);
    assert_eq!(analysis.gaps.len(), 1);
    assert_eq!(analysis.gaps[0].risk, RiskLevel::High);
    assert!(analysis.gaps[0].location.contains("test.ts:2"));
}

#[test]
fn promise_catch_covers_adjacent_operation() {
    let source = "fetch(\"/api/data\")\n  .catch(reportError);\n";
    let analysis = analyze(source);

    assert_eq!(analysis.risky_operation_count, 1);
    assert_eq!(analysis.handled_count, 1);
    assert_eq!(analysis.coverage, 100.0);
}

#[test]
fn no_risky_operations_means_full_coverage_by_convention() {
    let analysis = analyze("function add(a, b) {\n  return a + b;\n}\n");

    assert_eq!(analysis.risky_operation_count, 0);
    assert_eq!(analysis.coverage, 100.0);
    assert!(analysis.gaps.is_empty());
}

#[test]
fn defensive_patterns_are_detected() {
    let source = r#"function parse(raw) {
  if (!raw) throw new Error("raw required");
  if (typeof raw !== "string") return null;
  const value = raw ?? "";
  if (value.length === 0) return null;
  return JSON.parse(value);
}
"#;
    let analysis = analyze(source);

    assert!(analysis.has_input_validation);
    assert!(analysis.has_null_checks);
    assert!(analysis.has_type_guards);
    assert!(analysis.edge_case_ratio > 0.0);
}

#[test]
fn evaluator_scores_guarded_unit_at_the_top() {
    let source = r#"async function load() {
  try {
    const res = await fetch("/api/data");
    return await res.json();
  } catch (e) {
    return null;
  }
}
"#;
    let analysis = analyze(source);
    let config = EvaluationConfig::default();
    let eval = evaluate_reliability(analysis, &config.reliability);

    assert_eq!(eval.score, 100.0);
    assert_eq!(eval.rating.label(), "Enterprise-Level");
    assert!(eval.assessment.contains("100%")
        || eval.assessment.contains("risky operations are covered"));
}

#[test]
fn high_risk_gaps_pull_the_score_down() {
    let source = "const a = fetch(\"/a\");\nconst b = fetch(\"/b\");\nconst c = eval(code);\n";
    let analysis = analyze(source);
    let config = EvaluationConfig::default();

    assert_eq!(analysis.risky_operation_count, 3);
    assert_eq!(analysis.high_risk_gap_count(), 3);

    let eval = evaluate_reliability(analysis, &config.reliability);
    // Coverage 0 minus 30 for the three high gaps, clamped at 0.
    assert_eq!(eval.score, 0.0);
    assert_eq!(eval.rating.label(), "Low");
}
