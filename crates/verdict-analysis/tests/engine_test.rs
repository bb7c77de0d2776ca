//! Engine tests: the eight-dimension facade, determinism, parallel parity,
//! serialization shape, and markdown rendering.

use verdict_analysis::engine::{EvaluationInput, Evaluator};
use verdict_analysis::feature::{
    AtomicFeature, Capability, CapabilityAnalysisResult, CapabilityStatus,
};
use verdict_analysis::report::feature_markdown;
use verdict_analysis::validation::{
    is_valid_completeness_evaluation, is_valid_feature_evaluation,
    is_valid_stress_collapse_evaluation,
};
use verdict_core::EvaluationConfig;

const PANEL: &str = r#"interface PanelProps {
  title: string; // heading text
  collapsed?: boolean;
  onToggle?: () => void;
}

/** Collapsible section with a heading. */
export function Panel({ title, collapsed = false, onToggle }: PanelProps) {
  return (
    <section className={collapsed ? "closed" : "open"}>
      <h2 onClick={onToggle}>{title}</h2>
    </section>
  );
}
"#;

fn panel_input() -> EvaluationInput {
    EvaluationInput {
        atomic_feature: AtomicFeature {
            name: "Panel".into(),
            description: "Collapsible content section".into(),
            capabilities: vec![Capability::required("render"), Capability::new("collapse")],
        },
        source_code: PANEL.into(),
        file_path: "src/Panel.tsx".into(),
        capability_analysis: vec![
            CapabilityAnalysisResult::new(
                Capability::required("render"),
                CapabilityStatus::Implemented,
            ),
            CapabilityAnalysisResult::new(
                Capability::new("collapse"),
                CapabilityStatus::Incomplete,
            ),
        ],
        related_files: Vec::new(),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn engine_produces_all_eight_dimensions() {
    init_tracing();
    let evaluator = Evaluator::default();
    let evaluation = evaluator.evaluate(&panel_input());

    // Completeness: (1 + 0.5) / 2 = 75%.
    assert_eq!(evaluation.completeness.percentage, 75);
    assert_eq!(evaluation.completeness.rating.label(), "Full");

    // Every dimension carries a non-empty assessment.
    assert!(!evaluation.completeness.assessment.is_empty());
    assert!(!evaluation.code_quality.assessment.is_empty());
    assert!(!evaluation.documentation.assessment.is_empty());
    assert!(!evaluation.reliability.assessment.is_empty());
    assert!(!evaluation.performance.assessment.is_empty());
    assert!(!evaluation.integration.assessment.is_empty());
    assert!(!evaluation.maintenance.assessment.is_empty());
    assert!(!evaluation.stress_collapse.assessment.is_empty());
}

#[test]
fn serialized_output_passes_validation() {
    let evaluator = Evaluator::default();
    let evaluation = evaluator.evaluate(&panel_input());

    let value = serde_json::to_value(&evaluation).unwrap();
    assert!(is_valid_feature_evaluation(&value), "shape: {value}");

    // Ratings serialize as their label strings.
    assert!(value["completeness"]["rating"].is_string());
    assert!(is_valid_completeness_evaluation(&value["completeness"]));
    assert!(is_valid_stress_collapse_evaluation(&value["stress_collapse"]));
}

#[test]
fn tampered_rating_fails_validation() {
    let evaluator = Evaluator::default();
    let evaluation = evaluator.evaluate(&panel_input());

    let mut value = serde_json::to_value(&evaluation).unwrap();
    value["completeness"]["rating"] = serde_json::json!("Outstanding");
    assert!(!is_valid_feature_evaluation(&value));
}

#[test]
fn evaluation_is_deterministic() {
    let evaluator = Evaluator::default();
    let input = panel_input();

    let first = serde_json::to_string(&evaluator.evaluate(&input)).unwrap();
    let second = serde_json::to_string(&evaluator.evaluate(&input)).unwrap();
    assert_eq!(first, second);

    // A second engine instance agrees byte for byte.
    let other = Evaluator::new(EvaluationConfig::default());
    let third = serde_json::to_string(&other.evaluate(&input)).unwrap();
    assert_eq!(first, third);
}

#[test]
fn parallel_evaluation_matches_sequential() {
    let evaluator = Evaluator::default();
    let inputs: Vec<EvaluationInput> = (0..8).map(|_| panel_input()).collect();

    let parallel = evaluator.evaluate_many(&inputs);
    assert_eq!(parallel.len(), inputs.len());

    let sequential: Vec<String> = inputs
        .iter()
        .map(|i| serde_json::to_string(&evaluator.evaluate(i)).unwrap())
        .collect();
    let parallel_json: Vec<String> = parallel
        .iter()
        .map(|e| serde_json::to_string(e).unwrap())
        .collect();
    assert_eq!(sequential, parallel_json);
}

#[test]
fn empty_source_never_fails() {
    let evaluator = Evaluator::default();
    let mut input = panel_input();
    input.source_code = String::new();
    input.capability_analysis = Vec::new();

    let evaluation = evaluator.evaluate(&input);
    assert_eq!(evaluation.completeness.percentage, 0);
    assert_eq!(evaluation.reliability.analysis.coverage, 100.0);
    assert!(evaluation.stress_collapse.is_robust);

    let value = serde_json::to_value(&evaluation).unwrap();
    assert!(is_valid_feature_evaluation(&value));
}

#[test]
fn markdown_renders_every_dimension() {
    let evaluator = Evaluator::default();
    let evaluation = evaluator.evaluate(&panel_input());

    let markdown = feature_markdown(&evaluation);
    for heading in [
        "## Completeness",
        "## Code Quality",
        "## Documentation",
        "## Reliability",
        "## Performance",
        "## Integration",
        "## Maintenance",
        "## Stress Collapse",
    ] {
        assert!(markdown.contains(heading), "missing {heading}");
    }

    // Checkbox rendering for capabilities.
    assert!(markdown.contains("- [x] render"));
    assert!(markdown.contains("- [ ] collapse (incomplete)"));

    // Rendering is deterministic.
    assert_eq!(markdown, feature_markdown(&evaluation));
}

#[test]
fn custom_config_changes_banding() {
    let config = EvaluationConfig::from_toml_str(
        r#"
        [completeness]
        thresholds = [1.0, 80.0, 100.0]
        "#,
    )
    .unwrap();
    let evaluator = Evaluator::new(config);
    let evaluation = evaluator.evaluate(&panel_input());

    // 75% falls below the raised Full bar.
    assert_eq!(evaluation.completeness.percentage, 75);
    assert_eq!(evaluation.completeness.rating.label(), "Partial");
}
