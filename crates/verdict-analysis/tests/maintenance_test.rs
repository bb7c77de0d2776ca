//! Maintenance tests: modularity metrics, modification ease, and
//! testability bands.

use verdict_analysis::analysis::{
    analyze_modularity, ComplexityBand, ModificationEase, Testability,
};
use verdict_analysis::detectors::DetectionContext;
use verdict_analysis::evaluators::evaluate_maintenance;
use verdict_analysis::{EvidenceCollector, SourceUnit};
use verdict_core::EvaluationConfig;

fn with_context<R>(source: &str, f: impl FnOnce(&DetectionContext<'_>) -> R) -> R {
    let unit = SourceUnit::new(source, "test.ts");
    let config = EvaluationConfig::default();
    let collector = EvidenceCollector::new(&config.evidence);
    let ctx = DetectionContext {
        unit: &unit,
        config: &config,
        evidence: &collector,
    };
    f(&ctx)
}

#[test]
fn small_pure_function_scores_the_maximum() {
    let source = "function add(a, b) {\n  return a + b;\n}\n";
    with_context(source, |ctx| {
        let analysis = analyze_modularity(ctx);
        assert_eq!(analysis.loc, 3);
        assert_eq!(analysis.complexity_band, ComplexityBand::Low);
        assert_eq!(analysis.dependency_count, 0);
        assert_eq!(analysis.modification_ease, ModificationEase::SingleFile);
        assert_eq!(analysis.testability.classification, Testability::Isolated);

        let config = EvaluationConfig::default();
        let eval = evaluate_maintenance(analysis, &config.maintenance);
        // 15 + 15 + 5 + 30 + 35.
        assert_eq!(eval.score, 100.0);
        assert_eq!(eval.rating.label(), "Enterprise-Level");
    });
}

#[test]
fn import_fan_out_widens_the_blast_radius() {
    let source = r#"import a from './a';
import b from './b';
import c from './c';
import d from './d';

export function wire() {
  return a(b(c(d())));
}
"#;
    with_context(source, |ctx| {
        let analysis = analyze_modularity(ctx);
        assert_eq!(analysis.dependency_count, 4);
        // Own file + 4 relative imports + 1 exported symbol.
        assert_eq!(analysis.impacted_files, 6);
        assert_eq!(analysis.modification_ease, ModificationEase::ManyFiles);
    });
}

#[test]
fn global_and_network_access_hurt_testability() {
    let source = r#"export function track(event) {
  window.analytics.push(event);
  document.title = event.name;
  setInterval(() => flush(), 1000);
  return fetch("/collect", { method: "POST" });
}
"#;
    with_context(source, |ctx| {
        let analysis = analyze_modularity(ctx);
        assert!(analysis.testability.isolation_score < 40.0);
        assert!(analysis.testability.mocking_score < 30.0);
        assert_eq!(
            analysis.testability.classification,
            Testability::RequiresMocking
        );
    });
}

#[test]
fn control_flow_density_raises_the_complexity_band() {
    let source = r#"function route(kind, a, b) {
  if (kind === 1) { return a ? b : null; }
  if (kind === 2) { for (let i = 0; i < a; i++) { step(i); } }
  if (kind === 3) { while (a > b) { a -= 1; } }
  switch (kind) {
    default: return null;
  }
}
"#;
    with_context(source, |ctx| {
        let analysis = analyze_modularity(ctx);
        assert_ne!(analysis.complexity_band, ComplexityBand::Low);
    });
}

#[test]
fn loc_tiers_step_down() {
    let body = "  call();\n".repeat(150);
    let source = format!("function bulk() {{\n{body}}}\n");
    with_context(&source, |ctx| {
        let analysis = analyze_modularity(ctx);
        assert_eq!(analysis.loc, 152);
        assert_eq!(analysis.loc_points(), 10.0);
    });
}
