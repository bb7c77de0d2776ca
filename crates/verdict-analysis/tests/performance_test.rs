//! Performance tests: complexity classification, re-render anti-patterns,
//! and optimization recognition.

use verdict_analysis::analysis::{analyze_complexity, ComplexityClass};
use verdict_analysis::detectors::performance::{
    detect_concerns, detect_optimizations, detect_re_render_issues, find_loops,
};
use verdict_analysis::detectors::DetectionContext;
use verdict_analysis::evaluators::evaluate_performance;
use verdict_analysis::findings::Finding;
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

/// Build a function containing exactly one `k`-deep nested loop.
fn nested_loops(k: usize) -> String {
    let mut source = String::from("function run(items) {\n");
    for level in 0..k {
        source.push_str(&format!(
            "{}for (let i{level} = 0; i{level} < items.length; i{level}++) {{\n",
            "  ".repeat(level + 1)
        ));
    }
    source.push_str(&format!("{}work();\n", "  ".repeat(k + 1)));
    for level in (0..k).rev() {
        source.push_str(&format!("{}}}\n", "  ".repeat(level + 1)));
    }
    source.push_str("}\n");
    source
}

#[test]
fn complexity_tracks_loop_nesting() {
    let cases = [
        (0, ComplexityClass::Constant),
        (1, ComplexityClass::Linear),
        (2, ComplexityClass::Quadratic),
        (3, ComplexityClass::Cubic),
        (5, ComplexityClass::Cubic),
    ];
    for (k, expected) in cases {
        let source = nested_loops(k);
        with_context(&source, |ctx| {
            let analysis = analyze_complexity(ctx);
            assert_eq!(
                analysis.class, expected,
                "k = {k} should classify as {expected:?}"
            );
            assert_eq!(analysis.loop_count, k);
        });
    }
}

#[test]
fn iteration_calls_count_as_loops() {
    with_context("const rows = items.map(toRow);\n", |ctx| {
        let loops = find_loops(ctx);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].nesting, 1);
    });
}

#[test]
fn inline_literal_props_and_handlers_are_flagged() {
    let source = r#"function Panel({ items }) {
  return (
    <List
      style={{ margin: 0 }}
      onSelect={(id) => select(id)}
      rows={items}
    />
  );
}
"#;
    with_context(source, |ctx| {
        let findings = detect_re_render_issues(ctx);
        let ids: Vec<&str> = findings
            .iter()
            .filter_map(|f| match f {
                Finding::Concern(c) => Some(c.id.as_str()),
                _ => None,
            })
            .collect();
        assert!(ids.contains(&"perf-rerender-inline-literal"), "ids: {ids:?}");
        assert!(ids.contains(&"perf-rerender-inline-handler"), "ids: {ids:?}");
    });
}

#[test]
fn effect_with_side_effects_and_no_rate_limit_is_flagged() {
    let source = r#"useEffect(() => {
  fetch(buildUrl(query)).then(setResults);
}, [query]);
"#;
    with_context(source, |ctx| {
        let findings = detect_re_render_issues(ctx);
        assert!(findings.iter().any(|f| matches!(
            f,
            Finding::Concern(c) if c.id == "perf-rerender-effect-side-effect"
        )));
    });
}

#[test]
fn debounced_effect_passes() {
    let source = r#"useEffect(() => {
  const run = debounce(() => fetch(buildUrl(query)), 300);
  run();
}, [query]);
"#;
    with_context(source, |ctx| {
        let findings = detect_re_render_issues(ctx);
        assert!(!findings.iter().any(|f| matches!(
            f,
            Finding::Concern(c) if c.id == "perf-rerender-effect-side-effect"
        )));
    });
}

#[test]
fn optimizations_are_recognized_once_each() {
    let source = r#"const rows = useMemo(() => items.map(toRow), [items]);
const onSelect = useCallback((id) => select(id), []);
const search = debounce(runSearch, 250);
const other = useMemo(() => a + b, [a, b]);
"#;
    with_context(source, |ctx| {
        let findings = detect_optimizations(ctx);
        let techniques: Vec<String> = findings
            .iter()
            .filter_map(|f| match f {
                Finding::Optimization(o) => Some(o.technique.clone()),
                _ => None,
            })
            .collect();
        assert!(techniques.contains(&"memoized value".to_string()));
        assert!(techniques.contains(&"memoized callback".to_string()));
        assert!(techniques.contains(&"debouncing".to_string()));
        // Two useMemo calls still yield one "memoized value" finding.
        assert_eq!(
            techniques.iter().filter(|t| t.as_str() == "memoized value").count(),
            1
        );
    });
}

#[test]
fn expensive_work_inside_a_loop_is_a_concern() {
    let source = r#"for (const row of rows) {
  const parsed = JSON.parse(row.payload);
  out.push(parsed);
}
"#;
    with_context(source, |ctx| {
        let findings = detect_concerns(ctx);
        assert!(findings.iter().any(|f| matches!(
            f,
            Finding::Concern(c) if c.id == "perf-expensive-in-loop"
        )));
    });
}

#[test]
fn evaluator_penalizes_quadratic_work() {
    let source = nested_loops(2);
    with_context(&source, |ctx| {
        let complexity = analyze_complexity(ctx);
        let config = EvaluationConfig::default();
        let eval = evaluate_performance(complexity, Vec::new(), Vec::new(), &config.performance);

        // 100 - 20 for O(n^2).
        assert_eq!(eval.score, 80.0);
        assert_eq!(eval.rating.label(), "Good");
        assert!(eval.assessment.contains("O(n^2)"));
    });
}

#[test]
fn clean_unit_scores_excellent() {
    with_context("function add(a, b) {\n  return a + b;\n}\n", |ctx| {
        let complexity = analyze_complexity(ctx);
        let config = EvaluationConfig::default();
        let eval = evaluate_performance(complexity, Vec::new(), Vec::new(), &config.performance);

        assert_eq!(eval.score, 100.0);
        assert_eq!(eval.rating.label(), "Excellent");
    });
}
