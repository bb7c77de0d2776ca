//! Detector tests: registry behavior and the code-quality detector family
//! on fixed fixtures.

use verdict_analysis::detectors::quality::{
    detect_deep_property_chains, detect_duplication, detect_excessive_nesting,
    detect_good_practices, detect_magic_literals, detect_tight_coupling, ANTI_PATTERN_TEMPLATES,
};
use verdict_analysis::detectors::registry::create_default_registry;
use verdict_analysis::detectors::DetectionContext;
use verdict_analysis::findings::Finding;
use verdict_analysis::{EvidenceCollector, SourceUnit};
use verdict_core::{Dimension, EvaluationConfig};

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

fn anti_pattern_names(findings: &[Finding]) -> Vec<String> {
    findings
        .iter()
        .filter_map(|f| match f {
            Finding::AntiPattern(a) => Some(a.name.clone()),
            _ => None,
        })
        .collect()
}

// ---- Registry ----

#[test]
fn registry_filters_by_dimension() {
    let source = "const x = data.user.profile.address.street;\n";
    with_context(source, |ctx| {
        let registry = create_default_registry();

        let quality = registry.run_dimension(Dimension::CodeQuality, ctx);
        assert!(!quality.is_empty(), "deep chain should fire a quality finding");

        // Completeness consumes no registered detectors.
        let completeness = registry.run_dimension(Dimension::Completeness, ctx);
        assert!(completeness.is_empty());
    });
}

#[test]
fn disabled_detector_stays_silent() {
    let source = "const x = data.user.profile.address.street;\n";
    with_context(source, |ctx| {
        let mut registry = create_default_registry();
        registry.disable("quality-deep-property-chain");
        let findings = registry.run_dimension(Dimension::CodeQuality, ctx);
        assert!(anti_pattern_names(&findings)
            .iter()
            .all(|n| n != "Deep property chain"));
    });
}

// ---- Excessive nesting ----

#[test]
fn deep_nesting_yields_one_finding_per_region() {
    let source = r#"
function f(a, b, c, d) {
  if (a) {
    if (b) {
      if (c) {
        if (d) {
          work();
        }
      }
    }
  }
}
"#;
    with_context(source, |ctx| {
        let findings = detect_excessive_nesting(ctx);
        assert_eq!(findings.len(), 1, "one contiguous deep region expected");
        match &findings[0] {
            Finding::AntiPattern(ap) => {
                assert_eq!(ap.name, "Excessive nesting");
                assert!(ap.issue.contains("depth reaches 5"));
                assert!(!ap.exemplar.is_empty());
            }
            other => panic!("expected anti-pattern, got {other:?}"),
        }
    });
}

#[test]
fn shallow_code_has_no_nesting_findings() {
    let source = "function f(a) {\n  if (a) {\n    return 1;\n  }\n  return 2;\n}\n";
    with_context(source, |ctx| {
        assert!(detect_excessive_nesting(ctx).is_empty());
    });
}

// ---- Deep property chains ----

#[test]
fn five_segment_chain_is_flagged() {
    with_context("const s = data.user.profile.address.street;\n", |ctx| {
        let findings = detect_deep_property_chains(ctx);
        assert_eq!(findings.len(), 1);
    });
}

#[test]
fn short_chains_and_imports_are_ignored() {
    let source = "import a.b.c.d.e;\nconst x = user.address.street;\n";
    with_context(source, |ctx| {
        assert!(detect_deep_property_chains(ctx).is_empty());
    });
}

// ---- Magic literals ----

#[test]
fn bare_number_is_flagged_but_constant_declaration_is_not() {
    let source = "const MAX_RETRIES = 42;\nif (attempts > 42) {\n  giveUp();\n}\n";
    with_context(source, |ctx| {
        let findings = detect_magic_literals(ctx);
        assert_eq!(findings.len(), 1);
        match &findings[0] {
            Finding::AntiPattern(ap) => {
                assert!(ap.issue.contains("`42`"));
                assert_eq!(ap.evidence.line_range.start, 2);
            }
            other => panic!("expected anti-pattern, got {other:?}"),
        }
    });
}

#[test]
fn allowed_numbers_pass() {
    with_context("if (items.length > 0) {\n  return items[0];\n}\n", |ctx| {
        assert!(detect_magic_literals(ctx).is_empty());
    });
}

#[test]
fn compared_string_is_flagged() {
    with_context("if (status === \"pending-review\") {\n  wait();\n}\n", |ctx| {
        let findings = detect_magic_literals(ctx);
        assert_eq!(findings.len(), 1);
    });
}

// ---- Duplication ----

#[test]
fn near_identical_blocks_are_flagged() {
    let source = r#"function first(list) {
  const result = list.filter(isActive);
  return result.map(toRow);
}

function second(list) {
  const result = list.filter(isActive);
  return result.map(toRow);
}
"#;
    with_context(source, |ctx| {
        let findings = detect_duplication(ctx);
        assert_eq!(findings.len(), 1);
        match &findings[0] {
            Finding::AntiPattern(ap) => assert!(ap.issue.contains("similar")),
            other => panic!("expected anti-pattern, got {other:?}"),
        }
    });
}

#[test]
fn unrelated_blocks_pass() {
    let source = r#"function parseHeader(bytes) {
  const magic = bytes.slice(1, 2);
  return checkMagic(magic);
}

function renderFooter(year) {
  const label = buildCopyright(year);
  return wrapFooter(label);
}
"#;
    with_context(source, |ctx| {
        assert!(detect_duplication(ctx).is_empty());
    });
}

// ---- Tight coupling ----

#[test]
fn direct_instantiation_and_global_access_are_flagged() {
    let source = "const svc = new UserService();\nwindow.location.reload();\n";
    with_context(source, |ctx| {
        let findings = detect_tight_coupling(ctx);
        assert_eq!(findings.len(), 2);
    });
}

#[test]
fn builtin_constructors_pass() {
    let source = "const seen = new Set();\nconst when = new Date();\n";
    with_context(source, |ctx| {
        assert!(detect_tight_coupling(ctx).is_empty());
    });
}

// ---- Good practices ----

#[test]
fn practices_are_reported_once_per_kind() {
    let source = r#"const MAX_BATCH = 100;
function process(items) {
  if (!items) return [];
  if (!items.length) return [];
  return items.map(toRow);
}
"#;
    with_context(source, |ctx| {
        let findings = detect_good_practices(ctx);
        let names: Vec<String> = findings
            .iter()
            .filter_map(|f| match f {
                Finding::GoodPractice(g) => Some(g.name.clone()),
                _ => None,
            })
            .collect();
        // Guard clauses fire twice but are reported once.
        assert_eq!(
            names.iter().filter(|n| n.as_str() == "Guard clauses").count(),
            1
        );
        assert!(names.iter().any(|n| n == "Named constants"));
    });
}

// ---- Template table ----

#[test]
fn every_template_has_remediation_and_exemplar() {
    for template in &ANTI_PATTERN_TEMPLATES {
        assert!(!template.issue.is_empty());
        assert!(!template.impact.is_empty());
        assert!(!template.better_approach.is_empty());
        assert!(!template.exemplar.is_empty(), "{} lacks an exemplar", template.id);
    }
}
