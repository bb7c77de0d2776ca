//! Property tests for the engine's documented invariants.

use proptest::prelude::*;

use verdict_analysis::engine::{EvaluationInput, Evaluator};
use verdict_analysis::evaluators::evaluate_completeness;
use verdict_analysis::feature::{
    AtomicFeature, Capability, CapabilityAnalysisResult, CapabilityStatus,
};
use verdict_analysis::validation::is_valid_feature_evaluation;
use verdict_analysis::EvidenceCollector;
use verdict_core::band_score;
use verdict_core::config::CompletenessConfig;

fn feature() -> AtomicFeature {
    AtomicFeature {
        name: "unit".into(),
        description: String::new(),
        capabilities: Vec::new(),
    }
}

fn status_strategy() -> impl Strategy<Value = CapabilityStatus> {
    prop_oneof![
        Just(CapabilityStatus::Implemented),
        Just(CapabilityStatus::Incomplete),
        Just(CapabilityStatus::Missing),
    ]
}

fn results_strategy() -> impl Strategy<Value = Vec<CapabilityAnalysisResult>> {
    prop::collection::vec(
        (status_strategy(), 0.0f64..10.0).prop_map(|(status, weight)| {
            let mut capability = Capability::new("cap");
            capability.weight = weight;
            CapabilityAnalysisResult::new(capability, status)
        }),
        0..12,
    )
}

proptest! {
    // Snippet bounds: line count within limits, range clamped into the
    // source.
    #[test]
    fn extract_respects_bounds(
        lines in prop::collection::vec("[a-z ]{0,20}", 1..80),
        a in 1u32..100,
        span in 0u32..120,
    ) {
        let source = lines.join("\n");
        let line_count = source.lines().count() as u32;
        prop_assume!(line_count > 0);
        let b = a + span;

        let collector = EvidenceCollector::default();
        let evidence = collector.extract(&source, "x.ts", a, b, None);

        let snippet_lines = evidence.snippet.lines().count() as u32;
        prop_assert!(snippet_lines <= (b - a + 1).min(50));
        prop_assert!(evidence.line_range.start >= 1);
        prop_assert!(evidence.line_range.start <= evidence.line_range.end);
        prop_assert!(evidence.line_range.end <= line_count.max(1));
    }

    // Completeness percentage stays in [0, 100] and its rating is
    // monotonically non-decreasing in the percentage.
    #[test]
    fn completeness_percentage_is_bounded_and_monotone(results in results_strategy()) {
        let config = CompletenessConfig::default();
        let eval = evaluate_completeness(&feature(), &results, &config);
        prop_assert!(eval.percentage <= 100);

        // Upgrading any missing capability to implemented never lowers
        // the rating.
        if let Some(position) = results
            .iter()
            .position(|r| r.status == CapabilityStatus::Missing)
        {
            let mut upgraded = results.clone();
            upgraded[position].status = CapabilityStatus::Implemented;
            let upgraded_eval = evaluate_completeness(&feature(), &upgraded, &config);
            prop_assert!(upgraded_eval.percentage >= eval.percentage);
            prop_assert!(upgraded_eval.rating.index() >= eval.rating.index());
        }
    }

    // The shared banding utility is monotone in the score.
    #[test]
    fn band_score_is_monotone(s1 in 0.0f64..150.0, s2 in 0.0f64..150.0) {
        let thresholds = [30.0, 60.0, 85.0];
        let (low, high) = if s1 <= s2 { (s1, s2) } else { (s2, s1) };
        prop_assert!(band_score(low, thresholds) <= band_score(high, thresholds));
    }

    // The engine never fails on arbitrary source text, and re-running it
    // on the same input yields byte-identical output.
    #[test]
    fn engine_is_total_and_idempotent(source in "\\PC{0,400}") {
        let evaluator = Evaluator::default();
        let input = EvaluationInput {
            atomic_feature: feature(),
            source_code: source,
            file_path: "fuzz.ts".into(),
            capability_analysis: Vec::new(),
            related_files: Vec::new(),
        };

        let first = evaluator.evaluate(&input);
        let second = evaluator.evaluate(&input);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        prop_assert_eq!(&first_json, &second_json);

        let value = serde_json::to_value(&first).unwrap();
        prop_assert!(is_valid_feature_evaluation(&value));
    }
}
