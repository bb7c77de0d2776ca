//! Completeness: weighted capability coverage against the declared list.

use serde::Serialize;

use verdict_core::config::CompletenessConfig;
use verdict_core::rating::COMPLETENESS_SCALE;
use verdict_core::Rating;

use crate::feature::{AtomicFeature, CapabilityAnalysisResult, CapabilityStatus};

use super::{enumerate_names, AssessmentBuilder};

/// Completeness evaluation output.
#[derive(Debug, Clone, Serialize)]
pub struct CompletenessEvaluation {
    pub rating: Rating,
    /// Weighted coverage percentage, rounded and clamped to [0, 100].
    pub percentage: u32,
    pub implemented: Vec<String>,
    pub incomplete: Vec<String>,
    pub missing: Vec<String>,
    pub assessment: String,
}

/// Score the feature's capability coverage.
///
/// `percentage = 100 * (implemented_weight + 0.5 * incomplete_weight) /
/// total_weight`, rounded and clamped; an empty capability list (or zero
/// total weight) scores 0.
pub fn evaluate_completeness(
    feature: &AtomicFeature,
    results: &[CapabilityAnalysisResult],
    config: &CompletenessConfig,
) -> CompletenessEvaluation {
    let total_weight: f64 = results
        .iter()
        .map(|r| r.capability.effective_weight())
        .sum();

    let weight_with = |status: CapabilityStatus| -> f64 {
        results
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.capability.effective_weight())
            .sum()
    };

    let percentage = if results.is_empty() || total_weight <= 0.0 {
        0
    } else {
        let implemented = weight_with(CapabilityStatus::Implemented);
        let incomplete = weight_with(CapabilityStatus::Incomplete);
        let raw = 100.0 * (implemented + 0.5 * incomplete) / total_weight;
        raw.round().clamp(0.0, 100.0) as u32
    };

    let rating = Rating::from_score(&COMPLETENESS_SCALE, percentage as f64, config.thresholds);

    let names_with = |status: CapabilityStatus| -> Vec<String> {
        results
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.capability.name.clone())
            .collect()
    };
    let implemented = names_with(CapabilityStatus::Implemented);
    let incomplete = names_with(CapabilityStatus::Incomplete);
    let missing = names_with(CapabilityStatus::Missing);

    let missing_required: Vec<&String> = results
        .iter()
        .filter(|r| r.status == CapabilityStatus::Missing && r.capability.required)
        .map(|r| &r.capability.name)
        .collect();

    let assessment = AssessmentBuilder::new()
        .clause(format!(
            "Capability coverage for \"{}\" is {}% ({} of {} capabilities implemented).",
            feature.name,
            percentage,
            implemented.len(),
            results.len()
        ))
        .clause_if(
            !implemented.is_empty(),
            format!("Implemented: {}.", enumerate_names(&implemented)),
        )
        .clause_if(
            !incomplete.is_empty(),
            format!("Partially implemented: {}.", enumerate_names(&incomplete)),
        )
        .clause_if(
            !missing.is_empty(),
            format!("Missing: {}.", enumerate_names(&missing)),
        )
        .clause_if(
            !missing_required.is_empty(),
            format!(
                "Required capability {} has no implementation.",
                enumerate_names(&missing_required)
            ),
        )
        .clause(closing_remark(&rating))
        .build();

    CompletenessEvaluation {
        rating,
        percentage,
        implemented,
        incomplete,
        missing,
        assessment,
    }
}

fn closing_remark(rating: &Rating) -> &'static str {
    match rating.index() {
        0 => "No expected capability is usable yet.",
        1 => "Core pieces exist, but the unit falls short of its declared surface.",
        2 => "The declared capability surface is substantially covered.",
        _ => "Every declared capability is implemented; coverage is complete.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Capability;

    fn feature() -> AtomicFeature {
        AtomicFeature {
            name: "search".into(),
            description: String::new(),
            capabilities: Vec::new(),
        }
    }

    fn result(name: &str, status: CapabilityStatus) -> CapabilityAnalysisResult {
        CapabilityAnalysisResult::new(Capability::new(name), status)
    }

    #[test]
    fn one_implemented_one_missing_is_half() {
        let results = vec![
            CapabilityAnalysisResult::new(Capability::required("A"), CapabilityStatus::Implemented),
            result("B", CapabilityStatus::Missing),
        ];
        let eval = evaluate_completeness(&feature(), &results, &CompletenessConfig::default());

        assert_eq!(eval.percentage, 50);
        assert_eq!(eval.rating.label(), "Full");
        assert_eq!(eval.implemented, vec!["A".to_string()]);
        assert_eq!(eval.missing, vec!["B".to_string()]);
    }

    #[test]
    fn empty_list_scores_zero() {
        let eval = evaluate_completeness(&feature(), &[], &CompletenessConfig::default());
        assert_eq!(eval.percentage, 0);
        assert_eq!(eval.rating.label(), "Not Implemented");
    }

    #[test]
    fn incomplete_counts_half() {
        let results = vec![
            result("A", CapabilityStatus::Incomplete),
            result("B", CapabilityStatus::Incomplete),
        ];
        let eval = evaluate_completeness(&feature(), &results, &CompletenessConfig::default());
        assert_eq!(eval.percentage, 50);
    }

    #[test]
    fn full_coverage_is_enterprise() {
        let results = vec![result("A", CapabilityStatus::Implemented)];
        let eval = evaluate_completeness(&feature(), &results, &CompletenessConfig::default());
        assert_eq!(eval.percentage, 100);
        assert_eq!(eval.rating.label(), "Enterprise-Level");
    }

    #[test]
    fn weights_shift_the_score() {
        let mut heavy = Capability::new("A");
        heavy.weight = 3.0;
        let results = vec![
            CapabilityAnalysisResult::new(heavy, CapabilityStatus::Implemented),
            result("B", CapabilityStatus::Missing),
        ];
        let eval = evaluate_completeness(&feature(), &results, &CompletenessConfig::default());
        assert_eq!(eval.percentage, 75);
    }

    #[test]
    fn missing_required_is_named_in_assessment() {
        let results = vec![
            CapabilityAnalysisResult::new(Capability::required("persist"), CapabilityStatus::Missing),
            result("render", CapabilityStatus::Implemented),
        ];
        let eval = evaluate_completeness(&feature(), &results, &CompletenessConfig::default());
        assert!(eval.assessment.contains("Required capability persist"));
    }
}
