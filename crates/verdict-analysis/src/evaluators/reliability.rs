//! Reliability: error-handling coverage over risky operations.

use serde::Serialize;

use verdict_core::config::ReliabilityConfig;
use verdict_core::rating::RELIABILITY_SCALE;
use verdict_core::Rating;

use crate::analysis::ReliabilityAnalysis;
use crate::findings::RiskLevel;

use super::AssessmentBuilder;

/// Reliability evaluation output.
#[derive(Debug, Clone, Serialize)]
pub struct ReliabilityEvaluation {
    pub rating: Rating,
    pub score: f64,
    pub analysis: ReliabilityAnalysis,
    pub assessment: String,
}

/// Score the unit's failure handling.
///
/// `score = coverage + 5 * input_validation + 5 * null_checks + 5 *
/// type_guards + 10 * edge_case_ratio - 10 * high_risk_gaps`, clamped to
/// [0, 100].
pub fn evaluate_reliability(
    analysis: ReliabilityAnalysis,
    config: &ReliabilityConfig,
) -> ReliabilityEvaluation {
    let high_gaps = analysis.high_risk_gap_count();

    let score = (analysis.coverage
        + 5.0 * f64::from(analysis.has_input_validation)
        + 5.0 * f64::from(analysis.has_null_checks)
        + 5.0 * f64::from(analysis.has_type_guards)
        + 10.0 * analysis.edge_case_ratio
        - 10.0 * high_gaps as f64)
        .clamp(0.0, 100.0);
    let rating = Rating::from_score(&RELIABILITY_SCALE, score, config.thresholds);

    let gap_summary = summarize_gaps(&analysis);

    let assessment = AssessmentBuilder::new()
        .clause(if analysis.risky_operation_count == 0 {
            "No risky operations were detected; coverage is 100% by convention.".to_string()
        } else {
            format!(
                "{} of {} risky operations are covered by error handling ({:.0}%).",
                analysis.handled_count, analysis.risky_operation_count, analysis.coverage
            )
        })
        .clause_if(
            !analysis.instances.is_empty(),
            format!(
                "{} error-handling construct(s) are in place.",
                analysis.instances.len()
            ),
        )
        .clause(gap_summary)
        .clause_if(
            analysis.has_input_validation,
            "Inputs are validated before use.",
        )
        .clause_if(
            !analysis.has_null_checks,
            "No null or absent-value checks were found.",
        )
        .clause(closing_remark(&rating))
        .build();

    ReliabilityEvaluation {
        rating,
        score,
        analysis,
        assessment,
    }
}

fn summarize_gaps(analysis: &ReliabilityAnalysis) -> String {
    if analysis.gaps.is_empty() {
        return String::new();
    }
    let high = analysis.high_risk_gap_count();
    let medium = analysis
        .gaps
        .iter()
        .filter(|g| g.risk == RiskLevel::Medium)
        .count();
    let low = analysis.gaps.len() - high - medium;
    format!(
        "{} unhandled gap(s) remain ({} high, {} medium, {} low risk).",
        analysis.gaps.len(),
        high,
        medium,
        low
    )
}

fn closing_remark(rating: &Rating) -> &'static str {
    match rating.index() {
        0 => "A single failed call can take the whole unit down.",
        1 => "Failures are handled in places, but the gaps dominate the risk.",
        2 => "Failure paths are handled along the main routes.",
        _ => "Failure handling is systematic across every risky operation.",
    }
}
