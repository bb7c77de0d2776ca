//! Stress collapse: predicted degradation scenarios under scale.

use serde::Serialize;

use verdict_core::rating::STRESS_COLLAPSE_SCALE;
use verdict_core::Rating;

use crate::detectors::stress::RobustSignature;
use crate::findings::StressCollapseCondition;

use super::AssessmentBuilder;

/// Reason reported when neither stress patterns nor a robust signature
/// matched.
pub const NO_SCENARIO_REASON: &str =
    "no collapse scenarios identified in the unit's structure";

/// Stress collapse evaluation output.
#[derive(Debug, Clone, Serialize)]
pub struct StressCollapseEvaluation {
    pub rating: Rating,
    pub is_robust: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robust_reason: Option<String>,
    pub conditions: Vec<StressCollapseCondition>,
    pub assessment: String,
}

/// Turn detected stress conditions (and, when none exist, the robust
/// signature) into the evaluation.
///
/// The rating is a deterministic function of the condition count:
/// 0 is Robust, 1 Stable, 2 Strained, and 3 or more Fragile.
pub fn evaluate_stress_collapse(
    conditions: Vec<StressCollapseCondition>,
    signature: Option<RobustSignature>,
) -> StressCollapseEvaluation {
    let is_robust = conditions.is_empty();
    let robust_reason = if is_robust {
        Some(
            signature
                .map(|s| s.reason().to_string())
                .unwrap_or_else(|| NO_SCENARIO_REASON.to_string()),
        )
    } else {
        None
    };

    let rating_index = match conditions.len() {
        0 => 3,
        1 => 2,
        2 => 1,
        _ => 0,
    };
    let rating = Rating::new(&STRESS_COLLAPSE_SCALE, rating_index);

    let assessment = if let Some(reason) = &robust_reason {
        AssessmentBuilder::new()
            .clause(format!("The unit is robust under stress: {reason}."))
            .build()
    } else {
        let mut builder = AssessmentBuilder::new().clause(format!(
            "{} collapse scenario(s) were identified.",
            conditions.len()
        ));
        for condition in &conditions {
            builder = builder.clause(format!(
                "At {}, expect: {}.",
                condition.threshold, condition.expected_behavior
            ));
        }
        builder.clause(closing_remark(&rating)).build()
    };

    StressCollapseEvaluation {
        rating,
        is_robust,
        robust_reason,
        conditions,
        assessment,
    }
}

fn closing_remark(rating: &Rating) -> &'static str {
    match rating.index() {
        0 => "Under real load this unit is the first thing that breaks.",
        1 => "The unit holds at moderate scale but has clear breaking points.",
        _ => "One bounded scenario stands between this unit and clean scaling.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_conditions_no_signature_is_generic_robust() {
        let eval = evaluate_stress_collapse(Vec::new(), None);
        assert!(eval.is_robust);
        assert_eq!(eval.rating.label(), "Robust");
        assert_eq!(eval.robust_reason.as_deref(), Some(NO_SCENARIO_REASON));
    }

    #[test]
    fn signature_reason_is_used() {
        let eval = evaluate_stress_collapse(Vec::new(), Some(RobustSignature::BooleanToggle));
        assert!(eval.is_robust);
        let reason = eval.robust_reason.unwrap();
        assert!(reason.contains("simple boolean toggle"));
    }
}
