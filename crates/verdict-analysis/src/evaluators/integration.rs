//! Integration: configuration surface, toggles, extensibility, and
//! interactions.

use serde::Serialize;

use verdict_core::config::IntegrationConfig;
use verdict_core::rating::INTEGRATION_SCALE;
use verdict_core::Rating;

use crate::analysis::IntegrationAnalysis;

use super::{enumerate_names, AssessmentBuilder};

/// Integration evaluation output.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationEvaluation {
    pub rating: Rating,
    pub score: f64,
    pub analysis: IntegrationAnalysis,
    pub assessment: String,
}

/// Score how well the unit plugs into its surroundings.
///
/// `score = 30 * (present / total options, or a flat 15 points when none
/// are declared) + extensibility tier points + 20 * toggle capability +
/// interaction tier points`.
pub fn evaluate_integration(
    analysis: IntegrationAnalysis,
    config: &IntegrationConfig,
) -> IntegrationEvaluation {
    let option_points = if analysis.options.is_empty() {
        15.0
    } else {
        30.0 * analysis.present_option_count() as f64 / analysis.options.len() as f64
    };

    let score = (option_points
        + analysis.extensibility.points()
        + 20.0 * f64::from(analysis.toggle_capable)
        + analysis.interaction_points())
    .clamp(0.0, 100.0);
    let rating = Rating::from_score(&INTEGRATION_SCALE, score, config.thresholds);

    let interaction_names: Vec<&str> = analysis
        .interactions
        .iter()
        .map(|i| i.describe())
        .collect();

    let assessment = AssessmentBuilder::new()
        .clause(if analysis.options.is_empty() {
            "No configuration options are declared.".to_string()
        } else {
            format!(
                "{} of {} declared configuration options are wired up.",
                analysis.present_option_count(),
                analysis.options.len()
            )
        })
        .clause(format!(
            "Extensibility: {}.",
            analysis.extensibility.describe()
        ))
        .clause_if(
            analysis.toggle_capable,
            "The unit can be toggled on and off.",
        )
        .clause_if(
            !analysis.interactions.is_empty(),
            format!("The unit {}.", enumerate_names(&interaction_names)),
        )
        .clause_if(
            analysis.interactions.is_empty(),
            "No interactions with sibling features were observed.",
        )
        .clause(closing_remark(&rating))
        .build();

    IntegrationEvaluation {
        rating,
        score,
        analysis,
        assessment,
    }
}

fn closing_remark(rating: &Rating) -> &'static str {
    match rating.index() {
        0 => "Adopting the unit as-is means editing it.",
        1 => "The unit integrates, but callers will hit its hardcoded edges.",
        2 => "The unit composes cleanly with its surroundings.",
        _ => "The unit is configurable, toggleable, and extensible without edits.",
    }
}
