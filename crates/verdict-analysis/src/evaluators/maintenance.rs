//! Maintenance: size, control-flow complexity, dependency spread, and
//! testability.

use serde::Serialize;

use verdict_core::config::MaintenanceConfig;
use verdict_core::rating::MAINTENANCE_SCALE;
use verdict_core::Rating;

use crate::analysis::ModularityAnalysis;

use super::AssessmentBuilder;

/// Maintenance evaluation output.
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceEvaluation {
    pub rating: Rating,
    pub score: f64,
    pub analysis: ModularityAnalysis,
    pub assessment: String,
}

/// Score how cheaply the unit can be changed and tested.
///
/// Sum of five tier scores: size (15/10/5/0), control-flow complexity
/// (15/10/5), dependency count (5/3/1), modification ease (30/18/5), and
/// testability (35/20/5).
pub fn evaluate_maintenance(
    analysis: ModularityAnalysis,
    config: &MaintenanceConfig,
) -> MaintenanceEvaluation {
    let score = (analysis.loc_points()
        + analysis.complexity_band.points()
        + analysis.dependency_points()
        + analysis.modification_ease.points()
        + analysis.testability.classification.points())
    .clamp(0.0, 100.0);
    let rating = Rating::from_score(&MAINTENANCE_SCALE, score, config.thresholds);

    let assessment = AssessmentBuilder::new()
        .clause(format!(
            "The unit spans {} code lines with a normalized control-flow complexity of {:.1} ({:?}).",
            analysis.loc, analysis.complexity_score, analysis.complexity_band
        ))
        .clause(format!(
            "A typical change impinges on about {} file(s); {}.",
            analysis.impacted_files,
            analysis.modification_ease.describe()
        ))
        .clause(format!(
            "The unit is {} (isolation {:.0}/40, mocking {:.0}/30, coupling {:.0}/30).",
            analysis.testability.classification.describe(),
            analysis.testability.isolation_score,
            analysis.testability.mocking_score,
            analysis.testability.coupling_score
        ))
        .clause_if(
            analysis.dependency_count > 6,
            format!("{} imports widen the blast radius of upstream changes.", analysis.dependency_count),
        )
        .clause(closing_remark(&rating))
        .build();

    MaintenanceEvaluation {
        rating,
        score,
        analysis,
        assessment,
    }
}

fn closing_remark(rating: &Rating) -> &'static str {
    match rating.index() {
        0 => "Expect every change here to cost more than it should.",
        1 => "Maintainable with care; the coupling and size tax each change.",
        2 => "Routine changes are cheap and local.",
        _ => "The unit is small, isolated, and effectively free to change.",
    }
}
