//! Performance: algorithmic complexity, re-render behavior, and
//! optimizations.

use serde::Serialize;

use verdict_core::config::PerformanceConfig;
use verdict_core::rating::PERFORMANCE_SCALE;
use verdict_core::Rating;

use crate::analysis::ComplexityAnalysis;
use crate::findings::{OptimizationFound, PerformanceConcern};

use super::{enumerate_names, AssessmentBuilder};

/// Id prefix separating re-render findings from the general concern pool.
pub const RE_RENDER_PREFIX: &str = "perf-rerender-";

/// Performance evaluation output.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceEvaluation {
    pub rating: Rating,
    pub score: f64,
    pub complexity: ComplexityAnalysis,
    pub concerns: Vec<PerformanceConcern>,
    pub re_render_issues: Vec<PerformanceConcern>,
    pub optimizations: Vec<OptimizationFound>,
    pub assessment: String,
}

/// Score the unit's performance posture.
///
/// Score starts at 100: each concern subtracts 25/15/10 by its severity
/// keyword, the complexity class subtracts 30 (cubic) or 20 (quadratic),
/// each re-render issue subtracts 10, and each recognized optimization
/// adds 5; the result is clamped to [0, 100].
pub fn evaluate_performance(
    complexity: ComplexityAnalysis,
    mut all_concerns: Vec<PerformanceConcern>,
    optimizations: Vec<OptimizationFound>,
    config: &PerformanceConfig,
) -> PerformanceEvaluation {
    let re_render_issues: Vec<PerformanceConcern> = {
        let mut re_render = Vec::new();
        all_concerns.retain(|c| {
            if c.id.starts_with(RE_RENDER_PREFIX) {
                re_render.push(c.clone());
                false
            } else {
                true
            }
        });
        re_render
    };
    let concerns = all_concerns;

    let concern_penalty: f64 = concerns.iter().map(|c| c.severity_penalty()).sum();
    let score = (100.0
        - concern_penalty
        - complexity.class.penalty()
        - 10.0 * re_render_issues.len() as f64
        + 5.0 * optimizations.len() as f64)
        .clamp(0.0, 100.0);
    let rating = Rating::from_score(&PERFORMANCE_SCALE, score, config.thresholds);

    let optimization_names: Vec<&str> =
        optimizations.iter().map(|o| o.technique.as_str()).collect();

    let assessment = AssessmentBuilder::new()
        .clause(format!(
            "Estimated algorithmic complexity is {} ({} loop(s), maximum nesting {}).",
            complexity.class.notation(),
            complexity.loop_count,
            complexity.max_nesting
        ))
        .clause_if(
            !concerns.is_empty(),
            format!("{} performance concern(s) were flagged.", concerns.len()),
        )
        .clause_if(
            !re_render_issues.is_empty(),
            format!(
                "{} re-render trigger(s) will cause avoidable work.",
                re_render_issues.len()
            ),
        )
        .clause_if(
            !optimizations.is_empty(),
            format!(
                "Recognized optimizations: {}.",
                enumerate_names(&optimization_names)
            ),
        )
        .clause(closing_remark(&rating))
        .build();

    PerformanceEvaluation {
        rating,
        score,
        complexity,
        concerns,
        re_render_issues,
        optimizations,
        assessment,
    }
}

fn closing_remark(rating: &Rating) -> &'static str {
    match rating.index() {
        0 => "The unit will degrade visibly under any realistic load.",
        1 => "Acceptable for small inputs, but the flagged costs grow with the data.",
        2 => "Performance is solid; the remaining costs are marginal.",
        _ => "The unit is tuned; costs are bounded and the hot paths are cached.",
    }
}
