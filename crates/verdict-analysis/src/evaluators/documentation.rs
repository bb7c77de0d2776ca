//! Documentation: coverage ratios and documentation extras.

use serde::Serialize;

use verdict_core::config::DocumentationConfig;
use verdict_core::rating::DOCUMENTATION_SCALE;
use verdict_core::Rating;

use crate::analysis::DocumentationAnalysis;

use super::AssessmentBuilder;

/// Documentation evaluation output.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentationEvaluation {
    pub rating: Rating,
    pub score: f64,
    pub analysis: DocumentationAnalysis,
    pub assessment: String,
}

/// Score the unit's documentation.
///
/// `score = 0.4 * doc% + 20 * has_inline_comments + 20 * (self-doc ratio
/// at or above the configured bar) + 10 * has_usage_example + 10 *
/// has_edge_case_docs`.
pub fn evaluate_documentation(
    analysis: DocumentationAnalysis,
    config: &DocumentationConfig,
) -> DocumentationEvaluation {
    let self_doc_bonus = analysis.self_doc_name_ratio >= config.self_doc_ratio;

    let score = 0.4 * analysis.doc_coverage
        + 20.0 * f64::from(analysis.has_inline_comments)
        + 20.0 * f64::from(self_doc_bonus)
        + 10.0 * f64::from(analysis.has_usage_example)
        + 10.0 * f64::from(analysis.has_edge_case_docs);
    let score = score.clamp(0.0, 100.0);
    let rating = Rating::from_score(&DOCUMENTATION_SCALE, score, config.thresholds);

    let assessment = AssessmentBuilder::new()
        .clause(format!(
            "{} of {} declarations carry a doc comment ({:.0}% coverage).",
            analysis.documented_count, analysis.declaration_count, analysis.doc_coverage
        ))
        .clause_if(
            analysis.complex_construct_count > 0,
            format!(
                "{} of {} complex constructs are commented.",
                analysis.commented_complex_count, analysis.complex_construct_count
            ),
        )
        .clause(format!(
            "{:.0}% of declared names are self-documenting (verb-prefix or length heuristic).",
            analysis.self_doc_name_ratio * 100.0
        ))
        .clause_if(
            analysis.has_usage_example,
            "A usage example is present in the comments.",
        )
        .clause_if(
            analysis.has_edge_case_docs,
            "Edge-case behavior is documented.",
        )
        .clause(closing_remark(&rating))
        .build();

    DocumentationEvaluation {
        rating,
        score,
        analysis,
        assessment,
    }
}

fn closing_remark(rating: &Rating) -> &'static str {
    match rating.index() {
        0 => "A reader has nothing but the code itself to go on.",
        1 => "Sparse notes exist, but most of the unit must be reverse-engineered.",
        2 => "The documentation carries a reader through the common paths.",
        _ => "The documentation is thorough, down to examples and edge cases.",
    }
}
