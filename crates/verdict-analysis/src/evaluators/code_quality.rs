//! Code quality: isolation placement, anti-patterns, and good practices.

use serde::Serialize;

use verdict_core::config::QualityConfig;
use verdict_core::rating::CODE_QUALITY_SCALE;
use verdict_core::Rating;

use crate::analysis::FeatureIsolation;
use crate::findings::{AntiPattern, GoodPractice};

use super::{enumerate_names, AssessmentBuilder};

/// Code quality evaluation output.
#[derive(Debug, Clone, Serialize)]
pub struct CodeQualityEvaluation {
    pub rating: Rating,
    pub score: f64,
    pub isolation: FeatureIsolation,
    pub anti_patterns: Vec<AntiPattern>,
    pub good_practices: Vec<GoodPractice>,
    pub assessment: String,
}

/// Score the unit's structural quality.
///
/// Score starts at 50; the isolation class adjusts it by +20/+10/-15/-25;
/// each anti-pattern subtracts 10 and each good practice adds 8; the
/// result is clamped to [0, 100].
pub fn evaluate_code_quality(
    isolation: FeatureIsolation,
    anti_patterns: Vec<AntiPattern>,
    good_practices: Vec<GoodPractice>,
    config: &QualityConfig,
) -> CodeQualityEvaluation {
    let score = (50.0 + isolation.score_adjustment() - 10.0 * anti_patterns.len() as f64
        + 8.0 * good_practices.len() as f64)
        .clamp(0.0, 100.0);
    let rating = Rating::from_score(&CODE_QUALITY_SCALE, score, config.thresholds);

    let mut anti_names: Vec<&str> = anti_patterns.iter().map(|a| a.name.as_str()).collect();
    anti_names.dedup();
    let practice_names: Vec<&str> = good_practices.iter().map(|g| g.name.as_str()).collect();

    let assessment = AssessmentBuilder::new()
        .clause(format!("The unit {}.", isolation.describe()))
        .clause_if(
            !anti_patterns.is_empty(),
            format!(
                "{} anti-pattern occurrence(s) detected: {}.",
                anti_patterns.len(),
                enumerate_names(&anti_names)
            ),
        )
        .clause_if(
            anti_patterns.is_empty(),
            "No structural anti-patterns were detected.",
        )
        .clause_if(
            !good_practices.is_empty(),
            format!("Good practices observed: {}.", enumerate_names(&practice_names)),
        )
        .clause(closing_remark(&rating))
        .build();

    CodeQualityEvaluation {
        rating,
        score,
        isolation,
        anti_patterns,
        good_practices,
        assessment,
    }
}

fn closing_remark(rating: &Rating) -> &'static str {
    match rating.index() {
        0 => "The structure works against readers; a cleanup pass should precede new work.",
        1 => "The basics hold, but several structural debts will slow future changes.",
        2 => "The structure is sound with only minor debts.",
        _ => "The structure is clean and deliberately organized.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_clean_unit_is_good() {
        let eval = evaluate_code_quality(
            FeatureIsolation::IsolatedModule,
            Vec::new(),
            Vec::new(),
            &QualityConfig::default(),
        );
        // 50 + 20 = 70.
        assert_eq!(eval.score, 70.0);
        assert_eq!(eval.rating.label(), "Good");
        assert!(eval.assessment.contains("own module"));
    }

    #[test]
    fn anti_patterns_drag_the_score_down() {
        use crate::evidence::CodeEvidence;
        use verdict_core::{Language, LineRange};

        let ap = AntiPattern {
            id: "quality-magic-literal".into(),
            name: "Magic literal".into(),
            issue: "i".into(),
            impact: "m".into(),
            better_approach: "b".into(),
            exemplar: "e".into(),
            evidence: CodeEvidence {
                file_path: "a.ts".into(),
                line_range: LineRange::new(1, 1),
                snippet: "x".into(),
                language: Language::TypeScript,
            },
        };
        let eval = evaluate_code_quality(
            FeatureIsolation::ScatteredFiles,
            vec![ap.clone(), ap.clone(), ap],
            Vec::new(),
            &QualityConfig::default(),
        );
        // 50 - 25 - 30 = -5, clamped to 0.
        assert_eq!(eval.score, 0.0);
        assert_eq!(eval.rating.label(), "Poor");
    }

    #[test]
    fn score_is_clamped_at_100() {
        let practice = GoodPractice {
            name: "Guard clauses".into(),
            description: "d".into(),
            evidence: crate::evidence::EvidenceCollector::default().extract("x", "a.ts", 1, 1, None),
        };
        let practices = vec![practice; 8];
        let eval = evaluate_code_quality(
            FeatureIsolation::IsolatedModule,
            Vec::new(),
            practices,
            &QualityConfig::default(),
        );
        assert_eq!(eval.score, 100.0);
        assert_eq!(eval.rating.label(), "Excellent");
    }
}
