//! Dimension evaluators: pure functions from analysis results to
//! `{rating, findings, assessment}`.
//!
//! Scoring is separated from narration: each evaluator computes its score
//! with the documented formula, derives the rating through the shared
//! banding utility, and assembles its assessment from an ordered list of
//! clauses. Identical inputs always produce byte-identical output.

pub mod code_quality;
pub mod completeness;
pub mod documentation;
pub mod integration;
pub mod maintenance;
pub mod performance;
pub mod reliability;
pub mod stress_collapse;

pub use code_quality::{evaluate_code_quality, CodeQualityEvaluation};
pub use completeness::{evaluate_completeness, CompletenessEvaluation};
pub use documentation::{evaluate_documentation, DocumentationEvaluation};
pub use integration::{evaluate_integration, IntegrationEvaluation};
pub use maintenance::{evaluate_maintenance, MaintenanceEvaluation};
pub use performance::{evaluate_performance, PerformanceEvaluation};
pub use reliability::{evaluate_reliability, ReliabilityEvaluation};
pub use stress_collapse::{evaluate_stress_collapse, StressCollapseEvaluation};

/// Ordered clause assembly for assessment text.
///
/// Clauses are pushed in a fixed order (opening statement, enumerations,
/// rating-specific remark) and joined with single spaces; empty clauses
/// are skipped.
#[derive(Debug, Default)]
pub(crate) struct AssessmentBuilder {
    clauses: Vec<String>,
}

impl AssessmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clause(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.clauses.push(text);
        }
        self
    }

    pub fn clause_if(self, condition: bool, text: impl Into<String>) -> Self {
        if condition {
            self.clause(text)
        } else {
            self
        }
    }

    pub fn build(self) -> String {
        self.clauses.join(" ")
    }
}

/// Join names into a readable enumeration: "a", "a and b", "a, b, and c".
pub(crate) fn enumerate_names<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [rest @ .., last] => {
            let head: Vec<&str> = rest.iter().map(|n| n.as_ref()).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_joins_and_skips_empty() {
        let text = AssessmentBuilder::new()
            .clause("First.")
            .clause("")
            .clause_if(false, "Never.")
            .clause("Last.")
            .build();
        assert_eq!(text, "First. Last.");
    }

    #[test]
    fn enumerates_names() {
        assert_eq!(enumerate_names::<&str>(&[]), "");
        assert_eq!(enumerate_names(&["a"]), "a");
        assert_eq!(enumerate_names(&["a", "b"]), "a and b");
        assert_eq!(enumerate_names(&["a", "b", "c"]), "a, b, and c");
    }
}
