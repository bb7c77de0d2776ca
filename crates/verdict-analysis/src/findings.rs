//! Typed findings produced by the pattern detectors.
//!
//! Each finding carries the evidence that backs it. Detectors return these
//! wrapped in the [`Finding`] enum; dimension analyzers destructure them
//! into the typed lists their evaluators consume.

use serde::Serialize;
use smallvec::SmallVec;

use crate::evidence::CodeEvidence;

/// Risk tier attached to an unhandled risky operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(s)
    }
}

/// A detected structural anti-pattern.
///
/// `issue`, `impact`, `better_approach`, and `exemplar` come from a fixed
/// per-type template table; only the evidence varies per occurrence.
#[derive(Debug, Clone, Serialize)]
pub struct AntiPattern {
    pub id: String,
    pub name: String,
    pub issue: String,
    pub impact: String,
    pub better_approach: String,
    /// Corrected-code sample illustrating the better approach.
    pub exemplar: String,
    pub evidence: CodeEvidence,
}

/// A detected good practice.
#[derive(Debug, Clone, Serialize)]
pub struct GoodPractice {
    pub name: String,
    pub description: String,
    pub evidence: CodeEvidence,
}

/// A detected error-handling construct.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorHandlingInstance {
    /// Construct kind, e.g. "try/catch block".
    pub kind: String,
    pub description: String,
    pub evidence: CodeEvidence,
}

/// A risky operation with no covering error handling.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorHandlingGap {
    pub scenario: String,
    pub location: String,
    pub risk: RiskLevel,
    pub evidence: CodeEvidence,
}

/// A detected performance concern.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceConcern {
    pub id: String,
    pub issue: String,
    pub impact: String,
    pub recommended_fix: String,
    pub evidence: CodeEvidence,
}

impl PerformanceConcern {
    /// Score penalty derived from the severity keyword in the impact text.
    pub fn severity_penalty(&self) -> f64 {
        let impact = self.impact.to_lowercase();
        if impact.contains("critical") || impact.contains("severe") {
            25.0
        } else if impact.contains("significant") || impact.contains("major") {
            15.0
        } else {
            10.0
        }
    }
}

/// A recognized optimization technique.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationFound {
    pub technique: String,
    pub description: String,
    pub evidence: CodeEvidence,
}

/// A declared configuration option of the unit.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationOption {
    pub name: String,
    pub option_type: String,
    /// Declared and actually referenced in the unit body.
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A predicted collapse-under-stress scenario.
#[derive(Debug, Clone, Serialize)]
pub struct StressCollapseCondition {
    pub id: String,
    /// The load threshold at which degradation is expected.
    pub threshold: String,
    pub expected_behavior: String,
    pub reasoning: SmallVec<[String; 3]>,
    pub code_pattern_references: Vec<CodeEvidence>,
}

/// Universal wrapper returned by registered detector functions.
///
/// Dimension analyzers pattern-match these back into typed lists.
#[derive(Debug, Clone, Serialize)]
pub enum Finding {
    AntiPattern(AntiPattern),
    GoodPractice(GoodPractice),
    ErrorInstance(ErrorHandlingInstance),
    Concern(PerformanceConcern),
    Optimization(OptimizationFound),
    ConfigOption(ConfigurationOption),
    StressCondition(StressCollapseCondition),
}
