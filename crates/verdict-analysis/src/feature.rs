//! Atomic features and their capability analysis inputs.
//!
//! An atomic feature is the unit of code under evaluation together with the
//! capabilities it is expected to provide. Capability detection itself
//! happens upstream; the engine consumes its results read-only.

use serde::{Deserialize, Serialize};

use crate::evidence::CodeEvidence;

/// The unit of code under evaluation, paired with its expected capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomicFeature {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

/// One expected capability of an atomic feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    /// Relative weight in the completeness score. Must be non-negative.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            weight: 1.0,
        }
    }

    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            weight: 1.0,
        }
    }

    /// Effective weight, treating negative values as zero.
    pub fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() && self.weight > 0.0 {
            self.weight
        } else {
            0.0
        }
    }
}

/// Implementation status of a capability, as judged upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityStatus {
    Implemented,
    Incomplete,
    Missing,
}

impl std::fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Implemented => "implemented",
            Self::Incomplete => "incomplete",
            Self::Missing => "missing",
        };
        f.write_str(s)
    }
}

/// Upstream judgment of one capability, consumed by the Completeness
/// evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityAnalysisResult {
    pub capability: Capability,
    pub status: CapabilityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<CodeEvidence>,
}

impl CapabilityAnalysisResult {
    pub fn new(capability: Capability, status: CapabilityStatus) -> Self {
        Self {
            capability,
            status,
            details: None,
            evidence: None,
        }
    }
}
