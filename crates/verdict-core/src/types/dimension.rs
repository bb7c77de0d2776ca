//! The eight quality dimensions scored by the engine.

use serde::{Deserialize, Serialize};

/// The 8 evaluation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Completeness,
    CodeQuality,
    Documentation,
    Reliability,
    Performance,
    Integration,
    Maintenance,
    StressCollapse,
}

impl Dimension {
    /// All 8 dimensions, in report order.
    pub fn all() -> &'static [Dimension] {
        &[
            Self::Completeness,
            Self::CodeQuality,
            Self::Documentation,
            Self::Reliability,
            Self::Performance,
            Self::Integration,
            Self::Maintenance,
            Self::StressCollapse,
        ]
    }

    /// Dimension name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Completeness => "completeness",
            Self::CodeQuality => "code_quality",
            Self::Documentation => "documentation",
            Self::Reliability => "reliability",
            Self::Performance => "performance",
            Self::Integration => "integration",
            Self::Maintenance => "maintenance",
            Self::StressCollapse => "stress_collapse",
        }
    }

    /// Parse from string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "completeness" => Some(Self::Completeness),
            "code_quality" => Some(Self::CodeQuality),
            "documentation" => Some(Self::Documentation),
            "reliability" => Some(Self::Reliability),
            "performance" => Some(Self::Performance),
            "integration" => Some(Self::Integration),
            "maintenance" => Some(Self::Maintenance),
            "stress_collapse" => Some(Self::StressCollapse),
            _ => None,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
