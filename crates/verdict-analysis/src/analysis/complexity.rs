//! Algorithmic complexity analysis from loop nesting.

use serde::Serialize;

use crate::detectors::performance::{find_loops, LoopSite};
use crate::detectors::DetectionContext;
use crate::evidence::CodeEvidence;

/// Coarse algorithmic complexity classified by maximum loop nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ComplexityClass {
    Constant,
    Linear,
    Quadratic,
    Cubic,
}

impl ComplexityClass {
    /// Classify by maximum loop nesting: 0/1/2/>=3.
    pub fn from_max_nesting(max_nesting: u32) -> Self {
        match max_nesting {
            0 => Self::Constant,
            1 => Self::Linear,
            2 => Self::Quadratic,
            _ => Self::Cubic,
        }
    }

    /// Big-O notation for display.
    pub fn notation(&self) -> &'static str {
        match self {
            Self::Constant => "O(1)",
            Self::Linear => "O(n)",
            Self::Quadratic => "O(n^2)",
            Self::Cubic => "O(n^3)",
        }
    }

    /// Score penalty for this class.
    pub fn penalty(&self) -> f64 {
        match self {
            Self::Constant | Self::Linear => 0.0,
            Self::Quadratic => 20.0,
            Self::Cubic => 30.0,
        }
    }
}

impl std::fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.notation())
    }
}

/// Loop structure of the unit reduced to a complexity classification.
#[derive(Debug, Clone, Serialize)]
pub struct ComplexityAnalysis {
    pub loop_count: usize,
    pub max_nesting: u32,
    pub class: ComplexityClass,
    /// Evidence for the deepest nesting site, when any loop exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deepest_site: Option<CodeEvidence>,
}

/// Locate loops, track nesting, classify.
pub fn analyze_complexity(ctx: &DetectionContext<'_>) -> ComplexityAnalysis {
    let loops = find_loops(ctx);
    let max_nesting = loops.iter().map(|l| l.nesting).max().unwrap_or(0);
    let deepest_site = deepest(&loops).map(|site| ctx.cite(site.line, site.end_line.min(site.line + 10)));

    ComplexityAnalysis {
        loop_count: loops.len(),
        max_nesting,
        class: ComplexityClass::from_max_nesting(max_nesting),
        deepest_site,
    }
}

fn deepest(loops: &[LoopSite]) -> Option<&LoopSite> {
    loops.iter().max_by_key(|l| l.nesting)
}
