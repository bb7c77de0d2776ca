//! Pattern detectors: stateless functions scanning raw source text for
//! structural signals, one family per dimension.
//!
//! Detectors registered in the [`registry`] return [`Finding`]s with
//! attached evidence; dimension analyzers compose them. Pattern tables are
//! versioned constants inside each family module, so tests can assert
//! against fixed fixtures.

pub mod documentation;
pub mod integration;
pub mod performance;
pub mod quality;
pub mod registry;
pub mod reliability;
pub mod stress;

use verdict_core::EvaluationConfig;

use crate::evidence::{CodeEvidence, EvidenceCollector};
use crate::findings::Finding;
use crate::source::SourceUnit;

/// Everything a detector may look at: the preprocessed unit, the
/// configuration, and an evidence collector for citing proof.
pub struct DetectionContext<'a> {
    pub unit: &'a SourceUnit<'a>,
    pub config: &'a EvaluationConfig,
    pub evidence: &'a EvidenceCollector,
}

impl DetectionContext<'_> {
    /// Cite the exact line range as evidence.
    pub fn cite(&self, start: u32, end: u32) -> CodeEvidence {
        self.evidence.extract(
            self.unit.source,
            self.unit.file_path,
            start,
            end,
            Some(self.unit.language),
        )
    }

    /// Cite a single line as evidence.
    pub fn cite_line(&self, line: u32) -> CodeEvidence {
        self.cite(line, line)
    }

    /// Cite a line padded with surrounding context.
    pub fn cite_with_context(&self, line: u32) -> CodeEvidence {
        self.evidence.extract_with_context(
            self.unit.source,
            self.unit.file_path,
            line,
            line,
            Some(self.unit.language),
        )
    }
}

/// A registered detector: a named, stateless function over the context.
pub type DetectorFn = fn(&DetectionContext<'_>) -> Vec<Finding>;
