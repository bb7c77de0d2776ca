//! # verdict-analysis
//!
//! The Verdict evaluation engine. Given an atomic feature (a unit of source
//! code plus its declared capability list) it scores the unit along eight
//! independent quality dimensions and emits, per dimension, an ordinal
//! rating plus a structured, evidence-linked assessment.
//!
//! All detection operates on raw text and line patterns. The engine is
//! pure and stateless: it performs no I/O, holds nothing across
//! invocations, and never fails on malformed source.

pub mod analysis;
pub mod detectors;
pub mod engine;
pub mod evaluators;
pub mod evidence;
pub mod feature;
pub mod findings;
pub mod report;
pub mod source;
pub mod validation;

pub use engine::{EvaluationInput, Evaluator, FeatureEvaluation};
pub use evidence::{CodeEvidence, EvidenceCollector};
pub use feature::{AtomicFeature, Capability, CapabilityAnalysisResult, CapabilityStatus};
pub use source::SourceUnit;
