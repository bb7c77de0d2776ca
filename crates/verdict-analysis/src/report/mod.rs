//! Deterministic markdown rendering of evaluation results.
//!
//! Report assembly itself lives outside the engine; these helpers render
//! one dimension's structured findings each and are callable independently.

mod markdown;

pub use markdown::{
    code_quality_markdown, completeness_markdown, documentation_markdown, feature_markdown,
    integration_markdown, maintenance_markdown, performance_markdown, reliability_markdown,
    stress_collapse_markdown,
};
