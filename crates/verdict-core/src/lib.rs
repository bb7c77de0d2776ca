//! # verdict-core
//!
//! Foundation crate for the Verdict evaluation engine.
//! Defines shared types (dimensions, rating scales, language tags),
//! configuration, and errors. The analysis crate depends on this.

pub mod config;
pub mod errors;
pub mod rating;
pub mod types;

// Re-export the most commonly used items at the crate root.
pub use config::EvaluationConfig;
pub use errors::VerdictErrorCode;
pub use rating::{band_score, Rating, RatingScale};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::{Dimension, Language, LineRange};
