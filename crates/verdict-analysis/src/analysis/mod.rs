//! Dimension analyzers: aggregate detector output into one structured
//! analysis result per dimension, ready for scoring.

pub mod complexity;
pub mod documentation;
pub mod integration;
pub mod isolation;
pub mod modularity;
pub mod reliability;

pub use complexity::{analyze_complexity, ComplexityAnalysis, ComplexityClass};
pub use documentation::{analyze_documentation, DocumentationAnalysis};
pub use integration::{analyze_integration, IntegrationAnalysis};
pub use isolation::{classify_isolation, FeatureIsolation};
pub use modularity::{
    analyze_modularity, ComplexityBand, ModificationEase, ModularityAnalysis, Testability,
    TestabilityAnalysis,
};
pub use reliability::{analyze_reliability, ReliabilityAnalysis};
