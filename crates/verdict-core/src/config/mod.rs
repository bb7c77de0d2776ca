//! Evaluation configuration: per-dimension thresholds and detector knobs.
//!
//! Every field carries a safe default and is merged over caller overrides
//! via `#[serde(default)]`, so a partial TOML config is always valid.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration for a Verdict evaluation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub evidence: EvidenceConfig,
    pub completeness: CompletenessConfig,
    pub quality: QualityConfig,
    pub documentation: DocumentationConfig,
    pub reliability: ReliabilityConfig,
    pub performance: PerformanceConfig,
    pub integration: IntegrationConfig,
    pub maintenance: MaintenanceConfig,
    pub stress: StressConfig,
}

impl EvaluationConfig {
    /// Parse a configuration from TOML, validating band thresholds.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::debug!("evaluation config loaded");
        Ok(config)
    }

    /// Check that every band threshold triple is strictly ascending.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bands = [
            ("completeness", &self.completeness.thresholds),
            ("code_quality", &self.quality.thresholds),
            ("documentation", &self.documentation.thresholds),
            ("reliability", &self.reliability.thresholds),
            ("performance", &self.performance.thresholds),
            ("integration", &self.integration.thresholds),
            ("maintenance", &self.maintenance.thresholds),
        ];
        for (dimension, t) in bands {
            if !(t[0] < t[1] && t[1] < t[2]) {
                return Err(ConfigError::InvalidThreshold {
                    dimension: dimension.to_string(),
                    details: format!("thresholds must be strictly ascending, got {t:?}"),
                });
            }
        }
        Ok(())
    }
}

/// Evidence extraction limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Maximum lines per extracted snippet.
    pub max_snippet_lines: usize,
    /// Context lines padded on each side by `extract_with_context`.
    pub context_lines: usize,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            max_snippet_lines: 50,
            context_lines: 3,
        }
    }
}

/// Completeness rating bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletenessConfig {
    /// Ascending lower bounds for Partial / Full / Enterprise-Level.
    pub thresholds: [f64; 3],
}

impl Default for CompletenessConfig {
    fn default() -> Self {
        Self {
            thresholds: [1.0, 50.0, 100.0],
        }
    }
}

/// Code quality detector knobs and rating bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Brace depth beyond which a region counts as excessively nested.
    pub max_nesting_depth: u32,
    /// Minimum property-chain segments flagged as a deep chain.
    pub property_chain_depth: usize,
    /// Word-set Jaccard similarity at or above which two blocks count as
    /// duplicated. A confidence heuristic, not ground truth.
    pub duplication_threshold: f64,
    /// Minimum code lines for a block to enter duplication comparison.
    pub min_duplicate_block_lines: usize,
    /// Ascending lower bounds for Basic / Good / Excellent.
    pub thresholds: [f64; 3],
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: 3,
            property_chain_depth: 4,
            duplication_threshold: 0.80,
            min_duplicate_block_lines: 3,
            thresholds: [40.0, 60.0, 80.0],
        }
    }
}

/// Documentation detector knobs and rating bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentationConfig {
    /// Look-back window (lines) for a doc comment above a declaration.
    pub doc_lookback_lines: usize,
    /// Look-back window (lines) for a comment above a complex construct.
    pub comment_lookback_lines: usize,
    /// Names at or above this length count as self-documenting.
    pub self_doc_min_len: usize,
    /// Ratio of self-documenting names needed for the naming bonus.
    pub self_doc_ratio: f64,
    /// Ascending lower bounds for Basic / Good / Excellent.
    pub thresholds: [f64; 3],
}

impl Default for DocumentationConfig {
    fn default() -> Self {
        Self {
            doc_lookback_lines: 3,
            comment_lookback_lines: 2,
            self_doc_min_len: 8,
            self_doc_ratio: 0.70,
            thresholds: [20.0, 50.0, 80.0],
        }
    }
}

/// Reliability detector knobs and rating bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliabilityConfig {
    /// Lines of adjacency within which a rejection handler covers an
    /// operation.
    pub handler_adjacency_lines: u32,
    /// Ascending lower bounds for Medium / High / Enterprise-Level.
    pub thresholds: [f64; 3],
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            handler_adjacency_lines: 1,
            thresholds: [30.0, 60.0, 90.0],
        }
    }
}

/// Performance rating bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Ascending lower bounds for Acceptable / Good / Excellent.
    pub thresholds: [f64; 3],
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            thresholds: [30.0, 60.0, 85.0],
        }
    }
}

/// Integration rating bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Ascending lower bounds for Partial / Full / Enterprise-Level.
    pub thresholds: [f64; 3],
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            thresholds: [25.0, 60.0, 85.0],
        }
    }
}

/// Maintenance rating bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Ascending lower bounds for Medium / High / Enterprise-Level.
    pub thresholds: [f64; 3],
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            thresholds: [30.0, 60.0, 85.0],
        }
    }
}

/// Stress collapse detector knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// Periodic callbacks firing faster than this count as high-frequency.
    pub high_frequency_interval_ms: u64,
    /// Baseline iteration count assumed for a single unguarded loop.
    pub default_iterations: u64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            high_frequency_interval_ms: 100,
            default_iterations: 1_000_000,
        }
    }
}
