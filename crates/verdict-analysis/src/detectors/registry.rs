//! DetectorRegistry: named detector functions, filtered by dimension,
//! with enable/disable by id.

use rustc_hash::FxHashSet;

use verdict_core::Dimension;

use super::{DetectionContext, DetectorFn};
use crate::findings::Finding;

/// One registry entry.
struct RegisteredDetector {
    id: &'static str,
    dimension: Dimension,
    run: DetectorFn,
}

/// Registry of all pattern detectors with dimension filtering and
/// enable/disable.
pub struct DetectorRegistry {
    detectors: Vec<RegisteredDetector>,
    disabled: FxHashSet<&'static str>,
}

impl DetectorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
            disabled: FxHashSet::default(),
        }
    }

    /// Register a detector function under a stable id.
    pub fn register(&mut self, id: &'static str, dimension: Dimension, run: DetectorFn) {
        self.detectors.push(RegisteredDetector { id, dimension, run });
    }

    /// Disable a specific detector by id.
    pub fn disable(&mut self, id: &'static str) {
        self.disabled.insert(id);
    }

    /// Enable a previously disabled detector.
    pub fn enable(&mut self, id: &str) {
        self.disabled.remove(id);
    }

    /// Run all enabled detectors for one dimension.
    pub fn run_dimension(&self, dimension: Dimension, ctx: &DetectionContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for detector in &self.detectors {
            if detector.dimension == dimension && !self.disabled.contains(detector.id) {
                let found = (detector.run)(ctx);
                if !found.is_empty() {
                    tracing::debug!(
                        detector_id = detector.id,
                        count = found.len(),
                        "detector produced findings"
                    );
                }
                findings.extend(found);
            }
        }
        findings
    }

    /// Run every enabled detector across all dimensions.
    pub fn run_all(&self, ctx: &DetectionContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for dimension in Dimension::all() {
            findings.extend(self.run_dimension(*dimension, ctx));
        }
        findings
    }

    /// Total number of registered detectors.
    pub fn count(&self) -> usize {
        self.detectors.len()
    }

    /// Number of currently enabled detectors.
    pub fn enabled_count(&self) -> usize {
        self.detectors
            .iter()
            .filter(|d| !self.disabled.contains(d.id))
            .count()
    }

    /// Registered detector ids, in registration order.
    pub fn ids(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.id).collect()
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry with the default detector set for all dimensions that
/// consume registered detectors.
pub fn create_default_registry() -> DetectorRegistry {
    let mut registry = DetectorRegistry::new();

    // Code quality: five anti-pattern detectors plus the good-practice scan.
    registry.register(
        "quality-excessive-nesting",
        Dimension::CodeQuality,
        super::quality::detect_excessive_nesting,
    );
    registry.register(
        "quality-deep-property-chain",
        Dimension::CodeQuality,
        super::quality::detect_deep_property_chains,
    );
    registry.register(
        "quality-magic-literal",
        Dimension::CodeQuality,
        super::quality::detect_magic_literals,
    );
    registry.register(
        "quality-duplication",
        Dimension::CodeQuality,
        super::quality::detect_duplication,
    );
    registry.register(
        "quality-tight-coupling",
        Dimension::CodeQuality,
        super::quality::detect_tight_coupling,
    );
    registry.register(
        "quality-good-practices",
        Dimension::CodeQuality,
        super::quality::detect_good_practices,
    );

    // Reliability: error-handling construct detection.
    registry.register(
        "reliability-error-handling",
        Dimension::Reliability,
        super::reliability::detect_error_handling,
    );

    // Performance: re-render anti-patterns and optimization techniques.
    registry.register(
        "performance-re-render",
        Dimension::Performance,
        super::performance::detect_re_render_issues,
    );
    registry.register(
        "performance-optimizations",
        Dimension::Performance,
        super::performance::detect_optimizations,
    );
    registry.register(
        "performance-concerns",
        Dimension::Performance,
        super::performance::detect_concerns,
    );

    // Integration: configuration surface extraction.
    registry.register(
        "integration-config-options",
        Dimension::Integration,
        super::integration::detect_configuration_options,
    );

    // Stress collapse: the stress pattern table.
    registry.register(
        "stress-patterns",
        Dimension::StressCollapse,
        super::stress::detect_stress_patterns,
    );

    registry
}
