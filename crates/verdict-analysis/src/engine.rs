//! The engine facade: run all eight dimension evaluators over one atomic
//! feature, or fan out over many.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use verdict_core::{Dimension, EvaluationConfig};

use crate::analysis::{
    analyze_complexity, analyze_documentation, analyze_integration, analyze_modularity,
    analyze_reliability, classify_isolation,
};
use crate::detectors::registry::{create_default_registry, DetectorRegistry};
use crate::detectors::stress::match_robust_signature;
use crate::detectors::DetectionContext;
use crate::evaluators::{
    evaluate_code_quality, evaluate_completeness, evaluate_documentation, evaluate_integration,
    evaluate_maintenance, evaluate_performance, evaluate_reliability, evaluate_stress_collapse,
    CodeQualityEvaluation, CompletenessEvaluation, DocumentationEvaluation, IntegrationEvaluation,
    MaintenanceEvaluation, PerformanceEvaluation, ReliabilityEvaluation, StressCollapseEvaluation,
};
use crate::evidence::EvidenceCollector;
use crate::feature::{AtomicFeature, CapabilityAnalysisResult};
use crate::findings::Finding;
use crate::source::SourceUnit;

/// Everything the engine needs to evaluate one atomic feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub atomic_feature: AtomicFeature,
    pub source_code: String,
    pub file_path: String,
    #[serde(default)]
    pub capability_analysis: Vec<CapabilityAnalysisResult>,
    /// Other files the harness says also contain this feature; feeds the
    /// isolation classifier.
    #[serde(default)]
    pub related_files: Vec<String>,
}

/// The engine's output: one evaluation per dimension, exactly eight.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureEvaluation {
    pub completeness: CompletenessEvaluation,
    pub code_quality: CodeQualityEvaluation,
    pub documentation: DocumentationEvaluation,
    pub reliability: ReliabilityEvaluation,
    pub performance: PerformanceEvaluation,
    pub integration: IntegrationEvaluation,
    pub maintenance: MaintenanceEvaluation,
    pub stress_collapse: StressCollapseEvaluation,
}

/// The evaluation engine.
///
/// Pure and stateless across invocations: the configuration, detector
/// registry, and evidence collector are read-only once constructed, so one
/// engine can serve concurrent evaluations.
pub struct Evaluator {
    config: EvaluationConfig,
    registry: DetectorRegistry,
    collector: EvidenceCollector,
}

impl Evaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        let collector = EvidenceCollector::new(&config.evidence);
        Self {
            config,
            registry: create_default_registry(),
            collector,
        }
    }

    /// Replace the default detector registry (e.g. with detectors disabled).
    pub fn with_registry(mut self, registry: DetectorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluate one atomic feature across all eight dimensions.
    pub fn evaluate(&self, input: &EvaluationInput) -> FeatureEvaluation {
        let _span = tracing::debug_span!(
            "evaluate_feature",
            feature = %input.atomic_feature.name,
            file = %input.file_path
        )
        .entered();

        let unit = SourceUnit::new(&input.source_code, &input.file_path);
        let ctx = DetectionContext {
            unit: &unit,
            config: &self.config,
            evidence: &self.collector,
        };

        // Completeness: consumes the upstream capability analysis only.
        let completeness = evaluate_completeness(
            &input.atomic_feature,
            &input.capability_analysis,
            &self.config.completeness,
        );

        // Code quality: isolation placement plus detector findings.
        let mut anti_patterns = Vec::new();
        let mut good_practices = Vec::new();
        for finding in self.registry.run_dimension(Dimension::CodeQuality, &ctx) {
            match finding {
                Finding::AntiPattern(a) => anti_patterns.push(a),
                Finding::GoodPractice(g) => good_practices.push(g),
                _ => {}
            }
        }
        let isolation = classify_isolation(&unit, &input.atomic_feature, &input.related_files);
        let code_quality =
            evaluate_code_quality(isolation, anti_patterns, good_practices, &self.config.quality);

        let documentation =
            evaluate_documentation(analyze_documentation(&ctx), &self.config.documentation);

        let reliability = evaluate_reliability(
            analyze_reliability(&ctx, &self.registry),
            &self.config.reliability,
        );

        // Performance: complexity analysis plus detector findings.
        let complexity = analyze_complexity(&ctx);
        let mut concerns = Vec::new();
        let mut optimizations = Vec::new();
        for finding in self.registry.run_dimension(Dimension::Performance, &ctx) {
            match finding {
                Finding::Concern(c) => concerns.push(c),
                Finding::Optimization(o) => optimizations.push(o),
                _ => {}
            }
        }
        let performance =
            evaluate_performance(complexity, concerns, optimizations, &self.config.performance);

        let integration = evaluate_integration(
            analyze_integration(&ctx, &self.registry),
            &self.config.integration,
        );

        let maintenance =
            evaluate_maintenance(analyze_modularity(&ctx), &self.config.maintenance);

        // Stress collapse: the robust signature only matters when no
        // stress pattern matched.
        let mut conditions = Vec::new();
        for finding in self.registry.run_dimension(Dimension::StressCollapse, &ctx) {
            if let Finding::StressCondition(c) = finding {
                conditions.push(c);
            }
        }
        let signature = if conditions.is_empty() {
            match_robust_signature(&ctx)
        } else {
            None
        };
        let stress_collapse = evaluate_stress_collapse(conditions, signature);

        tracing::debug!(
            completeness = completeness.rating.label(),
            code_quality = code_quality.rating.label(),
            stress = stress_collapse.rating.label(),
            "feature evaluated"
        );

        FeatureEvaluation {
            completeness,
            code_quality,
            documentation,
            reliability,
            performance,
            integration,
            maintenance,
            stress_collapse,
        }
    }

    /// Evaluate many features in parallel. Dimension evaluators have no
    /// inter-dependencies, so results are identical to the sequential path.
    pub fn evaluate_many(&self, inputs: &[EvaluationInput]) -> Vec<FeatureEvaluation> {
        inputs.par_iter().map(|input| self.evaluate(input)).collect()
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluationConfig::default())
    }
}
