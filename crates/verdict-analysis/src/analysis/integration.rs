//! Integration analysis: configuration surface, toggles, extensibility,
//! and interactions.

use serde::Serialize;

use verdict_core::Dimension;

use crate::detectors::integration::{
    assess_extensibility, find_interactions, toggle_capability, ExtensibilityTier, InteractionKind,
};
use crate::detectors::registry::DetectorRegistry;
use crate::detectors::DetectionContext;
use crate::findings::{ConfigurationOption, Finding};

/// Structured integration facts feeding the evaluator.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationAnalysis {
    pub options: Vec<ConfigurationOption>,
    pub toggle_capable: bool,
    pub extensibility: ExtensibilityTier,
    pub interactions: Vec<InteractionKind>,
}

impl IntegrationAnalysis {
    pub fn present_option_count(&self) -> usize {
        self.options.iter().filter(|o| o.present).count()
    }

    /// Score contribution of the interaction surface: 15/10/5/0 for
    /// >=3 / 2 / 1 / 0 interaction kinds.
    pub fn interaction_points(&self) -> f64 {
        match self.interactions.len() {
            0 => 0.0,
            1 => 5.0,
            2 => 10.0,
            _ => 15.0,
        }
    }
}

/// Extract the declared configuration surface and assess how the unit
/// plugs into its surroundings.
pub fn analyze_integration(
    ctx: &DetectionContext<'_>,
    registry: &DetectorRegistry,
) -> IntegrationAnalysis {
    let options: Vec<ConfigurationOption> = registry
        .run_dimension(Dimension::Integration, ctx)
        .into_iter()
        .filter_map(|finding| match finding {
            Finding::ConfigOption(option) => Some(option),
            _ => None,
        })
        .collect();

    let toggle_capable = toggle_capability(ctx, &options);
    let extensibility = assess_extensibility(ctx);
    let interactions = find_interactions(ctx);

    IntegrationAnalysis {
        options,
        toggle_capable,
        extensibility,
        interactions,
    }
}
