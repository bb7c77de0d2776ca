//! The fixed label tables for the eight dimension scales.

use super::RatingScale;
use crate::types::Dimension;

pub static COMPLETENESS_SCALE: RatingScale = RatingScale {
    dimension: Dimension::Completeness,
    labels: ["Not Implemented", "Partial", "Full", "Enterprise-Level"],
};

pub static CODE_QUALITY_SCALE: RatingScale = RatingScale {
    dimension: Dimension::CodeQuality,
    labels: ["Poor", "Basic", "Good", "Excellent"],
};

pub static DOCUMENTATION_SCALE: RatingScale = RatingScale {
    dimension: Dimension::Documentation,
    labels: ["None", "Basic", "Good", "Excellent"],
};

pub static RELIABILITY_SCALE: RatingScale = RatingScale {
    dimension: Dimension::Reliability,
    labels: ["Low", "Medium", "High", "Enterprise-Level"],
};

pub static PERFORMANCE_SCALE: RatingScale = RatingScale {
    dimension: Dimension::Performance,
    labels: ["Poor", "Acceptable", "Good", "Excellent"],
};

pub static INTEGRATION_SCALE: RatingScale = RatingScale {
    dimension: Dimension::Integration,
    labels: ["Not Compatible", "Partial", "Full", "Enterprise-Level"],
};

pub static MAINTENANCE_SCALE: RatingScale = RatingScale {
    dimension: Dimension::Maintenance,
    labels: ["Low", "Medium", "High", "Enterprise-Level"],
};

pub static STRESS_COLLAPSE_SCALE: RatingScale = RatingScale {
    dimension: Dimension::StressCollapse,
    labels: ["Fragile", "Strained", "Stable", "Robust"],
};

/// Look up the scale for a dimension.
pub fn scale_for(dimension: Dimension) -> &'static RatingScale {
    match dimension {
        Dimension::Completeness => &COMPLETENESS_SCALE,
        Dimension::CodeQuality => &CODE_QUALITY_SCALE,
        Dimension::Documentation => &DOCUMENTATION_SCALE,
        Dimension::Reliability => &RELIABILITY_SCALE,
        Dimension::Performance => &PERFORMANCE_SCALE,
        Dimension::Integration => &INTEGRATION_SCALE,
        Dimension::Maintenance => &MAINTENANCE_SCALE,
        Dimension::StressCollapse => &STRESS_COLLAPSE_SCALE,
    }
}
