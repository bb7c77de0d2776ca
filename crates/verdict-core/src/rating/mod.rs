//! Ordinal ratings: a shared 4-tier scale concept with per-dimension labels.
//!
//! Every dimension converts its numeric score into an ordinal rating through
//! the same [`band_score`] utility and a dimension-specific label table, so
//! threshold logic lives in exactly one place.

mod scales;

pub use scales::{
    scale_for, CODE_QUALITY_SCALE, COMPLETENESS_SCALE, DOCUMENTATION_SCALE, INTEGRATION_SCALE,
    MAINTENANCE_SCALE, PERFORMANCE_SCALE, RELIABILITY_SCALE, STRESS_COLLAPSE_SCALE,
};

use serde::ser::Serializer;
use serde::Serialize;

use crate::types::Dimension;

/// A dimension's fixed 4-label ordinal scale, ordered worst to best.
#[derive(Debug)]
pub struct RatingScale {
    pub dimension: Dimension,
    pub labels: [&'static str; 4],
}

impl RatingScale {
    /// Index of a label within this scale, if it belongs to it.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| *l == label)
    }
}

/// An ordinal rating: an index 0..=3 into a static per-dimension scale.
///
/// Ratings serialize as their label string, which is the shape external
/// consumers persist and the validation helpers check against.
#[derive(Debug, Clone, Copy)]
pub struct Rating {
    scale: &'static RatingScale,
    index: usize,
}

impl Rating {
    /// Create a rating from a raw index, clamped to 0..=3.
    pub fn new(scale: &'static RatingScale, index: usize) -> Self {
        Self {
            scale,
            index: index.min(3),
        }
    }

    /// Derive a rating from a numeric score and ascending band thresholds.
    pub fn from_score(scale: &'static RatingScale, score: f64, thresholds: [f64; 3]) -> Self {
        Self::new(scale, band_score(score, thresholds))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> &'static str {
        self.scale.labels[self.index]
    }

    pub fn dimension(&self) -> Dimension {
        self.scale.dimension
    }

    /// Whether this is the top tier of its scale.
    pub fn is_top_tier(&self) -> bool {
        self.index == 3
    }
}

impl PartialEq for Rating {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.scale.dimension == other.scale.dimension
    }
}

impl Eq for Rating {}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self.scale.dimension == other.scale.dimension {
            Some(self.index.cmp(&other.index))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Convert a numeric score into a band index 0..=3.
///
/// `thresholds` are the ascending lower bounds of bands 1, 2, and 3:
/// `score < t0` is band 0, `t0 <= score < t1` band 1, `t1 <= score < t2`
/// band 2, and `score >= t2` band 3. Monotonically non-decreasing in
/// `score` for any fixed threshold triple.
pub fn band_score(score: f64, thresholds: [f64; 3]) -> usize {
    if score >= thresholds[2] {
        3
    } else if score >= thresholds[1] {
        2
    } else if score >= thresholds[0] {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_half_open() {
        let t = [30.0, 60.0, 85.0];
        assert_eq!(band_score(0.0, t), 0);
        assert_eq!(band_score(29.9, t), 0);
        assert_eq!(band_score(30.0, t), 1);
        assert_eq!(band_score(59.9, t), 1);
        assert_eq!(band_score(60.0, t), 2);
        assert_eq!(band_score(85.0, t), 3);
        assert_eq!(band_score(100.0, t), 3);
    }

    #[test]
    fn rating_serializes_as_label() {
        let rating = Rating::from_score(&PERFORMANCE_SCALE, 90.0, [30.0, 60.0, 85.0]);
        assert_eq!(rating.label(), "Excellent");
        let json = serde_json::to_string(&rating).unwrap();
        assert_eq!(json, "\"Excellent\"");
    }

    #[test]
    fn ratings_order_within_a_dimension() {
        let low = Rating::new(&RELIABILITY_SCALE, 0);
        let high = Rating::new(&RELIABILITY_SCALE, 3);
        assert!(low < high);
        assert_eq!(high.label(), "Enterprise-Level");
    }
}
