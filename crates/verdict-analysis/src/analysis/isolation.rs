//! Feature isolation classification.
//!
//! Judges how the unit is placed relative to the rest of the codebase:
//! its own module, a contiguous region of a shared file, interleaved with
//! unrelated logic, or spread across several files. A placement heuristic
//! over the file stem, mention-line clustering, and the caller-supplied
//! related-file list.

use std::path::Path;

use serde::Serialize;

use crate::feature::AtomicFeature;
use crate::source::SourceUnit;

/// Where the feature's code lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureIsolation {
    /// The unit has a module or file of its own.
    IsolatedModule,
    /// One contiguous region of a shared file.
    SameFileSeparated,
    /// Interleaved with unrelated logic in the same file.
    MixedWithOther,
    /// Spread across two or more files without a module of its own.
    ScatteredFiles,
}

impl FeatureIsolation {
    /// Score adjustment for this placement.
    pub fn score_adjustment(&self) -> f64 {
        match self {
            Self::IsolatedModule => 20.0,
            Self::SameFileSeparated => 10.0,
            Self::MixedWithOther => -15.0,
            Self::ScatteredFiles => -25.0,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::IsolatedModule => "lives in its own module",
            Self::SameFileSeparated => "occupies a contiguous region of a shared file",
            Self::MixedWithOther => "is interleaved with unrelated logic",
            Self::ScatteredFiles => "is spread across several files without a module of its own",
        }
    }
}

/// Maximum line gap between mentions that still counts as one cluster.
const CLUSTER_GAP: u32 = 10;

/// Classify the unit's placement.
///
/// `related_files` are the other files the harness says also contain this
/// feature; two or more of them outweigh any file-local judgment.
pub fn classify_isolation(
    unit: &SourceUnit<'_>,
    feature: &AtomicFeature,
    related_files: &[String],
) -> FeatureIsolation {
    if related_files.len() >= 2 {
        return FeatureIsolation::ScatteredFiles;
    }

    if stem_matches_feature(unit.file_path, &feature.name) {
        return FeatureIsolation::IsolatedModule;
    }

    let clusters = mention_clusters(unit, &feature.name);
    match clusters {
        0 | 1 => FeatureIsolation::SameFileSeparated,
        _ => FeatureIsolation::MixedWithOther,
    }
}

/// File stem equals the feature name under normalization (case and
/// separators dropped).
fn stem_matches_feature(file_path: &str, feature_name: &str) -> bool {
    let stem = Path::new(file_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    !stem.is_empty() && normalize(stem) == normalize(feature_name)
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Count clusters of lines mentioning the feature's identifier forms.
fn mention_clusters(unit: &SourceUnit<'_>, feature_name: &str) -> usize {
    let needle = normalize(feature_name);
    if needle.is_empty() {
        return 0;
    }

    let mut clusters = 0usize;
    let mut last_mention: Option<u32> = None;

    for (number, line) in unit.code_lines() {
        if !normalize(line).contains(&needle) {
            continue;
        }
        match last_mention {
            Some(prev) if number - prev <= CLUSTER_GAP => {}
            _ => clusters += 1,
        }
        last_mention = Some(number);
    }

    clusters
}
