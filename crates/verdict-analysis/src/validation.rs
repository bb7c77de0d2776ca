//! Shape validation for persisted or transmitted evaluation objects.
//!
//! External callers round-trip evaluations through JSON; these helpers let
//! them assert well-formedness without deserializing into engine types.
//! They return booleans, never errors: a malformed object is reported, not
//! crashed on.

use serde_json::Value;

use verdict_core::rating::{
    scale_for, CODE_QUALITY_SCALE, COMPLETENESS_SCALE, DOCUMENTATION_SCALE, INTEGRATION_SCALE,
    MAINTENANCE_SCALE, PERFORMANCE_SCALE, RELIABILITY_SCALE, RatingScale, STRESS_COLLAPSE_SCALE,
};
use verdict_core::Dimension;

fn has_rating(value: &Value, scale: &RatingScale) -> bool {
    value
        .get("rating")
        .and_then(Value::as_str)
        .is_some_and(|label| scale.index_of(label).is_some())
}

fn has_number(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(Value::is_number)
}

fn has_bool(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(Value::is_boolean)
}

fn has_string(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(Value::is_string)
}

fn has_array(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(Value::is_array)
}

fn has_string_array(value: &Value, key: &str) -> bool {
    value
        .get(key)
        .and_then(Value::as_array)
        .is_some_and(|items| items.iter().all(Value::is_string))
}

pub fn is_valid_completeness_evaluation(value: &Value) -> bool {
    value.is_object()
        && has_rating(value, &COMPLETENESS_SCALE)
        && has_number(value, "percentage")
        && has_string_array(value, "implemented")
        && has_string_array(value, "incomplete")
        && has_string_array(value, "missing")
        && has_string(value, "assessment")
}

pub fn is_valid_code_quality_evaluation(value: &Value) -> bool {
    value.is_object()
        && has_rating(value, &CODE_QUALITY_SCALE)
        && has_number(value, "score")
        && has_string(value, "isolation")
        && has_array(value, "anti_patterns")
        && has_array(value, "good_practices")
        && has_string(value, "assessment")
}

pub fn is_valid_documentation_evaluation(value: &Value) -> bool {
    value.is_object()
        && has_rating(value, &DOCUMENTATION_SCALE)
        && has_number(value, "score")
        && value.get("analysis").is_some_and(|a| {
            has_number(a, "doc_coverage")
                && has_bool(a, "has_inline_comments")
                && has_bool(a, "has_usage_example")
                && has_bool(a, "has_edge_case_docs")
        })
        && has_string(value, "assessment")
}

pub fn is_valid_reliability_evaluation(value: &Value) -> bool {
    value.is_object()
        && has_rating(value, &RELIABILITY_SCALE)
        && has_number(value, "score")
        && value.get("analysis").is_some_and(|a| {
            has_number(a, "coverage")
                && has_array(a, "instances")
                && has_array(a, "gaps")
                && has_bool(a, "has_input_validation")
                && has_bool(a, "has_null_checks")
                && has_bool(a, "has_type_guards")
        })
        && has_string(value, "assessment")
}

pub fn is_valid_performance_evaluation(value: &Value) -> bool {
    value.is_object()
        && has_rating(value, &PERFORMANCE_SCALE)
        && has_number(value, "score")
        && value.get("complexity").is_some_and(Value::is_object)
        && has_array(value, "concerns")
        && has_array(value, "re_render_issues")
        && has_array(value, "optimizations")
        && has_string(value, "assessment")
}

pub fn is_valid_integration_evaluation(value: &Value) -> bool {
    value.is_object()
        && has_rating(value, &INTEGRATION_SCALE)
        && has_number(value, "score")
        && value.get("analysis").is_some_and(|a| {
            has_array(a, "options") && has_bool(a, "toggle_capable") && has_array(a, "interactions")
        })
        && has_string(value, "assessment")
}

pub fn is_valid_maintenance_evaluation(value: &Value) -> bool {
    value.is_object()
        && has_rating(value, &MAINTENANCE_SCALE)
        && has_number(value, "score")
        && value.get("analysis").is_some_and(|a| {
            has_number(a, "loc") && has_number(a, "complexity_score") && has_number(a, "impacted_files")
        })
        && has_string(value, "assessment")
}

pub fn is_valid_stress_collapse_evaluation(value: &Value) -> bool {
    value.is_object()
        && has_rating(value, &STRESS_COLLAPSE_SCALE)
        && has_bool(value, "is_robust")
        && has_array(value, "conditions")
        && has_string(value, "assessment")
}

/// Validate a full eight-dimension feature evaluation object.
pub fn is_valid_feature_evaluation(value: &Value) -> bool {
    let validators: [(&str, fn(&Value) -> bool); 8] = [
        ("completeness", is_valid_completeness_evaluation),
        ("code_quality", is_valid_code_quality_evaluation),
        ("documentation", is_valid_documentation_evaluation),
        ("reliability", is_valid_reliability_evaluation),
        ("performance", is_valid_performance_evaluation),
        ("integration", is_valid_integration_evaluation),
        ("maintenance", is_valid_maintenance_evaluation),
        ("stress_collapse", is_valid_stress_collapse_evaluation),
    ];

    value.is_object()
        && validators.iter().all(|(key, validate)| {
            value.get(*key).is_some_and(validate)
        })
}

/// Validate a single dimension's evaluation against its label set without
/// checking the full shape. Useful for spot checks on partial data.
pub fn rating_label_is_valid(dimension: Dimension, label: &str) -> bool {
    scale_for(dimension).index_of(label).is_some()
}
