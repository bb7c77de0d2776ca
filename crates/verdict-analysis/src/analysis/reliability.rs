//! Reliability analysis: risky-operation coverage and gap tiers.

use serde::Serialize;

use crate::detectors::registry::DetectorRegistry;
use crate::detectors::reliability::{
    edge_case_guard_count, find_protect_blocks, find_risky_operations, handled_by_adjacent_catch,
    has_input_validation, has_null_checks, has_type_guards,
};
use crate::detectors::DetectionContext;
use crate::findings::{ErrorHandlingGap, ErrorHandlingInstance, Finding, RiskLevel};

use verdict_core::Dimension;

/// Structured reliability facts feeding the evaluator.
#[derive(Debug, Clone, Serialize)]
pub struct ReliabilityAnalysis {
    pub risky_operation_count: usize,
    pub handled_count: usize,
    /// Handled / total risky, in percent. 100 by convention when no risky
    /// operations exist.
    pub coverage: f64,
    pub instances: Vec<ErrorHandlingInstance>,
    pub gaps: Vec<ErrorHandlingGap>,
    pub has_input_validation: bool,
    pub has_null_checks: bool,
    pub has_type_guards: bool,
    /// Edge-case guard density against risky operations, capped at 1.0.
    pub edge_case_ratio: f64,
}

impl ReliabilityAnalysis {
    pub fn high_risk_gap_count(&self) -> usize {
        self.gaps.iter().filter(|g| g.risk == RiskLevel::High).count()
    }
}

/// Detect risky operations, match them against error-handling constructs,
/// and compute coverage.
pub fn analyze_reliability(
    ctx: &DetectionContext<'_>,
    registry: &DetectorRegistry,
) -> ReliabilityAnalysis {
    let instances: Vec<ErrorHandlingInstance> = registry
        .run_dimension(Dimension::Reliability, ctx)
        .into_iter()
        .filter_map(|finding| match finding {
            Finding::ErrorInstance(instance) => Some(instance),
            _ => None,
        })
        .collect();

    let protect_blocks = find_protect_blocks(ctx);
    let operations = find_risky_operations(ctx);

    let mut handled_count = 0usize;
    let mut gaps = Vec::new();

    for op in &operations {
        let in_protect_block = protect_blocks.iter().any(|b| b.range.contains(op.line));
        let handled = in_protect_block || handled_by_adjacent_catch(ctx, op.line);
        if handled {
            handled_count += 1;
        } else {
            gaps.push(ErrorHandlingGap {
                scenario: format!("{} can fail with no handler in reach", op.kind.describe()),
                location: format!("{}:{}", ctx.unit.file_path, op.line),
                risk: op.kind.risk(),
                evidence: ctx.cite_line(op.line),
            });
        }
    }

    let coverage = if operations.is_empty() {
        100.0
    } else {
        handled_count as f64 / operations.len() as f64 * 100.0
    };

    let edge_hits = edge_case_guard_count(ctx);
    let edge_case_ratio = if operations.is_empty() {
        if edge_hits > 0 {
            1.0
        } else {
            0.0
        }
    } else {
        (edge_hits as f64 / operations.len() as f64).min(1.0)
    };

    ReliabilityAnalysis {
        risky_operation_count: operations.len(),
        handled_count,
        coverage,
        instances,
        gaps,
        has_input_validation: has_input_validation(ctx),
        has_null_checks: has_null_checks(ctx),
        has_type_guards: has_type_guards(ctx),
        edge_case_ratio,
    }
}
