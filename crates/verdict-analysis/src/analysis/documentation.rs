//! Documentation analysis: coverage ratios over declarations, complex
//! constructs, and names.

use serde::Serialize;

use crate::detectors::documentation::{
    find_complex_constructs, find_declarations, has_edge_case_docs, has_inline_comments,
    has_usage_example, is_self_documenting,
};
use crate::detectors::DetectionContext;

/// Structured documentation facts feeding the evaluator.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentationAnalysis {
    pub declaration_count: usize,
    pub documented_count: usize,
    /// Documented declarations / all declarations, in percent. 0 when no
    /// declarations are found.
    pub doc_coverage: f64,
    pub complex_construct_count: usize,
    pub commented_complex_count: usize,
    /// Complex constructs with a nearby comment, as a ratio. 0 when none
    /// exist.
    pub commented_complex_ratio: f64,
    /// Declared names judged self-documenting, as a ratio.
    pub self_doc_name_ratio: f64,
    /// Complex code is commented where it exists, or plain inline comments
    /// are present otherwise.
    pub has_inline_comments: bool,
    pub has_usage_example: bool,
    pub has_edge_case_docs: bool,
}

/// Compute the three coverage ratios and the documentation extras.
pub fn analyze_documentation(ctx: &DetectionContext<'_>) -> DocumentationAnalysis {
    let declarations = find_declarations(ctx);
    let documented_count = declarations.iter().filter(|d| d.documented).count();
    let doc_coverage = if declarations.is_empty() {
        0.0
    } else {
        documented_count as f64 / declarations.len() as f64 * 100.0
    };

    let constructs = find_complex_constructs(ctx);
    let commented_complex_count = constructs.iter().filter(|c| c.commented).count();
    let commented_complex_ratio = if constructs.is_empty() {
        0.0
    } else {
        commented_complex_count as f64 / constructs.len() as f64
    };

    let min_len = ctx.config.documentation.self_doc_min_len;
    let self_doc_name_ratio = if declarations.is_empty() {
        0.0
    } else {
        declarations
            .iter()
            .filter(|d| is_self_documenting(&d.name, min_len))
            .count() as f64
            / declarations.len() as f64
    };

    // Complex code with comments is the strong signal; plain inline
    // comments only count when nothing complex exists to annotate.
    let inline = if constructs.is_empty() {
        has_inline_comments(ctx)
    } else {
        commented_complex_ratio >= 0.5
    };

    DocumentationAnalysis {
        declaration_count: declarations.len(),
        documented_count,
        doc_coverage,
        complex_construct_count: constructs.len(),
        commented_complex_count,
        commented_complex_ratio,
        self_doc_name_ratio,
        has_inline_comments: inline,
        has_usage_example: has_usage_example(ctx),
        has_edge_case_docs: has_edge_case_docs(ctx),
    }
}
