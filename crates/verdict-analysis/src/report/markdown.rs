//! Checkbox/bullet markdown renderers, one per dimension.

use std::fmt::Write as _;

use crate::engine::FeatureEvaluation;
use crate::evaluators::{
    CodeQualityEvaluation, CompletenessEvaluation, DocumentationEvaluation, IntegrationEvaluation,
    MaintenanceEvaluation, PerformanceEvaluation, ReliabilityEvaluation, StressCollapseEvaluation,
};
use crate::evidence::CodeEvidence;

fn location(evidence: &CodeEvidence) -> String {
    format!("{}:{}", evidence.file_path, evidence.line_range.start)
}

pub fn completeness_markdown(eval: &CompletenessEvaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Completeness: {} ({}%)", eval.rating, eval.percentage);
    out.push('\n');
    for name in &eval.implemented {
        let _ = writeln!(out, "- [x] {name}");
    }
    for name in &eval.incomplete {
        let _ = writeln!(out, "- [ ] {name} (incomplete)");
    }
    for name in &eval.missing {
        let _ = writeln!(out, "- [ ] {name} (missing)");
    }
    let _ = writeln!(out, "\n{}", eval.assessment);
    out
}

pub fn code_quality_markdown(eval: &CodeQualityEvaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "## Code Quality: {} (score {:.0})",
        eval.rating, eval.score
    );
    out.push('\n');
    if !eval.anti_patterns.is_empty() {
        let _ = writeln!(out, "Anti-patterns:");
        for ap in &eval.anti_patterns {
            let _ = writeln!(out, "- **{}** at {}: {}", ap.name, location(&ap.evidence), ap.issue);
            let _ = writeln!(out, "  - Better: {}", ap.better_approach);
        }
    }
    if !eval.good_practices.is_empty() {
        let _ = writeln!(out, "Good practices:");
        for gp in &eval.good_practices {
            let _ = writeln!(out, "- [x] {}: {}", gp.name, gp.description);
        }
    }
    let _ = writeln!(out, "\n{}", eval.assessment);
    out
}

pub fn documentation_markdown(eval: &DocumentationEvaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "## Documentation: {} (score {:.0})",
        eval.rating, eval.score
    );
    out.push('\n');
    let a = &eval.analysis;
    let _ = writeln!(
        out,
        "- Doc coverage: {}/{} declarations ({:.0}%)",
        a.documented_count, a.declaration_count, a.doc_coverage
    );
    let _ = writeln!(
        out,
        "- Commented complex blocks: {}/{}",
        a.commented_complex_count, a.complex_construct_count
    );
    let _ = writeln!(
        out,
        "- Self-documenting names: {:.0}%",
        a.self_doc_name_ratio * 100.0
    );
    let _ = writeln!(out, "- [{}] usage example", check(a.has_usage_example));
    let _ = writeln!(out, "- [{}] edge-case docs", check(a.has_edge_case_docs));
    let _ = writeln!(out, "\n{}", eval.assessment);
    out
}

pub fn reliability_markdown(eval: &ReliabilityEvaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "## Reliability: {} (score {:.0})",
        eval.rating, eval.score
    );
    out.push('\n');
    let a = &eval.analysis;
    let _ = writeln!(
        out,
        "- Coverage: {}/{} risky operations handled ({:.0}%)",
        a.handled_count, a.risky_operation_count, a.coverage
    );
    for instance in &a.instances {
        let _ = writeln!(
            out,
            "- [x] {} at {}",
            instance.kind,
            location(&instance.evidence)
        );
    }
    for gap in &a.gaps {
        let _ = writeln!(
            out,
            "- [ ] {} risk: {} ({})",
            gap.risk, gap.scenario, gap.location
        );
    }
    let _ = writeln!(out, "\n{}", eval.assessment);
    out
}

pub fn performance_markdown(eval: &PerformanceEvaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "## Performance: {} (score {:.0})",
        eval.rating, eval.score
    );
    out.push('\n');
    let _ = writeln!(
        out,
        "- Complexity: {} ({} loops, max nesting {})",
        eval.complexity.class.notation(),
        eval.complexity.loop_count,
        eval.complexity.max_nesting
    );
    for concern in &eval.concerns {
        let _ = writeln!(
            out,
            "- [ ] {} at {}: {}",
            concern.id,
            location(&concern.evidence),
            concern.issue
        );
    }
    for issue in &eval.re_render_issues {
        let _ = writeln!(
            out,
            "- [ ] re-render: {} at {}",
            issue.issue,
            location(&issue.evidence)
        );
    }
    for opt in &eval.optimizations {
        let _ = writeln!(out, "- [x] {}: {}", opt.technique, opt.description);
    }
    let _ = writeln!(out, "\n{}", eval.assessment);
    out
}

pub fn integration_markdown(eval: &IntegrationEvaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "## Integration: {} (score {:.0})",
        eval.rating, eval.score
    );
    out.push('\n');
    let a = &eval.analysis;
    for option in &a.options {
        let _ = writeln!(
            out,
            "- [{}] `{}`: {}",
            check(option.present),
            option.name,
            option.option_type
        );
    }
    let _ = writeln!(out, "- [{}] toggle capable", check(a.toggle_capable));
    let _ = writeln!(out, "- Extensibility: {}", a.extensibility.describe());
    for interaction in &a.interactions {
        let _ = writeln!(out, "- {}", interaction.describe());
    }
    let _ = writeln!(out, "\n{}", eval.assessment);
    out
}

pub fn maintenance_markdown(eval: &MaintenanceEvaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "## Maintenance: {} (score {:.0})",
        eval.rating, eval.score
    );
    out.push('\n');
    let a = &eval.analysis;
    let _ = writeln!(out, "- Size: {} code lines", a.loc);
    let _ = writeln!(
        out,
        "- Control-flow complexity: {:.1} ({:?})",
        a.complexity_score, a.complexity_band
    );
    let _ = writeln!(out, "- Dependencies: {}", a.dependency_count);
    let _ = writeln!(out, "- Impacted files per change: {}", a.impacted_files);
    let _ = writeln!(
        out,
        "- Testability: {} ({:.0}/100)",
        a.testability.classification.describe(),
        a.testability.total()
    );
    let _ = writeln!(out, "\n{}", eval.assessment);
    out
}

pub fn stress_collapse_markdown(eval: &StressCollapseEvaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Stress Collapse: {}", eval.rating);
    out.push('\n');
    if let Some(reason) = &eval.robust_reason {
        let _ = writeln!(out, "- [x] robust: {reason}");
    }
    for condition in &eval.conditions {
        let _ = writeln!(out, "- [ ] `{}`", condition.id);
        let _ = writeln!(out, "  - Threshold: {}", condition.threshold);
        let _ = writeln!(out, "  - Expected: {}", condition.expected_behavior);
        for reason in &condition.reasoning {
            let _ = writeln!(out, "  - Why: {reason}");
        }
        for reference in &condition.code_pattern_references {
            let _ = writeln!(out, "  - Evidence: {}", location(reference));
        }
    }
    let _ = writeln!(out, "\n{}", eval.assessment);
    out
}

/// Render all eight dimensions of a feature evaluation.
pub fn feature_markdown(evaluation: &FeatureEvaluation) -> String {
    [
        completeness_markdown(&evaluation.completeness),
        code_quality_markdown(&evaluation.code_quality),
        documentation_markdown(&evaluation.documentation),
        reliability_markdown(&evaluation.reliability),
        performance_markdown(&evaluation.performance),
        integration_markdown(&evaluation.integration),
        maintenance_markdown(&evaluation.maintenance),
        stress_collapse_markdown(&evaluation.stress_collapse),
    ]
    .join("\n")
}

fn check(flag: bool) -> char {
    if flag {
        'x'
    } else {
        ' '
    }
}
