//! Maintenance analysis: modularity, modification ease, and testability.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::detectors::documentation::find_declarations;
use crate::detectors::performance::find_loops;
use crate::detectors::DetectionContext;

/// Weighted control-flow complexity banded into three tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityBand {
    Low,
    Medium,
    High,
}

impl ComplexityBand {
    fn from_score(score: f64) -> Self {
        if score <= 5.0 {
            Self::Low
        } else if score <= 15.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            Self::Low => 15.0,
            Self::Medium => 10.0,
            Self::High => 5.0,
        }
    }
}

/// How many files a typical change to this unit touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationEase {
    SingleFile,
    FewFiles,
    ManyFiles,
}

impl ModificationEase {
    fn from_impacted(impacted: usize) -> Self {
        if impacted <= 1 {
            Self::SingleFile
        } else if impacted <= 3 {
            Self::FewFiles
        } else {
            Self::ManyFiles
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            Self::SingleFile => 30.0,
            Self::FewFiles => 18.0,
            Self::ManyFiles => 5.0,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::SingleFile => "changes stay within a single file",
            Self::FewFiles => "changes ripple into a few files",
            Self::ManyFiles => "changes fan out across many files",
        }
    }
}

/// How easily the unit goes under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Testability {
    Isolated,
    RequiresMocking,
    TightlyCoupled,
}

impl Testability {
    fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::Isolated
        } else if score >= 40.0 {
            Self::RequiresMocking
        } else {
            Self::TightlyCoupled
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            Self::Isolated => 35.0,
            Self::RequiresMocking => 20.0,
            Self::TightlyCoupled => 5.0,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Isolated => "testable in isolation",
            Self::RequiresMocking => "testable with mocked collaborators",
            Self::TightlyCoupled => "tightly coupled to its environment",
        }
    }
}

/// The three testability sub-scores and their band.
#[derive(Debug, Clone, Serialize)]
pub struct TestabilityAnalysis {
    /// 0-40: penalizes global/DOM/singleton access.
    pub isolation_score: f64,
    /// 0-30: penalizes dependencies that demand test doubles.
    pub mocking_score: f64,
    /// 0-30: penalizes import fan-in, deep chains, direct instantiation.
    pub coupling_score: f64,
    pub classification: Testability,
}

impl TestabilityAnalysis {
    pub fn total(&self) -> f64 {
        self.isolation_score + self.mocking_score + self.coupling_score
    }
}

/// Structured maintenance facts feeding the evaluator.
#[derive(Debug, Clone, Serialize)]
pub struct ModularityAnalysis {
    /// Non-comment, non-blank line count.
    pub loc: u32,
    /// Weighted control-flow token score normalized by max(LOC/50, 1).
    pub complexity_score: f64,
    pub complexity_band: ComplexityBand,
    pub dependency_count: usize,
    /// Own file + relative imports + estimated external importers +
    /// shared-state stores.
    pub impacted_files: usize,
    pub modification_ease: ModificationEase,
    pub testability: TestabilityAnalysis,
}

impl ModularityAnalysis {
    /// Points for the unit's size tier.
    pub fn loc_points(&self) -> f64 {
        match self.loc {
            0..=100 => 15.0,
            101..=300 => 10.0,
            301..=500 => 5.0,
            _ => 0.0,
        }
    }

    /// Points for the dependency-count tier.
    pub fn dependency_points(&self) -> f64 {
        match self.dependency_count {
            0..=3 => 5.0,
            4..=6 => 3.0,
            _ => 1.0,
        }
    }
}

static IF_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\bif\b").ok());
static LOOP_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bfor\b|\bwhile\b").ok());
static SWITCH_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bswitch\b|\bmatch\b").ok());
static TERNARY_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\?[^.?:]*:").ok());
static CHAINED_CALL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\)\s*\.\s*\w+\s*\(").ok());
static IMPORT_DECL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:import\s|from\s+\S+\s+import|use\s+\w|const\s+\w+\s*=\s*require\()").ok()
});
static RELATIVE_IMPORT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"['\x22]\.{1,2}/|use (?:crate|super)::"#).ok()
});
static EXPORT_DECL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*export\s|^\s*pub(?:\(crate\))?\s").ok());
static STORE_USAGE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"useContext\s*\(|createContext|useSelector\s*\(|\bstore\.|useStore\s*\(").ok()
});
static GLOBAL_TOUCH: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b(?:window|document|globalThis|global|process)\.|\.getInstance\s*\(").ok()
});
static MOCK_HEAVY_DEPS: [(&str, &str); 5] = [
    ("network", r"fetch\s*\(|axios\.|http\."),
    ("filesystem", r"\bfs\.|readFile|writeFile|std::fs"),
    ("database", r"\bquery\s*\(|\bsql\b|\.exec\s*\(|findOne\(|\bORM\b"),
    ("timers", r"setTimeout\s*\(|setInterval\s*\("),
    ("shared state", r"useContext\s*\(|useSelector\s*\(|\bstore\."),
];
static DEEP_CHAIN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*){3,}").ok()
});
static DIRECT_NEW: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bnew\s+[A-Z]\w*\s*\(").ok());

/// Compute the maintenance metrics for the unit.
pub fn analyze_modularity(ctx: &DetectionContext<'_>) -> ModularityAnalysis {
    let unit = ctx.unit;
    let loc = unit.code_line_count();

    // Weighted control-flow tokens.
    let count = |re: &LazyLock<Option<Regex>>| -> f64 {
        re.as_ref()
            .map(|r| {
                unit.code_lines()
                    .map(|(_, line)| r.find_iter(line).count())
                    .sum::<usize>() as f64
            })
            .unwrap_or(0.0)
    };
    let max_nesting = find_loops(ctx).iter().map(|l| l.nesting).max().unwrap_or(0) as f64;
    let function_count = find_declarations(ctx).len() as f64;

    let raw = count(&IF_TOKEN)
        + 2.0 * count(&LOOP_TOKEN)
        + 3.0 * count(&SWITCH_TOKEN)
        + count(&TERNARY_TOKEN)
        + 2.0 * max_nesting
        + 0.5 * function_count
        + count(&CHAINED_CALL);
    let normalizer = (loc as f64 / 50.0).max(1.0);
    let complexity_score = raw / normalizer;

    // Imports and exports.
    let import_count = matching_line_count(ctx, &IMPORT_DECL);
    let relative_import_count = matching_line_count(ctx, &RELATIVE_IMPORT);
    let export_count = matching_line_count(ctx, &EXPORT_DECL);
    let store_file_count = usize::from(line_matches(ctx, &STORE_USAGE));

    // Own file + relative imports + estimated external importers (exported
    // symbols, capped) + shared-state store files.
    let estimated_importers = export_count.min(3);
    let impacted_files = 1 + relative_import_count + estimated_importers + store_file_count;

    let testability = analyze_testability(ctx, import_count);

    ModularityAnalysis {
        loc,
        complexity_score,
        complexity_band: ComplexityBand::from_score(complexity_score),
        dependency_count: import_count,
        impacted_files,
        modification_ease: ModificationEase::from_impacted(impacted_files),
        testability,
    }
}

fn analyze_testability(ctx: &DetectionContext<'_>, import_count: usize) -> TestabilityAnalysis {
    // Isolation 0-40: each distinct global-ish touch costs 10.
    let global_touches = matching_line_count(ctx, &GLOBAL_TOUCH);
    let isolation_score = (40.0 - 10.0 * global_touches.min(4) as f64).max(0.0);

    // Mocking burden 0-30: each dependency class that would need a test
    // double costs 6.
    let mock_classes = MOCK_HEAVY_DEPS
        .iter()
        .filter(|(_, pattern)| {
            Regex::new(pattern)
                .ok()
                .is_some_and(|re| ctx.unit.code_lines().any(|(_, line)| re.is_match(line)))
        })
        .count();
    let mocking_score = (30.0 - 6.0 * mock_classes as f64).max(0.0);

    // Coupling 0-30: import fan-in past 3, deep chains, direct
    // instantiation.
    let deep_chains = matching_line_count(ctx, &DEEP_CHAIN);
    let direct_news = matching_line_count(ctx, &DIRECT_NEW);
    let coupling_score = (30.0
        - 2.0 * import_count.saturating_sub(3) as f64
        - deep_chains as f64
        - 3.0 * direct_news as f64)
        .max(0.0);

    let total = isolation_score + mocking_score + coupling_score;

    TestabilityAnalysis {
        isolation_score,
        mocking_score,
        coupling_score,
        classification: Testability::from_score(total),
    }
}

fn matching_line_count(ctx: &DetectionContext<'_>, re: &LazyLock<Option<Regex>>) -> usize {
    re.as_ref()
        .map(|r| {
            ctx.unit
                .code_lines()
                .filter(|(_, line)| r.is_match(line))
                .count()
        })
        .unwrap_or(0)
}

fn line_matches(ctx: &DetectionContext<'_>, re: &LazyLock<Option<Regex>>) -> bool {
    re.as_ref()
        .is_some_and(|r| ctx.unit.code_lines().any(|(_, line)| r.is_match(line)))
}
