//! Code quality detectors: anti-patterns and good practices.
//!
//! Five anti-pattern detectors (excessive nesting, deep property chains,
//! magic literals, duplication, tight coupling) and one good-practice scan.
//! Remediation text and corrected-code exemplars come from the fixed
//! template table below; only the evidence varies per occurrence.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;

use super::DetectionContext;
use crate::findings::{AntiPattern, Finding, GoodPractice};
use crate::source::LineKind;

/// Fixed remediation template for one anti-pattern type.
pub struct AntiPatternTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub issue: &'static str,
    pub impact: &'static str,
    pub better_approach: &'static str,
    pub exemplar: &'static str,
}

/// The per-type remediation table. Versioned constant data so tests can
/// assert against fixed fixtures.
pub static ANTI_PATTERN_TEMPLATES: [AntiPatternTemplate; 5] = [
    AntiPatternTemplate {
        id: "quality-excessive-nesting",
        name: "Excessive nesting",
        issue: "Control flow nests deeper than the configured limit",
        impact: "Deeply nested branches are hard to read, test, and modify safely",
        better_approach: "Flatten with guard clauses and extract the inner logic into named functions",
        exemplar: "function process(items) {\n  if (!items.length) return [];\n  return items.filter(isActive).map(toRow);\n}",
    },
    AntiPatternTemplate {
        id: "quality-deep-property-chain",
        name: "Deep property chain",
        issue: "A long property chain reaches through several intermediate objects",
        impact: "Any undefined link breaks the whole expression and couples the caller to distant structure",
        better_approach: "Destructure once at the top, or expose an accessor on the owning object",
        exemplar: "const { street } = user.address;\n// or defensively:\nconst street = user?.address?.street ?? \"\";",
    },
    AntiPatternTemplate {
        id: "quality-magic-literal",
        name: "Magic literal",
        issue: "A bare numeric or string literal is used outside a declaration context",
        impact: "The literal's meaning is invisible at the use site and changes require a hunt across the file",
        better_approach: "Name the value as a constant next to its peers",
        exemplar: "const MAX_RETRIES = 3;\nif (attempts > MAX_RETRIES) {\n  giveUp();\n}",
    },
    AntiPatternTemplate {
        id: "quality-duplication",
        name: "Duplicated block",
        issue: "Two blocks share most of their vocabulary (word-set similarity heuristic)",
        impact: "Fixes and behavior changes must be applied in every copy or the copies drift apart",
        better_approach: "Extract the shared logic into one helper and call it from both sites",
        exemplar: "function formatRow(row) {\n  return `${row.id}: ${row.label}`;\n}\n// call formatRow from both call sites",
    },
    AntiPatternTemplate {
        id: "quality-tight-coupling",
        name: "Tight coupling",
        issue: "The unit constructs or reaches for a concrete collaborator directly",
        impact: "The dependency cannot be substituted, which blocks reuse and forces heavyweight tests",
        better_approach: "Accept the collaborator as a parameter or through an injected interface",
        exemplar: "constructor(service) {\n  this.service = service; // injected, not constructed here\n}",
    },
];

/// Look up a template by id. Falls back to the first entry, which keeps
/// detector code total even if the table is edited.
pub fn template(id: &str) -> &'static AntiPatternTemplate {
    ANTI_PATTERN_TEMPLATES
        .iter()
        .find(|t| t.id == id)
        .unwrap_or(&ANTI_PATTERN_TEMPLATES[0])
}

fn anti_pattern(
    ctx: &DetectionContext<'_>,
    id: &str,
    detail: String,
    start: u32,
    end: u32,
) -> Finding {
    let t = template(id);
    Finding::AntiPattern(AntiPattern {
        id: t.id.to_string(),
        name: t.name.to_string(),
        issue: format!("{}: {}", t.issue, detail),
        impact: t.impact.to_string(),
        better_approach: t.better_approach.to_string(),
        exemplar: t.exemplar.to_string(),
        evidence: ctx.cite(start, end),
    })
}

// ---- Excessive nesting ----

/// One finding per contiguous region whose brace depth exceeds the limit.
pub fn detect_excessive_nesting(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let threshold = ctx.config.quality.max_nesting_depth;
    let unit = ctx.unit;
    let mut findings = Vec::new();
    let mut region_start: Option<u32> = None;
    let mut region_max = 0u32;

    for number in 1..=unit.line_count() {
        let depth = unit.depth_before(number);
        let deep = unit.kind(number) == LineKind::Code && depth > threshold;
        if deep {
            region_max = region_max.max(depth);
            if region_start.is_none() {
                region_start = Some(number);
            }
        } else if let Some(start) = region_start.take() {
            findings.push(nesting_finding(ctx, start, number - 1, region_max, threshold));
            region_max = 0;
        }
    }
    if let Some(start) = region_start {
        findings.push(nesting_finding(ctx, start, unit.line_count(), region_max, threshold));
    }

    findings
}

fn nesting_finding(
    ctx: &DetectionContext<'_>,
    start: u32,
    end: u32,
    max_depth: u32,
    threshold: u32,
) -> Finding {
    anti_pattern(
        ctx,
        "quality-excessive-nesting",
        format!("depth reaches {max_depth} (limit {threshold})"),
        start,
        end,
    )
}

// ---- Deep property chains ----

static IMPORT_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(import|from|use|package|require)\b").ok());

/// Chains of `a.b.c.d` style access with at least the configured number of
/// segments.
pub fn detect_deep_property_chains(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let depth = ctx.config.quality.property_chain_depth.max(2);
    let pattern = format!(
        r"[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*){{{},}}",
        depth - 1
    );
    let Ok(chain_re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let mut findings = Vec::new();
    for (number, line) in ctx.unit.code_lines() {
        if matches_opt(&IMPORT_LINE, line) {
            continue;
        }
        if let Some(m) = chain_re.find(line) {
            findings.push(anti_pattern(
                ctx,
                "quality-deep-property-chain",
                format!("`{}`", truncate(m.as_str(), 60)),
                number,
                number,
            ));
        }
    }
    findings
}

// ---- Magic literals ----

static NUMBER_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").ok());
static COMPARED_STRING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(?:[=!]=+|\bcase\b)\s*["']([^"']{2,40})["']"#).ok());
static CONSTANT_DECL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:export\s+)?(?:pub(?:\(crate\))?\s+)?(?:const|static|final|enum)\b|^\s*[A-Z][A-Z0-9_]*\s*[:=]").ok()
});

/// Numbers and comparison strings allowed to appear bare.
const ALLOWED_NUMBERS: [&str; 9] = ["0", "1", "2", "10", "100", "1000", "0.0", "0.5", "1.0"];

/// Literals outside the allow-list, used outside declaration contexts.
pub fn detect_magic_literals(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (number, line) in ctx.unit.code_lines() {
        if matches_opt(&CONSTANT_DECL, line) || matches_opt(&IMPORT_LINE, line) {
            continue;
        }

        let magic_number = NUMBER_LITERAL.as_ref().and_then(|re| {
            re.find_iter(line)
                .map(|m| m.as_str())
                .find(|n| !ALLOWED_NUMBERS.contains(n))
        });
        if let Some(value) = magic_number {
            findings.push(anti_pattern(
                ctx,
                "quality-magic-literal",
                format!("`{value}`"),
                number,
                number,
            ));
            continue;
        }

        if let Some(caps) = COMPARED_STRING.as_ref().and_then(|re| re.captures(line)) {
            if let Some(value) = caps.get(1) {
                findings.push(anti_pattern(
                    ctx,
                    "quality-magic-literal",
                    format!("\"{}\"", truncate(value.as_str(), 40)),
                    number,
                    number,
                ));
            }
        }
    }

    findings
}

// ---- Duplication ----

static WORD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").ok());

/// Maximum candidate blocks entering the pairwise comparison.
const MAX_DUPLICATION_BLOCKS: usize = 64;

/// Pairwise word-set Jaccard similarity between candidate blocks.
///
/// A confidence heuristic with a configurable threshold (default 0.80):
/// high lexical overlap is treated as duplication without verifying
/// structural identity.
pub fn detect_duplication(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let Some(word_re) = WORD.as_ref() else {
        return Vec::new();
    };
    let threshold = ctx.config.quality.duplication_threshold;
    let min_lines = ctx.config.quality.min_duplicate_block_lines.max(1);

    let blocks = candidate_blocks(ctx, min_lines, word_re);
    let mut findings = Vec::new();

    for i in 0..blocks.len() {
        for j in (i + 1)..blocks.len() {
            let similarity = jaccard(&blocks[i].words, &blocks[j].words);
            if similarity >= threshold {
                findings.push(anti_pattern(
                    ctx,
                    "quality-duplication",
                    format!(
                        "lines {}-{} and {}-{} are {:.0}% similar",
                        blocks[i].start,
                        blocks[i].end,
                        blocks[j].start,
                        blocks[j].end,
                        similarity * 100.0
                    ),
                    blocks[i].start,
                    blocks[i].end,
                ));
            }
        }
    }

    findings
}

struct Block<'a> {
    start: u32,
    end: u32,
    words: FxHashSet<&'a str>,
}

fn candidate_blocks<'a>(
    ctx: &DetectionContext<'a>,
    min_lines: usize,
    word_re: &Regex,
) -> Vec<Block<'a>> {
    let unit = ctx.unit;
    let mut blocks: Vec<Block<'a>> = Vec::new();
    let mut run_start: Option<u32> = None;

    let mut close_run = |start: u32, end: u32, blocks: &mut Vec<Block<'a>>| {
        if (end - start + 1) as usize >= min_lines {
            let mut words = FxHashSet::default();
            for n in start..=end {
                for m in word_re.find_iter(unit.line(n)) {
                    words.insert(m.as_str());
                }
            }
            blocks.push(Block { start, end, words });
        }
    };

    for number in 1..=unit.line_count() {
        if unit.kind(number) == LineKind::Code {
            if run_start.is_none() {
                run_start = Some(number);
            }
        } else if let Some(start) = run_start.take() {
            close_run(start, number - 1, &mut blocks);
        }
    }
    if let Some(start) = run_start {
        close_run(start, unit.line_count(), &mut blocks);
    }

    if blocks.len() > MAX_DUPLICATION_BLOCKS {
        tracing::debug!(
            blocks = blocks.len(),
            cap = MAX_DUPLICATION_BLOCKS,
            "duplication comparison truncated"
        );
        blocks.truncate(MAX_DUPLICATION_BLOCKS);
    }
    blocks
}

fn jaccard<'a>(a: &FxHashSet<&'a str>, b: &FxHashSet<&'a str>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = (a.len() + b.len()) as f64 - intersection;
    if union == 0.0 {
        0.0
    } else {
        intersection / union
    }
}

// ---- Tight coupling ----

static DIRECT_NEW: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bnew\s+([A-Z]\w*)\s*\(").ok());
static SINGLETON_ACCESS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\.getInstance\s*\(|::instance\s*\(\)").ok());
static GLOBAL_ACCESS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(?:window|document|globalThis|global|process)\.").ok());

/// Built-in constructors that do not indicate coupling.
const BUILTIN_CLASSES: [&str; 10] = [
    "Error", "Map", "Set", "Array", "Promise", "Date", "RegExp", "WeakMap", "WeakSet", "URL",
];

/// Direct instantiation, singleton access, and global-object access.
pub fn detect_tight_coupling(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (number, line) in ctx.unit.code_lines() {
        let direct = DIRECT_NEW.as_ref().and_then(|re| {
            re.captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str())
                .filter(|class| !BUILTIN_CLASSES.contains(class))
        });
        if let Some(class) = direct {
            findings.push(anti_pattern(
                ctx,
                "quality-tight-coupling",
                format!("direct instantiation of `{class}`"),
                number,
                number,
            ));
            continue;
        }
        if matches_opt(&SINGLETON_ACCESS, line) {
            findings.push(anti_pattern(
                ctx,
                "quality-tight-coupling",
                "singleton access".to_string(),
                number,
                number,
            ));
            continue;
        }
        if matches_opt(&GLOBAL_ACCESS, line) {
            findings.push(anti_pattern(
                ctx,
                "quality-tight-coupling",
                "global object access".to_string(),
                number,
                number,
            ));
        }
    }

    findings
}

// ---- Good practices ----

static GUARD_CLAUSE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*if\s*\(.*\)\s*\{?\s*(?:return|throw|continue|break)\b").ok());
static NAMED_CONSTANT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(?:const|static)\s+[A-Z][A-Z0-9_]{2,}\s*[:=]").ok());
static DEFENSIVE_ACCESS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\?\.|\?\?|\.unwrap_or\(|if let Some\(").ok());
static INPUT_VALIDATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"if\s*\(\s*(?:!\w|typeof\b|.*[=!]==\s*(?:null|undefined))").ok());
static IMMUTABLE_DECL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Object\.freeze\(|\bas const\b|\breadonly\b").ok());

/// Good-practice scan. At most one finding per practice kind, with the
/// occurrence count in the description.
pub fn detect_good_practices(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let practices: [(&str, &str, &LazyLock<Option<Regex>>); 5] = [
        (
            "Guard clauses",
            "early exits keep the main path unindented",
            &GUARD_CLAUSE,
        ),
        (
            "Named constants",
            "values are declared with intention-revealing names",
            &NAMED_CONSTANT,
        ),
        (
            "Defensive optional access",
            "absent values are handled at the access site",
            &DEFENSIVE_ACCESS,
        ),
        (
            "Input validation",
            "arguments are checked before use",
            &INPUT_VALIDATION,
        ),
        (
            "Immutable declarations",
            "data is frozen or declared read-only",
            &IMMUTABLE_DECL,
        ),
    ];

    let mut findings = Vec::new();
    for (name, description, pattern) in practices {
        let mut first_line = None;
        let mut count = 0usize;
        for (number, line) in ctx.unit.code_lines() {
            if matches_opt(pattern, line) {
                count += 1;
                if first_line.is_none() {
                    first_line = Some(number);
                }
            }
        }
        if let Some(line) = first_line {
            findings.push(Finding::GoodPractice(GoodPractice {
                name: name.to_string(),
                description: format!("{description} ({count} occurrence(s))"),
                evidence: ctx.cite_line(line),
            }));
        }
    }

    findings
}

// ---- Shared helpers ----

fn matches_opt(re: &LazyLock<Option<Regex>>, line: &str) -> bool {
    re.as_ref().is_some_and(|r| r.is_match(line))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
