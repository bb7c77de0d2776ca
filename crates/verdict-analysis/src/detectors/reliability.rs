//! Reliability detectors: risky operations and error-handling constructs.
//!
//! Risky operations are classified by kind (which fixes their risk tier
//! when unhandled); error-handling instances carry the line range they
//! protect so the analyzer can match operations against them.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use regex::Regex;

use verdict_core::LineRange;

use super::DetectionContext;
use crate::findings::{ErrorHandlingInstance, Finding, RiskLevel};
use crate::source::LineKind;

/// Kinds of operations that can fail at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskyKind {
    NetworkCall,
    Parsing,
    Serialization,
    DynamicEval,
    DomOrGlobalAccess,
    StorageIo,
    AsyncAwait,
}

impl RiskyKind {
    /// Risk tier assigned when the operation is unhandled.
    pub fn risk(&self) -> RiskLevel {
        match self {
            Self::NetworkCall | Self::Parsing | Self::DynamicEval => RiskLevel::High,
            Self::AsyncAwait | Self::StorageIo | Self::Serialization => RiskLevel::Medium,
            Self::DomOrGlobalAccess => RiskLevel::Low,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::NetworkCall => "network call",
            Self::Parsing => "parsing operation",
            Self::Serialization => "serialization operation",
            Self::DynamicEval => "dynamic evaluation",
            Self::DomOrGlobalAccess => "DOM or global access",
            Self::StorageIo => "storage or file I/O",
            Self::AsyncAwait => "awaited async operation",
        }
    }
}

/// A detected risky operation.
#[derive(Debug, Clone)]
pub struct RiskyOperation {
    pub kind: RiskyKind,
    pub line: u32,
    pub excerpt: String,
}

/// Keyword table for risky operations, ordered by classification priority:
/// the first matching kind wins for a line.
static RISKY_KEYWORDS: [(RiskyKind, &[&str]); 7] = [
    (
        RiskyKind::NetworkCall,
        &["fetch(", "axios.", "http.get", "http.post", "XMLHttpRequest", "reqwest::"],
    ),
    (
        RiskyKind::Parsing,
        &["JSON.parse", "parseInt(", "parseFloat(", "from_str(", ".parse::<", "yaml.load"],
    ),
    (
        RiskyKind::Serialization,
        &["JSON.stringify", "to_string(&", "serialize(", "toJSON("],
    ),
    (
        RiskyKind::DynamicEval,
        &["eval(", "new Function(", "exec(", "execSync("],
    ),
    (
        RiskyKind::StorageIo,
        &["localStorage.", "sessionStorage.", "fs.", "readFile", "writeFile", "indexedDB"],
    ),
    (
        RiskyKind::DomOrGlobalAccess,
        &["document.", "window.", "navigator."],
    ),
    (RiskyKind::AsyncAwait, &["await "]),
];

struct RiskyMatcher {
    automaton: AhoCorasick,
    kinds: Vec<RiskyKind>,
}

static RISKY_MATCHER: LazyLock<Option<RiskyMatcher>> = LazyLock::new(|| {
    let mut patterns = Vec::new();
    let mut kinds = Vec::new();
    for (kind, keywords) in RISKY_KEYWORDS.iter() {
        for keyword in keywords.iter() {
            patterns.push(*keyword);
            kinds.push(*kind);
        }
    }
    AhoCorasick::new(&patterns)
        .ok()
        .map(|automaton| RiskyMatcher { automaton, kinds })
});

/// Scan for risky operations, one per line (the highest-priority kind
/// matched on that line wins).
pub fn find_risky_operations(ctx: &DetectionContext<'_>) -> Vec<RiskyOperation> {
    let Some(matcher) = RISKY_MATCHER.as_ref() else {
        return Vec::new();
    };

    let mut operations = Vec::new();
    for (number, line) in ctx.unit.code_lines() {
        let best = matcher
            .automaton
            .find_iter(line)
            .map(|m| matcher.kinds[m.pattern().as_usize()])
            .min_by_key(|kind| priority(*kind));
        if let Some(kind) = best {
            operations.push(RiskyOperation {
                kind,
                line: number,
                excerpt: line.trim().to_string(),
            });
        }
    }
    operations
}

fn priority(kind: RiskyKind) -> usize {
    RISKY_KEYWORDS
        .iter()
        .position(|(k, _)| *k == kind)
        .unwrap_or(usize::MAX)
}

/// A protect-block (try/catch style construct) and the lines it covers.
#[derive(Debug, Clone)]
pub struct ProtectBlock {
    pub range: LineRange,
}

static TRY_OPEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\}?\s*)?try\s*\{|^\s*begin\s*$").ok());

/// Locate try-blocks and their full line ranges (through catch/finally).
pub fn find_protect_blocks(ctx: &DetectionContext<'_>) -> Vec<ProtectBlock> {
    let Some(try_re) = TRY_OPEN.as_ref() else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    for (number, line) in ctx.unit.numbered_lines() {
        if ctx.unit.kind(number) != LineKind::Code {
            continue;
        }
        if try_re.is_match(line) {
            let end = ctx.unit.block_end(number);
            blocks.push(ProtectBlock {
                range: LineRange::new(number, end),
            });
        }
    }
    blocks
}

static PROMISE_CATCH: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\.catch\s*\(").ok());
static REJECTION_LISTENER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"unhandledrejection|process\.on\(\s*['\x22]uncaughtException").ok());
static ERROR_BOUNDARY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"componentDidCatch|getDerivedStateFromError|<ErrorBoundary").ok()
});
static ERROR_CALLBACK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\(\s*err(?:or)?\s*[,)]|\.on\(\s*['\x22]error['\x22]|if err != nil").ok()
});
static FALLIBLE_RESULT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\.map_err\(|if let Err\(|Err\(e(?:rr)?\)\s*=>").ok());

/// Registered detector: every error-handling construct in the unit, with
/// the line range it protects as its evidence.
pub fn detect_error_handling(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for block in find_protect_blocks(ctx) {
        findings.push(Finding::ErrorInstance(ErrorHandlingInstance {
            kind: "try/catch block".to_string(),
            description: format!("protects lines {}", block.range),
            evidence: ctx.cite(block.range.start, block.range.end),
        }));
    }

    let line_detectors: [(&str, &str, &LazyLock<Option<Regex>>); 4] = [
        (
            "promise rejection handler",
            "rejections on this chain are caught",
            &PROMISE_CATCH,
        ),
        (
            "global rejection listener",
            "otherwise-unhandled failures are intercepted process-wide",
            &REJECTION_LISTENER,
        ),
        (
            "error boundary",
            "descendant render failures are contained",
            &ERROR_BOUNDARY,
        ),
        (
            "error-first callback",
            "the failure path is threaded through the callback",
            &ERROR_CALLBACK,
        ),
    ];

    for (kind, description, pattern) in line_detectors {
        let Some(re) = pattern.as_ref() else { continue };
        for (number, line) in ctx.unit.code_lines() {
            if re.is_match(line) {
                findings.push(Finding::ErrorInstance(ErrorHandlingInstance {
                    kind: kind.to_string(),
                    description: description.to_string(),
                    evidence: ctx.cite_line(number),
                }));
            }
        }
    }

    if let Some(re) = FALLIBLE_RESULT.as_ref() {
        for (number, line) in ctx.unit.code_lines() {
            if re.is_match(line) {
                findings.push(Finding::ErrorInstance(ErrorHandlingInstance {
                    kind: "fallible result handling".to_string(),
                    description: "the error variant is handled explicitly".to_string(),
                    evidence: ctx.cite_line(number),
                }));
            }
        }
    }

    findings
}

// ---- Defensive-pattern scans consumed by the reliability analyzer ----

static NULL_CHECK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"[=!]=+\s*(?:null|undefined|None)\b|\?\.|\?\?|\.is_none\(|\.is_some\(").ok()
});
static TYPE_GUARD: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\btypeof\s|\binstanceof\s|Array\.isArray\(|isinstance\(").ok()
});
static INPUT_GUARD: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"if\s*\(\s*!\w[\w.]*\s*\)\s*(?:\{\s*)?(?:return|throw)|assert\(|debug_assert").ok()
});
static EDGE_CASE_GUARD: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\.length\s*[=!<>]=?=?\s*0|\bisEmpty\b|\.is_empty\(|isNaN\(|Number\.isNaN|\bNaN\b")
        .ok()
});

pub fn has_null_checks(ctx: &DetectionContext<'_>) -> bool {
    any_code_line(ctx, &NULL_CHECK)
}

pub fn has_type_guards(ctx: &DetectionContext<'_>) -> bool {
    any_code_line(ctx, &TYPE_GUARD)
}

pub fn has_input_validation(ctx: &DetectionContext<'_>) -> bool {
    any_code_line(ctx, &INPUT_GUARD)
}

/// Count of distinct lines with an edge-case guard pattern.
pub fn edge_case_guard_count(ctx: &DetectionContext<'_>) -> usize {
    let Some(re) = EDGE_CASE_GUARD.as_ref() else {
        return 0;
    };
    ctx.unit
        .code_lines()
        .filter(|(_, line)| re.is_match(line))
        .count()
}

fn any_code_line(ctx: &DetectionContext<'_>, re: &LazyLock<Option<Regex>>) -> bool {
    re.as_ref()
        .is_some_and(|r| ctx.unit.code_lines().any(|(_, line)| r.is_match(line)))
}

/// Whether a line with a risky operation is covered by a rejection handler:
/// either the handler chain is on the same line or within the configured
/// adjacency below it.
pub fn handled_by_adjacent_catch(ctx: &DetectionContext<'_>, line: u32) -> bool {
    let Some(re) = PROMISE_CATCH.as_ref() else {
        return false;
    };
    let adjacency = ctx.config.reliability.handler_adjacency_lines;
    (line..=line.saturating_add(adjacency)).any(|n| re.is_match(ctx.unit.line(n)))
}
