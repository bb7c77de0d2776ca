//! Performance detectors: loop constructs, re-render anti-patterns, and
//! recognized optimization techniques.

use std::sync::LazyLock;

use regex::Regex;

use super::DetectionContext;
use crate::findings::{Finding, OptimizationFound, PerformanceConcern};
use crate::source::LineKind;

// ---- Loop constructs ----

/// How a loop was expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    Explicit,
    IterationCall,
}

/// A located loop with its nesting level (1 = outermost).
#[derive(Debug, Clone)]
pub struct LoopSite {
    pub line: u32,
    pub kind: LoopKind,
    pub nesting: u32,
    /// Last line of the loop body.
    pub end_line: u32,
}

static EXPLICIT_LOOP: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\}?\s*)?(?:for\s*\(|for\s+\w+\s+(?:in|of)\s|while\s*\(|while\s+|do\s*\{|loop\s*\{)")
        .ok()
});
static ITERATION_CALL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\.(?:forEach|map|filter|reduce|flatMap|some|every|find|iter)\s*\(").ok()
});

/// Locate loop constructs and compute their nesting via the brace-depth
/// profile: a loop opened while another loop's block is still live nests
/// inside it.
pub fn find_loops(ctx: &DetectionContext<'_>) -> Vec<LoopSite> {
    let unit = ctx.unit;
    let mut sites = Vec::new();
    // Stack of end lines for loop blocks currently open.
    let mut open: Vec<u32> = Vec::new();

    for (number, line) in unit.numbered_lines() {
        if unit.kind(number) != LineKind::Code {
            continue;
        }
        while let Some(&end) = open.last() {
            if number > end {
                open.pop();
            } else {
                break;
            }
        }

        let kind = if EXPLICIT_LOOP.as_ref().is_some_and(|re| re.is_match(line)) {
            Some(LoopKind::Explicit)
        } else if ITERATION_CALL.as_ref().is_some_and(|re| re.is_match(line)) {
            Some(LoopKind::IterationCall)
        } else {
            None
        };

        if let Some(kind) = kind {
            let end_line = unit.block_end(number).max(number);
            open.push(end_line);
            sites.push(LoopSite {
                line: number,
                kind,
                nesting: open.len() as u32,
                end_line,
            });
        }
    }

    sites
}

/// Whether a line falls inside any loop body.
pub fn inside_loop(loops: &[LoopSite], line: u32) -> bool {
    loops
        .iter()
        .any(|l| line > l.line && line <= l.end_line)
}

// ---- Re-render anti-patterns ----

static EFFECT_OPEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\buse(?:Layout)?Effect\s*\(|\bcreateEffect\s*\(|\bwatch(?:Effect)?\s*\(").ok());
static EFFECT_SIDE_EFFECT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"fetch\(|axios\.|subscribe\(|set[A-Z]\w*\(|dispatch\(").ok());
static RATE_LIMITED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"debounce|throttle").ok());
static INLINE_LITERAL_PROP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\w+=\{\{|\w+=\{\[").ok());
static INLINE_HANDLER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bon[A-Z]\w*=\{\s*(?:async\s*)?\(?[\w\s,{}]*\)?\s*=>").ok());
static CHAINED_TRANSFORMS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\.(?:filter|map|sort|reduce|flatMap|slice)\([^()]*\)\s*\.\s*(?:filter|map|sort|reduce|flatMap)\(")
        .ok()
});
static MEMO_WRAPPER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\buseMemo\s*\(|\bcomputed\s*\(|\bcreateMemo\s*\(").ok());
static DIRECT_STATE_MUTATION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:this\.)?state\.\w+\s*=[^=]|\b\w+\.value\s*=[^=]").ok()
});

fn concern(
    ctx: &DetectionContext<'_>,
    id: &str,
    issue: String,
    impact: &str,
    fix: &str,
    line: u32,
    end: u32,
) -> Finding {
    Finding::Concern(PerformanceConcern {
        id: id.to_string(),
        issue,
        impact: impact.to_string(),
        recommended_fix: fix.to_string(),
        evidence: ctx.cite(line, end),
    })
}

/// The five re-render anti-patterns. Emitted as concerns whose ids share
/// the `perf-rerender-` prefix; the analyzer separates them from the
/// general concern pool by that prefix.
pub fn detect_re_render_issues(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let unit = ctx.unit;
    let mut findings = Vec::new();

    // 1. Side-effectful reactive callback without rate-limiting.
    if let Some(effect_re) = EFFECT_OPEN.as_ref() {
        for (number, line) in unit.code_lines() {
            if !effect_re.is_match(line) {
                continue;
            }
            let end = unit.block_end(number);
            let body_has = |re: &LazyLock<Option<Regex>>| {
                re.as_ref().is_some_and(|r| {
                    (number..=end).any(|n| r.is_match(unit.line(n)))
                })
            };
            if body_has(&EFFECT_SIDE_EFFECT) && !body_has(&RATE_LIMITED) {
                findings.push(concern(
                    ctx,
                    "perf-rerender-effect-side-effect",
                    "reactive callback performs side effects with no rate limiting".to_string(),
                    "every dependency change re-fires the side effect back to back",
                    "debounce or throttle the effect body, or narrow its dependencies",
                    number,
                    end,
                ));
            }
        }
    }

    // 2. Inline object/array literals passed as properties.
    for (number, line) in unit.code_lines() {
        if INLINE_LITERAL_PROP.as_ref().is_some_and(|re| re.is_match(line)) {
            findings.push(concern(
                ctx,
                "perf-rerender-inline-literal",
                "inline object or array literal passed as a property".to_string(),
                "a fresh reference defeats downstream equality checks on every render",
                "hoist the literal out of the render path or memoize it",
                number,
                number,
            ));
        }
    }

    // 3. Inline handlers without memoized wrapping.
    for (number, line) in unit.code_lines() {
        if INLINE_HANDLER.as_ref().is_some_and(|re| re.is_match(line)) {
            findings.push(concern(
                ctx,
                "perf-rerender-inline-handler",
                "inline handler recreated on every render".to_string(),
                "children receiving the handler re-render even when nothing changed",
                "wrap the handler in a memoized callback",
                number,
                number,
            ));
        }
    }

    // 4. Uncached expensive chained collection operations.
    for (number, line) in unit.code_lines() {
        let chained = CHAINED_TRANSFORMS.as_ref().is_some_and(|re| re.is_match(line));
        if chained {
            let memoized = MEMO_WRAPPER.as_ref().is_some_and(|re| {
                (number.saturating_sub(2)..=number).any(|n| re.is_match(unit.line(n)))
            });
            if !memoized {
                findings.push(concern(
                    ctx,
                    "perf-rerender-uncached-chain",
                    "chained collection transforms recomputed on every render".to_string(),
                    "each pass re-walks the collection even for unchanged inputs",
                    "cache the result in a memoized value keyed on its inputs",
                    number,
                    number,
                ));
            }
        }
    }

    // 5. Reactive state mutated directly instead of through its setter.
    if let Some(re) = DIRECT_STATE_MUTATION.as_ref() {
        for (number, line) in unit.code_lines() {
            if re.is_match(line) {
                findings.push(concern(
                    ctx,
                    "perf-rerender-direct-mutation",
                    "reactive state mutated outside an effect or handler scope".to_string(),
                    "the mutation bypasses change tracking, forcing stale or surprise renders",
                    "route the update through the state setter inside a handler or effect",
                    number,
                    number,
                ));
            }
        }
    }

    findings
}

// ---- Optimization techniques ----

/// The seven recognized techniques: (id, technique, signature, description).
pub static OPTIMIZATION_SIGNATURES: [(&str, &str, &str, &str); 7] = [
    (
        "opt-memoized-value",
        "memoized value",
        r"\buseMemo\s*\(|\bcomputed\s*\(|\bcreateMemo\s*\(",
        "derived data is cached against its inputs",
    ),
    (
        "opt-memoized-callback",
        "memoized callback",
        r"\buseCallback\s*\(",
        "handler identity is stable across renders",
    ),
    (
        "opt-pure-render",
        "pure-render wrapper",
        r"React\.memo\s*\(|\bmemo\s*\(\s*function|\bmemo\s*\(\s*\(|PureComponent",
        "re-renders are skipped for unchanged props",
    ),
    (
        "opt-debounce",
        "debouncing",
        r"\bdebounce\s*\(",
        "bursty triggers collapse into one trailing call",
    ),
    (
        "opt-throttle",
        "throttling",
        r"\bthrottle\s*\(",
        "trigger rate is capped at a fixed interval",
    ),
    (
        "opt-virtualization",
        "virtualization",
        r"react-window|react-virtualized|FixedSizeList|VariableSizeList|useVirtualizer|virtual(?:ized)?List",
        "only visible rows are rendered",
    ),
    (
        "opt-memoization",
        "general memoization",
        r"\bmemoize\s*\(|lru_cache|@cache\b|\bcached\s*\(",
        "repeated calls with equal arguments reuse the computed result",
    ),
];

static COMPILED_OPTIMIZATIONS: LazyLock<Vec<(usize, Regex)>> = LazyLock::new(|| {
    OPTIMIZATION_SIGNATURES
        .iter()
        .enumerate()
        .filter_map(|(i, (_, _, pattern, _))| Regex::new(pattern).ok().map(|re| (i, re)))
        .collect()
});

/// Recognize optimization techniques by signature. One finding per
/// technique, citing the first match.
pub fn detect_optimizations(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (index, re) in COMPILED_OPTIMIZATIONS.iter() {
        let first = ctx
            .unit
            .code_lines()
            .find(|(_, line)| re.is_match(line));
        if let Some((number, _)) = first {
            let (_, technique, _, description) = OPTIMIZATION_SIGNATURES[*index];
            findings.push(Finding::Optimization(OptimizationFound {
                technique: technique.to_string(),
                description: description.to_string(),
                evidence: ctx.cite_line(number),
            }));
        }
    }

    findings
}

// ---- General performance concerns ----

static EXPENSIVE_OP: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"JSON\.parse|JSON\.stringify|querySelector|getElementsBy|\.sort\s*\(").ok()
});
static DEEP_CLONE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"JSON\.parse\s*\(\s*JSON\.stringify").ok());
static SYNC_BLOCKING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"readFileSync|writeFileSync|execSync|localStorage\.(?:get|set)Item").ok());

/// Concern detectors outside the re-render family: expensive work inside
/// loops, serialize-based deep clones, and synchronous blocking calls.
pub fn detect_concerns(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let loops = find_loops(ctx);
    let mut findings = Vec::new();

    for (number, line) in ctx.unit.code_lines() {
        if DEEP_CLONE.as_ref().is_some_and(|re| re.is_match(line)) {
            findings.push(concern(
                ctx,
                "perf-deep-clone",
                "deep clone via serialize/deserialize round trip".to_string(),
                "severe: the whole object graph is walked twice and reallocated",
                "copy only the fields that change, or use structuredClone",
                number,
                number,
            ));
            continue;
        }
        if inside_loop(&loops, number)
            && EXPENSIVE_OP.as_ref().is_some_and(|re| re.is_match(line))
        {
            findings.push(concern(
                ctx,
                "perf-expensive-in-loop",
                "expensive operation repeated inside a loop".to_string(),
                "significant: per-iteration cost multiplies with collection size",
                "hoist the operation out of the loop or cache its result",
                number,
                number,
            ));
            continue;
        }
        if SYNC_BLOCKING.as_ref().is_some_and(|re| re.is_match(line)) {
            findings.push(concern(
                ctx,
                "perf-sync-blocking",
                "synchronous blocking call on the hot path".to_string(),
                "the thread stalls until the call returns",
                "move the work to an async variant or off the hot path",
                number,
                number,
            ));
        }
    }

    findings
}
