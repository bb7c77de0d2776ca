//! Stress collapse detectors: patterns likely to degrade under scale, and
//! the robust signatures that rule collapse out.
//!
//! Thresholds and expected behaviors come from the fixed table below, one
//! entry per pattern kind.

use std::sync::LazyLock;

use regex::Regex;
use smallvec::SmallVec;

use super::performance::{find_loops, inside_loop, LoopSite};
use super::DetectionContext;
use crate::findings::{Finding, StressCollapseCondition};

/// Fixed threshold/behavior entry for one stress pattern kind.
pub struct StressPatternSpec {
    pub id: &'static str,
    pub threshold: &'static str,
    pub expected_behavior: &'static str,
    pub reasoning: [&'static str; 2],
}

pub static STRESS_PATTERNS: [StressPatternSpec; 8] = [
    StressPatternSpec {
        id: "stress-nested-loop",
        threshold: "roughly 1,000 x 1,000 iterations (sqrt(N) x sqrt(N) of the 1M baseline)",
        expected_behavior: "main thread freezes; the tab becomes unresponsive or crashes",
        reasoning: [
            "iteration count grows with the product of both collection sizes",
            "no yield point exists inside the combined loop body",
        ],
    },
    StressPatternSpec {
        id: "stress-state-in-loop",
        threshold: "hundreds of state updates queued in a single pass",
        expected_behavior: "render queue floods; the UI stutters and then freezes",
        reasoning: [
            "each iteration schedules another render-triggering update",
            "updates are not batched or coalesced before they hit the scheduler",
        ],
    },
    StressPatternSpec {
        id: "stress-network-in-loop",
        threshold: "one request per element, unbounded by any pool",
        expected_behavior: "request storm; rate limiting or socket exhaustion upstream",
        reasoning: [
            "requests fan out with collection size instead of being batched",
            "no concurrency limit guards the fan-out",
        ],
    },
    StressPatternSpec {
        id: "stress-high-frequency-interval",
        threshold: "callback interval under the 16ms frame budget",
        expected_behavior: "sustained CPU load; dropped frames and visible jank",
        reasoning: [
            "the callback fires faster than the display can present frames",
            "work accumulates whenever one tick overruns the interval",
        ],
    },
    StressPatternSpec {
        id: "stress-chained-transforms",
        threshold: "around 100,000 elements re-walked once per chained pass",
        expected_behavior: "allocation and GC churn; latency spikes on large inputs",
        reasoning: [
            "every chained stage allocates an intermediate collection",
            "passes multiply the walk count instead of fusing into one",
        ],
    },
    StressPatternSpec {
        id: "stress-self-recursion",
        threshold: "recursion depth near the 10,000-frame stack limit",
        expected_behavior: "call stack overflow on deep inputs",
        reasoning: [
            "the function re-enters itself with no visible depth bound",
            "stack frames accumulate until the runtime limit is hit",
        ],
    },
    StressPatternSpec {
        id: "stress-dom-in-loop",
        threshold: "per-iteration DOM mutation over a large collection",
        expected_behavior: "layout thrash; frame drops proportional to element count",
        reasoning: [
            "each mutation can invalidate layout for the whole document",
            "mutations are not batched into a single fragment or frame",
        ],
    },
    StressPatternSpec {
        id: "stress-listener-leak",
        threshold: "listeners accumulating across mounts or updates",
        expected_behavior: "memory grows unbounded; duplicate handlers fire per event",
        reasoning: [
            "listeners are registered without a matching removal",
            "every re-registration adds another live closure",
        ],
    },
];

fn spec(id: &str) -> &'static StressPatternSpec {
    STRESS_PATTERNS
        .iter()
        .find(|s| s.id == id)
        .unwrap_or(&STRESS_PATTERNS[0])
}

fn condition(ctx: &DetectionContext<'_>, id: &str, lines: &[u32]) -> Finding {
    let s = spec(id);
    let references = lines.iter().map(|l| ctx.cite_with_context(*l)).collect();
    Finding::StressCondition(StressCollapseCondition {
        id: s.id.to_string(),
        threshold: s.threshold.to_string(),
        expected_behavior: s.expected_behavior.to_string(),
        reasoning: s.reasoning.iter().map(|r| r.to_string()).collect::<SmallVec<_>>(),
        code_pattern_references: references,
    })
}

static STATE_UPDATE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bset[A-Z]\w*\s*\(|\.setState\s*\(|dispatch\s*\(").ok());
static NETWORK_CALL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bfetch\s*\(|axios\.|http\.(?:get|post)").ok());
static SET_INTERVAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"setInterval\s*\(\s*[^,]*,\s*(\d+)").ok());
static CHAINED_THREE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:\.(?:filter|map|sort|reduce|flatMap|slice)\([^()]*\)\s*){2}\.(?:filter|map|sort|reduce|flatMap)\(")
        .ok()
});
static FUNCTION_DECL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:function\s+(\w+)|(?:const|let)\s+(\w+)\s*=\s*(?:async\s*)?\(|fn\s+(\w+)|def\s+(\w+))")
        .ok()
});
static DOM_MUTATION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"createElement\s*\(|appendChild\s*\(|innerHTML\s*[+]?=|insertBefore\s*\(").ok()
});
static ADD_LISTENER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"addEventListener\s*\(").ok());
static REMOVE_LISTENER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"removeEventListener\s*\(").ok());
static HANDLER_SCOPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bon[A-Z]\w*\s*[=:]|addEventListener\s*\(").ok());

/// Registered detector: scan for every stress pattern in the table.
pub fn detect_stress_patterns(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let unit = ctx.unit;
    let loops = find_loops(ctx);
    let mut findings = Vec::new();

    // Nested loops.
    let nested: Vec<u32> = loops
        .iter()
        .filter(|l| l.nesting >= 2)
        .map(|l| l.line)
        .collect();
    if !nested.is_empty() {
        findings.push(condition(ctx, "stress-nested-loop", &nested));
    }

    // State updates inside loops or handler scopes.
    let state_lines = lines_matching_inside(ctx, &loops, &STATE_UPDATE, true);
    if !state_lines.is_empty() {
        findings.push(condition(ctx, "stress-state-in-loop", &state_lines));
    }

    // Network calls inside loops or iteration callbacks.
    let network_lines = lines_matching_inside(ctx, &loops, &NETWORK_CALL, false);
    if !network_lines.is_empty() {
        findings.push(condition(ctx, "stress-network-in-loop", &network_lines));
    }

    // High-frequency periodic callbacks.
    if let Some(re) = SET_INTERVAL.as_ref() {
        let threshold_ms = ctx.config.stress.high_frequency_interval_ms;
        let fast: Vec<u32> = unit
            .code_lines()
            .filter_map(|(number, line)| {
                let interval: u64 = re
                    .captures(line)?
                    .get(1)?
                    .as_str()
                    .parse()
                    .ok()?;
                (interval < threshold_ms).then_some(number)
            })
            .collect();
        if !fast.is_empty() {
            findings.push(condition(ctx, "stress-high-frequency-interval", &fast));
        }
    }

    // Chained collection transforms (three or more stages).
    let chained = collect_matches(ctx, &CHAINED_THREE);
    if !chained.is_empty() {
        findings.push(condition(ctx, "stress-chained-transforms", &chained));
    }

    // Self-recursive functions.
    let recursive = find_self_recursion(ctx);
    if !recursive.is_empty() {
        findings.push(condition(ctx, "stress-self-recursion", &recursive));
    }

    // DOM mutation inside loops.
    let dom_lines = lines_matching_inside(ctx, &loops, &DOM_MUTATION, false);
    if !dom_lines.is_empty() {
        findings.push(condition(ctx, "stress-dom-in-loop", &dom_lines));
    }

    // Listener registrations without matching removals.
    let added = collect_matches(ctx, &ADD_LISTENER);
    let removed = collect_matches(ctx, &REMOVE_LISTENER);
    if added.len() > removed.len() {
        findings.push(condition(ctx, "stress-listener-leak", &added));
    }

    findings
}

/// Lines matching `re` inside a loop body; with `or_handler`, handler
/// scopes count as hosting scopes too.
fn lines_matching_inside(
    ctx: &DetectionContext<'_>,
    loops: &[LoopSite],
    re: &LazyLock<Option<Regex>>,
    or_handler: bool,
) -> Vec<u32> {
    let Some(re) = re.as_ref() else {
        return Vec::new();
    };
    let handler_ranges = if or_handler {
        handler_scopes(ctx)
    } else {
        Vec::new()
    };

    ctx.unit
        .code_lines()
        .filter(|(number, line)| {
            re.is_match(line)
                && (inside_loop(loops, *number)
                    || handler_ranges
                        .iter()
                        .any(|(start, end)| number > start && number <= end))
        })
        .map(|(number, _)| number)
        .collect()
}

/// Line ranges of handler callbacks (event props and listener closures).
fn handler_scopes(ctx: &DetectionContext<'_>) -> Vec<(u32, u32)> {
    let Some(re) = HANDLER_SCOPE.as_ref() else {
        return Vec::new();
    };
    ctx.unit
        .code_lines()
        .filter(|(_, line)| re.is_match(line))
        .map(|(number, _)| (number, ctx.unit.block_end(number)))
        .filter(|(start, end)| end > start)
        .collect()
}

fn collect_matches(ctx: &DetectionContext<'_>, re: &LazyLock<Option<Regex>>) -> Vec<u32> {
    let Some(re) = re.as_ref() else {
        return Vec::new();
    };
    ctx.unit
        .code_lines()
        .filter(|(_, line)| re.is_match(line))
        .map(|(number, _)| number)
        .collect()
}

/// Functions whose own name reappears as a call inside their body.
fn find_self_recursion(ctx: &DetectionContext<'_>) -> Vec<u32> {
    let Some(re) = FUNCTION_DECL.as_ref() else {
        return Vec::new();
    };
    let unit = ctx.unit;
    let mut lines = Vec::new();

    for (number, line) in unit.code_lines() {
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let name = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .next();
        let Some(name) = name else { continue };
        if name.len() < 2 {
            continue;
        }

        let end = unit.block_end(number);
        let call = format!("{name}(");
        let recurses = (number + 1..=end).any(|n| unit.line(n).contains(&call));
        if recurses {
            lines.push(number);
        }
    }

    lines
}

// ---- Robust signatures ----

/// A robust signature: a structural reason the unit cannot plausibly
/// collapse under load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobustSignature {
    BooleanToggle,
    PaginatedAccess,
    VirtualizedList,
    RateLimitedTriggers,
    MemoizedPureComputation,
    StaticContent,
}

impl RobustSignature {
    /// The fixed textual reason reported for this signature.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::BooleanToggle => {
                "simple boolean toggle: state flips between two values with no data growth"
            }
            Self::PaginatedAccess => {
                "paginated data access: work per interaction is bounded by the page size"
            }
            Self::VirtualizedList => {
                "virtualized list: rendered element count is bounded by the viewport"
            }
            Self::RateLimitedTriggers => {
                "debounced or throttled triggers: event rate is capped upstream of the work"
            }
            Self::MemoizedPureComputation => {
                "pure memoized computation: repeated inputs reuse the cached result"
            }
            Self::StaticContent => {
                "static content: no reactive state, effects, or handlers to accumulate load"
            }
        }
    }
}

static BOOLEAN_TOGGLE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"set[A-Z]\w*\s*\(\s*!\w+\s*\)|set[A-Z]\w*\s*\(\s*\(?\s*\w+\s*\)?\s*=>\s*!\s*\w+\s*\)")
        .ok()
});
static PAGINATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(?:page|pageSize|perPage|limit|offset)\b").ok());
static VIRTUALIZED: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"react-window|react-virtualized|FixedSizeList|useVirtualizer|virtual(?:ized)?List")
        .ok()
});
static RATE_LIMIT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bdebounce\s*\(|\bthrottle\s*\(").ok());
static MEMOIZED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\buseMemo\s*\(|\bmemoize\s*\(|lru_cache").ok());
static REACTIVE_ANYTHING: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"useState\s*\(|useReducer\s*\(|setState\s*\(|useEffect\s*\(|addEventListener\s*\(|\bon[A-Z]\w*\s*=")
        .ok()
});
static SIDE_EFFECT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"fetch\s*\(|axios\.|setInterval|setTimeout|\.push\s*\(").ok());

/// Match the unit against the robust-signature table, first match wins.
/// Only meaningful when the stress pattern scan came back empty.
pub fn match_robust_signature(ctx: &DetectionContext<'_>) -> Option<RobustSignature> {
    let matches = |re: &LazyLock<Option<Regex>>| {
        re.as_ref()
            .is_some_and(|r| ctx.unit.code_lines().any(|(_, line)| r.is_match(line)))
    };
    let has_loops = !find_loops(ctx).is_empty();

    if matches(&BOOLEAN_TOGGLE) && !has_loops && !matches(&SIDE_EFFECT) {
        return Some(RobustSignature::BooleanToggle);
    }
    if matches(&PAGINATION) {
        return Some(RobustSignature::PaginatedAccess);
    }
    if matches(&VIRTUALIZED) {
        return Some(RobustSignature::VirtualizedList);
    }
    if matches(&RATE_LIMIT) {
        return Some(RobustSignature::RateLimitedTriggers);
    }
    if matches(&MEMOIZED) && !matches(&SIDE_EFFECT) {
        return Some(RobustSignature::MemoizedPureComputation);
    }
    if !matches(&REACTIVE_ANYTHING) && !has_loops {
        return Some(RobustSignature::StaticContent);
    }
    None
}
