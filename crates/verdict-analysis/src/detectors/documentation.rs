//! Documentation detectors: declarations, doc blocks, complex constructs,
//! and naming heuristics.

use std::sync::LazyLock;

use regex::Regex;

use super::performance::find_loops;
use super::DetectionContext;

/// A discovered function or method declaration.
#[derive(Debug, Clone)]
pub struct DeclarationSite {
    pub name: String,
    pub line: u32,
    /// A doc-comment block appears within the look-back window.
    pub documented: bool,
}

static DECLARATIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s+(\w+)",
        r"^\s*(?:export\s+)?const\s+(\w+)\s*=\s*(?:async\s*)?\(",
        r"^\s*(?:pub(?:\(crate\))?\s+)?(?:async\s+)?fn\s+(\w+)",
        r"^\s*def\s+(\w+)",
        r"^\s*(?:public|private|protected)\s+(?:static\s+)?(?:async\s+)?(\w+)\s*\(",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

static DOC_MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:///|//!|/\*\*|\*|\*/|"{3}|'{3})"#).ok()
});
static SKIPPABLE_ABOVE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(?:@\w+|#\[)").ok());

/// Keywords that never name a function even when the method pattern hits.
const NON_DECLARATION_NAMES: [&str; 8] =
    ["if", "for", "while", "switch", "catch", "return", "else", "match"];

/// Discover declarations and whether each has a doc comment within the
/// configured look-back window (attribute and decorator lines are skipped
/// while looking back).
pub fn find_declarations(ctx: &DetectionContext<'_>) -> Vec<DeclarationSite> {
    let lookback = ctx.config.documentation.doc_lookback_lines as u32;
    let unit = ctx.unit;
    let mut sites = Vec::new();

    for (number, line) in unit.code_lines() {
        let name = DECLARATIONS
            .iter()
            .find_map(|re| re.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        let Some(name) = name else { continue };
        if NON_DECLARATION_NAMES.contains(&name.as_str()) {
            continue;
        }

        let documented = is_documented(ctx, number, lookback);
        sites.push(DeclarationSite {
            name,
            line: number,
            documented,
        });
    }

    sites
}

fn is_documented(ctx: &DetectionContext<'_>, decl_line: u32, lookback: u32) -> bool {
    let Some(doc_re) = DOC_MARKER.as_ref() else {
        return false;
    };
    let mut remaining = lookback;
    let mut number = decl_line;

    while remaining > 0 && number > 1 {
        number -= 1;
        let line = ctx.unit.line(number);
        if SKIPPABLE_ABOVE.as_ref().is_some_and(|re| re.is_match(line)) {
            continue;
        }
        if doc_re.is_match(line) {
            return true;
        }
        if !line.trim().is_empty() {
            return false;
        }
        remaining -= 1;
    }
    false
}

/// A construct complex enough to deserve a comment.
#[derive(Debug, Clone)]
pub struct ComplexConstruct {
    pub line: u32,
    pub kind: &'static str,
    /// A comment appears within the look-back window or trails the line.
    pub commented: bool,
}

static COMPOUND_CONDITION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:&&|\|\|).*(?:&&|\|\|)").ok()
});
static NESTED_TERNARY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\?.*:.*\?.*:").ok());
static REDUCE_CALL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\.reduce\s*\(").ok());
static ANY_COMMENT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"//|/\*|(?:^|\s)#(?:\s|$)").ok());

/// Find complex constructs: compound boolean conditions, nested ternaries,
/// reduce calls, and nested loop openings.
pub fn find_complex_constructs(ctx: &DetectionContext<'_>) -> Vec<ComplexConstruct> {
    let lookback = ctx.config.documentation.comment_lookback_lines as u32;
    let mut constructs = Vec::new();

    for (number, line) in ctx.unit.code_lines() {
        let kind = if COMPOUND_CONDITION.as_ref().is_some_and(|re| re.is_match(line)) {
            Some("compound boolean condition")
        } else if NESTED_TERNARY.as_ref().is_some_and(|re| re.is_match(line)) {
            Some("nested ternary")
        } else if REDUCE_CALL.as_ref().is_some_and(|re| re.is_match(line)) {
            Some("reduce")
        } else {
            None
        };
        if let Some(kind) = kind {
            constructs.push(ComplexConstruct {
                line: number,
                kind,
                commented: is_commented(ctx, number, lookback),
            });
        }
    }

    for site in find_loops(ctx) {
        if site.nesting >= 2 {
            constructs.push(ComplexConstruct {
                line: site.line,
                kind: "nested loop",
                commented: is_commented(ctx, site.line, lookback),
            });
        }
    }

    constructs.sort_by_key(|c| c.line);
    constructs
}

fn is_commented(ctx: &DetectionContext<'_>, line: u32, lookback: u32) -> bool {
    // Trailing comment on the construct line itself counts.
    if has_comment(ctx.unit.line(line)) {
        return true;
    }
    (line.saturating_sub(lookback)..line)
        .any(|n| n >= 1 && (ctx.unit.is_comment(n) || has_comment(ctx.unit.line(n))))
}

fn has_comment(line: &str) -> bool {
    ANY_COMMENT.as_ref().is_some_and(|re| re.is_match(line))
}

// ---- Naming heuristics ----

/// Verb prefixes accepted as self-documenting regardless of length.
pub const VERB_PREFIXES: [&str; 24] = [
    "get", "set", "is", "has", "can", "should", "handle", "compute", "build", "create", "update",
    "delete", "fetch", "load", "save", "parse", "render", "validate", "format", "apply", "resolve",
    "extract", "collect", "classify",
];

/// Whether a declared name is self-documenting: a verb prefix from the
/// allow-list, or at least the configured length. A labeled heuristic with
/// no ground truth in the source.
pub fn is_self_documenting(name: &str, min_len: usize) -> bool {
    if name.len() >= min_len {
        return true;
    }
    let lower = name.to_lowercase();
    VERB_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix) && name.len() > prefix.len())
}

// ---- Documentation extras ----

static USAGE_EXAMPLE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"@example\b|\bExample:|\bUsage:|```").ok()
});
static EDGE_CASE_DOC: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)edge case|boundary|corner case|empty (?:array|list|string|input)|null case")
        .ok()
});

/// A usage example appears in a comment.
pub fn has_usage_example(ctx: &DetectionContext<'_>) -> bool {
    any_comment_line(ctx, &USAGE_EXAMPLE)
}

/// Edge cases are documented in a comment.
pub fn has_edge_case_docs(ctx: &DetectionContext<'_>) -> bool {
    any_comment_line(ctx, &EDGE_CASE_DOC)
}

fn any_comment_line(ctx: &DetectionContext<'_>, re: &LazyLock<Option<Regex>>) -> bool {
    let Some(re) = re.as_ref() else {
        return false;
    };
    ctx.unit
        .numbered_lines()
        .any(|(number, line)| ctx.unit.is_comment(number) && re.is_match(line))
}

/// Any inline (non-doc) comment lines in the unit.
pub fn has_inline_comments(ctx: &DetectionContext<'_>) -> bool {
    ctx.unit.numbered_lines().any(|(number, line)| {
        ctx.unit.is_comment(number)
            && !DOC_MARKER.as_ref().is_some_and(|re| re.is_match(line))
    })
}
