//! Integration detectors: configuration surface, toggle capability,
//! extension points, and feature interactions.

use std::sync::LazyLock;

use regex::Regex;

use super::DetectionContext;
use crate::findings::{ConfigurationOption, Finding};

static PROPS_BLOCK_OPEN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:export\s+)?(?:interface|type)\s+\w*(?:Props|Options|Config)\w*\b").ok()
});
static PROP_DECL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:readonly\s+)?(\w+)\??\s*:\s*([^;,]+)[;,]?\s*(?://\s*(.*))?$").ok()
});
static DESTRUCTURED_PARAMS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:function\s+\w+|=>|\w+)\s*\(\s*\{([^}]*)\}").ok()
});

/// Registered detector: the unit's declared configuration surface.
///
/// Options come from `Props`/`Options`/`Config` declaration blocks and
/// destructured parameter lists; an option is `present` when its name is
/// referenced again outside its declaration.
pub fn detect_configuration_options(ctx: &DetectionContext<'_>) -> Vec<Finding> {
    let unit = ctx.unit;
    let mut options: Vec<(String, String, Option<String>, u32)> = Vec::new();

    // Typed declaration blocks.
    if let (Some(open_re), Some(prop_re)) = (PROPS_BLOCK_OPEN.as_ref(), PROP_DECL.as_ref()) {
        for (number, line) in unit.code_lines() {
            if !open_re.is_match(line) {
                continue;
            }
            let end = unit.block_end(number);
            for n in (number + 1)..end {
                if let Some(caps) = prop_re.captures(unit.line(n)) {
                    let name = caps[1].to_string();
                    let option_type = caps[2].trim().to_string();
                    let description = caps.get(3).map(|m| m.as_str().trim().to_string());
                    options.push((name, option_type, description, n));
                }
            }
        }
    }

    // Destructured parameters with defaults.
    if let Some(re) = DESTRUCTURED_PARAMS.as_ref() {
        for (number, line) in unit.code_lines() {
            let Some(caps) = re.captures(line) else { continue };
            for part in caps[1].split(',') {
                let part = part.trim();
                if part.is_empty() || part.starts_with("...") {
                    continue;
                }
                let name = part
                    .split(['=', ':'])
                    .next()
                    .map(str::trim)
                    .unwrap_or_default();
                if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    continue;
                }
                if options.iter().any(|(n, ..)| n.as_str() == name) {
                    continue;
                }
                let option_type = if part.contains('=') { "defaulted" } else { "inferred" };
                options.push((name.to_string(), option_type.to_string(), None, number));
            }
        }
    }

    options
        .into_iter()
        .map(|(name, option_type, description, decl_line)| {
            let present = is_referenced_elsewhere(ctx, &name, decl_line);
            Finding::ConfigOption(ConfigurationOption {
                name,
                option_type,
                present,
                description,
            })
        })
        .collect()
}

/// The option name appears on a code line other than its declaration.
fn is_referenced_elsewhere(ctx: &DetectionContext<'_>, name: &str, decl_line: u32) -> bool {
    ctx.unit.code_lines().any(|(number, line)| {
        number != decl_line && contains_word(line, name)
    })
}

fn contains_word(line: &str, word: &str) -> bool {
    line.match_indices(word).any(|(idx, _)| {
        let before = line[..idx].chars().next_back();
        let after = line[idx + word.len()..].chars().next();
        let boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric() && c != '_');
        boundary(before) && boundary(after)
    })
}

// ---- Toggle capability ----

static BOOLEAN_NAMED: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b(?:is|has|can|show|hide|enable|disable)[A-Z]\w*\b|\b(?:enabled|disabled|visible|hidden|active|open)\b")
        .ok()
});
static CONDITIONAL_RENDER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{\s*\w[\w.]*\s*&&\s*<|\?\s*<\w|\bv-if=|\*ngIf=").ok());

/// Whether the unit can be toggled: boolean-named options or conditional
/// render guards.
pub fn toggle_capability(ctx: &DetectionContext<'_>, options: &[ConfigurationOption]) -> bool {
    let boolean_option = options.iter().any(|o| {
        o.option_type.contains("bool")
            || BOOLEAN_NAMED
                .as_ref()
                .is_some_and(|re| re.is_match(&o.name))
    });
    if boolean_option {
        return true;
    }
    CONDITIONAL_RENDER
        .as_ref()
        .is_some_and(|re| ctx.unit.code_lines().any(|(_, line)| re.is_match(line)))
}

// ---- Extensibility ----

/// How far the unit can be extended without editing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensibilityTier {
    /// Callback or render-prop hooks.
    CallbackHooks,
    /// Style/class/ref pass-through or spread forwarding.
    PartialExtension,
    /// Accepts children but nothing else.
    ChildrenOnly,
    Hardcoded,
}

impl ExtensibilityTier {
    /// Score contribution of this tier.
    pub fn points(&self) -> f64 {
        match self {
            Self::CallbackHooks => 35.0,
            Self::PartialExtension => 20.0,
            Self::ChildrenOnly => 10.0,
            Self::Hardcoded => 0.0,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::CallbackHooks => "callback and render-prop hooks",
            Self::PartialExtension => "partial extension points (style, class, or ref pass-through)",
            Self::ChildrenOnly => "children pass-through only",
            Self::Hardcoded => "hardcoded, with no extension points",
        }
    }
}

static CALLBACK_HOOK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\bon[A-Z]\w*\s*[:?]|\brender[A-Z]\w*\s*[:?]|children\s*\(").ok()
});
static PARTIAL_EXTENSION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\bclassName\b|\bstyle\s*[:=]|\.\.\.(?:props|rest)\b|forwardRef|\bref\s*[:=]").ok()
});
static CHILDREN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\bchildren\b").ok());

/// Classify the unit's extensibility, best tier first.
pub fn assess_extensibility(ctx: &DetectionContext<'_>) -> ExtensibilityTier {
    let matches = |re: &LazyLock<Option<Regex>>| {
        re.as_ref()
            .is_some_and(|r| ctx.unit.code_lines().any(|(_, line)| r.is_match(line)))
    };
    if matches(&CALLBACK_HOOK) {
        ExtensibilityTier::CallbackHooks
    } else if matches(&PARTIAL_EXTENSION) {
        ExtensibilityTier::PartialExtension
    } else if matches(&CHILDREN) {
        ExtensibilityTier::ChildrenOnly
    } else {
        ExtensibilityTier::Hardcoded
    }
}

// ---- Feature interactions ----

/// A way this unit interacts with its surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    SiblingImports,
    SharedState,
    EventFanOut,
    Composition,
}

impl InteractionKind {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::SiblingImports => "imports sibling modules",
            Self::SharedState => "reads or writes shared state",
            Self::EventFanOut => "fans out events or callbacks",
            Self::Composition => "composes other components",
        }
    }
}

static SIBLING_IMPORT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"from\s+['\x22]\.{1,2}/|require\(\s*['\x22]\.{1,2}/|use (?:crate|super)::"#).ok()
});
static SHARED_STATE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"useContext\s*\(|useSelector\s*\(|\bstore\.|createContext|provide\(|inject\(").ok()
});
static EVENT_FAN_OUT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"dispatch\s*\(|\bemit\s*\(|addEventListener\s*\(|\.publish\s*\(").ok()
});
static COMPOSITION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"<[A-Z]\w+[\s/>]").ok());

/// Which interaction kinds the unit exhibits, in declaration order.
pub fn find_interactions(ctx: &DetectionContext<'_>) -> Vec<InteractionKind> {
    let table: [(InteractionKind, &LazyLock<Option<Regex>>); 4] = [
        (InteractionKind::SiblingImports, &SIBLING_IMPORT),
        (InteractionKind::SharedState, &SHARED_STATE),
        (InteractionKind::EventFanOut, &EVENT_FAN_OUT),
        (InteractionKind::Composition, &COMPOSITION),
    ];

    table
        .iter()
        .filter(|(_, re)| {
            re.as_ref()
                .is_some_and(|r| ctx.unit.numbered_lines().any(|(_, line)| r.is_match(line)))
        })
        .map(|(kind, _)| *kind)
        .collect()
}
