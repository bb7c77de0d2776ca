//! Evidence collection: line-bounded, verbatim snippets backing findings.
//!
//! Every finding the engine emits cites a `CodeEvidence` so its claim can
//! be audited against the exact source lines that triggered it.

use serde::{Deserialize, Serialize};

use verdict_core::config::EvidenceConfig;
use verdict_core::{Language, LineRange};

/// A file/line-bounded, verbatim excerpt of source code.
///
/// Immutable once created. The snippet equals the exact substring of the
/// source between `line_range.start` and `line_range.end` (inclusive,
/// 1-based), possibly truncated to the collector's snippet cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEvidence {
    pub file_path: String,
    pub line_range: LineRange,
    pub snippet: String,
    pub language: Language,
}

/// Extracts line-bounded snippets from raw source.
///
/// Out-of-range line numbers are clamped, never rejected; extraction cannot
/// fail.
#[derive(Debug, Clone)]
pub struct EvidenceCollector {
    max_snippet_lines: usize,
    context_lines: usize,
}

impl EvidenceCollector {
    pub fn new(config: &EvidenceConfig) -> Self {
        Self {
            max_snippet_lines: config.max_snippet_lines.max(1),
            context_lines: config.context_lines,
        }
    }

    /// Extract the snippet covering `start_line..=end_line` (1-based).
    ///
    /// Bounds are clamped to `[1, line_count]` and the snippet is truncated
    /// to the configured maximum line count. The language tag is taken from
    /// `lang` when given, otherwise inferred from the file extension. Empty
    /// source yields an empty snippet with range 1..=1.
    pub fn extract(
        &self,
        source: &str,
        file_path: &str,
        start_line: u32,
        end_line: u32,
        lang: Option<Language>,
    ) -> CodeEvidence {
        let language = lang.unwrap_or_else(|| Language::from_path(file_path));
        let lines: Vec<&str> = source.lines().collect();
        let line_count = lines.len() as u32;

        if line_count == 0 {
            return CodeEvidence {
                file_path: file_path.to_string(),
                line_range: LineRange::new(1, 1),
                snippet: String::new(),
                language,
            };
        }

        let start = start_line.clamp(1, line_count);
        let mut end = end_line.clamp(start, line_count);

        // Cap the snippet length.
        let max = self.max_snippet_lines as u32;
        if end - start + 1 > max {
            end = start + max - 1;
        }

        let snippet = lines[(start as usize - 1)..(end as usize)].join("\n");

        CodeEvidence {
            file_path: file_path.to_string(),
            line_range: LineRange::new(start, end),
            snippet,
            language,
        }
    }

    /// Like [`extract`](Self::extract), padding the range by the configured
    /// number of context lines on each side before clamping.
    pub fn extract_with_context(
        &self,
        source: &str,
        file_path: &str,
        start_line: u32,
        end_line: u32,
        lang: Option<Language>,
    ) -> CodeEvidence {
        let pad = self.context_lines as u32;
        self.extract(
            source,
            file_path,
            start_line.saturating_sub(pad).max(1),
            end_line.saturating_add(pad),
            lang,
        )
    }
}

impl Default for EvidenceCollector {
    fn default() -> Self {
        Self::new(&EvidenceConfig::default())
    }
}
