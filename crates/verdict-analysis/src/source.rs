//! Preprocessed view of a source unit shared by all detectors.
//!
//! Detectors operate on raw text, but most of them need the same per-line
//! facts: is the line a comment, what is the brace depth before and after
//! it, where does a block opened on line N end. `SourceUnit` computes those
//! once per evaluation so detectors stay stateless line scanners.

use verdict_core::Language;

/// Classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Code,
    Comment,
    Blank,
}

/// Per-line facts computed once per unit.
#[derive(Debug, Clone)]
pub struct LineInfo {
    /// 1-based line number.
    pub number: u32,
    pub kind: LineKind,
    /// Brace depth before the line's first character.
    pub depth_before: u32,
    /// Brace depth after the line's last character.
    pub depth_after: u32,
}

/// A source unit under evaluation: raw text, path, language, and the
/// precomputed per-line profile.
#[derive(Debug, Clone)]
pub struct SourceUnit<'a> {
    pub source: &'a str,
    pub file_path: &'a str,
    pub language: Language,
    lines: Vec<&'a str>,
    info: Vec<LineInfo>,
}

impl<'a> SourceUnit<'a> {
    pub fn new(source: &'a str, file_path: &'a str) -> Self {
        let language = Language::from_path(file_path);
        let lines: Vec<&str> = source.lines().collect();
        let info = profile_lines(&lines);
        Self {
            source,
            file_path,
            language,
            lines,
            info,
        }
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Text of a 1-based line, or `""` when out of range.
    pub fn line(&self, number: u32) -> &'a str {
        if number == 0 {
            return "";
        }
        self.lines.get(number as usize - 1).copied().unwrap_or("")
    }

    /// Iterate `(1-based number, text)` pairs.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (u32, &'a str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, l)| (i as u32 + 1, *l))
    }

    /// Iterate only code lines (skipping comments and blanks).
    pub fn code_lines(&self) -> impl Iterator<Item = (u32, &'a str)> + '_ {
        self.numbered_lines()
            .filter(|(n, _)| self.kind(*n) == LineKind::Code)
    }

    pub fn kind(&self, number: u32) -> LineKind {
        if number == 0 {
            return LineKind::Blank;
        }
        self.info
            .get(number as usize - 1)
            .map(|i| i.kind)
            .unwrap_or(LineKind::Blank)
    }

    pub fn is_comment(&self, number: u32) -> bool {
        self.kind(number) == LineKind::Comment
    }

    /// Number of non-comment, non-blank lines.
    pub fn code_line_count(&self) -> u32 {
        self.info
            .iter()
            .filter(|i| i.kind == LineKind::Code)
            .count() as u32
    }

    /// Brace depth before the line's first character.
    pub fn depth_before(&self, number: u32) -> u32 {
        if number == 0 {
            return 0;
        }
        self.info
            .get(number as usize - 1)
            .map(|i| i.depth_before)
            .unwrap_or(0)
    }

    /// Brace depth after the line's last character.
    pub fn depth_after(&self, number: u32) -> u32 {
        if number == 0 {
            return 0;
        }
        self.info
            .get(number as usize - 1)
            .map(|i| i.depth_after)
            .unwrap_or(0)
    }

    /// Last line of the block opened on `start`: the first subsequent line
    /// whose closing depth falls below the depth reached after `start`.
    /// Returns `start` itself when no block opens there, and the final line
    /// when the block never closes (truncated source).
    pub fn block_end(&self, start: u32) -> u32 {
        let open_depth = self.depth_after(start);
        if open_depth <= self.depth_before(start) {
            return start;
        }
        for number in (start + 1)..=self.line_count() {
            if self.depth_after(number) < open_depth {
                return number;
            }
        }
        self.line_count().max(start)
    }
}

/// Compute per-line kind and brace depth, skipping braces inside string
/// literals and trailing line comments. A heuristic profile, not a parse.
fn profile_lines(lines: &[&str]) -> Vec<LineInfo> {
    let mut info = Vec::with_capacity(lines.len());
    let mut depth: u32 = 0;
    let mut in_block_comment = false;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let depth_before = depth;

        let kind = if in_block_comment {
            if trimmed.contains("*/") {
                in_block_comment = false;
            }
            LineKind::Comment
        } else if trimmed.is_empty() {
            LineKind::Blank
        } else if is_comment_start(trimmed) {
            if trimmed.starts_with("/*") && !trimmed.contains("*/") {
                in_block_comment = true;
            }
            LineKind::Comment
        } else {
            depth = scan_depth(line, depth);
            LineKind::Code
        };

        info.push(LineInfo {
            number: idx as u32 + 1,
            kind,
            depth_before,
            depth_after: depth,
        });
    }

    info
}

fn is_comment_start(trimmed: &str) -> bool {
    trimmed.starts_with("//")
        || trimmed.starts_with('#') && !trimmed.starts_with("#[")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
        || trimmed.starts_with("\"\"\"")
        || trimmed.starts_with("'''")
        || trimmed.starts_with("<!--")
}

/// Count brace depth across a line, ignoring braces inside quotes and
/// anything after a `//` comment marker.
fn scan_depth(line: &str, mut depth: u32) -> u32 {
    let mut chars = line.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' | '`' => quote = Some(c),
                '/' if chars.peek() == Some(&'/') => break,
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }

    depth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_depth_and_kinds() {
        let source = "function f() {\n  // a comment\n  if (x) {\n    g();\n  }\n}\n";
        let unit = SourceUnit::new(source, "a.ts");

        assert_eq!(unit.line_count(), 6);
        assert_eq!(unit.kind(2), LineKind::Comment);
        assert_eq!(unit.depth_before(4), 2);
        assert_eq!(unit.depth_after(6), 0);
        assert_eq!(unit.code_line_count(), 5);
    }

    #[test]
    fn block_end_finds_matching_close() {
        let source = "try {\n  a();\n  b();\n} catch (e) {\n  log(e);\n}\nafter();\n";
        let unit = SourceUnit::new(source, "a.js");

        // The catch clause reopens on the same line the try block closes,
        // so the construct runs to the catch's closing brace.
        assert_eq!(unit.block_end(1), 6);
    }

    #[test]
    fn braces_in_strings_are_ignored() {
        let source = "const s = \"{ not a block }\";\ncall();\n";
        let unit = SourceUnit::new(source, "a.js");
        assert_eq!(unit.depth_after(1), 0);
    }

    #[test]
    fn empty_source_is_harmless() {
        let unit = SourceUnit::new("", "a.ts");
        assert_eq!(unit.line_count(), 0);
        assert_eq!(unit.line(1), "");
        assert_eq!(unit.block_end(1), 1);
    }
}
