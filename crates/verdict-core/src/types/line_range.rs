//! 1-based inclusive line ranges.

use serde::{Deserialize, Serialize};

/// A 1-based, inclusive range of source lines.
///
/// Invariant: `start >= 1` and `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Create a range, normalizing inverted or zero bounds.
    pub fn new(start: u32, end: u32) -> Self {
        let start = start.max(1);
        let end = end.max(start);
        Self { start, end }
    }

    /// A single-line range.
    pub fn single(line: u32) -> Self {
        Self::new(line, line)
    }

    /// Number of lines covered.
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the given line falls inside the range.
    pub fn contains(&self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "L{}", self.start)
        } else {
            write!(f, "L{}-L{}", self.start, self.end)
        }
    }
}
