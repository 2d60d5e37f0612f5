//! Buffer-level patching.
//!
//! Spans are collected during classification and applied in a single pass,
//! ordered by start offset, once every declaration has been visited.
use crate::error::{NarrowError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl ReplacementSpan {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self { start, end, text: text.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Replacements {
    spans: Vec<ReplacementSpan>,
}

impl Replacements {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, start: usize, end: usize, text: &str) {
        self.spans.push(ReplacementSpan::new(start, end, text));
    }

    pub fn is_empty(&self) -> bool { self.spans.is_empty() }

    /// Spans in application order.
    pub fn sorted(&self) -> Vec<ReplacementSpan> {
        let mut spans = self.spans.clone();
        spans.sort_by_key(|span| (span.start, span.end));
        spans
    }

    pub fn apply(&self, source: &str) -> Result<String> {
        let spans = self.sorted();
        let mut out = String::with_capacity(source.len());
        let mut cursor = 0usize;
        for span in &spans {
            if span.start > span.end
                || span.end > source.len()
                || !source.is_char_boundary(span.start)
                || !source.is_char_boundary(span.end)
            {
                return Err(NarrowError::SpanOutOfBounds {
                    start: span.start,
                    end: span.end,
                    len: source.len(),
                });
            }
            if span.start < cursor {
                return Err(NarrowError::OverlappingReplacement {
                    prev_end: cursor,
                    next_start: span.start,
                    next_end: span.end,
                });
            }
            out.push_str(&source[cursor..span.start]);
            out.push_str(&span.text);
            cursor = span.end;
        }
        out.push_str(&source[cursor..]);
        Ok(out)
    }
}

impl Extend<ReplacementSpan> for Replacements {
    fn extend<I: IntoIterator<Item = ReplacementSpan>>(&mut self, iter: I) {
        self.spans.extend(iter);
    }
}
