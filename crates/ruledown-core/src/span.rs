//! Source positions for parsed nodes.
//!
//! Offsets refer to the normalized input handed to the parser, not to the raw
//! text before [`crate::preprocess::normalize`] ran.

/// A byte range `[start, end)` in the parsed input.
///
/// # Example
///
/// ```rust
/// use ruledown_core::span::Span;
///
/// let span = Span::new(0, 6);
/// assert_eq!(span.len(), 6);
/// assert_eq!(span.slice("img200(a.png)"), "img200");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: usize,
    /// Ending byte offset (exclusive).
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Borrow the covered text out of `source`.
    ///
    /// Panics if the span is out of bounds or not on a char boundary, the
    /// same way slicing would.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}
