//! The rule record and the values that flow through it.
//!
//! A [`Rule`] is plain data: a type identifier, a precedence `order` and three
//! function pointers. Matching reports byte ranges relative to the start of
//! the remaining input; the matcher resolves them into a [`Capture`] of
//! borrowed [`Fragment`]s before `parse` runs.

use std::fmt;
use std::ops::Range;

use crate::ast::{Node, NodeBody};
use crate::element::Element;
use crate::error::{GrammarError, RenderError};
use crate::parser::{NestedParser, ParseState};
use crate::render::{NestedRenderer, RenderState};
use crate::span::Span;

/// Tries to recognize a token at byte 0 of the input.
pub type MatchFn = fn(&str) -> Option<MatchResult>;

/// Builds a node body from a capture, recursing through the nested parser
/// for any captured content that should go through the full grammar.
pub type ParseFn = for<'c, 'a, 'n, 'p, 's> fn(
    &'c Capture<'a>,
    &'n NestedParser<'p>,
    &'s mut ParseState,
) -> Result<NodeBody<'a>, GrammarError>;

/// Produces the output element for a node. `key` is the identity reserved for
/// this node; extra wrapper elements take further keys from the state.
pub type RenderFn = for<'n, 'a, 'r, 'p, 's> fn(
    &'n Node<'a>,
    u64,
    &'r NestedRenderer<'p>,
    &'s mut RenderState,
) -> Result<Element, RenderError>;

/// A grammar production with its parse and render behavior.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Node type identifier; unique within a registry.
    pub type_id: &'static str,
    /// Precedence; lower orders are tried first.
    pub order: f64,
    /// Only eligible when parsing in block mode.
    pub block: bool,
    /// Matches any non-empty input. A registry needs at least one.
    pub catch_all: bool,
    pub match_fn: MatchFn,
    pub parse_fn: ParseFn,
    pub render_fn: RenderFn,
}

impl Rule {
    pub const fn new(
        type_id: &'static str,
        order: f64,
        match_fn: MatchFn,
        parse_fn: ParseFn,
        render_fn: RenderFn,
    ) -> Self {
        Self {
            type_id,
            order,
            block: false,
            catch_all: false,
            match_fn,
            parse_fn,
            render_fn,
        }
    }

    /// Restrict the rule to block mode.
    pub const fn block(mut self) -> Self {
        self.block = true;
        self
    }

    /// Mark the rule as the fallback for unrecognized input.
    pub const fn catch_all(mut self) -> Self {
        self.catch_all = true;
        self
    }

    pub const fn with_order(mut self, order: f64) -> Self {
        self.order = order;
        self
    }

    /// Run the rule's matcher against `source`.
    #[inline]
    pub fn try_match(&self, source: &str) -> Option<MatchResult> {
        (self.match_fn)(source)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("type_id", &self.type_id)
            .field("order", &self.order)
            .field("block", &self.block)
            .field("catch_all", &self.catch_all)
            .finish_non_exhaustive()
    }
}

/// Raw result of a successful match.
///
/// `len` is the number of bytes consumed from the start of the input.
/// `groups` are byte ranges relative to the same start; their number and
/// meaning are fixed per rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub len: usize,
    pub groups: Vec<Option<Range<usize>>>,
}

impl MatchResult {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            groups: Vec::new(),
        }
    }

    /// Append a capture group.
    pub fn group(mut self, range: Option<Range<usize>>) -> Self {
        self.groups.push(range);
        self
    }

    /// Convert regex captures, dropping the implicit whole-match group.
    pub fn from_captures(captures: &regex::Captures<'_>) -> Self {
        let len = captures.get(0).map_or(0, |m| m.end());
        let groups = captures
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.range()))
            .collect();
        Self { len, groups }
    }
}

/// A slice of the parsed input together with its absolute byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Fragment<'a> {
    #[inline]
    pub const fn new(text: &'a str, offset: usize) -> Self {
        Self { text, offset }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.offset, self.offset + self.text.len())
    }

    /// Sub-fragment for a range relative to this fragment. `None` when the
    /// range is out of bounds or splits a character.
    pub fn slice(&self, range: Range<usize>) -> Option<Fragment<'a>> {
        let start = range.start;
        self.text
            .get(range)
            .map(|text| Fragment::new(text, self.offset + start))
    }
}

/// A validated match, resolved against the input it was made on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture<'a> {
    /// Rule that produced the match.
    pub type_id: &'static str,
    /// The consumed prefix.
    pub matched: Fragment<'a>,
    /// Capture groups, in rule-defined order.
    pub groups: Vec<Option<Fragment<'a>>>,
    /// Unconsumed remainder.
    pub rest: Fragment<'a>,
}

impl<'a> Capture<'a> {
    /// Check `result` against `remaining`.
    ///
    /// Zero-length matches can never make progress and are rejected, as are
    /// lengths or group ranges that fall outside the input or split a
    /// character.
    pub fn resolve(
        type_id: &'static str,
        remaining: Fragment<'a>,
        result: MatchResult,
    ) -> Result<Self, GrammarError> {
        let offset = remaining.offset;
        if result.len == 0 {
            return Err(GrammarError::EmptyMatch { type_id, offset });
        }
        let malformed = || GrammarError::MalformedMatch { type_id, offset };

        let matched = remaining.slice(0..result.len).ok_or_else(malformed)?;
        let rest = remaining
            .slice(result.len..remaining.len())
            .ok_or_else(malformed)?;

        let groups = result
            .groups
            .into_iter()
            .map(|group| match group {
                Some(range) if range.end <= matched.len() => {
                    matched.slice(range).map(Some).ok_or_else(malformed)
                }
                Some(_) => Err(malformed()),
                None => Ok(None),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            type_id,
            matched,
            groups,
            rest,
        })
    }

    /// Group `index`, counting from zero.
    #[inline]
    pub fn group(&self, index: usize) -> Option<Fragment<'a>> {
        self.groups.get(index).copied().flatten()
    }

    /// Text of group `index`, or `""` when the group did not participate.
    #[inline]
    pub fn group_str(&self, index: usize) -> &'a str {
        self.group(index).map_or("", |fragment| fragment.text)
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.matched.span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_splits_matched_and_rest() {
        let remaining = Fragment::new("~!a!~ tail", 10);
        let result = MatchResult::new(5).group(Some(2..3));
        let capture = Capture::resolve("spoiler", remaining, result).unwrap();

        assert_eq!(capture.matched.text, "~!a!~");
        assert_eq!(capture.rest, Fragment::new(" tail", 15));
        assert_eq!(capture.group(0), Some(Fragment::new("a", 12)));
        assert_eq!(capture.span(), Span::new(10, 15));
    }

    #[test]
    fn resolve_rejects_zero_length() {
        let err = Capture::resolve("bad", Fragment::new("abc", 0), MatchResult::new(0));
        assert_eq!(
            err,
            Err(GrammarError::EmptyMatch {
                type_id: "bad",
                offset: 0
            })
        );
    }

    #[test]
    fn resolve_rejects_group_outside_match() {
        let result = MatchResult::new(2).group(Some(1..3));
        let err = Capture::resolve("bad", Fragment::new("abcd", 4), result);
        assert!(matches!(err, Err(GrammarError::MalformedMatch { .. })));
    }

    #[test]
    fn resolve_rejects_split_character() {
        let err = Capture::resolve("bad", Fragment::new("é!", 0), MatchResult::new(1));
        assert!(matches!(err, Err(GrammarError::MalformedMatch { .. })));
    }
}
