//! Plain text: the catch-all rule.
//!
//! Consumes the first character unconditionally, then runs until the next
//! ASCII punctuation byte (where another rule might start) or the first
//! character of a word that follows whitespace (so word-shaped tokens like
//! `img(` get their turn). Adjacent text nodes are merged by the parser, so
//! the short runs this produces never reach the output.
//!
//! Group 0: the run itself.

use std::borrow::Cow;

use super::{body_mismatch, order, TEXT};
use crate::ast::{Node, NodeBody};
use crate::element::Element;
use crate::error::{GrammarError, RenderError};
use crate::parser::{NestedParser, ParseState};
use crate::render::{NestedRenderer, RenderState};
use crate::rule::{Capture, MatchResult, Rule};

/// Text rendered verbatim.
pub fn rule() -> Rule {
    Rule::new(TEXT, order::TEXT, scan, parse, render).catch_all()
}

/// Text rendered with surrounding whitespace trimmed.
pub fn trimmed() -> Rule {
    Rule::new(TEXT, order::TEXT, scan, parse, render_trimmed).catch_all()
}

pub fn scan(source: &str) -> Option<MatchResult> {
    let first = source.chars().next()?;
    let bytes = source.as_bytes();

    let mut end = first.len_utf8();
    let mut after_space = first.is_ascii_whitespace();
    while end < bytes.len() {
        let b = bytes[end];
        if b.is_ascii_punctuation() || (after_space && !b.is_ascii_whitespace()) {
            break;
        }
        after_space = b.is_ascii_whitespace();
        end += 1;
    }

    Some(MatchResult::new(end).group(Some(0..end)))
}

fn parse<'a>(
    capture: &Capture<'a>,
    _nested: &NestedParser<'_>,
    _state: &mut ParseState,
) -> Result<NodeBody<'a>, GrammarError> {
    Ok(NodeBody::Text {
        text: Cow::Borrowed(capture.matched.text),
    })
}

fn render(
    node: &Node<'_>,
    key: u64,
    _nested: &NestedRenderer<'_>,
    _state: &mut RenderState,
) -> Result<Element, RenderError> {
    let text = node.text().ok_or_else(|| body_mismatch(node))?;
    Ok(Element::literal(key, text))
}

fn render_trimmed(
    node: &Node<'_>,
    key: u64,
    _nested: &NestedRenderer<'_>,
    _state: &mut RenderState,
) -> Result<Element, RenderError> {
    let text = node.text().ok_or_else(|| body_mismatch(node))?;
    Ok(Element::literal(key, text.trim()))
}
