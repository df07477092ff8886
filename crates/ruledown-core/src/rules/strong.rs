//! Bold text, in two variants that share the `strong` type id.
//!
//! [`delimited`] (base grammar): `**x**` or `__x__` on one line, closing at
//! the first matching delimiter after a non-empty `x`.
//! Group 0: `x`.
//!
//! [`line`] (dialect): the opening delimiter, content up to the LAST matching
//! delimiter on the line, then the rest of the line, consuming the newline if
//! there is one. The rest is kept verbatim and never parsed.
//! Group 0: content. Group 1: rest of the line.

use std::borrow::Cow;

use memchr::memmem;

use super::{body_mismatch, line_end, order, parse_container, parse_group, STRONG};
use crate::ast::{Node, NodeBody};
use crate::element::{Element, ElementKind, Layout, TextStyle};
use crate::error::{GrammarError, RenderError};
use crate::parser::{NestedParser, ParseState};
use crate::render::{NestedRenderer, RenderState};
use crate::rule::{Capture, MatchResult, Rule};

pub fn delimited() -> Rule {
    Rule::new(
        STRONG,
        order::STRONG,
        match_delimited,
        parse_container,
        render_delimited,
    )
}

pub fn line() -> Rule {
    Rule::new(
        STRONG,
        order::STRONG_LINE,
        match_line,
        parse_line,
        render_line,
    )
}

fn opening(bytes: &[u8]) -> Option<&'static [u8]> {
    if bytes.starts_with(b"**") {
        Some(b"**")
    } else if bytes.starts_with(b"__") {
        Some(b"__")
    } else {
        None
    }
}

fn match_delimited(source: &str) -> Option<MatchResult> {
    let bytes = source.as_bytes();
    let delim = opening(bytes)?;
    let line = &bytes[..line_end(bytes)];
    if line.len() < 5 {
        return None;
    }

    let close = 3 + memmem::find(&line[3..], delim)?;
    Some(MatchResult::new(close + 2).group(Some(2..close)))
}

fn match_line(source: &str) -> Option<MatchResult> {
    let bytes = source.as_bytes();
    let delim = opening(bytes)?;
    let end = line_end(bytes);
    let line = &bytes[..end];

    let close = 2 + memmem::rfind(&line[2..], delim)?;
    let consumed = if end < bytes.len() { end + 1 } else { end };
    Some(
        MatchResult::new(consumed)
            .group(Some(2..close))
            .group(Some(close + 2..end)),
    )
}

fn parse_line<'a>(
    capture: &Capture<'a>,
    nested: &NestedParser<'_>,
    state: &mut ParseState,
) -> Result<NodeBody<'a>, GrammarError> {
    Ok(NodeBody::Strong {
        content: parse_group(capture, 0, nested, state)?,
        rest: Cow::Borrowed(capture.group_str(1)),
    })
}

fn render_delimited(
    node: &Node<'_>,
    key: u64,
    nested: &NestedRenderer<'_>,
    state: &mut RenderState,
) -> Result<Element, RenderError> {
    let NodeBody::Container { content } = &node.body else {
        return Err(body_mismatch(node));
    };
    Ok(Element::new(key, ElementKind::Styled(TextStyle::Bold))
        .with_children(nested.render_all(content, state)?))
}

/// A row holding the bold run and the verbatim rest of the line.
fn render_line(
    node: &Node<'_>,
    key: u64,
    nested: &NestedRenderer<'_>,
    state: &mut RenderState,
) -> Result<Element, RenderError> {
    let NodeBody::Strong { content, rest } = &node.body else {
        return Err(body_mismatch(node));
    };

    let bold_key = state.next_key();
    let bold = Element::new(bold_key, ElementKind::Styled(TextStyle::Bold))
        .with_children(nested.render_all(content, state)?);
    let rest = Element::literal(state.next_key(), rest.trim());

    Ok(Element::new(key, ElementKind::View(Layout::Row)).with_children(vec![bold, rest]))
}
