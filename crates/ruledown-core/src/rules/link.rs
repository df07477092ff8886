//! `[label](href)` links (base grammar).
//!
//! The label stays on one line and may not contain `]`; the href is a
//! non-empty run without `)` or whitespace.
//! Group 0: label. Group 1: href.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{body_mismatch, order, parse_group, LINK};
use crate::ast::{Node, NodeBody};
use crate::element::{Element, ElementKind};
use crate::error::{GrammarError, RenderError};
use crate::parser::{NestedParser, ParseState};
use crate::render::{NestedRenderer, RenderState};
use crate::rule::{Capture, MatchResult, Rule};

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]\n]*)\]\(([^)\s]+)\)").expect("link pattern is valid"));

pub fn rule() -> Rule {
    Rule::new(LINK, order::LINK, match_link, parse, render)
}

fn match_link(source: &str) -> Option<MatchResult> {
    LINK_RE
        .captures(source)
        .map(|caps| MatchResult::from_captures(&caps))
}

fn parse<'a>(
    capture: &Capture<'a>,
    nested: &NestedParser<'_>,
    state: &mut ParseState,
) -> Result<NodeBody<'a>, GrammarError> {
    Ok(NodeBody::Link {
        content: parse_group(capture, 0, nested, state)?,
        href: Cow::Borrowed(capture.group_str(1)),
    })
}

fn render(
    node: &Node<'_>,
    key: u64,
    nested: &NestedRenderer<'_>,
    state: &mut RenderState,
) -> Result<Element, RenderError> {
    let NodeBody::Link { content, href } = &node.body else {
        return Err(body_mismatch(node));
    };
    Ok(Element::new(key, ElementKind::Link(href.to_string()))
        .with_children(nested.render_all(content, state)?))
}
