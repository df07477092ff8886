//! Images, in two variants that share the `image` type id.
//!
//! [`markdown`] (base grammar): `![alt](src)`.
//! Group 0: alt text. Group 1: source.
//!
//! [`sized`] (dialect): `img<digits>(<url>)`, e.g. `img220(https://x/y.png)`.
//! The digits are optional; the url is a non-empty run without `)` or
//! whitespace.
//! Group 0: width digits. Group 1: url.
//!
//! Both render a square image: the given width, or the configured default
//! size when there is none.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{body_mismatch, order, IMAGE};
use crate::ast::{Node, NodeBody};
use crate::element::{Dimension, Element, ElementKind, ImageSource};
use crate::error::{GrammarError, RenderError};
use crate::parser::{NestedParser, ParseState};
use crate::render::{NestedRenderer, RenderState};
use crate::rule::{Capture, MatchResult, Rule};

static MARKDOWN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^!\[([^\]\n]*)\]\(([^)\s]+)\)").expect("markdown image pattern is valid")
});

static SIZED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^img(\d*)\(([^)\s]+)\)").expect("sized image pattern is valid"));

pub fn markdown() -> Rule {
    Rule::new(IMAGE, order::IMAGE, match_markdown, parse_markdown, render)
}

pub fn sized() -> Rule {
    Rule::new(IMAGE, order::IMAGE, match_sized, parse_sized, render)
}

fn match_markdown(source: &str) -> Option<MatchResult> {
    MARKDOWN_RE
        .captures(source)
        .map(|caps| MatchResult::from_captures(&caps))
}

fn match_sized(source: &str) -> Option<MatchResult> {
    SIZED_RE
        .captures(source)
        .map(|caps| MatchResult::from_captures(&caps))
}

fn parse_markdown<'a>(
    capture: &Capture<'a>,
    _nested: &NestedParser<'_>,
    _state: &mut ParseState,
) -> Result<NodeBody<'a>, GrammarError> {
    Ok(NodeBody::Image {
        link: Cow::Borrowed(capture.group_str(1)),
        alt: Some(Cow::Borrowed(capture.group_str(0))),
        width: None,
    })
}

fn parse_sized<'a>(
    capture: &Capture<'a>,
    _nested: &NestedParser<'_>,
    _state: &mut ParseState,
) -> Result<NodeBody<'a>, GrammarError> {
    // Digits too large for u32 fall back to the default size.
    Ok(NodeBody::Image {
        link: Cow::Borrowed(capture.group_str(1)),
        alt: None,
        width: capture.group_str(0).parse().ok(),
    })
}

fn render(
    node: &Node<'_>,
    key: u64,
    _nested: &NestedRenderer<'_>,
    state: &mut RenderState,
) -> Result<Element, RenderError> {
    let NodeBody::Image { link, width, .. } = &node.body else {
        return Err(body_mismatch(node));
    };
    let size = width.unwrap_or(state.options().image_size);
    Ok(Element::new(
        key,
        ElementKind::Image(ImageSource {
            uri: link.to_string(),
            width: Dimension::Points(size),
            height: size,
            radius: 0,
            href: None,
        }),
    ))
}
