//! `~!hidden!~` spoilers.
//!
//! The content stays on one line and ends at the first `!~`.
//! Group 0: the hidden content.

use memchr::memmem;

use super::{body_mismatch, line_end, order, parse_container, SPOILER};
use crate::ast::{Node, NodeBody};
use crate::element::{Element, ElementKind};
use crate::error::RenderError;
use crate::render::{NestedRenderer, RenderState};
use crate::rule::{MatchResult, Rule};

pub fn rule() -> Rule {
    Rule::new(SPOILER, order::SPOILER, match_spoiler, parse_container, render)
}

fn match_spoiler(source: &str) -> Option<MatchResult> {
    let bytes = source.as_bytes();
    if !bytes.starts_with(b"~!") {
        return None;
    }
    let line = &bytes[..line_end(bytes)];
    let close = 2 + memmem::find(&line[2..], b"!~")?;
    Some(MatchResult::new(close + 2).group(Some(2..close)))
}

fn render(
    node: &Node<'_>,
    key: u64,
    nested: &NestedRenderer<'_>,
    state: &mut RenderState,
) -> Result<Element, RenderError> {
    let NodeBody::Container { content } = &node.body else {
        return Err(body_mismatch(node));
    };
    Ok(Element::new(key, ElementKind::Spoiler).with_children(nested.render_all(content, state)?))
}
