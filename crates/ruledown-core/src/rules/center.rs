//! `~~~centered~~~` blocks.
//!
//! Block mode only, and the one construct whose content may span lines. Ends
//! at the first `~~~` after the opener.
//! Group 0: the centered content.

use memchr::memmem;

use super::{body_mismatch, order, parse_container, CENTER};
use crate::ast::{Node, NodeBody};
use crate::element::{Element, ElementKind, Layout};
use crate::error::RenderError;
use crate::render::{NestedRenderer, RenderState};
use crate::rule::{MatchResult, Rule};

const FENCE: &[u8] = b"~~~";

pub fn rule() -> Rule {
    Rule::new(CENTER, order::CENTER, match_center, parse_container, render).block()
}

fn match_center(source: &str) -> Option<MatchResult> {
    let bytes = source.as_bytes();
    if !bytes.starts_with(FENCE) {
        return None;
    }
    let close = FENCE.len() + memmem::find(&bytes[FENCE.len()..], FENCE)?;
    Some(MatchResult::new(close + FENCE.len()).group(Some(FENCE.len()..close)))
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
    Ok(Element::new(key, ElementKind::View(Layout::Centered))
        .with_children(nested.render_all(content, state)?))
}
