//! `*emphasis*` (base grammar).
//!
//! Opens on a single `*` followed by a character that is neither `*` nor
//! whitespace, closes at the next single `*` on the same line that does not
//! follow whitespace. A `**` pair inside is skipped over.
//! Group 0: the emphasized content.

use memchr::memchr;

use super::{body_mismatch, line_end, order, parse_container, EM};
use crate::ast::{Node, NodeBody};
use crate::element::{Element, ElementKind, TextStyle};
use crate::error::RenderError;
use crate::render::{NestedRenderer, RenderState};
use crate::rule::{MatchResult, Rule};

pub fn rule() -> Rule {
    Rule::new(EM, order::EM, match_em, parse_container, render)
}

fn match_em(source: &str) -> Option<MatchResult> {
    let bytes = source.as_bytes();
    if bytes.first() != Some(&b'*') {
        return None;
    }
    match bytes.get(1) {
        Some(b) if *b != b'*' && !b.is_ascii_whitespace() => {}
        _ => return None,
    }

    let line = &bytes[..line_end(bytes)];
    let mut pos = 2;
    while let Some(offset) = memchr(b'*', &line[pos..]) {
        let close = pos + offset;
        if line.get(close + 1) == Some(&b'*') {
            pos = close + 2;
        } else if line[close - 1].is_ascii_whitespace() {
            pos = close + 1;
        } else {
            return Some(MatchResult::new(close + 1).group(Some(1..close)));
        }
        if pos >= line.len() {
            break;
        }
    }
    None
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
    Ok(Element::new(key, ElementKind::Styled(TextStyle::Italic))
        .with_children(nested.render_all(content, state)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_at_single_star() {
        let m = match_em("*soft* words").unwrap();
        assert_eq!(m.len, 6);
        assert_eq!(m.groups, vec![Some(1..5)]);
    }

    #[test]
    fn skips_double_star_inside() {
        let m = match_em("*a **b** c*").unwrap();
        assert_eq!(m.len, 11);
    }

    #[test]
    fn rejects_bad_openers() {
        assert!(match_em("**a**").is_none());
        assert!(match_em("* list").is_none());
        assert!(match_em("*open").is_none());
        assert!(match_em("*").is_none());
    }
}
