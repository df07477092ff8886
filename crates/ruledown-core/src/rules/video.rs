//! `-youtube(<url>)` video embeds, shown as a linked thumbnail.
//!
//! The url must carry a `v=` query parameter after `?` or `&`.
//! Group 0: the url. Group 1: the video id.
//!
//! Authors usually write the bare `youtube(...)` form; the preprocessor
//! rewrites it to this one.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{body_mismatch, order, VIDEO};
use crate::ast::{Node, NodeBody};
use crate::element::{Dimension, Element, ElementKind, ImageSource};
use crate::error::{GrammarError, RenderError};
use crate::parser::{NestedParser, ParseState};
use crate::render::{NestedRenderer, RenderState};
use crate::rule::{Capture, MatchResult, Rule};

static VIDEO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-youtube\(([^)\s]*?[?&]v=([A-Za-z0-9_-]+)[^)\s]*)\)")
        .expect("video pattern is valid")
});

pub fn rule() -> Rule {
    Rule::new(VIDEO, order::VIDEO, match_video, parse, render)
}

/// Thumbnail address for a video id.
pub fn thumbnail_uri(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/0.jpg")
}

fn match_video(source: &str) -> Option<MatchResult> {
    VIDEO_RE
        .captures(source)
        .map(|caps| MatchResult::from_captures(&caps))
}

fn parse<'a>(
    capture: &Capture<'a>,
    _nested: &NestedParser<'_>,
    _state: &mut ParseState,
) -> Result<NodeBody<'a>, GrammarError> {
    Ok(NodeBody::Video {
        link: Cow::Borrowed(capture.group_str(0)),
        id: Cow::Borrowed(capture.group_str(1)),
    })
}

fn render(
    node: &Node<'_>,
    key: u64,
    _nested: &NestedRenderer<'_>,
    state: &mut RenderState,
) -> Result<Element, RenderError> {
    let NodeBody::Video { link, id } = &node.body else {
        return Err(body_mismatch(node));
    };
    let options = state.options();
    Ok(Element::new(
        key,
        ElementKind::Image(ImageSource {
            uri: thumbnail_uri(id),
            width: Dimension::Percent(100),
            height: options.video_height,
            radius: options.corner_radius,
            href: Some(link.to_string()),
        }),
    ))
}
