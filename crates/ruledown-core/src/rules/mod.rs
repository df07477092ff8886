//! Built-in rules.
//!
//! The grammar comes in two layers. [`base`] is a small markdown-like core:
//! links, images, `*em*`, `**strong**` and plain text. [`extensions`] is
//! merged over it and adds the dialect's own constructs: spoilers, centered
//! blocks, video embeds, `img(...)` images, line-bold with a verbatim
//! remainder, and trimmed text. [`crate::Registry::standard`] is exactly
//! that merge.
//!
//! Every match function is anchored at byte 0 of the remaining input and
//! documents its capture groups.

pub mod center;
pub mod em;
pub mod image;
pub mod link;
pub mod spoiler;
pub mod strong;
pub mod text;
pub mod video;

use crate::ast::{Node, NodeBody};
use crate::error::{GrammarError, RenderError};
use crate::parser::{NestedParser, ParseState};
use crate::rule::{Capture, Rule};

pub const TEXT: &str = "text";
pub const STRONG: &str = "strong";
pub const EM: &str = "em";
pub const LINK: &str = "link";
pub const IMAGE: &str = "image";
pub const SPOILER: &str = "spoiler";
pub const CENTER: &str = "center";
pub const VIDEO: &str = "youtube";

/// Precedence values; lower runs first.
pub mod order {
    pub const CENTER: f64 = 1.0;
    pub const VIDEO: f64 = 8.0;
    pub const SPOILER: f64 = 10.0;
    pub const LINK: f64 = 18.0;
    pub const IMAGE: f64 = 19.0;
    pub const EM: f64 = 22.0;
    pub const STRONG: f64 = 23.0;
    pub const TEXT: f64 = 28.0;
    /// Line-bold runs just before text so every other construct wins first.
    pub const STRONG_LINE: f64 = TEXT - 0.5;
}

/// The markdown-like core grammar.
pub fn base() -> Vec<Rule> {
    vec![
        text::rule(),
        strong::delimited(),
        em::rule(),
        image::markdown(),
        link::rule(),
    ]
}

/// Dialect rules merged over [`base`].
pub fn extensions() -> Vec<Rule> {
    vec![
        strong::line(),
        text::trimmed(),
        image::sized(),
        spoiler::rule(),
        center::rule(),
        video::rule(),
    ]
}

/// Nested-parse capture group `index`; an absent group parses to nothing.
fn parse_group<'a>(
    capture: &Capture<'a>,
    index: usize,
    nested: &NestedParser<'_>,
    state: &mut ParseState,
) -> Result<Vec<Node<'a>>, GrammarError> {
    match capture.group(index) {
        Some(fragment) => nested.parse(fragment, state),
        None => Ok(Vec::new()),
    }
}

/// Shared parse step for rules whose body is their first group, parsed.
fn parse_container<'a>(
    capture: &Capture<'a>,
    nested: &NestedParser<'_>,
    state: &mut ParseState,
) -> Result<NodeBody<'a>, GrammarError> {
    Ok(NodeBody::Container {
        content: parse_group(capture, 0, nested, state)?,
    })
}

fn body_mismatch(node: &Node<'_>) -> RenderError {
    let shape = match node.body {
        NodeBody::Text { .. } => "text",
        NodeBody::Container { .. } => "container",
        NodeBody::Strong { .. } => "strong",
        NodeBody::Link { .. } => "link",
        NodeBody::Image { .. } => "image",
        NodeBody::Video { .. } => "video",
    };
    RenderError::BodyMismatch {
        type_id: node.type_id.to_string(),
        shape,
    }
}

/// End of the line starting at byte 0: index of the first `\n`, or the
/// input length.
fn line_end(bytes: &[u8]) -> usize {
    memchr::memchr(b'\n', bytes).unwrap_or(bytes.len())
}
