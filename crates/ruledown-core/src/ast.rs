//! Document tree produced by the parser.
//!
//! The tree is:
//!
//! - **Zero-copy**: text payloads are `Cow<'a, str>` borrowing from the input
//! - **Span-tracked**: every node records the bytes its rule consumed
//! - **Rule-tagged**: every node names the rule that produced it, which is
//!   also the rule that renders it

use crate::span::Span;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = std::borrow::Cow<'a, str>;

/// A parsed document: the ordered top-level nodes of one input string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document<'a> {
    /// Top-level nodes in input order.
    pub nodes: Vec<Node<'a>>,
    /// Span covering the entire input.
    pub span: Span,
}

impl<'a> Document<'a> {
    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of nodes at every depth.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(Node::node_count).sum()
    }

    /// Deepest nesting level; a document of plain leaves has depth 1.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(Node::depth).max().unwrap_or(0)
    }
}

/// One unit of the document tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node<'a> {
    /// Type identifier of the rule that produced this node.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_id: &'static str,
    /// Rule-specific payload.
    pub body: NodeBody<'a>,
    /// Bytes consumed by the rule.
    pub span: Span,
}

impl<'a> Node<'a> {
    /// Nested nodes, empty for leaves.
    pub fn children(&self) -> &[Node<'a>] {
        self.body.children()
    }

    /// Literal text of a text leaf.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            NodeBody::Text { text } => Some(text.as_ref()),
            _ => None,
        }
    }

    /// This node plus all of its descendants.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Node::depth).max().unwrap_or(0)
    }
}

/// Rule-specific node payloads.
///
/// Rules pick whichever shape fits; several rules may share one (spoilers,
/// centered blocks and the base emphasis rules are all `Container`s).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum NodeBody<'a> {
    /// Literal text leaf.
    Text { text: CowStr<'a> },
    /// Inline or block container of nested nodes.
    Container { content: Vec<Node<'a>> },
    /// Bold span followed by the rest of its line, which is kept verbatim.
    Strong {
        content: Vec<Node<'a>>,
        rest: CowStr<'a>,
    },
    /// Hyperlink around nested label content.
    Link {
        content: Vec<Node<'a>>,
        href: CowStr<'a>,
    },
    /// Image reference; `width` is `None` when the source gave no size.
    Image {
        link: CowStr<'a>,
        alt: Option<CowStr<'a>>,
        width: Option<u32>,
    },
    /// Embedded video, identified by its canonical link and video id.
    Video { link: CowStr<'a>, id: CowStr<'a> },
}

impl<'a> NodeBody<'a> {
    pub fn children(&self) -> &[Node<'a>] {
        match self {
            NodeBody::Container { content }
            | NodeBody::Strong { content, .. }
            | NodeBody::Link { content, .. } => content,
            NodeBody::Text { .. } | NodeBody::Image { .. } | NodeBody::Video { .. } => &[],
        }
    }
}
