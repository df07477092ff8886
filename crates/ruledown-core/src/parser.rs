//! Recursive-descent driver.
//!
//! The parser repeatedly asks the matcher for the winning rule at the current
//! position, lets that rule build a node, and continues with the remainder the
//! rule left behind. Rules recurse into their captured content through a
//! [`NestedParser`] handle, which runs the same loop over a sub-fragment.

use log::{debug, warn};

use crate::ast::{Document, Node, NodeBody};
use crate::error::GrammarError;
use crate::matcher;
use crate::options::ParseOptions;
use crate::registry::Registry;
use crate::rule::Fragment;
use crate::span::Span;

/// Mutable context for one parse call.
///
/// Created fresh for every document; never shared between calls or threads.
#[derive(Debug, Clone, Default)]
pub struct ParseState {
    inline: bool,
    depth: usize,
    steps: usize,
}

impl ParseState {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            inline: options.inline,
            depth: 0,
            steps: 0,
        }
    }

    /// Whether block rules are excluded.
    #[inline]
    pub fn inline(&self) -> bool {
        self.inline
    }

    /// Current nesting depth; zero at the top level.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Matcher iterations so far, across all nesting levels.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }
}

/// Rule-driven parser over a [`Registry`].
///
/// # Example
///
/// ```rust
/// use ruledown_core::{Parser, Registry};
///
/// let parser = Parser::new(Registry::standard());
/// let doc = parser.parse("~!hidden!~ in plain sight").unwrap();
/// assert_eq!(doc.nodes[0].type_id, "spoiler");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Parser<'r> {
    registry: &'r Registry,
    options: ParseOptions,
}

impl<'r> Parser<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Select inline mode, where block rules are not eligible.
    pub fn inline(mut self, inline: bool) -> Self {
        self.options.inline = inline;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Parse `input` into a document.
    ///
    /// Only grammar defects fail; any input string yields a document.
    pub fn parse<'a>(&self, input: &'a str) -> Result<Document<'a>, GrammarError> {
        let mut state = ParseState::new(&self.options);
        self.parse_with_state(input, &mut state)
    }

    /// Parse with caller-provided state, so the caller can inspect it after.
    pub fn parse_with_state<'a>(
        &self,
        input: &'a str,
        state: &mut ParseState,
    ) -> Result<Document<'a>, GrammarError> {
        let nodes = self.parse_fragment(Fragment::new(input, 0), state)?;
        debug!(
            "parsed {} bytes into {} top-level nodes in {} steps",
            input.len(),
            nodes.len(),
            state.steps
        );
        Ok(Document {
            nodes,
            span: Span::new(0, input.len()),
        })
    }

    fn parse_fragment<'a>(
        &self,
        fragment: Fragment<'a>,
        state: &mut ParseState,
    ) -> Result<Vec<Node<'a>>, GrammarError> {
        let rules = self.registry.rules();
        let nested = NestedParser { parser: self };
        let mut nodes = Vec::with_capacity(4);
        let mut remaining = fragment;

        while !remaining.is_empty() {
            state.steps += 1;

            let (rule, capture) = matcher::match_at(rules, remaining, state.inline)?;
            let body = (rule.parse_fn)(&capture, &nested, state)?;
            let node = Node {
                type_id: rule.type_id,
                body,
                span: capture.span(),
            };

            if rule.catch_all {
                push_literal(&mut nodes, node);
            } else {
                nodes.push(node);
            }

            // Capture::resolve guarantees at least one byte was consumed.
            remaining = capture.rest;
        }

        Ok(nodes)
    }

    /// The whole fragment as one catch-all text node.
    fn literal<'a>(&self, fragment: Fragment<'a>) -> Node<'a> {
        Node {
            type_id: self.registry.catch_all().type_id,
            body: NodeBody::Text {
                text: fragment.text.into(),
            },
            span: fragment.span(),
        }
    }
}

/// Append a catch-all node, folding it into the previous node when that one
/// is an adjacent text node of the same rule.
fn push_literal<'a>(nodes: &mut Vec<Node<'a>>, node: Node<'a>) {
    if let Some(last) = nodes.last_mut() {
        if last.type_id == node.type_id && last.span.end == node.span.start {
            if let (NodeBody::Text { text }, NodeBody::Text { text: next }) =
                (&mut last.body, &node.body)
            {
                text.to_mut().push_str(next);
                last.span = last.span.merge(node.span);
                return;
            }
        }
    }
    nodes.push(node);
}

/// Handle passed to rule `parse` functions for recursing into captured
/// content with the full grammar.
#[derive(Debug, Clone, Copy)]
pub struct NestedParser<'p> {
    parser: &'p Parser<'p>,
}

impl NestedParser<'_> {
    /// Parse a captured fragment one level deeper.
    ///
    /// Past the configured depth limit the fragment is returned as a single
    /// literal text node instead.
    pub fn parse<'a>(
        &self,
        fragment: Fragment<'a>,
        state: &mut ParseState,
    ) -> Result<Vec<Node<'a>>, GrammarError> {
        if fragment.is_empty() {
            return Ok(Vec::new());
        }
        let limit = self.parser.options.depth_limit();
        if state.depth >= limit {
            warn!(
                "nesting deeper than {} at offset {}, keeping {} bytes as text",
                limit,
                fragment.offset,
                fragment.len()
            );
            return Ok(vec![self.parser.literal(fragment)]);
        }

        state.depth += 1;
        let nodes = self.parser.parse_fragment(fragment, state);
        state.depth -= 1;
        nodes
    }
}
