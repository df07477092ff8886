//! Projection of the document tree onto [`Element`]s.
//!
//! The renderer walks the tree in the shape it was parsed and hands each node
//! to the render callback of the rule that produced it. Every call reserves a
//! fresh key from the [`RenderState`] before descending, so keys are unique
//! within one pass.

use crate::ast::{Document, Node};
use crate::element::{Element, ElementKind, Layout};
use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::registry::Registry;

/// Mutable context for one render pass.
#[derive(Debug, Clone)]
pub struct RenderState {
    next_key: u64,
    options: RenderOptions,
}

impl RenderState {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            next_key: 0,
            options,
        }
    }

    /// Reserve a key that no other element of this pass will get.
    #[inline]
    pub fn next_key(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    /// Keys handed out so far.
    #[inline]
    pub fn keys_issued(&self) -> u64 {
        self.next_key
    }

    #[inline]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Dispatches nodes to their rules' render callbacks.
///
/// # Example
///
/// ```rust
/// use ruledown_core::{Parser, Registry, Renderer};
///
/// let registry = Registry::standard();
/// let doc = Parser::new(registry).parse("just words").unwrap();
/// let elements = Renderer::new(registry).render(&doc.nodes).unwrap();
/// assert_eq!(elements[0].plain_text(), "just words");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'r> {
    registry: &'r Registry,
    options: RenderOptions,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Render a node sequence with a fresh state.
    pub fn render(&self, nodes: &[Node<'_>]) -> Result<Vec<Element>, RenderError> {
        let mut state = RenderState::new(self.options);
        self.render_all(nodes, &mut state)
    }

    /// Render a whole document under a keyed column root.
    pub fn render_document(&self, document: &Document<'_>) -> Result<Element, RenderError> {
        let mut state = RenderState::new(self.options);
        self.render_document_with_state(document, &mut state)
    }

    pub fn render_document_with_state(
        &self,
        document: &Document<'_>,
        state: &mut RenderState,
    ) -> Result<Element, RenderError> {
        let key = state.next_key();
        let children = self.render_all(&document.nodes, state)?;
        Ok(Element::new(key, ElementKind::View(Layout::Column)).with_children(children))
    }

    /// Render one node through its rule.
    pub fn render_node(
        &self,
        node: &Node<'_>,
        state: &mut RenderState,
    ) -> Result<Element, RenderError> {
        let rule = self
            .registry
            .get(node.type_id)
            .ok_or_else(|| RenderError::UnknownRule {
                type_id: node.type_id.to_string(),
            })?;

        let key = state.next_key();
        let nested = NestedRenderer { renderer: self };
        (rule.render_fn)(node, key, &nested, state)
    }

    fn render_all(
        &self,
        nodes: &[Node<'_>],
        state: &mut RenderState,
    ) -> Result<Vec<Element>, RenderError> {
        nodes
            .iter()
            .map(|node| self.render_node(node, state))
            .collect()
    }
}

/// Handle passed to rule `render` functions for rendering child nodes.
#[derive(Debug, Clone, Copy)]
pub struct NestedRenderer<'p> {
    renderer: &'p Renderer<'p>,
}

impl NestedRenderer<'_> {
    pub fn render(
        &self,
        node: &Node<'_>,
        state: &mut RenderState,
    ) -> Result<Element, RenderError> {
        self.renderer.render_node(node, state)
    }

    /// Render children in order.
    pub fn render_all(
        &self,
        nodes: &[Node<'_>],
        state: &mut RenderState,
    ) -> Result<Vec<Element>, RenderError> {
        self.renderer.render_all(nodes, state)
    }
}
