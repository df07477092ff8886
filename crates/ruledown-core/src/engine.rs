//! One-call facade: normalize, parse and render.

use crate::ast::Document;
use crate::element::Element;
use crate::error::Error;
use crate::options::{ParseOptions, RenderOptions};
use crate::parser::Parser;
use crate::preprocess;
use crate::registry::Registry;
use crate::render::Renderer;

/// A registry bundled with parse and render settings.
///
/// # Example
///
/// ```rust
/// use ruledown_core::{ElementKind, Engine};
///
/// let root = Engine::standard().render_str("~!boo!~").unwrap();
/// assert_eq!(root.children[0].kind, ElementKind::Spoiler);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Engine<'r> {
    registry: &'r Registry,
    parse: ParseOptions,
    render: RenderOptions,
}

impl Engine<'static> {
    /// Engine over the built-in grammar with default settings.
    pub fn standard() -> Self {
        Self::new(Registry::standard())
    }
}

impl<'r> Engine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            parse: ParseOptions::default(),
            render: RenderOptions::default(),
        }
    }

    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn parser(&self) -> Parser<'r> {
        Parser::new(self.registry).with_options(self.parse)
    }

    pub fn renderer(&self) -> Renderer<'r> {
        Renderer::new(self.registry).with_options(self.render)
    }

    /// Parse text that has already been normalized.
    pub fn parse<'a>(&self, input: &'a str) -> Result<Document<'a>, Error> {
        Ok(self.parser().parse(input)?)
    }

    /// Normalize `raw`, parse it and render the document.
    pub fn render_str(&self, raw: &str) -> Result<Element, Error> {
        let text = preprocess::normalize(raw);
        let document = self.parser().parse(&text)?;
        Ok(self.renderer().render_document(&document)?)
    }
}
