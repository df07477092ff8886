//! # Ruledown Core
//!
//! A rule-driven parser and renderer for a small markdown dialect used in
//! chat and forum posts: spoilers, centered blocks, video thumbnails, sized
//! images and line-bold on top of the usual emphasis, links and images.
//!
//! The grammar is a table of [`Rule`]s, each a plain record of a type id, a
//! precedence order and three functions (match, parse, render). Parsing asks
//! every rule in order whether it recognizes the input at the current
//! position; the first one wins. Rendering turns the resulting tree into
//! keyed [`Element`]s.
//!
//! ## Quick Start
//!
//! ```rust
//! use ruledown_core::{Engine, ElementKind, TextStyle};
//!
//! let root = Engine::standard().render_str("*so* ~!secret!~").unwrap();
//! assert_eq!(root.children[0].kind, ElementKind::Styled(TextStyle::Italic));
//! assert_eq!(root.children[2].kind, ElementKind::Spoiler);
//! ```
//!
//! ## Parsing without rendering
//!
//! ```rust
//! use ruledown_core::{Parser, Registry};
//!
//! let doc = Parser::new(Registry::standard())
//!     .parse("__Title__ by someone\nbody")
//!     .unwrap();
//! assert_eq!(doc.nodes[0].type_id, "strong");
//! assert_eq!(doc.nodes[1].text(), Some("body"));
//! ```
//!
//! ## Custom grammars
//!
//! [`Registry::build`] merges extension rules over a base list. A rule with
//! an existing type id replaces that rule; any other is added. The result is
//! validated before use, so a grammar that could stall the parser is
//! rejected up front.

pub mod ast;
pub mod element;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod options;
pub mod parser;
pub mod preprocess;
pub mod registry;
pub mod render;
pub mod rule;
pub mod rules;
pub mod span;

pub use ast::{Document, Node, NodeBody};
pub use element::{Dimension, Element, ElementKind, ImageSource, Layout, TextStyle};
pub use engine::Engine;
pub use error::{Error, GrammarError, RenderError};
pub use options::{ParseOptions, RenderOptions, MAX_DEPTH_CEILING};
pub use parser::{NestedParser, ParseState, Parser};
pub use registry::Registry;
pub use render::{NestedRenderer, RenderState, Renderer};
pub use rule::{Capture, Fragment, MatchResult, Rule};
pub use span::Span;
