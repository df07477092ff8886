//! Error types.
//!
//! Only defects surface as errors: a grammar that cannot guarantee progress,
//! or a node tree rendered with a registry that does not know its rules.
//! Malformed user markup is never an error; it falls through to the
//! catch-all rule and comes out as literal text.

use thiserror::Error;

/// A defect in the assembled grammar.
///
/// Returned by [`crate::Registry::build`] when validation fails, and by the
/// parser if a rule misbehaves on input the build-time probes did not cover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// No rule is flagged as the catch-all.
    #[error("grammar has no catch-all rule")]
    MissingCatchAll,

    /// The catch-all rule refused a non-empty probe input.
    #[error("catch-all rule `{type_id}` does not match {probe:?}")]
    CatchAllRejected {
        type_id: &'static str,
        probe: &'static str,
    },

    /// A rule order is NaN or infinite.
    #[error("rule `{type_id}` has a non-finite order")]
    InvalidOrder { type_id: &'static str },

    /// A rule matched without consuming input.
    #[error("rule `{type_id}` matched zero bytes at offset {offset}")]
    EmptyMatch { type_id: &'static str, offset: usize },

    /// A rule reported a match length or group range that does not fit the
    /// input it was given.
    #[error("rule `{type_id}` reported a malformed match at offset {offset}")]
    MalformedMatch { type_id: &'static str, offset: usize },

    /// Nothing matched, so the catch-all rule is broken.
    #[error("no rule matched at offset {offset}")]
    NoRuleMatched { offset: usize },
}

/// A node tree was rendered with a registry that cannot handle it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no rule registered for node type `{type_id}`")]
    UnknownRule { type_id: String },

    /// The rule registered for a node type does not understand its body,
    /// which means parse and render used different grammars.
    #[error("rule `{type_id}` cannot render a {shape} body")]
    BodyMismatch {
        type_id: String,
        shape: &'static str,
    },
}

/// Any failure of the parse and render pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
