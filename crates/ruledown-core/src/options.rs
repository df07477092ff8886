//! Parse and render settings.
//!
//! These tune how a document is processed; they never change the grammar.
//! With the `serde` feature both structs deserialize from partial tables,
//! missing fields taking their defaults.

/// Hard ceiling on [`ParseOptions::max_depth`]. Nested content recurses on
/// the call stack, so larger configured values are clamped to this.
pub const MAX_DEPTH_CEILING: usize = 128;

/// Settings for one parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ParseOptions {
    /// Skip block-level rules such as centered blocks.
    pub inline: bool,
    /// Deepest nesting that is parsed; deeper content stays literal text.
    /// Values above [`MAX_DEPTH_CEILING`] behave as the ceiling.
    pub max_depth: usize,
}

impl ParseOptions {
    /// The nesting limit actually enforced.
    #[inline]
    pub fn depth_limit(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_CEILING)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            inline: false,
            max_depth: 32,
        }
    }
}

/// Sizes used by the built-in render callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RenderOptions {
    /// Edge length of images that give no explicit width.
    pub image_size: u32,
    /// Height of video thumbnails.
    pub video_height: u32,
    /// Corner radius of video thumbnails.
    pub corner_radius: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_size: 200,
            video_height: 200,
            corner_radius: 4,
        }
    }
}
