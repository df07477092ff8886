//! Optional TOML configuration.
//!
//! ```toml
//! [parse]
//! inline = false
//! max_depth = 16
//!
//! [render]
//! image_size = 320
//! ```
//!
//! Every key is optional; missing ones keep their defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use ruledown_core::{ParseOptions, RenderOptions};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub parse: ParseOptions,
    pub render: RenderOptions,
}

impl Config {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("invalid config '{}'", path.display()))?;
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
