use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Display strings loaded from `texts.json`.
///
/// The typed deserialization is the shape contract: every key is required,
/// every value must be a string except `win`, which is a list of lines, and
/// unknown keys are rejected. A mismatch is a fatal configuration error at
/// startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Texts {
    pub win: Vec<String>,
    pub empty_tile: String,
    pub score: String,
    pub highscore: String,
    pub tile_highscore: String,
    pub death: String,
    pub info: String,
    pub stats: String,
}

impl Texts {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading text resource {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("{} does not match the expected shape", path.display()))
    }
}
