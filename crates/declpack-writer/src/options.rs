//! Writer configuration.

use declpack_core::LangOptions;
use serde::Deserialize;

/// Session options, loadable from JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    pub lang: LangOptions,
    /// Use compact record shapes where a declaration qualifies.
    pub abbreviations: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            lang: LangOptions::default(),
            abbreviations: true,
        }
    }
}

impl WriterOptions {
    pub fn new(lang: LangOptions) -> Self {
        Self {
            lang,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn without_abbreviations(mut self) -> Self {
        self.abbreviations = false;
        self
    }
}
