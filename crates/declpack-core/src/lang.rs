//! Source-language dialect flags.

use serde::Deserialize;

/// Dialect switches that change what the writer considers required.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LangOptions {
    pub cplusplus: bool,
    pub objc: bool,
}

impl LangOptions {
    pub fn c() -> Self {
        Self::default()
    }

    pub fn cxx() -> Self {
        Self {
            cplusplus: true,
            ..Self::default()
        }
    }
}
