//! Terminal display configuration.

use serde::{Deserialize, Serialize};

const fn default_show_body() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Rows in the post window. `0` derives it from `LINES`.
    #[serde(default)]
    pub viewport_rows: u32,

    /// Wrap width in columns. `0` derives it from `COLUMNS`.
    #[serde(default)]
    pub width: u32,

    /// Render post bodies under their titles.
    #[serde(default = "default_show_body")]
    pub show_body: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            viewport_rows: 0,
            width: 0,
            show_body: default_show_body(),
        }
    }
}
