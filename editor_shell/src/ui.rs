//! Persisted UI configuration
//!
//! Covers the sidetab column: whether it is open and which panel is
//! selected. Stored as JSON under its own key and validated strictly on
//! the way back in — an unrecognized field or tab name rejects the whole
//! value and the session falls back to defaults.

use serde::{Deserialize, Serialize};

/// Which sidetab panel is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sidetab {
    #[default]
    Files,
    Search,
    Extensions,
}

/// State of the sidetab column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidetabConfig {
    pub open: bool,
    pub tab: Sidetab,
}

impl Default for SidetabConfig {
    fn default() -> Self {
        Self {
            open: true,
            tab: Sidetab::Files,
        }
    }
}

/// Everything the shell persists about its UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    pub sidetab: SidetabConfig,
}
