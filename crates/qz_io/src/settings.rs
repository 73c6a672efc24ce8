//! Settings file: engine configuration, category initials, weight cap and
//! record link templates.
//!
//! ```json
//! {
//!   "engine":   { "category_count": 7, "radix": 8, "tier_depth": 4, "label_separator": "-" },
//!   "initials": ["-", "R", "I", "A", "S", "E", "C"],
//!   "max_weight": 4,
//!   "links": { "code_1": "https://example.org/a/{}", "code_2": "https://example.org/b/{}" }
//! }
//! ```
//! Every key is optional; omitted keys take the engine defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use qz_core::{CategoryLabels, EngineConfig};

use crate::{read_to_string, IoError, IoResult};

/// Placeholder substituted with a record code inside a link template.
pub const LINK_PLACEHOLDER: &str = "{}";

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkTemplates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_2: Option<String>,
}

impl LinkTemplates {
    pub fn code_1_link(&self, code: &str) -> Option<String> {
        self.code_1.as_deref().map(|t| t.replace(LINK_PLACEHOLDER, code))
    }

    pub fn code_2_link(&self, code: &str) -> Option<String> {
        self.code_2.as_deref().map(|t| t.replace(LINK_PLACEHOLDER, code))
    }

    pub fn is_empty(&self) -> bool {
        self.code_1.is_none() && self.code_2.is_none()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub initials: CategoryLabels,
    /// Largest accepted answer weight; `None` accepts any `u32`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<u32>,
    #[serde(default)]
    pub links: LinkTemplates,
}

impl Settings {
    /// Cross-field checks serde cannot express.
    pub fn validate(&self) -> IoResult<()> {
        let n = self.engine.category_count() as usize;
        if !self.initials.is_empty() && self.initials.len() != n {
            return Err(IoError::Invalid(format!(
                "initials has {} entries but category_count is {n}",
                self.initials.len()
            )));
        }
        if self.max_weight == Some(0) {
            return Err(IoError::Invalid("max_weight must be at least 1".into()));
        }
        for (key, t) in [("code_1", &self.links.code_1), ("code_2", &self.links.code_2)] {
            if let Some(t) = t {
                if !t.contains(LINK_PLACEHOLDER) {
                    return Err(IoError::Json {
                        pointer: format!("/links/{key}"),
                        msg: format!("template has no {LINK_PLACEHOLDER} placeholder"),
                    });
                }
            }
        }
        Ok(())
    }
}

pub fn parse_settings(text: &str) -> IoResult<Settings> {
    let s: Settings = serde_json::from_str(text)?;
    s.validate()?;
    Ok(s)
}

pub fn load_settings(path: &Path) -> IoResult<Settings> {
    parse_settings(&read_to_string(path)?)
}
