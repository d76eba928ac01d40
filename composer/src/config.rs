use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// How repeated generation treats fragments that are already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPolicy {
    /// HTML and JS fragments are inserted on every run; CSS skips exact
    /// duplicates.
    #[default]
    Append,
    /// Every buffer skips fragments whose exact text it already contains.
    Idempotent,
}

/// How rendered fragments are routed to buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Inspect the fragment text.
    #[default]
    Syntactic,
    /// Use the block's catalog category.
    Category,
}

/// Merge engine settings, usually read from `blockweb.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub policy: InsertPolicy,
    pub classification: Classification,
    /// Literal opening of the DOM-ready wrapper in the JS buffer.
    pub ready_wrapper: String,
    /// Closing marker of the wrapper; the last occurrence after the opening is used.
    pub ready_close: String,
    /// Prefix for each spliced line.
    pub indent: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            policy: InsertPolicy::Append,
            classification: Classification::Syntactic,
            ready_wrapper: r#"document.addEventListener("DOMContentLoaded", function() {"#.to_string(),
            ready_close: "});".to_string(),
            indent: "    ".to_string(),
        }
    }
}

impl MergeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn idempotent(mut self) -> Self {
        self.policy = InsertPolicy::Idempotent;
        self
    }

    pub fn by_category(mut self) -> Self {
        self.classification = Classification::Category;
        self
    }
}
