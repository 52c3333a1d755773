//! Session configuration.
//!
//! ```yaml
//! duplicate_presets: upsert   # or reject
//! inverted_ranges: reject     # or clamp
//! ```

use crate::error::{AppError, AppResult};
use of_spec::{DuplicatePresetPolicy, EditPolicy, InvertedRangePolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub duplicate_presets: DuplicatePresetPolicy,
    pub inverted_ranges: InvertedRangePolicy,
}

impl SessionConfig {
    pub fn edit_policy(&self) -> EditPolicy {
        EditPolicy {
            inverted_ranges: self.inverted_ranges,
        }
    }

    pub fn from_yaml_str(text: &str) -> AppResult<Self> {
        serde_yaml::from_str(text).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn load_yaml(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(path = %path.display(), ?config, "loaded session config");
        Ok(config)
    }
}
