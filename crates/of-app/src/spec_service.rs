//! Loading and saving specifications and preset exports.

use crate::error::{AppError, AppResult};
use of_spec::serialize::{export_presets_json, import_presets_json};
use of_spec::{FilterSpec, PresetRegistry, export_json, export_yaml, import_json, import_yaml};
use std::path::Path;
use tracing::info;

/// On-disk encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(SpecFormat::Json),
            Some("yaml") | Some("yml") => Ok(SpecFormat::Yaml),
            _ => Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn encode(self, spec: &FilterSpec) -> AppResult<String> {
        let text = match self {
            SpecFormat::Json => export_json(spec)?,
            SpecFormat::Yaml => export_yaml(spec)?,
        };
        Ok(text)
    }

    pub fn decode(self, text: &str) -> AppResult<FilterSpec> {
        let spec = match self {
            SpecFormat::Json => import_json(text)?,
            SpecFormat::Yaml => import_yaml(text)?,
        };
        Ok(spec)
    }
}

fn read(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write(path: &Path, content: &str) -> AppResult<()> {
    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a specification from a `.json`, `.yaml` or `.yml` file.
pub fn load_spec(path: &Path) -> AppResult<FilterSpec> {
    let format = SpecFormat::from_path(path)?;
    let spec = format.decode(&read(path)?)?;
    info!(path = %path.display(), ?format, "loaded filter specification");
    Ok(spec)
}

/// Save a specification, encoding by file extension.
pub fn save_spec(path: &Path, spec: &FilterSpec) -> AppResult<()> {
    let format = SpecFormat::from_path(path)?;
    write(path, &format.encode(spec)?)?;
    info!(path = %path.display(), ?format, "saved filter specification");
    Ok(())
}

/// Load an exported preset collection (JSON). A missing file is an empty
/// collection.
pub fn load_presets(path: &Path) -> AppResult<PresetRegistry> {
    if !path.exists() {
        return Ok(PresetRegistry::new());
    }
    let registry = import_presets_json(&read(path)?)?;
    info!(path = %path.display(), count = registry.len(), "loaded presets");
    Ok(registry)
}

pub fn save_presets(path: &Path, registry: &PresetRegistry) -> AppResult<()> {
    write(path, &export_presets_json(registry)?)?;
    info!(path = %path.display(), count = registry.len(), "saved presets");
    Ok(())
}
