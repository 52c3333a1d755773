//! Portable text form of a filter specification and of preset collections.
//!
//! Export is deterministic: struct field order is the key order, and every
//! dimension is always written. Import is the strict inverse: missing or
//! unknown fields, literals outside a vocabulary and values that break an
//! invariant are all errors.

use crate::preset::PresetRegistry;
use crate::schema::FilterSpec;
use crate::validate::{ValidationError, validate_spec};
use std::collections::HashSet;
use std::path::Path;

pub type SerializeResult<T> = Result<T, SerializeError>;

#[derive(thiserror::Error, Debug)]
pub enum SerializeError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Preset {name:?} appears more than once")]
    DuplicatePreset { name: String },
}

pub fn export_json(spec: &FilterSpec) -> SerializeResult<String> {
    Ok(serde_json::to_string_pretty(spec)?)
}

pub fn export_yaml(spec: &FilterSpec) -> SerializeResult<String> {
    Ok(serde_yaml::to_string(spec)?)
}

pub fn import_json(text: &str) -> SerializeResult<FilterSpec> {
    let spec: FilterSpec = serde_json::from_str(text)?;
    validate_spec(&spec)?;
    Ok(spec)
}

pub fn import_yaml(text: &str) -> SerializeResult<FilterSpec> {
    let spec: FilterSpec = serde_yaml::from_str(text)?;
    validate_spec(&spec)?;
    Ok(spec)
}

pub fn load_yaml(path: &Path) -> SerializeResult<FilterSpec> {
    let content = std::fs::read_to_string(path)?;
    import_yaml(&content)
}

pub fn save_yaml(path: &Path, spec: &FilterSpec) -> SerializeResult<()> {
    validate_spec(spec)?;
    std::fs::write(path, export_yaml(spec)?)?;
    Ok(())
}

pub fn load_json(path: &Path) -> SerializeResult<FilterSpec> {
    let content = std::fs::read_to_string(path)?;
    import_json(&content)
}

pub fn save_json(path: &Path, spec: &FilterSpec) -> SerializeResult<()> {
    validate_spec(spec)?;
    std::fs::write(path, export_json(spec)?)?;
    Ok(())
}

pub fn export_presets_json(registry: &PresetRegistry) -> SerializeResult<String> {
    Ok(serde_json::to_string_pretty(registry)?)
}

pub fn import_presets_json(text: &str) -> SerializeResult<PresetRegistry> {
    let registry: PresetRegistry = serde_json::from_str(text)?;
    let mut seen = HashSet::new();
    for preset in registry.iter() {
        if !seen.insert(preset.name.as_str()) {
            return Err(SerializeError::DuplicatePreset {
                name: preset.name.clone(),
            });
        }
        validate_spec(&preset.snapshot)?;
    }
    Ok(registry)
}
