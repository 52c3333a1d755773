//! Named snapshots of a filter specification.

use crate::schema::FilterSpec;
use crate::validate::{ValidationError, validate_spec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PresetResult<T> = Result<T, PresetError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PresetError {
    #[error("Preset name must not be blank")]
    BlankName,

    #[error("Preset already exists: {name}")]
    DuplicateName { name: String },

    #[error("Preset not found: {name}")]
    NotFound { name: String },

    #[error("Preset snapshot is invalid: {0}")]
    Invalid(#[from] ValidationError),
}

/// What `save` does when the name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePresetPolicy {
    /// Overwrite the snapshot in place, keeping position and id.
    #[default]
    Upsert,
    /// Refuse the save.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: Uuid,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub snapshot: FilterSpec,
}

/// A save request waiting for its name.
///
/// The snapshot is taken when the request is made, so edits that happen
/// while the name prompt is open do not leak into the preset. Dropping the
/// value cancels the request.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPreset {
    pub request_id: Uuid,
    snapshot: FilterSpec,
}

impl PendingPreset {
    pub fn capture(spec: &FilterSpec) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            snapshot: spec.clone(),
        }
    }

    pub fn snapshot(&self) -> &FilterSpec {
        &self.snapshot
    }
}

/// Ordered collection of presets, independent of the live specification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PresetRegistry {
    presets: Vec<Preset>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `spec` under `name`. Returns the preset id.
    pub fn save(
        &mut self,
        name: &str,
        spec: &FilterSpec,
        policy: DuplicatePresetPolicy,
    ) -> PresetResult<Uuid> {
        let name = normalize_name(name)?;
        validate_spec(spec)?;

        if let Some(existing) = self.presets.iter_mut().find(|p| p.name == name) {
            return match policy {
                DuplicatePresetPolicy::Upsert => {
                    existing.snapshot = spec.clone();
                    existing.saved_at = Utc::now();
                    Ok(existing.id)
                }
                DuplicatePresetPolicy::Reject => Err(PresetError::DuplicateName { name }),
            };
        }

        let id = Uuid::new_v4();
        self.presets.push(Preset {
            id,
            name,
            saved_at: Utc::now(),
            snapshot: spec.clone(),
        });
        Ok(id)
    }

    /// Second half of the two-step save.
    pub fn commit(
        &mut self,
        pending: PendingPreset,
        name: &str,
        policy: DuplicatePresetPolicy,
    ) -> PresetResult<Uuid> {
        self.save(name, &pending.snapshot, policy)
    }

    /// Snapshot of the first preset called `name`.
    pub fn load(&self, name: &str) -> Option<&FilterSpec> {
        self.get(name).map(|p| &p.snapshot)
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        let name = name.trim();
        self.presets.iter().find(|p| p.name == name)
    }

    /// Returns whether a preset was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        let name = name.trim();
        match self.presets.iter().position(|p| p.name == name) {
            Some(idx) => {
                self.presets.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn rename(&mut self, from: &str, to: &str) -> PresetResult<()> {
        let to = normalize_name(to)?;
        let from = from.trim();
        if from != to && self.presets.iter().any(|p| p.name == to) {
            return Err(PresetError::DuplicateName { name: to });
        }
        let preset = self
            .presets
            .iter_mut()
            .find(|p| p.name == from)
            .ok_or_else(|| PresetError::NotFound {
                name: from.to_string(),
            })?;
        preset.name = to;
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

fn normalize_name(name: &str) -> PresetResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PresetError::BlankName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use of_core::Region;

    fn arctic() -> FilterSpec {
        FilterSpec {
            regions: vec![Region::ArcticOcean],
            ..FilterSpec::default()
        }
    }

    #[test]
    fn snapshot_is_independent_of_live_spec() {
        let mut registry = PresetRegistry::new();
        let mut live = arctic();
        registry
            .save("Arctic Survey", &live, DuplicatePresetPolicy::Upsert)
            .unwrap();

        live.regions.push(Region::NorthAtlantic);
        live.data_completeness = 50.0;

        assert_eq!(registry.load("Arctic Survey"), Some(&arctic()));
    }

    #[test]
    fn upsert_keeps_position_and_id() {
        let mut registry = PresetRegistry::new();
        let first = registry
            .save("A", &FilterSpec::default(), DuplicatePresetPolicy::Upsert)
            .unwrap();
        registry
            .save("B", &FilterSpec::default(), DuplicatePresetPolicy::Upsert)
            .unwrap();
        let again = registry
            .save(" A ", &arctic(), DuplicatePresetPolicy::Upsert)
            .unwrap();

        assert_eq!(first, again);
        assert_eq!(registry.names(), vec!["A", "B"]);
        assert_eq!(registry.load("A"), Some(&arctic()));
    }

    #[test]
    fn reject_policy_refuses_duplicates() {
        let mut registry = PresetRegistry::new();
        registry
            .save("A", &FilterSpec::default(), DuplicatePresetPolicy::Reject)
            .unwrap();
        let err = registry
            .save("A", &arctic(), DuplicatePresetPolicy::Reject)
            .unwrap_err();
        assert_eq!(
            err,
            PresetError::DuplicateName {
                name: "A".to_string()
            }
        );
        assert_eq!(registry.load("A"), Some(&FilterSpec::default()));
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut registry = PresetRegistry::new();
        assert_eq!(
            registry.save("   ", &FilterSpec::default(), DuplicatePresetPolicy::Upsert),
            Err(PresetError::BlankName)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn invalid_snapshots_are_rejected() {
        let mut spec = FilterSpec::default();
        spec.salinity.min = 50.0;
        let mut registry = PresetRegistry::new();
        assert!(matches!(
            registry.save("bad", &spec, DuplicatePresetPolicy::Upsert),
            Err(PresetError::Invalid(_))
        ));
    }

    #[test]
    fn pending_save_uses_request_time_snapshot() {
        let mut registry = PresetRegistry::new();
        let mut live = arctic();
        let pending = PendingPreset::capture(&live);
        live.regions.clear();
        assert_eq!(pending.snapshot(), &arctic());

        registry
            .commit(pending, "Arctic Survey", DuplicatePresetPolicy::Upsert)
            .unwrap();
        assert_eq!(registry.load("Arctic Survey"), Some(&arctic()));
    }

    #[test]
    fn unknown_name_loads_nothing() {
        let registry = PresetRegistry::new();
        assert!(registry.load("missing").is_none());
    }

    #[test]
    fn delete_and_rename() {
        let mut registry = PresetRegistry::new();
        registry
            .save("A", &FilterSpec::default(), DuplicatePresetPolicy::Upsert)
            .unwrap();
        registry
            .save("B", &arctic(), DuplicatePresetPolicy::Upsert)
            .unwrap();

        assert!(matches!(
            registry.rename("A", "B"),
            Err(PresetError::DuplicateName { .. })
        ));
        registry.rename("B", "Arctic").unwrap();
        assert_eq!(registry.names(), vec!["A", "Arctic"]);

        assert!(registry.delete("A"));
        assert!(!registry.delete("A"));
        assert_eq!(registry.len(), 1);
        assert!(matches!(
            registry.rename("A", "C"),
            Err(PresetError::NotFound { .. })
        ));
    }
}
