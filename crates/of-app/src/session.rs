//! A filtering session: the live specification plus its presets.

use crate::config::SessionConfig;
use crate::error::{AppError, AppResult};
use crate::store::{FilterObserver, FilterStore, ObserverId};
use of_spec::{
    FilterEdit, FilterSpec, FilterSummary, PendingPreset, PresetRegistry, Tag, export_json,
    summarize,
};
use tracing::info;
use uuid::Uuid;

#[derive(Debug)]
pub struct FilterSession {
    store: FilterStore,
    presets: PresetRegistry,
    config: SessionConfig,
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl FilterSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            store: FilterStore::new(config.edit_policy()),
            presets: PresetRegistry::new(),
            config,
        }
    }

    /// Start from an existing specification (e.g. one loaded from disk).
    pub fn with_spec(spec: FilterSpec, config: SessionConfig) -> Self {
        Self {
            store: FilterStore::with_spec(spec, config.edit_policy()),
            presets: PresetRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn current(&self) -> &FilterSpec {
        self.store.current()
    }

    pub fn subscribe(&mut self, observer: impl FilterObserver + 'static) -> ObserverId {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn edit(&mut self, edit: FilterEdit) -> AppResult<bool> {
        self.store.dispatch(edit)
    }

    /// Apply edits in order, stopping at the first rejection. Edits before
    /// the failing one stay applied. Returns how many changed the spec.
    pub fn edit_all(&mut self, edits: impl IntoIterator<Item = FilterEdit>) -> AppResult<usize> {
        let mut changed = 0;
        for edit in edits {
            if self.store.dispatch(edit)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    pub fn clear_all(&mut self) {
        self.store.replace(FilterSpec::default());
    }

    /// Dismiss a tag produced by [`FilterSession::tags`].
    pub fn remove_tag(&mut self, tag: &Tag) -> AppResult<bool> {
        self.store.dispatch(tag.remove_edit())
    }

    pub fn summary(&self) -> FilterSummary {
        summarize(self.current())
    }

    pub fn active_filter_count(&self) -> usize {
        of_spec::active_filter_count(self.current())
    }

    pub fn tags(&self) -> Vec<Tag> {
        of_spec::tags(self.current())
    }

    pub fn refresh(&mut self, loading: bool) {
        self.store.refresh(loading);
    }

    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    /// Replace the session's presets, e.g. after importing an export file.
    pub fn set_presets(&mut self, presets: PresetRegistry) {
        self.presets = presets;
    }

    /// Save the current specification under `name` right away.
    pub fn save_preset(&mut self, name: &str) -> AppResult<Uuid> {
        let pending = self.request_preset_save();
        self.commit_preset(pending, name)
    }

    /// First half of the two-step save: snapshot now, name later.
    pub fn request_preset_save(&self) -> PendingPreset {
        PendingPreset::capture(self.current())
    }

    pub fn commit_preset(&mut self, pending: PendingPreset, name: &str) -> AppResult<Uuid> {
        let request_id = pending.request_id;
        let id = self
            .presets
            .commit(pending, name, self.config.duplicate_presets)?;
        info!(%request_id, preset_id = %id, name = name.trim(), "saved preset");
        Ok(id)
    }

    /// Replace the whole live specification with a preset's snapshot.
    ///
    /// An unknown name is a no-op and returns `false`.
    pub fn load_preset(&mut self, name: &str) -> bool {
        let Some(snapshot) = self.presets.load(name).cloned() else {
            info!(name, "no preset to load");
            return false;
        };
        info!(name, "loading preset");
        self.store.replace(snapshot);
        true
    }

    /// Like [`FilterSession::load_preset`] but an unknown name is an error.
    pub fn require_preset(&mut self, name: &str) -> AppResult<()> {
        if self.load_preset(name) {
            Ok(())
        } else {
            Err(AppError::PresetNotFound(name.to_string()))
        }
    }

    pub fn delete_preset(&mut self, name: &str) -> bool {
        let removed = self.presets.delete(name);
        if removed {
            info!(name, "deleted preset");
        }
        removed
    }

    pub fn export(&self) -> AppResult<String> {
        Ok(export_json(self.current())?)
    }
}
