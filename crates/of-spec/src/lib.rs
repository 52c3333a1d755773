//! of-spec: the filter specification and everything derived from it.
//!
//! - schema (the specification record and its defaults)
//! - dimension (names and shapes of the filter axes)
//! - update (pure edit engine)
//! - derive (active-filter count and removable tags)
//! - preset (named snapshots)
//! - serialize (JSON/YAML export and strict import)
//! - validate (invariants)

pub mod derive;
pub mod dimension;
pub mod preset;
pub mod schema;
pub mod serialize;
pub mod update;
pub mod validate;

pub use derive::{FilterSummary, Tag, active_filter_count, is_active, summarize, tags};
pub use dimension::{Dimension, DimensionKind, NestedKey, UnknownDimension, UnknownNestedKey};
pub use preset::{DuplicatePresetPolicy, PendingPreset, Preset, PresetError, PresetRegistry};
pub use schema::*;
pub use serialize::{
    SerializeError, SerializeResult, export_json, export_yaml, import_json, import_yaml,
};
pub use update::{
    EditError, EditPolicy, EditResult, FieldValue, FilterEdit, InvertedRangePolicy, NestedValue,
    Transition, apply,
};
pub use validate::{ValidationError, validate_dimension, validate_spec};
