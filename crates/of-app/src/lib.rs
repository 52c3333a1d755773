//! Session layer for oceanfilter.
//!
//! Owns the live filter specification on behalf of frontends: applies edits
//! through the pure engine in `of-spec`, notifies observers synchronously,
//! keeps the session's presets and handles file import/export.

pub mod config;
pub mod error;
pub mod script;
pub mod session;
pub mod spec_service;
pub mod store;

// Re-export key types for convenience
pub use config::SessionConfig;
pub use error::{AppError, AppResult};
pub use script::{parse_edit, parse_script};
pub use session::FilterSession;
pub use spec_service::{SpecFormat, load_presets, load_spec, save_presets, save_spec};
pub use store::{FilterObserver, FilterStore, ObserverId};
