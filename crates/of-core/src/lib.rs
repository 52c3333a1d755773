//! of-core: stable foundation for oceanfilter.
//!
//! Contains:
//! - numeric (Real + float parsing/formatting helpers)
//! - vocab (closed vocabularies used by list-valued filter dimensions)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod vocab;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use vocab::*;
