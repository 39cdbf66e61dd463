//! Core domain types for semimut.
//!
//! This crate contains pure domain types with no IO and minimal dependencies:
//! dynamic values, identifiers, field metadata, resolved build options, and
//! the error taxonomy shared by the record system and the guard layer.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod errors;
mod ids;
mod metadata;
mod options;
mod value;

pub use errors::{ConfigurationError, ImmutableFieldError, MisuseError, WriteTarget};
pub use ids::{FieldName, NameError, RecordName};
pub use metadata::{FieldMetadata, GUARDED_KEY};
pub use options::{BuildOptions, ClassLevelGuardPolicy, TransformOptions};
pub use value::Value;
