//! Record types with write-once ("guarded") fields.
//!
//! A guarded field accepts exactly one write per instance and rejects every
//! later one, while the record's other fields stay mutable. Records are
//! declared with [`RecordDecl`], guarded fields with [`guarded_field`], and
//! the declaration is turned into a [`RecordType`] by [`transform`].
//!
//! The crate is single-threaded by construction: record types are shared
//! through `Rc` and instances need `&mut` for every write.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod errors;
pub mod guard;
pub mod record;

pub use errors::{Error, RecordError, Result};
pub use guard::{
    GuardAccessor, GuardRegistry, MisuseTrap, TypeLevelStrategy, freeze, guarded, guarded_field,
    transform,
};
pub use record::{
    FieldDefault, FieldOptions, FieldSpec, Layout, Record, RecordDecl, RecordType, SlotKey,
    SlotTable, TypeAttr, build,
};
pub use semimut_types::{
    BuildOptions, ClassLevelGuardPolicy, ConfigurationError, FieldMetadata, FieldName,
    ImmutableFieldError, MisuseError, TransformOptions, Value, WriteTarget,
};
