//! The base record system.
//!
//! Declares record types from field lists, builds them, and constructs and
//! introspects instances. The guard layer treats this module as a
//! collaborator: it only uses [`build`] and the built type's field list.

mod builder;
mod decl;
mod field;
mod instance;
mod layout;
mod record_type;

pub use builder::build;
pub use decl::{DefaultFactory, DefaultValue, FieldDecl, FieldDefault, FieldOptions, RecordDecl};
pub use field::FieldSpec;
pub use instance::Record;
pub(crate) use instance::Stored;
pub use layout::{Layout, SlotKey, SlotTable};
pub use record_type::{RecordType, TypeAttr};
