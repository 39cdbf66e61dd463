//! Error taxonomy shared by every layer.
//!
//! - [`MisuseError`]: programmer error, raised while declaring or building a type
//! - [`ImmutableFieldError`]: a rejected write to a guarded field
//! - [`ConfigurationError`]: an option that cannot be resolved

use std::fmt;

use thiserror::Error;

use crate::FieldName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MisuseError {
    #[error(
        "field `{field}` of `{record}` was declared with guarded_field() but the declaration \
         was built without transform(); build it with transform() to enforce write-once"
    )]
    TransformerNotApplied { record: String, field: String },

    #[error("record type `{record}` already has guarded fields installed")]
    AlreadyFrozen { record: String },
}

/// Where a rejected write was aimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    Instance,
    Type,
}

impl fmt::Display for WriteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteTarget::Instance => f.write_str("instance"),
            WriteTarget::Type => f.write_str("type-level"),
        }
    }
}

/// A write to a guarded field was rejected. The rejected value is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{target} attribute `{field}` of `{record}` is immutable")]
pub struct ImmutableFieldError {
    pub record: String,
    pub field: FieldName,
    pub target: WriteTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error(
        "invalid value for class_level_guard_policy: `{value}` (expected `patch`, `replace`, or `error`)"
    )]
    UnknownPolicy { value: String },

    #[error("weakref_slot requires slots")]
    WeakrefWithoutSlots,
}
