//! Error types for record construction and guarded access.

use std::result;

use semimut_types::{ConfigurationError, ImmutableFieldError, MisuseError, NameError};
use thiserror::Error;

/// Failures of the base record system, independent of guarding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("duplicate field `{field}` in `{record}`")]
    DuplicateField { record: String, field: String },

    #[error("field `{field}` of `{record}` has no default but follows a field with one")]
    RequiredAfterDefault { record: String, field: String },

    #[error("`{record}` missing required argument `{field}`")]
    MissingArgument { record: String, field: String },

    #[error("`{record}` got an unexpected argument `{name}`")]
    UnexpectedArgument { record: String, name: String },

    #[error("`{record}` has no attribute `{name}`")]
    NoSuchAttribute { record: String, name: String },

    #[error("`{record}` uses a fixed layout with no slot for `{name}`")]
    NoSuchSlot { record: String, name: String },

    #[error("field `{field}` of `{record}` has not been set")]
    UnsetField { record: String, field: String },

    #[error("cannot assign to field `{field}`: `{record}` is frozen")]
    FrozenInstance { record: String, field: String },

    #[error("failed to serialize `{record}`: {message}")]
    Serialize { record: String, message: String },
}

/// Every error the public API can return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Misuse(#[from] MisuseError),

    #[error(transparent)]
    ImmutableField(#[from] ImmutableFieldError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl From<NameError> for Error {
    fn from(err: NameError) -> Self {
        Error::Record(RecordError::InvalidName(err))
    }
}

pub type Result<T, E = Error> = result::Result<T, E>;
