//! Declaration-time tokens for guarded fields.
//!
//! `guarded_field` captures the caller's options in a [`GuardedFieldIntent`]
//! and hands it back wrapped in a [`MisuseTrap`]. The trap exposes nothing:
//! the base builder's ordinary inspection of it fails, and only
//! [`transform`](crate::transform) can take the intent back out.

use std::fmt;

use semimut_types::MisuseError;

use crate::record::FieldOptions;

/// Captured options of a guarded field, with the guarded tag already set.
#[derive(Debug, Clone)]
pub(crate) struct GuardedFieldIntent {
    options: FieldOptions,
}

impl GuardedFieldIntent {
    fn new(options: FieldOptions) -> Self {
        Self {
            options: options.map_metadata(|metadata| metadata.tagged_guarded()),
        }
    }

    /// The options for the ordinary field declaration replacing this intent.
    pub(crate) fn into_options(self) -> FieldOptions {
        self.options
    }
}

/// Opaque wrapper around a guarded field's captured options.
pub struct MisuseTrap {
    intent: GuardedFieldIntent,
}

impl MisuseTrap {
    /// The error raised when anything other than the transformer looks inside.
    pub(crate) fn spring(&self, record: &str, field: &str) -> MisuseError {
        MisuseError::TransformerNotApplied {
            record: record.to_owned(),
            field: field.to_owned(),
        }
    }

    /// Transformer-only extraction path.
    pub(crate) fn disarm(self) -> GuardedFieldIntent {
        self.intent
    }
}

impl fmt::Debug for MisuseTrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MisuseTrap(..)")
    }
}

/// Declare a guarded field with the same options an ordinary field takes.
///
/// The result only makes sense inside a declaration passed to
/// [`transform`](crate::transform); building that declaration any other way
/// fails with [`MisuseError::TransformerNotApplied`].
#[must_use]
pub fn guarded_field(options: FieldOptions) -> MisuseTrap {
    MisuseTrap {
        intent: GuardedFieldIntent::new(options),
    }
}

/// Shorthand for a required guarded field with no other options.
#[must_use]
pub fn guarded() -> MisuseTrap {
    guarded_field(FieldOptions::new())
}
