//! Field metadata maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Value;

/// Metadata key that marks a field as write-once.
pub const GUARDED_KEY: &str = "guarded";

/// Free-form metadata attached to a field declaration.
///
/// The record system never interprets metadata except for [`GUARDED_KEY`],
/// which the freeze step reads to decide which fields become write-once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMetadata(BTreeMap<String, Value>);

impl FieldMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Copy of `self` with the guarded tag set. Caller entries are kept; an
    /// existing `guarded` entry is overwritten.
    #[must_use]
    pub fn tagged_guarded(self) -> Self {
        self.with(GUARDED_KEY, true)
    }

    /// `true` only when the guarded tag is present and set to boolean `true`.
    #[must_use]
    pub fn is_guarded(&self) -> bool {
        matches!(self.0.get(GUARDED_KEY), Some(Value::Bool(true)))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
