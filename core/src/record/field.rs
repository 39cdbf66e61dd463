use semimut_types::{FieldMetadata, FieldName, Value};

use crate::record::decl::{DefaultValue, FieldOptions};

/// A built field. Immutable once the owning type exists.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct FieldSpec {
    name: FieldName,
    type_name: String,
    default: DefaultValue,
    metadata: FieldMetadata,
    init: bool,
    repr: bool,
    compare: bool,
}

impl FieldSpec {
    pub(crate) fn from_options(name: FieldName, type_name: String, options: FieldOptions) -> Self {
        let (default, metadata, init, repr, compare) = options.into_parts();
        Self {
            name,
            type_name,
            default,
            metadata,
            init,
            repr,
            compare,
        }
    }

    #[must_use]
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn metadata(&self) -> &FieldMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn is_guarded(&self) -> bool {
        self.metadata.is_guarded()
    }

    #[must_use]
    pub fn init(&self) -> bool {
        self.init
    }

    #[must_use]
    pub fn repr(&self) -> bool {
        self.repr
    }

    #[must_use]
    pub fn compare(&self) -> bool {
        self.compare
    }

    #[must_use]
    pub fn has_default(&self) -> bool {
        !matches!(self.default, DefaultValue::None)
    }

    /// The literal default, if any. Factories are excluded since they have
    /// no single shared value.
    #[must_use]
    pub fn plain_default(&self) -> Option<&Value> {
        match &self.default {
            DefaultValue::Value(value) => Some(value),
            DefaultValue::None | DefaultValue::Factory(_) => None,
        }
    }

    /// A fresh default for one instance.
    #[must_use]
    pub fn produce_default(&self) -> Option<Value> {
        match &self.default {
            DefaultValue::None => None,
            DefaultValue::Value(value) => Some(value.clone()),
            DefaultValue::Factory(factory) => Some(factory.produce()),
        }
    }
}
