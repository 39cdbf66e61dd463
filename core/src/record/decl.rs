//! Record declarations: the not-yet-built form of a record type.

use std::fmt;
use std::rc::Rc;

use semimut_types::{FieldMetadata, MisuseError, Value};

use crate::guard::MisuseTrap;
use crate::record::RecordType;

/// Produces a fresh default value per instance.
#[derive(Clone, Copy)]
pub struct DefaultFactory(fn() -> Value);

impl DefaultFactory {
    #[must_use]
    pub fn new(factory: fn() -> Value) -> Self {
        Self(factory)
    }

    #[must_use]
    pub fn produce(self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for DefaultFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultFactory(..)")
    }
}

#[derive(Debug, Clone, Default)]
pub enum DefaultValue {
    #[default]
    None,
    Value(Value),
    Factory(DefaultFactory),
}

/// Per-field options: default, metadata, and which generated behaviors
/// include the field.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct FieldOptions {
    default: DefaultValue,
    metadata: FieldMetadata,
    init: bool,
    repr: bool,
    compare: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            default: DefaultValue::None,
            metadata: FieldMetadata::new(),
            init: true,
            repr: true,
            compare: true,
        }
    }
}

impl FieldOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultValue::Value(value.into());
        self
    }

    pub fn default_factory(mut self, factory: fn() -> Value) -> Self {
        self.default = DefaultValue::Factory(DefaultFactory::new(factory));
        self
    }

    pub fn metadata(mut self, metadata: FieldMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Whether the field is a constructor argument.
    pub fn init(mut self, on: bool) -> Self {
        self.init = on;
        self
    }

    pub fn repr(mut self, on: bool) -> Self {
        self.repr = on;
        self
    }

    pub fn compare(mut self, on: bool) -> Self {
        self.compare = on;
        self
    }

    pub(crate) fn map_metadata(mut self, f: impl FnOnce(FieldMetadata) -> FieldMetadata) -> Self {
        self.metadata = f(self.metadata);
        self
    }

    #[must_use]
    pub fn get_default(&self) -> &DefaultValue {
        &self.default
    }

    #[must_use]
    pub fn get_metadata(&self) -> &FieldMetadata {
        &self.metadata
    }

    pub(crate) fn into_parts(self) -> (DefaultValue, FieldMetadata, bool, bool, bool) {
        (self.default, self.metadata, self.init, self.repr, self.compare)
    }
}

/// What a field declaration carries in its default position.
#[derive(Debug, Default)]
pub enum FieldDefault {
    /// Required field, no default.
    #[default]
    Missing,
    Value(Value),
    Options(FieldOptions),
    /// An un-transformed guarded declaration. Inspecting it is a misuse.
    Guarded(MisuseTrap),
}

impl FieldDefault {
    /// Ordinary inspection, as performed by the builder. Springs traps.
    pub(crate) fn inspect(self, record: &str, field: &str) -> Result<FieldOptions, MisuseError> {
        match self {
            FieldDefault::Missing => Ok(FieldOptions::new()),
            FieldDefault::Value(value) => Ok(FieldOptions::new().default_value(value)),
            FieldDefault::Options(options) => Ok(options),
            FieldDefault::Guarded(trap) => Err(trap.spring(record, field)),
        }
    }
}

impl From<Value> for FieldDefault {
    fn from(value: Value) -> Self {
        FieldDefault::Value(value)
    }
}

impl From<i64> for FieldDefault {
    fn from(value: i64) -> Self {
        FieldDefault::Value(Value::Int(value))
    }
}

impl From<i32> for FieldDefault {
    fn from(value: i32) -> Self {
        FieldDefault::Value(Value::from(value))
    }
}

impl From<&str> for FieldDefault {
    fn from(value: &str) -> Self {
        FieldDefault::Value(Value::from(value))
    }
}

impl From<FieldOptions> for FieldDefault {
    fn from(options: FieldOptions) -> Self {
        FieldDefault::Options(options)
    }
}

impl From<MisuseTrap> for FieldDefault {
    fn from(trap: MisuseTrap) -> Self {
        FieldDefault::Guarded(trap)
    }
}

#[derive(Debug)]
pub struct FieldDecl {
    pub(crate) name: String,
    pub(crate) type_name: String,
    pub(crate) default: FieldDefault,
}

impl FieldDecl {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn is_guarded_intent(&self) -> bool {
        matches!(self.default, FieldDefault::Guarded(_))
    }
}

/// A record type as written by its author, before any build step.
///
/// ```
/// use semimut_core::{RecordDecl, guarded};
///
/// let decl = RecordDecl::new("Simple")
///     .field_with("x", "int", guarded())
///     .field_with("y", "int", 0);
/// assert_eq!(decl.fields().len(), 2);
/// ```
#[derive(Debug)]
pub struct RecordDecl {
    pub(crate) name: String,
    pub(crate) parent: Option<Rc<RecordType>>,
    pub(crate) fields: Vec<FieldDecl>,
    pub(crate) type_attrs: Vec<(String, Value)>,
}

impl RecordDecl {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            type_attrs: Vec::new(),
        }
    }

    /// Inherit fields, layout, and plain type-level attributes from `parent`.
    pub fn extends(mut self, parent: &Rc<RecordType>) -> Self {
        self.parent = Some(Rc::clone(parent));
        self
    }

    /// A required field.
    pub fn field(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.field_with(name, type_name, FieldDefault::Missing)
    }

    pub fn field_with(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        default: impl Into<FieldDefault>,
    ) -> Self {
        self.fields.push(FieldDecl {
            name: name.into(),
            type_name: type_name.into(),
            default: default.into(),
        });
        self
    }

    /// A shared attribute on the type itself, not a field.
    pub fn type_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.type_attrs.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }
}
