use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use semimut_types::{BuildOptions, FieldName, RecordName, Value};

use crate::errors::{RecordError, Result};
use crate::guard::{GuardAccessor, GuardRegistry, TypeLevelStrategy};
use crate::record::{FieldSpec, Layout, Record, SlotKey};

static EMPTY_REGISTRY: GuardRegistry = GuardRegistry::empty();

/// A type-level attribute as stored on the type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeAttr {
    Value(Value),
    /// A still-installed guard. Reading a guarded name on the type (with no
    /// instance involved) yields the accessor itself.
    Guard(GuardAccessor),
}

impl TypeAttr {
    #[must_use]
    pub fn is_guard(&self) -> bool {
        matches!(self, TypeAttr::Guard(_))
    }
}

/// A built record type.
///
/// Field list, options, layout, strategy, and guard registry are fixed once
/// built. Type-level attributes stay assignable through
/// [`RecordType::set_type_attr`], which routes through the installed
/// [`TypeLevelStrategy`].
#[derive(Debug)]
pub struct RecordType {
    pub(crate) name: RecordName,
    pub(crate) parent: Option<Rc<RecordType>>,
    pub(crate) fields: Vec<FieldSpec>,
    pub(crate) options: BuildOptions,
    pub(crate) layout: Layout,
    pub(crate) attrs: RefCell<BTreeMap<String, TypeAttr>>,
    /// Hidden type-level cells used by the redirecting strategy.
    pub(crate) cells: RefCell<BTreeMap<FieldName, Value>>,
    pub(crate) strategy: TypeLevelStrategy,
    pub(crate) registry: Option<GuardRegistry>,
}

impl RecordType {
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Rc<RecordType>> {
        self.parent.as_ref()
    }

    /// Declared fields in constructor order. Hidden storage never appears here.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name().as_str())
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name().as_str() == name)
    }

    #[must_use]
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Record-wide immutability from the base builder.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.options.is_frozen()
    }

    #[must_use]
    pub fn supports_weak_refs(&self) -> bool {
        match &self.layout {
            Layout::Dynamic => true,
            Layout::Fixed(table) => table.slots().contains(&SlotKey::WeakRef),
        }
    }

    /// Names enforced as write-once. Empty when none are, or when the freeze
    /// step has not run.
    #[must_use]
    pub fn guarded_fields(&self) -> &GuardRegistry {
        self.registry.as_ref().unwrap_or(&EMPTY_REGISTRY)
    }

    /// Whether the freeze step has run on this type.
    #[must_use]
    pub fn has_guard_registry(&self) -> bool {
        self.registry.is_some()
    }

    #[must_use]
    pub fn strategy(&self) -> TypeLevelStrategy {
        self.strategy
    }

    /// Type-level read, routed through the installed strategy.
    pub fn get_type_attr(&self, name: &str) -> Result<TypeAttr> {
        self.strategy.get(self, name)
    }

    /// Type-level write, routed through the installed strategy.
    pub fn set_type_attr(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.strategy.set(self, name, value.into())
    }

    /// Build an instance from keyword arguments.
    ///
    /// Every field value, defaults included, goes through the same write path
    /// as later assignment, so guarded fields consume their single write here.
    /// A name passed twice is rejected rather than resolved to either value.
    pub fn construct<K, V>(self: &Rc<Self>, args: impl IntoIterator<Item = (K, V)>) -> Result<Record>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut collected: BTreeMap<String, Value> = BTreeMap::new();
        for (name, value) in args {
            let name: String = name.into();
            if collected.contains_key(&name) {
                return Err(RecordError::UnexpectedArgument {
                    record: self.name().to_owned(),
                    name,
                }
                .into());
            }
            collected.insert(name, value.into());
        }
        let mut args = collected;

        let takes_args = self.options.has_init();
        if let Some(name) = args.keys().find(|name| {
            !takes_args || !self.field(name).is_some_and(FieldSpec::init)
        }) {
            return Err(RecordError::UnexpectedArgument {
                record: self.name().to_owned(),
                name: name.clone(),
            }
            .into());
        }

        let mut record = Record::empty(Rc::clone(self));
        for field in &self.fields {
            let from_args = if takes_args && field.init() {
                args.remove(field.name().as_str())
            } else {
                None
            };
            let value = match from_args.or_else(|| field.produce_default()) {
                Some(value) => value,
                None if takes_args && field.init() => {
                    return Err(RecordError::MissingArgument {
                        record: self.name().to_owned(),
                        field: field.name().to_string(),
                    }
                    .into());
                }
                None => continue,
            };
            record.assign(field.name().as_str(), value)?;
        }
        Ok(record)
    }

    pub(crate) fn raw_attr(&self, name: &str) -> Option<TypeAttr> {
        self.attrs.borrow().get(name).cloned()
    }

    pub(crate) fn raw_set(&self, name: &str, attr: TypeAttr) {
        self.attrs.borrow_mut().insert(name.to_owned(), attr);
    }

    pub(crate) fn cell(&self, name: &str) -> Option<Value> {
        self.cells.borrow().get(name).cloned()
    }

    pub(crate) fn set_cell(&self, name: FieldName, value: Value) {
        self.cells.borrow_mut().insert(name, value);
    }
}
