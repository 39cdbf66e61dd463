use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::ptr;
use std::rc::Rc;

use semimut_types::{FieldName, ImmutableFieldError, Value, WriteTarget};

use crate::errors::{RecordError, Result};
use crate::record::{FieldSpec, Layout, RecordType, SlotKey, TypeAttr};

/// A stored value. `Sealed` values were written through a guard and can
/// never be overwritten, even after the guard itself is removed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Stored {
    Open(Value),
    Sealed(Value),
}

impl Stored {
    fn value(&self) -> &Value {
        match self {
            Stored::Open(value) | Stored::Sealed(value) => value,
        }
    }
}

#[derive(Debug, Clone)]
enum Storage {
    Dynamic(HashMap<SlotKey, Stored>),
    Fixed(Vec<Option<Stored>>),
}

/// An instance of a [`RecordType`].
#[derive(Debug, Clone)]
pub struct Record {
    ty: Rc<RecordType>,
    storage: Storage,
}

impl Record {
    pub(crate) fn empty(ty: Rc<RecordType>) -> Self {
        let storage = match ty.layout() {
            Layout::Dynamic => Storage::Dynamic(HashMap::new()),
            Layout::Fixed(table) => Storage::Fixed(vec![None; table.len()]),
        };
        Self { ty, storage }
    }

    #[must_use]
    pub fn record_type(&self) -> &Rc<RecordType> {
        &self.ty
    }

    /// The declared fields of this record's type.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        self.ty.fields()
    }

    /// Read an attribute.
    ///
    /// Resolution order: an installed guard, then the instance's own storage,
    /// then a value captured while a since-replaced guard was in force, then
    /// the type-level attribute.
    pub fn get(&self, name: &str) -> Result<Value> {
        let attr = self.ty.raw_attr(name);
        if let Some(TypeAttr::Guard(accessor)) = &attr {
            return accessor.get(self);
        }
        if let Ok(field) = FieldName::new(name) {
            if let Some(stored) = self.read(&SlotKey::Field(field.clone())) {
                return Ok(stored.value().clone());
            }
            if self.ty.guarded_fields().contains(name)
                && let Some(stored) = self.read(&SlotKey::Hidden(field))
            {
                return Ok(stored.value().clone());
            }
        }
        match attr {
            Some(TypeAttr::Value(value)) => Ok(value),
            _ => Err(self.no_such_attribute(name).into()),
        }
    }

    /// Assign an attribute after construction.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        if self.ty.is_frozen() {
            return Err(RecordError::FrozenInstance {
                record: self.ty.name().to_owned(),
                field: name.to_owned(),
            }
            .into());
        }
        self.assign(name, value.into())
    }

    /// The write path shared by construction and [`Record::set`]. Skips the
    /// record-wide frozen check, which only applies after construction.
    pub(crate) fn assign(&mut self, name: &str, value: Value) -> Result<()> {
        if let Some(TypeAttr::Guard(accessor)) = self.ty.raw_attr(name) {
            return accessor.set(self, value);
        }
        let field = FieldName::new(name).map_err(|_err| self.no_such_attribute(name))?;
        if self.ty.guarded_fields().contains(name) {
            // The guard was replaced at the type level; the hidden slot now
            // holds a plain value, except one sealed before the replacement.
            let hidden = SlotKey::Hidden(field.clone());
            if let Some(Stored::Sealed(_)) = self.read(&hidden) {
                return Err(self.immutable(field).into());
            }
            return self.write(hidden, Stored::Open(value));
        }
        self.write(SlotKey::Field(field), Stored::Open(value))
    }

    pub(crate) fn read(&self, key: &SlotKey) -> Option<&Stored> {
        match &self.storage {
            Storage::Dynamic(map) => map.get(key),
            Storage::Fixed(slots) => {
                let idx = self.ty.layout().slot_table()?.index_of(key)?;
                slots.get(idx)?.as_ref()
            }
        }
    }

    pub(crate) fn write(&mut self, key: SlotKey, stored: Stored) -> Result<()> {
        match &mut self.storage {
            Storage::Dynamic(map) => {
                map.insert(key, stored);
                Ok(())
            }
            Storage::Fixed(slots) => {
                let idx = self
                    .ty
                    .layout()
                    .slot_table()
                    .and_then(|table| table.index_of(&key));
                match idx.and_then(|idx| slots.get_mut(idx)) {
                    Some(slot) => {
                        *slot = Some(stored);
                        Ok(())
                    }
                    None => Err(RecordError::NoSuchSlot {
                        record: self.ty.name().to_owned(),
                        name: key.to_string(),
                    }
                    .into()),
                }
            }
        }
    }

    pub(crate) fn immutable(&self, field: FieldName) -> ImmutableFieldError {
        ImmutableFieldError {
            record: self.ty.name().to_owned(),
            field,
            target: WriteTarget::Instance,
        }
    }

    fn no_such_attribute(&self, name: &str) -> RecordError {
        RecordError::NoSuchAttribute {
            record: self.ty.name().to_owned(),
            name: name.to_owned(),
        }
    }

    /// Field values keyed by field name. Fails if any field is unset.
    pub fn as_map(&self) -> Result<BTreeMap<String, Value>> {
        self.ty
            .fields()
            .iter()
            .map(|field| Ok((field.name().to_string(), self.get(field.name().as_str())?)))
            .collect()
    }

    /// Field values in declaration order.
    pub fn as_tuple(&self) -> Result<Vec<Value>> {
        self.ty
            .fields()
            .iter()
            .map(|field| self.get(field.name().as_str()))
            .collect()
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        let map = self.as_map()?;
        serde_json::to_value(Value::Map(map)).map_err(|err| {
            RecordError::Serialize {
                record: self.ty.name().to_owned(),
                message: err.to_string(),
            }
            .into()
        })
    }

    /// A new instance of the same type with `changes` applied on top of this
    /// one's init fields. Guarded fields get their single write in the new
    /// instance, so this is the supported way to "change" one.
    pub fn replace<K, V>(&self, changes: impl IntoIterator<Item = (K, V)>) -> Result<Record>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut args = BTreeMap::new();
        for field in self.ty.fields().iter().filter(|field| field.init()) {
            if let Ok(value) = self.get(field.name().as_str()) {
                args.insert(field.name().to_string(), value);
            }
        }
        let mut changed = BTreeSet::new();
        for (name, value) in changes {
            let name: String = name.into();
            if !changed.insert(name.clone())
                || self.ty.field(&name).is_some_and(|field| !field.init())
            {
                return Err(RecordError::UnexpectedArgument {
                    record: self.ty.name().to_owned(),
                    name,
                }
                .into());
            }
            args.insert(name, value.into());
        }
        self.ty.construct(args)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        if !Rc::ptr_eq(&self.ty, &other.ty) {
            return false;
        }
        if !self.ty.options().has_eq() {
            return ptr::eq(self, other);
        }
        self.ty
            .fields()
            .iter()
            .filter(|field| field.compare())
            .all(|field| self.get(field.name().as_str()).ok() == other.get(field.name().as_str()).ok())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ty.options().has_repr() {
            return write!(f, "<{} record>", self.ty.name());
        }
        write!(f, "{}(", self.ty.name())?;
        let shown = self.ty.fields().iter().filter(|field| field.repr());
        for (idx, field) in shown.enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            match self.get(field.name().as_str()) {
                Ok(value) => write!(f, "{}={value}", field.name())?,
                Err(_) => write!(f, "{}=<unset>", field.name())?,
            }
        }
        f.write_str(")")
    }
}
