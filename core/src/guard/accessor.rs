use semimut_types::{FieldName, Value};

use crate::errors::{RecordError, Result};
use crate::record::{Record, SlotKey, Stored};

/// Write-once accessor installed as the type-level attribute of a guarded
/// field. Bound to the field and its hidden slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardAccessor {
    field: FieldName,
    slot: SlotKey,
}

impl GuardAccessor {
    pub(crate) fn new(field: FieldName) -> Self {
        let slot = SlotKey::Hidden(field.clone());
        Self { field, slot }
    }

    pub(crate) fn get(&self, record: &Record) -> Result<Value> {
        match record.read(&self.slot) {
            Some(Stored::Open(value) | Stored::Sealed(value)) => Ok(value.clone()),
            None => Err(RecordError::UnsetField {
                record: record.record_type().name().to_owned(),
                field: self.field.to_string(),
            }
            .into()),
        }
    }

    /// The enforcement point: a set slot rejects the write, an unset one
    /// takes it and is sealed.
    pub(crate) fn set(&self, record: &mut Record, value: Value) -> Result<()> {
        if record.read(&self.slot).is_some() {
            return Err(record.immutable(self.field.clone()).into());
        }
        record.write(self.slot.clone(), Stored::Sealed(value))
    }
}
