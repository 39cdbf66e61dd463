//! Type-level access strategies for guarded names.

use semimut_types::{ClassLevelGuardPolicy, FieldName, ImmutableFieldError, Value, WriteTarget};
use tracing::warn;

use crate::errors::{RecordError, Result};
use crate::record::{RecordType, TypeAttr};

/// How type-level get/set of a guarded field's name are handled.
///
/// Non-guarded names always pass straight through to the type's attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeLevelStrategy {
    /// No interception. A set overwrites whatever is stored, guards included.
    #[default]
    Passthrough,
    /// Guarded names read and write a hidden type-level cell instead of the
    /// guard, so they behave like ordinary shared attributes.
    Redirect,
    /// Guarded names reject sets while their guard is installed.
    Reject,
}

impl TypeLevelStrategy {
    #[must_use]
    pub fn for_policy(policy: ClassLevelGuardPolicy) -> Self {
        match policy {
            ClassLevelGuardPolicy::Patch => TypeLevelStrategy::Redirect,
            ClassLevelGuardPolicy::Replace => TypeLevelStrategy::Passthrough,
            ClassLevelGuardPolicy::Error => TypeLevelStrategy::Reject,
        }
    }

    pub(crate) fn get(self, ty: &RecordType, name: &str) -> Result<TypeAttr> {
        let found = match self {
            TypeLevelStrategy::Redirect if ty.guarded_fields().contains(name) => {
                ty.cell(name).map(TypeAttr::Value)
            }
            _ => ty.raw_attr(name),
        };
        found.ok_or_else(|| {
            RecordError::NoSuchAttribute {
                record: ty.name().to_owned(),
                name: name.to_owned(),
            }
            .into()
        })
    }

    pub(crate) fn set(self, ty: &RecordType, name: &str, value: Value) -> Result<()> {
        let field = FieldName::new(name)?;
        let guarded = ty.guarded_fields().contains(name);
        match self {
            TypeLevelStrategy::Redirect if guarded => {
                ty.set_cell(field, value);
                return Ok(());
            }
            TypeLevelStrategy::Reject
                if guarded && ty.raw_attr(name).is_some_and(|attr| attr.is_guard()) =>
            {
                return Err(ImmutableFieldError {
                    record: ty.name().to_owned(),
                    field,
                    target: WriteTarget::Type,
                }
                .into());
            }
            TypeLevelStrategy::Passthrough
                if guarded && ty.raw_attr(name).is_some_and(|attr| attr.is_guard()) =>
            {
                warn!(
                    record = ty.name(),
                    field = name,
                    "type-level assignment replaced a guard; new instances are no longer write-once"
                );
            }
            _ => {}
        }
        ty.raw_set(name, TypeAttr::Value(value));
        Ok(())
    }
}
