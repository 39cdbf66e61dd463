//! The freeze step: turns guarded-tagged fields of a built type into
//! enforced write-once fields.

use semimut_types::{ClassLevelGuardPolicy, MisuseError};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::guard::{GuardAccessor, GuardRegistry, TypeLevelStrategy};
use crate::record::{Layout, RecordType, SlotKey, SlotTable, TypeAttr};

/// Install write-once guards on every field whose metadata carries the
/// guarded tag.
///
/// A record-wide frozen type is returned as is, with an empty registry: its
/// own immutability already covers every field. Fixed-layout types get a
/// recomputed slot table in which each guarded field's public slot is
/// replaced by its hidden slot.
pub fn freeze(ty: RecordType, policy: ClassLevelGuardPolicy) -> Result<RecordType> {
    if ty.has_guard_registry() {
        return Err(MisuseError::AlreadyFrozen {
            record: ty.name().to_owned(),
        }
        .into());
    }

    let mut ty = ty;
    if ty.is_frozen() {
        if ty.fields().iter().any(|field| field.is_guarded()) {
            warn!(
                record = ty.name(),
                "record is frozen as a whole; guarded fields need no per-field guard"
            );
        }
        ty.registry = Some(GuardRegistry::empty());
        return Ok(ty);
    }

    let registry = GuardRegistry::collect(ty.fields());
    if registry.is_empty() {
        ty.registry = Some(registry);
        return Ok(ty);
    }

    if ty.layout().is_fixed() {
        ty = with_hidden_slots(ty, &registry);
    }

    let strategy = TypeLevelStrategy::for_policy(policy);
    ty.strategy = strategy;
    for name in &registry {
        if strategy == TypeLevelStrategy::Redirect
            && let Some(value) = ty.field(name.as_str()).and_then(|field| field.plain_default())
        {
            ty.set_cell(name.clone(), value.clone());
        }
        ty.raw_set(name.as_str(), TypeAttr::Guard(GuardAccessor::new(name.clone())));
    }

    debug!(
        record = ty.name(),
        guarded = ?registry.names(),
        ?strategy,
        fixed = ty.layout().is_fixed(),
        "installed field guards"
    );
    ty.registry = Some(registry);
    Ok(ty)
}

/// A fixed layout cannot grow in place, so the type is rebuilt around a new
/// table: unguarded fields, then one hidden slot per guarded field, then the
/// weak-reference slot, minus anything an ancestor already provides.
fn with_hidden_slots(ty: RecordType, registry: &GuardRegistry) -> RecordType {
    let inherited = ty
        .parent()
        .map(|parent| parent.layout().provided_slots().to_vec())
        .unwrap_or_default();
    let public = ty
        .fields()
        .iter()
        .filter(|field| !registry.contains(field.name().as_str()))
        .map(|field| SlotKey::Field(field.name().clone()));
    let hidden = ty
        .fields()
        .iter()
        .filter(|field| registry.contains(field.name().as_str()))
        .map(|field| SlotKey::Hidden(field.name().clone()));
    let weakref = ty.options().has_weakref_slot().then_some(SlotKey::WeakRef);
    let table = SlotTable::compose(&inherited, public.chain(hidden).chain(weakref));

    debug!(
        record = ty.name(),
        slots = table.len(),
        inherited = table.inherited_slots().len(),
        "synthesized fixed layout with hidden slots"
    );
    RecordType {
        layout: Layout::Fixed(table),
        ..ty
    }
}
