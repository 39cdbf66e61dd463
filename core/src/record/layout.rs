//! Instance storage layouts.
//!
//! A fixed layout is a deterministic table of typed slot keys. Hidden
//! storage for guarded fields is a distinct key kind, so it can never
//! collide with a field name or be listed as a public slot.

use std::fmt;

use semimut_types::FieldName;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKey {
    /// Public storage for a field.
    Field(FieldName),
    /// Private write-once storage backing a guarded field.
    Hidden(FieldName),
    /// Reserved entry that makes fixed-layout instances weak-referenceable.
    WeakRef,
}

impl SlotKey {
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, SlotKey::Hidden(_))
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKey::Field(name) => write!(f, "{name}"),
            SlotKey::Hidden(name) => write!(f, "<hidden {name}>"),
            SlotKey::WeakRef => f.write_str("<weakref>"),
        }
    }
}

/// Slot table for a fixed layout. Ancestor slots come first, then the
/// type's own slots; a key appears at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTable {
    slots: Vec<SlotKey>,
    inherited: usize,
}

impl SlotTable {
    /// Own keys already present in `inherited` (or earlier in `own`) are
    /// dropped rather than shadowed.
    pub(crate) fn compose(inherited: &[SlotKey], own: impl IntoIterator<Item = SlotKey>) -> Self {
        let mut slots = inherited.to_vec();
        for key in own {
            if !slots.contains(&key) {
                slots.push(key);
            }
        }
        Self {
            slots,
            inherited: inherited.len(),
        }
    }

    #[must_use]
    pub fn index_of(&self, key: &SlotKey) -> Option<usize> {
        self.slots.iter().position(|slot| slot == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slots(&self) -> &[SlotKey] {
        &self.slots
    }

    #[must_use]
    pub fn inherited_slots(&self) -> &[SlotKey] {
        &self.slots[..self.inherited]
    }

    #[must_use]
    pub fn own_slots(&self) -> &[SlotKey] {
        &self.slots[self.inherited..]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Open per-instance map; accepts attributes beyond the declared fields.
    Dynamic,
    Fixed(SlotTable),
}

impl Layout {
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Layout::Fixed(_))
    }

    #[must_use]
    pub fn slot_table(&self) -> Option<&SlotTable> {
        match self {
            Layout::Fixed(table) => Some(table),
            Layout::Dynamic => None,
        }
    }

    /// Slots a subtype inherits and must not redeclare.
    #[must_use]
    pub fn provided_slots(&self) -> &[SlotKey] {
        self.slot_table().map_or(&[], SlotTable::slots)
    }

    /// Slots visible under public names. Empty for dynamic layouts.
    pub fn public_slots(&self) -> impl Iterator<Item = &SlotKey> {
        self.provided_slots().iter().filter(|key| !key.is_hidden())
    }

    pub fn hidden_slots(&self) -> impl Iterator<Item = &SlotKey> {
        self.provided_slots().iter().filter(|key| key.is_hidden())
    }
}
