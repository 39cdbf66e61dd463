use std::collections::{BTreeSet, btree_set};

use semimut_types::FieldName;

use crate::record::FieldSpec;

/// The set of write-once field names of one built type.
///
/// Computed once by the freeze step and never changed afterwards. A subtype
/// gets its own registry only by going through the freeze step itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GuardRegistry(BTreeSet<FieldName>);

impl GuardRegistry {
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub(crate) fn collect(fields: &[FieldSpec]) -> Self {
        Self(
            fields
                .iter()
                .filter(|field| field.is_guarded())
                .map(|field| field.name().clone())
                .collect(),
        )
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldName> {
        self.0.iter()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(FieldName::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a GuardRegistry {
    type Item = &'a FieldName;
    type IntoIter = btree_set::Iter<'a, FieldName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
