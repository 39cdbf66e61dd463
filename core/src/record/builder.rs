//! The base record builder: declaration in, [`RecordType`] out.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use semimut_types::{BuildOptions, FieldName, RecordName};
use tracing::debug;

use crate::errors::{RecordError, Result};
use crate::guard::TypeLevelStrategy;
use crate::record::{FieldSpec, Layout, RecordDecl, RecordType, SlotKey, SlotTable, TypeAttr};

/// Build a record type from a declaration.
///
/// Every declared default is inspected here, so a declaration still holding
/// an un-transformed guarded intent fails with a misuse error before any
/// instance can exist.
pub fn build(decl: RecordDecl, options: BuildOptions) -> Result<RecordType> {
    let options = options.validate()?;
    let RecordDecl {
        name,
        parent,
        fields: decls,
        type_attrs,
    } = decl;
    let name = RecordName::new(name)?;

    let mut fields: Vec<FieldSpec> = parent
        .as_ref()
        .map(|parent| parent.fields().to_vec())
        .unwrap_or_default();
    let mut attrs: BTreeMap<String, TypeAttr> = BTreeMap::new();
    if let Some(parent) = &parent {
        for (attr_name, attr) in parent.attrs.borrow().iter() {
            if let TypeAttr::Value(value) = attr {
                attrs.insert(attr_name.clone(), TypeAttr::Value(value.clone()));
            }
        }
    }

    let mut seen = HashSet::new();
    for decl in decls {
        let field_name = FieldName::new(decl.name.as_str())?;
        if !seen.insert(field_name.clone()) {
            return Err(RecordError::DuplicateField {
                record: name.to_string(),
                field: field_name.to_string(),
            }
            .into());
        }
        let field_options = decl.default.inspect(name.as_str(), field_name.as_str())?;
        let spec = FieldSpec::from_options(field_name, decl.type_name, field_options);
        match fields.iter_mut().find(|existing| existing.name() == spec.name()) {
            Some(existing) => *existing = spec,
            None => fields.push(spec),
        }
    }

    if options.has_init() {
        let mut defaulted = false;
        for field in fields.iter().filter(|field| field.init()) {
            if field.has_default() {
                defaulted = true;
            } else if defaulted {
                return Err(RecordError::RequiredAfterDefault {
                    record: name.to_string(),
                    field: field.name().to_string(),
                }
                .into());
            }
        }
    }

    for (attr_name, value) in type_attrs {
        FieldName::new(attr_name.as_str())?;
        attrs.insert(attr_name, TypeAttr::Value(value));
    }
    for field in &fields {
        if let Some(value) = field.plain_default() {
            attrs.insert(field.name().to_string(), TypeAttr::Value(value.clone()));
        }
    }

    let layout = if options.has_slots() {
        match parent.as_ref().map(|parent| parent.layout()) {
            Some(Layout::Dynamic) => {
                debug!(
                    record = %name,
                    "parent uses dynamic storage; keeping dynamic layout"
                );
                Layout::Dynamic
            }
            inherited => {
                let inherited = inherited.map_or(&[][..], Layout::provided_slots);
                let own = fields
                    .iter()
                    .map(|field| SlotKey::Field(field.name().clone()))
                    .chain(options.has_weakref_slot().then_some(SlotKey::WeakRef));
                Layout::Fixed(SlotTable::compose(inherited, own))
            }
        }
    } else {
        Layout::Dynamic
    };

    debug!(
        record = %name,
        fields = fields.len(),
        fixed = layout.is_fixed(),
        frozen = options.is_frozen(),
        "built record type"
    );

    Ok(RecordType {
        name,
        parent,
        fields,
        options,
        layout,
        attrs: RefCell::new(attrs),
        cells: RefCell::new(BTreeMap::new()),
        strategy: TypeLevelStrategy::Passthrough,
        registry: None,
    })
}
