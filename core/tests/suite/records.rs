//! Record conveniences around guarded fields: conversion, copying,
//! comparison, and display.

use std::rc::Rc;

use insta::assert_snapshot;
use semimut_core::{
    BuildOptions, Error, FieldOptions, RecordDecl, RecordError, Value, guarded, guarded_field,
    transform,
};
use serde_json::json;

use crate::common::{simple, slotted};

#[test]
fn display_shows_fields_in_order() {
    let ty = simple();
    let obj = ty.construct([("x", 1), ("y", 2)]).unwrap();
    assert_snapshot!(obj.to_string(), @"Simple(x=1, y=2)");
}

#[test]
fn display_respects_repr_options() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Secret")
                .field_with("id", "int", guarded())
                .field_with("token", "str", FieldOptions::new().default_value("t").repr(false)),
            BuildOptions::new(),
        )
        .unwrap(),
    );
    let obj = ty.construct([("id", 7)]).unwrap();
    assert_snapshot!(obj.to_string(), @"Secret(id=7)");

    let opaque = Rc::new(
        transform(
            RecordDecl::new("Opaque").field_with("id", "int", guarded()),
            BuildOptions::new().repr(false),
        )
        .unwrap(),
    );
    let obj = opaque.construct([("id", 7)]).unwrap();
    assert_snapshot!(obj.to_string(), @"<Opaque record>");
}

#[test]
fn conversions_read_guarded_values() {
    let ty = simple();
    let obj = ty.construct([("x", Value::Int(1)), ("y", Value::from("two"))]).unwrap();

    assert_eq!(obj.fields().len(), 2);
    let map = obj.as_map().unwrap();
    assert_eq!(map.get("x"), Some(&Value::Int(1)));
    assert_eq!(map.len(), 2);
    assert_eq!(obj.as_tuple().unwrap(), [Value::Int(1), Value::from("two")]);
    assert_eq!(obj.to_json().unwrap(), json!({"x": 1, "y": "two"}));
}

#[test]
fn replace_builds_a_fresh_instance() {
    let ty = slotted();
    let original = ty.construct([("a", 1), ("b", 2)]).unwrap();
    let mut copy = original.replace([("a", 10)]).unwrap();

    assert_eq!(copy.get("a").unwrap(), Value::Int(10));
    assert_eq!(copy.get("b").unwrap(), Value::Int(2));
    assert_eq!(original.get("a").unwrap(), Value::Int(1));
    assert!(copy.set("a", 11).is_err());
}

#[test]
fn replace_rejects_non_init_fields() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Counted")
                .field_with("id", "int", guarded())
                .field_with("hits", "int", FieldOptions::new().default_value(0).init(false)),
            BuildOptions::new(),
        )
        .unwrap(),
    );
    let obj = ty.construct([("id", 1)]).unwrap();
    assert!(matches!(
        obj.replace([("hits", 5)]),
        Err(Error::Record(RecordError::UnexpectedArgument { .. }))
    ));
}

#[test]
fn equality_compares_field_values() {
    let ty = simple();
    let a = ty.construct([("x", 1), ("y", 2)]).unwrap();
    let b = ty.construct([("x", 1), ("y", 2)]).unwrap();
    let c = ty.construct([("x", 2), ("y", 2)]).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);

    let other = simple();
    let d = other.construct([("x", 1), ("y", 2)]).unwrap();
    assert_ne!(a, d);
}

#[test]
fn equality_skips_uncompared_fields() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Stamped")
                .field_with("id", "int", guarded())
                .field_with(
                    "seen",
                    "int",
                    guarded_field(FieldOptions::new().default_value(0).compare(false)),
                ),
            BuildOptions::new(),
        )
        .unwrap(),
    );
    let a = ty.construct([("id", 1), ("seen", 1)]).unwrap();
    let b = ty.construct([("id", 1), ("seen", 2)]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn constructor_rejects_unknown_arguments() {
    let ty = simple();
    let err = ty.construct([("x", 1), ("w", 2)]).unwrap_err();
    assert!(matches!(
        err,
        Error::Record(RecordError::UnexpectedArgument { ref name, .. }) if name == "w"
    ));
}

#[test]
fn repeated_argument_names_are_rejected() {
    let ty = simple();
    let err = ty.construct([("x", 1), ("x", 2)]).unwrap_err();
    assert!(matches!(
        err,
        Error::Record(RecordError::UnexpectedArgument { ref name, .. }) if name == "x"
    ));

    let obj = ty.construct([("x", 1)]).unwrap();
    assert!(matches!(
        obj.replace([("y", 2), ("y", 3)]),
        Err(Error::Record(RecordError::UnexpectedArgument { .. }))
    ));
}

#[test]
fn dynamic_records_accept_extra_attributes() {
    let ty = simple();
    let mut obj = ty.construct([("x", 1)]).unwrap();
    obj.set("extra", true).unwrap();
    assert_eq!(obj.get("extra").unwrap(), Value::Bool(true));
    assert!(matches!(
        obj.get("missing"),
        Err(Error::Record(RecordError::NoSuchAttribute { .. }))
    ));
}

#[test]
fn fixed_records_reject_extra_attributes() {
    let ty = slotted();
    let mut obj = ty.construct([("a", 1)]).unwrap();
    assert!(matches!(
        obj.set("extra", true),
        Err(Error::Record(RecordError::NoSuchSlot { .. }))
    ));
}

#[test]
fn init_off_uses_defaults_only() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Auto")
                .field_with("id", "int", guarded_field(FieldOptions::new().default_value(1))),
            BuildOptions::new().init(false),
        )
        .unwrap(),
    );
    let mut obj = ty.construct(Vec::<(&str, i64)>::new()).unwrap();
    assert_eq!(obj.get("id").unwrap(), Value::Int(1));
    assert!(obj.set("id", 2).is_err());
    assert!(ty.construct([("id", 3)]).is_err());
}

#[test]
fn unset_guarded_field_can_be_written_once() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Late")
                .field_with("id", "int", guarded_field(FieldOptions::new().init(false))),
            BuildOptions::new(),
        )
        .unwrap(),
    );
    let mut obj = ty.construct(Vec::<(&str, i64)>::new()).unwrap();
    assert!(matches!(
        obj.get("id"),
        Err(Error::Record(RecordError::UnsetField { .. }))
    ));
    assert_snapshot!(obj.to_string(), @"Late(id=<unset>)");

    obj.set("id", 5).unwrap();
    assert_eq!(obj.get("id").unwrap(), Value::Int(5));
    assert!(obj.set("id", 6).is_err());
}
