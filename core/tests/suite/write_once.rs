//! Per-instance write-once behavior.

use std::rc::Rc;

use insta::assert_snapshot;
use semimut_core::{
    BuildOptions, Error, FieldMetadata, FieldOptions, ImmutableFieldError, MisuseError,
    RecordDecl, RecordError, Value, WriteTarget, build, guarded, guarded_field, transform,
};

use crate::common::simple;

#[test]
fn guarded_field_rejects_second_write() {
    let ty = simple();
    let mut obj = ty.construct([("x", 1), ("y", 2)]).unwrap();

    let err = obj.set("x", 99).unwrap_err();
    match err {
        Error::ImmutableField(ImmutableFieldError { record, field, target }) => {
            assert_eq!(record, "Simple");
            assert_eq!(field.as_str(), "x");
            assert_eq!(target, WriteTarget::Instance);
        }
        other => panic!("expected ImmutableField, got {other:?}"),
    }

    obj.set("y", 42).unwrap();
    assert_eq!(obj.get("x").unwrap(), Value::Int(1));
    assert_eq!(obj.get("y").unwrap(), Value::Int(42));
}

#[test]
fn identical_value_rewrite_is_still_rejected() {
    let ty = simple();
    let mut obj = ty.construct([("x", 7)]).unwrap();
    assert!(matches!(obj.set("x", 7), Err(Error::ImmutableField(_))));
}

#[test]
fn immutable_error_message() {
    let ty = simple();
    let mut obj = ty.construct([("x", 1)]).unwrap();
    let err = obj.set("x", 2).unwrap_err();
    assert_snapshot!(err.to_string(), @"instance attribute `x` of `Simple` is immutable");
}

#[test]
fn guarded_default_is_the_single_write() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Cfg").field_with(
                "level",
                "int",
                guarded_field(FieldOptions::new().default_value(3)),
            ),
            BuildOptions::new(),
        )
        .unwrap(),
    );
    let mut obj = ty.construct(Vec::<(&str, i64)>::new()).unwrap();
    assert_eq!(obj.get("level").unwrap(), Value::Int(3));
    assert!(obj.set("level", 4).is_err());
}

#[test]
fn factory_default_is_produced_per_instance() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Bag").field_with(
                "items",
                "list",
                guarded_field(FieldOptions::new().default_factory(|| Value::List(Vec::new()))),
            ),
            BuildOptions::new(),
        )
        .unwrap(),
    );
    let mut first = ty.construct(Vec::<(&str, i64)>::new()).unwrap();
    let second = ty.construct(Vec::<(&str, i64)>::new()).unwrap();
    assert_eq!(first.get("items").unwrap(), Value::List(Vec::new()));
    assert_eq!(second.get("items").unwrap(), Value::List(Vec::new()));
    assert!(first.set("items", Value::List(vec![Value::Int(1)])).is_err());
}

#[test]
fn multiple_guarded_fields_are_independent() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Pair")
                .field_with("a", "int", guarded())
                .field_with("b", "str", guarded())
                .field_with("note", "str", ""),
            BuildOptions::new(),
        )
        .unwrap(),
    );
    assert_eq!(ty.guarded_fields().names(), ["a", "b"]);

    let mut obj = ty.construct([("a", Value::Int(1)), ("b", Value::from("one"))]).unwrap();
    assert!(obj.set("a", 2).is_err());
    assert!(obj.set("b", "two").is_err());
    obj.set("note", "fine").unwrap();

    let other = ty.construct([("a", Value::Int(5)), ("b", Value::from("five"))]).unwrap();
    assert_eq!(other.get("a").unwrap(), Value::Int(5));
}

#[test]
fn metadata_keeps_user_entries_and_guarded_tag() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Tagged").field_with(
                "id",
                "int",
                guarded_field(FieldOptions::new().metadata(FieldMetadata::new().with("doc", "key"))),
            ),
            BuildOptions::new(),
        )
        .unwrap(),
    );
    let field = ty.field("id").unwrap();
    assert!(field.is_guarded());
    assert_eq!(field.metadata().get("doc"), Some(&Value::from("key")));
    assert_eq!(field.metadata().len(), 2);
}

#[test]
fn missing_guarded_argument_fails_construction() {
    let ty = simple();
    let err = ty.construct([("y", 1)]).unwrap_err();
    assert!(matches!(
        err,
        Error::Record(RecordError::MissingArgument { ref field, .. }) if field == "x"
    ));
}

#[test]
fn plain_build_of_guarded_declaration_is_misuse() {
    let err = build(
        RecordDecl::new("Simple")
            .field_with("x", "int", guarded())
            .field_with("y", "int", 0),
        BuildOptions::new(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Misuse(MisuseError::TransformerNotApplied { .. })
    ));
    assert_snapshot!(
        err.to_string(),
        @"field `x` of `Simple` was declared with guarded_field() but the declaration was built without transform(); build it with transform() to enforce write-once"
    );
}

#[test]
fn record_without_guarded_fields_is_untouched() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Plain").field("a", "int"),
            BuildOptions::new(),
        )
        .unwrap(),
    );
    assert!(ty.has_guard_registry());
    assert!(ty.guarded_fields().is_empty());
    let mut obj = ty.construct([("a", 1)]).unwrap();
    obj.set("a", 2).unwrap();
    assert_eq!(obj.get("a").unwrap(), Value::Int(2));
}

#[test]
fn frozen_record_needs_no_guards() {
    let ty = Rc::new(
        transform(
            RecordDecl::new("Fz")
                .field_with("a", "int", guarded())
                .field_with("b", "int", 0),
            BuildOptions::new().frozen(true),
        )
        .unwrap(),
    );
    assert!(ty.guarded_fields().is_empty());
    let mut obj = ty.construct([("a", 1)]).unwrap();
    assert_eq!(obj.get("a").unwrap(), Value::Int(1));
    assert!(matches!(
        obj.set("b", 2),
        Err(Error::Record(RecordError::FrozenInstance { .. }))
    ));
    assert!(matches!(
        obj.set("a", 2),
        Err(Error::Record(RecordError::FrozenInstance { .. }))
    ));
}
