//! Building record types from file-based options.

use std::fs;
use std::rc::Rc;

use semimut_config::{load, load_or_default};
use semimut_core::{
    ClassLevelGuardPolicy, Error, RecordDecl, TypeLevelStrategy, guarded, transform,
};
use tempfile::TempDir;

#[test]
fn file_options_drive_the_transform() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.toml");
    fs::write(
        &path,
        r#"
[defaults]
class_level_guard_policy = "error"

[records.Sm]
slots = true
weakref_slot = true
"#,
    )
    .unwrap();

    let config = load(&path).unwrap();
    let options = config.options_for("Sm");
    assert_eq!(options.class_level_guard_policy, ClassLevelGuardPolicy::Error);

    let ty = Rc::new(
        transform(
            RecordDecl::new("Sm").field_with("a", "int", guarded()),
            options,
        )
        .unwrap(),
    );
    assert!(ty.layout().is_fixed());
    assert!(ty.supports_weak_refs());
    assert!(matches!(ty.set_type_attr("a", 1), Err(Error::ImmutableField(_))));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_or_default(&dir.path().join("absent.toml")).unwrap();
    let ty = transform(
        RecordDecl::new("Simple").field_with("x", "int", guarded()),
        config.options_for("Simple"),
    )
    .unwrap();
    assert!(!ty.layout().is_fixed());
    assert_eq!(ty.strategy(), TypeLevelStrategy::Redirect);
}
