//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::rc::Rc;

use semimut_core::{
    BuildOptions, ClassLevelGuardPolicy, RecordDecl, RecordType, TransformOptions, guarded,
    transform,
};

/// `Simple { x: guarded, y = 0 }` built with the given options.
pub fn simple_with(options: impl Into<TransformOptions>) -> Rc<RecordType> {
    Rc::new(
        transform(
            RecordDecl::new("Simple")
                .field_with("x", "int", guarded())
                .field_with("y", "int", 0),
            options,
        )
        .expect("Simple must build"),
    )
}

pub fn simple() -> Rc<RecordType> {
    simple_with(BuildOptions::new())
}

pub fn simple_under(policy: ClassLevelGuardPolicy) -> Rc<RecordType> {
    simple_with(TransformOptions::new(BuildOptions::new()).policy(policy))
}

/// `Sm { a: guarded, b = 1 }` with fixed-layout storage.
pub fn slotted() -> Rc<RecordType> {
    Rc::new(
        transform(
            RecordDecl::new("Sm")
                .field_with("a", "int", guarded())
                .field_with("b", "int", 1),
            BuildOptions::new().slots(true),
        )
        .expect("Sm must build"),
    )
}
