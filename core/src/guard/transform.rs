use std::mem;

use semimut_types::TransformOptions;
use tracing::debug;

use crate::errors::Result;
use crate::guard::freeze;
use crate::record::{FieldDefault, RecordDecl, RecordType, build};

/// Build a declaration that may contain guarded fields.
///
/// Each guarded intent is swapped for an ordinary field declaration carrying
/// the captured options and the guarded tag, the declaration goes through
/// the base builder with the guard policy stripped off, and the result is
/// frozen under that policy.
///
/// ```
/// use semimut_core::{BuildOptions, Error, RecordDecl, guarded, transform};
/// use std::rc::Rc;
///
/// let ty = Rc::new(transform(
///     RecordDecl::new("Simple")
///         .field_with("x", "int", guarded())
///         .field_with("y", "int", 0),
///     BuildOptions::new(),
/// )?);
/// let mut obj = ty.construct([("x", 1), ("y", 2)])?;
/// assert!(matches!(obj.set("x", 99), Err(Error::ImmutableField(_))));
/// obj.set("y", 42)?;
/// # Ok::<(), Error>(())
/// ```
pub fn transform(mut decl: RecordDecl, options: impl Into<TransformOptions>) -> Result<RecordType> {
    let (build_options, policy) = options.into().split();

    let mut disarmed = 0usize;
    for field in &mut decl.fields {
        if field.is_guarded_intent()
            && let FieldDefault::Guarded(trap) = mem::take(&mut field.default)
        {
            field.default = FieldDefault::Options(trap.disarm().into_options());
            disarmed += 1;
        }
    }
    debug!(record = decl.name(), disarmed, %policy, "transforming record declaration");

    let ty = build(decl, build_options)?;
    freeze(ty, policy)
}
