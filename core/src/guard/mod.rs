//! The guard layer: write-once enforcement for individual record fields.
//!
//! Declaration ([`guarded_field`]) → [`transform`] → base build → [`freeze`].
//! After that, instance access to a guarded field goes through its
//! [`GuardAccessor`] and type-level access goes through the type's
//! [`TypeLevelStrategy`].

mod accessor;
mod freeze;
mod intent;
mod registry;
mod strategy;
mod transform;

pub use accessor::GuardAccessor;
pub use freeze::freeze;
pub use intent::{MisuseTrap, guarded, guarded_field};
pub use registry::GuardRegistry;
pub use strategy::TypeLevelStrategy;
pub use transform::transform;
