//! Build-time options for record types.
//!
//! These are resolved values: a `TransformOptions` in hand has already passed
//! validation. Raw, file-shaped configuration lives in `semimut-config`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// What happens when code assigns a guarded field's name on the type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClassLevelGuardPolicy {
    /// Type-level get/set of the name go to a hidden type-level cell. The
    /// per-instance guard is untouched.
    #[default]
    Patch,
    /// Type-level set overwrites the guard. New instances see a plain field.
    Replace,
    /// Type-level set is rejected while the guard is installed.
    Error,
}

impl ClassLevelGuardPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ClassLevelGuardPolicy::Patch => "patch",
            ClassLevelGuardPolicy::Replace => "replace",
            ClassLevelGuardPolicy::Error => "error",
        }
    }

    #[must_use]
    pub fn all() -> &'static [ClassLevelGuardPolicy] {
        &[
            ClassLevelGuardPolicy::Patch,
            ClassLevelGuardPolicy::Replace,
            ClassLevelGuardPolicy::Error,
        ]
    }
}

impl FromStr for ClassLevelGuardPolicy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownPolicy {
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for ClassLevelGuardPolicy {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, ConfigurationError> {
        value.parse()
    }
}

impl From<ClassLevelGuardPolicy> for String {
    fn from(value: ClassLevelGuardPolicy) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for ClassLevelGuardPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options understood by the base record builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct BuildOptions {
    init: bool,
    repr: bool,
    eq: bool,
    frozen: bool,
    slots: bool,
    weakref_slot: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            init: true,
            repr: true,
            eq: true,
            frozen: false,
            slots: false,
            weakref_slot: false,
        }
    }
}

impl BuildOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a keyword constructor. When off, construction takes no
    /// arguments and every field comes from its default.
    pub fn init(mut self, on: bool) -> Self {
        self.init = on;
        self
    }

    pub fn repr(mut self, on: bool) -> Self {
        self.repr = on;
        self
    }

    pub fn eq(mut self, on: bool) -> Self {
        self.eq = on;
        self
    }

    /// Record-wide immutability: every field rejects writes after construction.
    pub fn frozen(mut self, on: bool) -> Self {
        self.frozen = on;
        self
    }

    /// Fixed-layout storage instead of an open per-instance map.
    pub fn slots(mut self, on: bool) -> Self {
        self.slots = on;
        self
    }

    pub fn weakref_slot(mut self, on: bool) -> Self {
        self.weakref_slot = on;
        self
    }

    /// Reject combinations the builder cannot honor.
    pub fn validate(self) -> Result<Self, ConfigurationError> {
        if self.weakref_slot && !self.slots {
            return Err(ConfigurationError::WeakrefWithoutSlots);
        }
        Ok(self)
    }

    #[must_use]
    pub fn has_init(&self) -> bool {
        self.init
    }

    #[must_use]
    pub fn has_repr(&self) -> bool {
        self.repr
    }

    #[must_use]
    pub fn has_eq(&self) -> bool {
        self.eq
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[must_use]
    pub fn has_slots(&self) -> bool {
        self.slots
    }

    #[must_use]
    pub fn has_weakref_slot(&self) -> bool {
        self.weakref_slot
    }
}

/// Build options plus the guard policy, which is stripped off before the
/// base builder sees the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TransformOptions {
    pub build: BuildOptions,
    pub class_level_guard_policy: ClassLevelGuardPolicy,
}

impl TransformOptions {
    #[must_use]
    pub fn new(build: BuildOptions) -> Self {
        Self {
            build,
            class_level_guard_policy: ClassLevelGuardPolicy::default(),
        }
    }

    pub fn policy(mut self, policy: ClassLevelGuardPolicy) -> Self {
        self.class_level_guard_policy = policy;
        self
    }

    /// Split into the builder's share and the freeze step's share.
    #[must_use]
    pub fn split(self) -> (BuildOptions, ClassLevelGuardPolicy) {
        (self.build, self.class_level_guard_policy)
    }
}

impl From<BuildOptions> for TransformOptions {
    fn from(build: BuildOptions) -> Self {
        Self::new(build)
    }
}
