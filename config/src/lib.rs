//! Configuration loading for semimut record types.
//!
//! Raw TOML structs (every field optional) stay private to this crate. They
//! are resolved into [`TransformOptions`] at the parse boundary, so an
//! unknown guard policy or an impossible option combination never gets past
//! [`parse`] or [`load`].
//!
//! ```toml
//! [defaults]
//! slots = true
//! class_level_guard_policy = "error"
//!
//! [records.Session]
//! frozen = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use semimut_types::{BuildOptions, ClassLevelGuardPolicy, ConfigurationError, TransformOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid options for {scope}: {source}")]
    Invalid {
        scope: String,
        #[source]
        source: ConfigurationError,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    defaults: RawOptions,
    #[serde(default)]
    records: BTreeMap<String, RawOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOptions {
    init: Option<bool>,
    repr: Option<bool>,
    eq: Option<bool>,
    frozen: Option<bool>,
    slots: Option<bool>,
    weakref_slot: Option<bool>,
    class_level_guard_policy: Option<String>,
}

impl RawOptions {
    /// Overlay the set fields onto `base`.
    fn resolve(self, base: TransformOptions) -> Result<TransformOptions, ConfigurationError> {
        let mut build: BuildOptions = base.build;
        if let Some(on) = self.init {
            build = build.init(on);
        }
        if let Some(on) = self.repr {
            build = build.repr(on);
        }
        if let Some(on) = self.eq {
            build = build.eq(on);
        }
        if let Some(on) = self.frozen {
            build = build.frozen(on);
        }
        if let Some(on) = self.slots {
            build = build.slots(on);
        }
        if let Some(on) = self.weakref_slot {
            build = build.weakref_slot(on);
        }
        let policy = match self.class_level_guard_policy {
            Some(raw) => raw.parse::<ClassLevelGuardPolicy>()?,
            None => base.class_level_guard_policy,
        };
        Ok(TransformOptions::new(build.validate()?).policy(policy))
    }
}

/// Resolved configuration: defaults plus per-record overrides, each already
/// merged over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordConfig {
    defaults: TransformOptions,
    records: BTreeMap<String, TransformOptions>,
}

impl RecordConfig {
    #[must_use]
    pub fn defaults(&self) -> TransformOptions {
        self.defaults
    }

    /// Options for `record`, falling back to the defaults.
    #[must_use]
    pub fn options_for(&self, record: &str) -> TransformOptions {
        self.records.get(record).copied().unwrap_or(self.defaults)
    }

    pub fn overridden_records(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

/// Parse configuration from TOML source.
pub fn parse(source: &str) -> Result<RecordConfig, ConfigError> {
    let raw: RawConfig = toml::from_str(source)?;
    let defaults = raw
        .defaults
        .resolve(TransformOptions::default())
        .map_err(|source| ConfigError::Invalid {
            scope: "[defaults]".to_owned(),
            source,
        })?;

    let mut records = BTreeMap::new();
    for (name, options) in raw.records {
        let resolved = options.resolve(defaults).map_err(|source| ConfigError::Invalid {
            scope: format!("[records.{name}]"),
            source,
        })?;
        records.insert(name, resolved);
    }

    debug!(
        policy = %defaults.class_level_guard_policy,
        overrides = records.len(),
        "parsed record configuration"
    );
    Ok(RecordConfig { defaults, records })
}

/// Read and parse a config file.
pub fn load(path: &Path) -> Result<RecordConfig, ConfigError> {
    let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source)
}

/// Like [`load`], but a missing file yields the default configuration.
pub fn load_or_default(path: &Path) -> Result<RecordConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(source) => parse(&source),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file; using defaults");
            Ok(RecordConfig::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
