// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in named constants with environment overrides.
//!
//! Constants can be read without a loaded configuration file. A set
//! environment variable of the same name replaces the built-in value, after
//! being passed through the converter registered for that name.

use crate::adapters::EnvVarAdapter;
use crate::domain::{ConfigError, ConstantValue, EnvConverter, Result};
use crate::ports::EnvironmentSource;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

static GLOBAL: Lazy<ConstantRegistry> = Lazy::new(ConstantRegistry::from_process_env);

const EXECUTABLES: &[(&str, &str)] = &[
    ("ANT", "ant"),
    // bzip2 reads its own BZIP/BZIP2 variables as arguments
    ("BZIP_PROG", "bzip2"),
    ("GIT", "git"),
    ("GPG", "gpg"),
    ("JAR", "jar"),
    ("MAKE", "make"),
    ("MD5SUM", "md5sum"),
    ("MV", "mv"),
    ("PERL", "perl"),
    ("S3CURL", "s3curl.pl"),
    ("SVN", "svn"),
    ("RSYNC", "rsync"),
    ("TAR", "tar"),
    ("UNZIP", "unzip"),
    ("WGET", "wget"),
    ("ZIP", "zip"),
];

const BUILD_PLATFORMS_MAP: &[(&str, &str)] = &[
    ("Windows-i686", "win32"),
    ("Windows-AMD64", "win64"),
    ("Darwin-i686", "mac"),
    ("Darwin-x86_64", "mac"),
    ("Linux-i686", "linux"),
    ("Linux-x86_64", "linux-x64"),
];

const BUILD_PLATFORM_EXTENSIONS: &[(&str, &str)] = &[
    ("win32", "exe"),
    ("mac", "dmg"),
    ("linux", "tar.gz"),
    ("linux-x64", "tar.gz"),
];

const S3_MIME_TYPES: &[(&str, &str)] = &[
    ("asc", "text/plain"),
    ("bz2", "application/x-bzip2"),
    ("dmg", "application/x-apple-diskimage"),
    ("exe", "application/octet-stream"),
    ("mar", "application/octet-stream"),
    ("md5", "text/plain"),
    ("tar.gz", "application/x-gzip"),
    ("txt", "text/plain"),
    ("zip", "application/zip"),
];

// Timeouts are in seconds.
const NUMBERS: &[(&str, i64)] = &[
    ("RUN_SHELL_COMMAND_DEFAULT_TIMEOUT", 60 * 5),
    ("RUN_SHELL_COMMAND_TIMEOUT_FACTOR", 1),
    ("RUN_SHELL_COMMAND_IN_MEM_LINES", 20000),
    ("S3_PUSH_TIMEOUT", 60 * 10),
];

fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn builtin_constants() -> BTreeMap<&'static str, ConstantValue> {
    let mut constants = BTreeMap::new();

    for (name, exe) in EXECUTABLES {
        constants.insert(*name, ConstantValue::from(*exe));
    }
    for (name, n) in NUMBERS {
        constants.insert(*name, ConstantValue::Int(*n));
    }

    let platforms = mapping(BUILD_PLATFORMS_MAP);
    constants.insert(
        "BUILD_PLATFORMS",
        ConstantValue::List(platforms.values().cloned().collect()),
    );
    constants.insert("BUILD_PLATFORMS_MAP", ConstantValue::Map(platforms));
    constants.insert(
        "BUILD_PLATFORM_EXTENSIONS",
        ConstantValue::Map(mapping(BUILD_PLATFORM_EXTENSIONS)),
    );
    constants.insert("S3_MIME_TYPES", ConstantValue::Map(mapping(S3_MIME_TYPES)));

    constants
}

fn builtin_converters() -> HashMap<&'static str, EnvConverter> {
    let mut converters = HashMap::new();
    converters.insert("BUILD_PLATFORMS", EnvConverter::Words);
    for (name, _) in NUMBERS {
        converters.insert(*name, EnvConverter::Int);
    }
    converters.insert("BUILD_PLATFORM_EXTENSIONS", EnvConverter::Unimplemented);
    converters.insert("S3_MIME_TYPES", EnvConverter::Unimplemented);
    converters
}

/// The table of built-in constants, with the environment source consulted
/// for overrides.
///
/// The table is fixed at construction. Environment overrides are looked up on
/// every call, so a variable set after start-up is still honored.
///
/// # Examples
///
/// ```rust
/// use sectioncfg::adapters::EnvVarAdapter;
/// use sectioncfg::service::ConstantRegistry;
/// use std::collections::HashMap;
///
/// let mut env = HashMap::new();
/// env.insert("S3_PUSH_TIMEOUT".to_string(), "900".to_string());
/// let registry = ConstantRegistry::new(Box::new(EnvVarAdapter::with_values(env)));
///
/// assert_eq!(registry.get_constant("S3_PUSH_TIMEOUT").unwrap().as_i64(), Some(900));
/// assert_eq!(registry.get_constant("TAR").unwrap().as_str(), Some("tar"));
/// assert!(registry.get_constant("NOPE").is_err());
/// ```
pub struct ConstantRegistry {
    constants: BTreeMap<&'static str, ConstantValue>,
    converters: HashMap<&'static str, EnvConverter>,
    env: Box<dyn EnvironmentSource>,
}

impl ConstantRegistry {
    /// Creates a registry with the built-in table, reading overrides from `env`.
    pub fn new(env: Box<dyn EnvironmentSource>) -> Self {
        Self {
            constants: builtin_constants(),
            converters: builtin_converters(),
            env,
        }
    }

    /// Creates a registry reading overrides from the process environment.
    pub fn from_process_env() -> Self {
        Self::new(Box::new(EnvVarAdapter::new()))
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static ConstantRegistry {
        &GLOBAL
    }

    /// Returns the value of a constant.
    ///
    /// # Errors
    ///
    /// Fails with a domain error if the name is neither overridden nor
    /// built-in, or if its override cannot be converted.
    pub fn get_constant(&self, name: &str) -> Result<ConstantValue> {
        if let Some(raw) = self.env.var(name) {
            tracing::debug!("Constant {} overridden from the environment", name);
            return match self.converters.get(name) {
                Some(converter) => converter.convert(name, &raw),
                None => Ok(ConstantValue::Str(raw)),
            };
        }

        self.constants
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::domain(format!("Undefined constant '{}'", name)))
    }

    /// Returns the names of the built-in constants, sorted.
    ///
    /// Names that exist only in the environment are not listed.
    pub fn get_defined_constants(&self) -> Vec<&'static str> {
        self.constants.keys().copied().collect()
    }

    /// Returns the converter registered for a constant, if any.
    pub fn converter(&self, name: &str) -> Option<EnvConverter> {
        self.converters.get(name).copied()
    }
}

impl fmt::Debug for ConstantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantRegistry")
            .field("constants", &self.constants.keys().collect::<Vec<_>>())
            .field("converters", &self.converters)
            .finish_non_exhaustive()
    }
}
