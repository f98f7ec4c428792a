// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable adapter.
//!
//! This module provides the adapter through which built-in constants are
//! overridden from the process environment.

use crate::ports::EnvironmentSource;
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Environment source backed by the process environment.
///
/// An optional prefix is prepended to every looked-up name, so that
/// `EnvVarAdapter::with_prefix("RELEASE_")` answers `GIT` from `RELEASE_GIT`.
///
/// # Examples
///
/// ```rust
/// use sectioncfg::adapters::EnvVarAdapter;
/// use sectioncfg::ports::EnvironmentSource;
///
/// // Read the process environment
/// let adapter = EnvVarAdapter::new();
/// assert!(adapter.var("SECTIONCFG_SURELY_UNSET_1234").is_none());
///
/// // Read variables with a specific prefix
/// let adapter = EnvVarAdapter::with_prefix("RELEASE_");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvVarAdapter {
    /// Optional prefix prepended to looked-up names
    prefix: Option<String>,
    /// Fixed values replacing the process environment
    values: Option<HashMap<String, String>>,
}

impl EnvVarAdapter {
    /// Creates an adapter over the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter over the process environment with a name prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            values: None,
        }
    }

    /// Creates an adapter with pre-populated values for testing.
    ///
    /// **Note**: This method is primarily intended for testing. The process
    /// environment is never consulted by the returned adapter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sectioncfg::adapters::EnvVarAdapter;
    /// use sectioncfg::ports::EnvironmentSource;
    /// use std::collections::HashMap;
    ///
    /// let mut values = HashMap::new();
    /// values.insert("GIT".to_string(), "/usr/local/bin/git".to_string());
    ///
    /// let adapter = EnvVarAdapter::with_values(values);
    /// assert_eq!(adapter.var("GIT").as_deref(), Some("/usr/local/bin/git"));
    /// ```
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            values: Some(values),
        }
    }

    fn full_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, name),
            None => name.to_string(),
        }
    }
}

impl EnvironmentSource for EnvVarAdapter {
    fn var(&self, name: &str) -> Option<String> {
        let name = self.full_name(name);

        let value = match &self.values {
            Some(values) => values.get(&name).cloned(),
            None => env::var(&name).ok(),
        }?;

        if value.len() > MAX_ENV_VALUE_LEN {
            tracing::warn!(
                "Ignoring oversized environment variable {}: value_len={} (max {})",
                name,
                value.len(),
                MAX_ENV_VALUE_LEN
            );
            return None;
        }

        Some(value)
    }
}
