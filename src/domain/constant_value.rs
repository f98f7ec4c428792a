// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed values of built-in constants and their environment converters.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The value of a built-in constant.
///
/// Constants are not restricted to strings; the static table holds executable
/// names, timeouts, platform lists and lookup maps side by side.
///
/// # Examples
///
/// ```
/// use sectioncfg::domain::ConstantValue;
///
/// let value = ConstantValue::from("git");
/// assert_eq!(value.as_str(), Some("git"));
/// assert_eq!(ConstantValue::Int(300).as_i64(), Some(300));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    /// A string, typically an executable name.
    Str(String),
    /// An integer, typically a timeout or a size.
    Int(i64),
    /// An ordered list of strings.
    List(Vec<String>),
    /// A string-to-string mapping.
    Map(BTreeMap<String, String>),
}

impl ConstantValue {
    /// Returns the string, if this is a [`ConstantValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstantValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer, if this is a [`ConstantValue::Int`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConstantValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the list, if this is a [`ConstantValue::List`].
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConstantValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping, if this is a [`ConstantValue::Map`].
    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ConstantValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for ConstantValue {
    fn from(s: &str) -> Self {
        ConstantValue::Str(s.to_string())
    }
}

impl From<String> for ConstantValue {
    fn from(s: String) -> Self {
        ConstantValue::Str(s)
    }
}

impl From<i64> for ConstantValue {
    fn from(n: i64) -> Self {
        ConstantValue::Int(n)
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Str(s) => write!(f, "{}", s),
            ConstantValue::Int(n) => write!(f, "{}", n),
            ConstantValue::List(items) => write!(f, "{}", items.join(" ")),
            ConstantValue::Map(map) => {
                let pairs: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                write!(f, "{}", pairs.join(" "))
            }
        }
    }
}

/// Converts an environment override string into a constant's value type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvConverter {
    /// Parse a base-10 integer.
    Int,
    /// Split on whitespace into a list.
    Words,
    /// No conversion exists yet for this constant; overriding it is an error.
    Unimplemented,
}

impl EnvConverter {
    /// Converts the override `raw` for constant `name`.
    ///
    /// # Errors
    ///
    /// An unparsable integer fails with `COERCION_TYPE_ERROR`. An
    /// [`EnvConverter::Unimplemented`] converter always fails.
    pub fn convert(&self, name: &str, raw: &str) -> Result<ConstantValue> {
        match self {
            EnvConverter::Int => raw.trim().parse::<i64>().map(ConstantValue::Int).map_err(|e| {
                ConfigError::coercion(format!(
                    "Environment override for constant '{}' is not an integer ('{}'): {}",
                    name, raw, e
                ))
            }),
            EnvConverter::Words => Ok(ConstantValue::List(
                raw.split_whitespace().map(str::to_string).collect(),
            )),
            EnvConverter::Unimplemented => Err(ConfigError::domain(format!(
                "Environment overrides of constant '{}' are not supported: no converter into its value type",
                name
            ))),
        }
    }
}
