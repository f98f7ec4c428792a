// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coercion of raw configuration strings into typed values.
//!
//! This module provides the closed [`Coercion`] enum naming the supported target
//! types, the [`CoercedValue`] it produces, and the [`Interpolation`] argument
//! controlling `%(key)s` substitution.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type a configuration value is coerced into.
///
/// # Examples
///
/// ```
/// use sectioncfg::domain::{CoercedValue, Coercion};
///
/// let value = Coercion::List.apply("answer", "a b  c").unwrap();
/// assert_eq!(value, CoercedValue::List(vec!["a".into(), "b".into(), "c".into()]));
///
/// let flag = Coercion::Bool.apply("answer", "Yes").unwrap();
/// assert_eq!(flag.as_bool(), Some(true));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Coercion {
    /// Return the string as-is.
    #[default]
    Str,
    /// `true`/`yes`/`on`/`1` or `false`/`no`/`off`/`0`, case-insensitive.
    Bool,
    /// A base-10 integer.
    Int,
    /// A decimal floating-point number.
    Float,
    /// Whitespace-separated words.
    List,
}

impl Coercion {
    /// Returns the token naming this coercion.
    pub fn as_str(&self) -> &'static str {
        match self {
            Coercion::Str => "str",
            Coercion::Bool => "bool",
            Coercion::Int => "int",
            Coercion::Float => "float",
            Coercion::List => "list",
        }
    }

    /// Converts `value`, read from option `name`, into this coercion's type.
    ///
    /// # Errors
    ///
    /// Returns a `COERCION_TYPE_ERROR` when the text is not valid for the target type.
    pub fn apply(&self, name: &str, value: &str) -> Result<CoercedValue> {
        match self {
            Coercion::Str => Ok(CoercedValue::Str(value.to_string())),
            Coercion::Bool => parse_bool(name, value).map(CoercedValue::Bool),
            Coercion::Int => parse_int(name, value).map(CoercedValue::Int),
            Coercion::Float => parse_float(name, value).map(CoercedValue::Float),
            Coercion::List => Ok(CoercedValue::List(split_list(value))),
        }
    }
}

pub(crate) fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::coercion(format!(
            "Value '{}' of option '{}' is not a boolean",
            value, name
        ))),
    }
}

pub(crate) fn parse_int(name: &str, value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|e| {
        ConfigError::coercion(format!(
            "Value '{}' of option '{}' is not an integer: {}",
            value, name, e
        ))
    })
}

pub(crate) fn parse_float(name: &str, value: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|e| {
        ConfigError::coercion(format!(
            "Value '{}' of option '{}' is not a float: {}",
            value, name, e
        ))
    })
}

pub(crate) fn split_list(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

impl FromStr for Coercion {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "str" | "string" => Ok(Coercion::Str),
            "bool" | "boolean" => Ok(Coercion::Bool),
            "int" | "integer" => Ok(Coercion::Int),
            "float" => Ok(Coercion::Float),
            "list" => Ok(Coercion::List),
            other => Err(ConfigError::coercion(format!(
                "Invalid coercion type specified: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration value after coercion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CoercedValue {
    /// An uncoerced string.
    Str(String),
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// An ordered list of words.
    List(Vec<String>),
}

impl CoercedValue {
    /// Returns the string, if this is a [`CoercedValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CoercedValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a [`CoercedValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CoercedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is a [`CoercedValue::Int`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CoercedValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float, if this is a [`CoercedValue::Float`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoercedValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the words, if this is a [`CoercedValue::List`].
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            CoercedValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Consumes the value and returns the string, if this is a [`CoercedValue::Str`].
    pub fn into_string(self) -> Option<String> {
        match self {
            CoercedValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Consumes the value and returns the words, if this is a [`CoercedValue::List`].
    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            CoercedValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for CoercedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercedValue::Str(s) => write!(f, "{}", s),
            CoercedValue::Bool(b) => write!(f, "{}", b),
            CoercedValue::Int(n) => write!(f, "{}", n),
            CoercedValue::Float(n) => write!(f, "{}", n),
            CoercedValue::List(items) => write!(f, "{}", items.join(" ")),
        }
    }
}

/// Controls `%(key)s` interpolation for a single lookup.
///
/// [`Interpolation::Raw`] disables substitution entirely. [`Interpolation::Overrides`]
/// enables it, with the given pairs taking precedence over the section and
/// `DEFAULT`; an empty list is the ordinary case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interpolation {
    /// Return the stored text without substitution.
    Raw,
    /// Interpolate, consulting these pairs before the document.
    Overrides(Vec<(String, String)>),
}

impl Default for Interpolation {
    fn default() -> Self {
        Interpolation::Overrides(Vec::new())
    }
}

impl Interpolation {
    /// Interpolation with override pairs, kept in the given order.
    pub fn overrides<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Interpolation::Overrides(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds override pairs from `key=value` assignments.
    ///
    /// # Errors
    ///
    /// Returns a `COERCION_TYPE_ERROR` if an assignment has no `=` or an empty key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sectioncfg::domain::Interpolation;
    ///
    /// let interp = Interpolation::from_assignments(["version=3.6", "build = 2"]).unwrap();
    /// assert_eq!(
    ///     interp,
    ///     Interpolation::overrides([("version", "3.6"), ("build", "2")])
    /// );
    /// assert!(Interpolation::from_assignments(["oops"]).is_err());
    /// ```
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pairs = Vec::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (key, value) = assignment
                .split_once('=')
                .filter(|(k, _)| !k.trim().is_empty())
                .ok_or_else(|| {
                    ConfigError::coercion(format!(
                        "Invalid interpolation override '{}'; must be of the form key=value.",
                        assignment
                    ))
                })?;
            pairs.push((key.trim().to_string(), value.trim().to_string()));
        }
        Ok(Interpolation::Overrides(pairs))
    }

    /// Returns `true` if substitution is disabled.
    pub fn is_raw(&self) -> bool {
        matches!(self, Interpolation::Raw)
    }

    /// Checks the override pairs and returns them, or an empty slice for
    /// [`Interpolation::Raw`].
    pub(crate) fn validated_pairs(&self) -> Result<&[(String, String)]> {
        match self {
            Interpolation::Raw => Ok(&[]),
            Interpolation::Overrides(pairs) => {
                if let Some((key, _)) = pairs.iter().find(|(k, _)| k.trim().is_empty()) {
                    return Err(ConfigError::coercion(format!(
                        "Invalid interpolation overrides specified; empty key '{}'.",
                        key
                    )));
                }
                Ok(pairs)
            }
        }
    }
}
