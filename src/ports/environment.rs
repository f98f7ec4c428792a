// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment lookup trait definition.

/// A source of named environment values.
///
/// The constant registry consults an implementation of this trait to find
/// overrides for its built-in constants.
///
/// # Examples
///
/// ```rust
/// use sectioncfg::ports::EnvironmentSource;
///
/// struct Fixed;
///
/// impl EnvironmentSource for Fixed {
///     fn var(&self, name: &str) -> Option<String> {
///         (name == "GIT").then(|| "/opt/git/bin/git".to_string())
///     }
/// }
///
/// assert_eq!(Fixed.var("GIT").as_deref(), Some("/opt/git/bin/git"));
/// assert!(Fixed.var("TAR").is_none());
/// ```
pub trait EnvironmentSource: Send + Sync {
    /// Returns the value of the named variable, if it is set.
    fn var(&self, name: &str) -> Option<String>;
}
