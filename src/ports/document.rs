// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsed document trait definition.
//!
//! A `SectionedDocument` is the immutable result of parsing a configuration file:
//! an ordered set of named sections plus one `DEFAULT` section whose entries act
//! as fallbacks for every other section.

use crate::ports::ParserError;
use std::fmt;

/// Name of the reserved fallback section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A parsed, read-only, sectioned key/value document.
///
/// Implementations must be `Send + Sync` so that a single document can be shared
/// between several independent cursors.
///
/// Lookups and interpolation follow the same precedence chain: the caller's
/// override pairs first, then the section itself, then `DEFAULT`.
pub trait SectionedDocument: fmt::Debug + Send + Sync {
    /// Returns the section names in document order, excluding `DEFAULT`.
    fn sections(&self) -> Vec<String>;

    /// Returns `true` if a section with exactly this name exists.
    ///
    /// `DEFAULT` is never reported as an existing section.
    fn has_section(&self, section: &str) -> bool;

    /// Reads one option from a section.
    ///
    /// When `raw` is `true` the stored text is returned untouched; otherwise
    /// `%(key)s` references are interpolated using `vars`, the section and
    /// `DEFAULT`, in that order.
    fn get(
        &self,
        section: &str,
        option: &str,
        raw: bool,
        vars: &[(String, String)],
    ) -> Result<String, ParserError>;

    /// Returns every `(key, value)` pair visible from a section, `DEFAULT`
    /// keys included.
    fn items(
        &self,
        section: &str,
        raw: bool,
        vars: &[(String, String)],
    ) -> Result<Vec<(String, String)>, ParserError>;
}
