// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the closed taxonomy of configuration error kinds, the
//! `ConfigSpecError` that carries one of them, and the single place where
//! failures from the underlying document parser are classified into that
//! taxonomy. All errors use `thiserror` for proper error handling and conversion.

use crate::ports::{ParserError, ParserErrorKind};
use std::fmt;
use thiserror::Error;

/// The closed set of configuration error kinds.
///
/// Each kind renders as a stable, upper-case tag such as `NO_SECTION_ERROR`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced section does not exist.
    NoSectionError,
    /// A referenced key does not exist in the resolved section, `DEFAULT` included.
    NoOptionError,
    /// An interpolation reference names a key absent from all fallback sources.
    InterpolationMissingOptionError,
    /// A raw value contains malformed interpolation syntax.
    InterpolationSyntaxError,
    /// An invalid coercion target or an invalid override argument.
    CoercionTypeError,
    /// The input document failed to parse.
    ParseError,
    /// An attempt to move the section cursor to a name that does not exist.
    InvalidSection,
}

impl ErrorKind {
    /// Returns the stable tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoSectionError => "NO_SECTION_ERROR",
            ErrorKind::NoOptionError => "NO_OPTION_ERROR",
            ErrorKind::InterpolationMissingOptionError => "INTERPOLATION_MISSING_OPTION_ERROR",
            ErrorKind::InterpolationSyntaxError => "INTERPOLATION_SYNTAX_ERROR",
            ErrorKind::CoercionTypeError => "COERCION_TYPE_ERROR",
            ErrorKind::ParseError => "PARSE_ERROR",
            ErrorKind::InvalidSection => "INVALID_SECTION",
        }
    }

    /// Classifies a parser error kind, returning `None` for kinds this crate
    /// does not translate.
    fn from_parser_kind(kind: ParserErrorKind) -> Option<Self> {
        match kind {
            ParserErrorKind::NoSection => Some(ErrorKind::NoSectionError),
            ParserErrorKind::NoOption => Some(ErrorKind::NoOptionError),
            ParserErrorKind::InterpolationMissingOption => {
                Some(ErrorKind::InterpolationMissingOptionError)
            }
            ParserErrorKind::InterpolationSyntax => Some(ErrorKind::InterpolationSyntaxError),
            ParserErrorKind::Parsing | ParserErrorKind::MissingSectionHeader => {
                Some(ErrorKind::ParseError)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration error tagged with at most one [`ErrorKind`].
///
/// Generic domain failures, such as an undefined constant or an unknown
/// partner, carry no kind. Errors translated from the document parser also
/// remember the parser's own error kind.
///
/// # Examples
///
/// ```
/// use sectioncfg::domain::{ConfigSpecError, ErrorKind};
///
/// let error = ConfigSpecError::with_kind("Non-existent config spec section: x", ErrorKind::InvalidSection);
/// assert_eq!(error.kind(), Some(ErrorKind::InvalidSection));
/// assert_eq!(error.to_string(), "ConfigSpec Error: Non-existent config spec section: x");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("ConfigSpec Error: {message}")]
pub struct ConfigSpecError {
    message: String,
    kind: Option<ErrorKind>,
    origin: Option<ParserErrorKind>,
}

impl ConfigSpecError {
    /// Creates an error without a dedicated kind.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: None,
            origin: None,
        }
    }

    /// Creates an error tagged with the given kind.
    pub fn with_kind(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind: Some(kind),
            origin: None,
        }
    }

    /// Returns the message without the `ConfigSpec Error:` prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the error kind, if this error has one.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.kind
    }

    /// Returns the parser error kind this error was translated from, if any.
    pub fn origin(&self) -> Option<ParserErrorKind> {
        self.origin
    }
}

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A classified configuration error.
    #[error(transparent)]
    Spec(#[from] ConfigSpecError),

    /// A parser failure with no mapping in [`ErrorKind`], passed through unmodified.
    #[error(transparent)]
    Parser(ParserError),

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns the domain error kind, if the error carries one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ConfigError::Spec(e) => e.kind(),
            _ => None,
        }
    }

    /// Returns `true` if the error carries the given kind.
    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Shorthand for a [`ErrorKind::CoercionTypeError`].
    pub(crate) fn coercion(message: impl Into<String>) -> Self {
        ConfigSpecError::with_kind(message, ErrorKind::CoercionTypeError).into()
    }

    /// Shorthand for an error without a dedicated kind.
    pub(crate) fn domain(message: impl Into<String>) -> Self {
        ConfigSpecError::new(message).into()
    }
}

impl From<ParserError> for ConfigError {
    fn from(err: ParserError) -> Self {
        match ErrorKind::from_parser_kind(err.kind()) {
            Some(kind) => ConfigError::Spec(ConfigSpecError {
                message: err.message().to_string(),
                kind: Some(kind),
                origin: Some(err.kind()),
            }),
            None => ConfigError::Parser(err),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
