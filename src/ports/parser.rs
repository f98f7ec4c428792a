// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the raw text of a
//! sectioned configuration file into a [`SectionedDocument`], together with the
//! structured error type every parser reports its failures with.

use crate::ports::SectionedDocument;
use std::fmt;
use thiserror::Error;

/// The kind of failure reported by an underlying document parser.
///
/// These codes are what the domain layer classifies when it translates parser
/// failures into [`ConfigError`](crate::domain::ConfigError)s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParserErrorKind {
    /// The requested section does not exist.
    NoSection,
    /// The requested option does not exist in the section or in `DEFAULT`.
    NoOption,
    /// An interpolation reference names a key that cannot be found.
    InterpolationMissingOption,
    /// A value contains a malformed interpolation reference.
    InterpolationSyntax,
    /// Interpolation recursed deeper than the parser allows.
    InterpolationDepth,
    /// One or more lines of the document could not be parsed.
    Parsing,
    /// An option appeared before any section header.
    MissingSectionHeader,
}

impl fmt::Display for ParserErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParserErrorKind::NoSection => "NoSectionError",
            ParserErrorKind::NoOption => "NoOptionError",
            ParserErrorKind::InterpolationMissingOption => "InterpolationMissingOptionError",
            ParserErrorKind::InterpolationSyntax => "InterpolationSyntaxError",
            ParserErrorKind::InterpolationDepth => "InterpolationDepthError",
            ParserErrorKind::Parsing => "ParsingError",
            ParserErrorKind::MissingSectionHeader => "MissingSectionHeaderError",
        };
        f.write_str(name)
    }
}

/// An error raised by a document parser or by a query against a parsed document.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ParserError {
    kind: ParserErrorKind,
    message: String,
}

impl ParserError {
    /// Creates a new parser error of the given kind.
    pub fn new(kind: ParserErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the structured kind of this error.
    pub fn kind(&self) -> ParserErrorKind {
        self.kind
    }

    /// Returns the human readable message, without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A trait for parsing sectioned configuration files.
///
/// # Examples
///
/// ```rust
/// use sectioncfg::adapters::IniParser;
/// use sectioncfg::ports::{ConfigParser, SectionedDocument};
///
/// let parser = IniParser::new();
/// let document = parser.parse("[build]\nname = nightly\n").unwrap();
/// assert_eq!(document.sections(), vec!["build".to_string()]);
/// ```
pub trait ConfigParser {
    /// The document type produced by this parser.
    type Document: SectionedDocument + 'static;

    /// Parses configuration content into a document.
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError`] of kind [`ParserErrorKind::Parsing`] or
    /// [`ParserErrorKind::MissingSectionHeader`] when the content is malformed.
    fn parse(&self, content: &str) -> std::result::Result<Self::Document, ParserError>;

    /// Returns the file extensions supported by this parser.
    fn supported_extensions(&self) -> &[&str];
}
