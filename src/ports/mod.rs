// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! between the configuration core and its external collaborators: the document
//! parser, the parsed document itself, and the process environment. These traits
//! are implemented by adapters in the adapters layer.

pub mod document;
pub mod environment;
pub mod parser;

// Re-export commonly used types
pub use document::{SectionedDocument, DEFAULT_SECTION};
pub use environment::EnvironmentSource;
pub use parser::{ConfigParser, ParserError, ParserErrorKind};
