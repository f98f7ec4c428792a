// SPDX-License-Identifier: MIT OR Apache-2.0

//! A section-scoped configuration accessor for release automation.
//!
//! This crate reads INI-style configuration files made of named sections plus a
//! `DEFAULT` section whose keys every other section inherits. Values may refer
//! to other keys with `%(key)s` references, and callers can coerce them into
//! booleans, integers, floats or whitespace-separated lists.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and rules (`Coercion`, `ConstantValue`, the error taxonomy)
//! - **Ports**: Trait definitions that define interfaces (`SectionedDocument`, `ConfigParser`, `EnvironmentSource`)
//! - **Adapters**: The INI parser and the process environment source
//! - **Service**: `ConfigSpec`, the section cursor, and `ConstantRegistry`
//!
//! # Sections
//!
//! A [`ConfigSpec`](service::ConfigSpec) keeps a current section. Unscoped
//! reads resolve against it and fall back to `DEFAULT`; scoped reads move the
//! cursor for one lookup and always put it back. Sections named
//! `partner:<id>` and `deliverable:<id>` get dedicated helpers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sectioncfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let mut config = ConfigSpec::builder()
//!     .file("release.ini")
//!     .root_dir("/builds")
//!     .build()?;
//!
//! config.set_section("build")?;
//! let version = config.get_str("version")?;
//! let signed = config.partner_get("acme", "sign", Coercion::Bool, &Interpolation::default())?;
//!
//! let tar = ConfigSpec::get_constant("TAR")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every fallible operation returns [`domain::ConfigError`]. Failures carry an
//! [`ErrorKind`](domain::ErrorKind) such as `NO_OPTION_ERROR` when one
//! applies, so callers can match on the kind instead of the message.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{EnvVarAdapter, IniDocument, IniParser};
    pub use crate::domain::{
        CoercedValue, Coercion, ConfigError, ConfigSpecError, ConstantValue, ErrorKind,
        Interpolation, Result, SectionRole,
    };
    pub use crate::ports::{ConfigParser, EnvironmentSource, SectionedDocument};
    pub use crate::service::{ConfigSpec, ConfigSpecBuilder, ConstantRegistry};
}
