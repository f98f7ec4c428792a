// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the error taxonomy, value coercion, the section naming
//! convention and the typed values of built-in constants. It is independent of
//! any concrete file format or environment.

pub mod coercion;
pub mod constant_value;
pub mod errors;
pub mod section_name;

// Re-export commonly used types
pub use coercion::{CoercedValue, Coercion, Interpolation};
pub use constant_value::{ConstantValue, EnvConverter};
pub use errors::{ConfigError, ConfigSpecError, ErrorKind, Result};
pub use section_name::{SectionRole, SECTION_DELIMITER};
