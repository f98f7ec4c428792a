// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration accessor and the constant registry.
//!
//! [`ConfigSpec`] is the main interface for reading a loaded configuration
//! file. [`ConstantRegistry`] answers built-in constants independently of any
//! file.

pub mod config_spec;
pub mod constants;

// Re-export commonly used types
pub use config_spec::{ConfigSpec, ConfigSpecBuilder, SectionScope, DEFAULT_STARTING_SECTION};
pub use constants::ConstantRegistry;
