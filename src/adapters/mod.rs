// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing concrete implementations of the ports.
//!
//! This module contains the INI document parser and the process environment
//! source used for constant overrides.

pub mod env_var;
pub mod ini_file;

pub use env_var::EnvVarAdapter;
pub use ini_file::{IniDocument, IniParser};
