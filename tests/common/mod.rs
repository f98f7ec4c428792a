// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.

use sectioncfg::ports::{ParserError, ParserErrorKind, SectionedDocument};
use std::io::Write;
use tempfile::NamedTempFile;

/// A release configuration exercising inheritance, interpolation and the
/// partner/deliverable naming convention.
#[allow(dead_code)]
pub const RELEASE_INI: &str = r#"
# release configuration
[DEFAULT]
product = firefox
version = 3.6
root = /builds/%(product)s
jobs = 4

[build]
name = %(product)s-%(version)s
output = %(root)s/out
signed = Yes
platforms = win32 mac  linux
literal = 100%% done

[partner:acme]
name = acme-%(product)s
sign = off

[partner:globex]
name = globex

[deliverable:installer]
ext = exe
timeout = 1.5

[broken]
dangling = %(nowhere)s
syntax = %(product)
"#;

/// Writes `content` to a temporary `.ini` file that lives as long as the handle.
#[allow(dead_code)]
pub fn write_config(content: impl AsRef<[u8]>) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ini")
        .tempfile()
        .expect("create temp config");
    file.write_all(content.as_ref()).expect("write temp config");
    file.flush().expect("flush temp config");
    file
}

/// A document whose every lookup fails with the given parser error.
///
/// Used to observe how failures the crate has no kind for are reported.
#[derive(Debug)]
#[allow(dead_code)]
pub struct FailingDocument {
    pub sections: Vec<String>,
    pub kind: ParserErrorKind,
}

impl FailingDocument {
    #[allow(dead_code)]
    pub fn new(kind: ParserErrorKind) -> Self {
        Self {
            sections: vec!["build".to_string()],
            kind,
        }
    }

    fn error(&self) -> ParserError {
        ParserError::new(self.kind, "simulated failure")
    }
}

impl SectionedDocument for FailingDocument {
    fn sections(&self) -> Vec<String> {
        self.sections.clone()
    }

    fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s == section)
    }

    fn get(
        &self,
        _section: &str,
        _option: &str,
        _raw: bool,
        _vars: &[(String, String)],
    ) -> Result<String, ParserError> {
        Err(self.error())
    }

    fn items(
        &self,
        _section: &str,
        _raw: bool,
        _vars: &[(String, String)],
    ) -> Result<Vec<(String, String)>, ParserError> {
        Err(self.error())
    }
}
