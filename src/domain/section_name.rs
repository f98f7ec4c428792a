// SPDX-License-Identifier: MIT OR Apache-2.0

//! Naming convention for role-scoped sections.
//!
//! Sections named `<role>:<id>`, such as `partner:acme` or
//! `deliverable:installer`, are ordinary sections grouped by role.

use std::fmt;

/// Separator between a role prefix and an identifier.
pub const SECTION_DELIMITER: char = ':';

/// The reserved section roles.
///
/// # Examples
///
/// ```
/// use sectioncfg::domain::SectionRole;
///
/// assert_eq!(SectionRole::Partner.section_name("acme"), "partner:acme");
/// assert_eq!(
///     SectionRole::parse_section_name("deliverable:installer"),
///     Some((SectionRole::Deliverable, "installer"))
/// );
/// assert_eq!(SectionRole::parse_section_name("build"), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionRole {
    /// `partner:<id>` sections.
    Partner,
    /// `deliverable:<id>` sections.
    Deliverable,
}

impl SectionRole {
    /// Returns the role prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            SectionRole::Partner => "partner",
            SectionRole::Deliverable => "deliverable",
        }
    }

    /// Builds the section name for an identifier in this role.
    pub fn section_name(&self, id: &str) -> String {
        format!("{}{}{}", self.prefix(), SECTION_DELIMITER, id)
    }

    /// Returns the identifier if `section` belongs to this role.
    pub fn strip<'a>(&self, section: &'a str) -> Option<&'a str> {
        section
            .strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_prefix(SECTION_DELIMITER))
    }

    /// Splits a conventional section name into its role and identifier.
    pub fn parse_section_name(section: &str) -> Option<(SectionRole, &str)> {
        [SectionRole::Partner, SectionRole::Deliverable]
            .into_iter()
            .find_map(|role| role.strip(section).map(|id| (role, id)))
    }
}

impl fmt::Display for SectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
