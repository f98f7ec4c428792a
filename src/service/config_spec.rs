// SPDX-License-Identifier: MIT OR Apache-2.0

//! Section-scoped configuration accessor.
//!
//! This module provides [`ConfigSpec`], which keeps a mutable "current section"
//! cursor over an immutable parsed document and offers scoped, coerced value
//! retrieval on top of it.

use crate::adapters::IniDocument;
use crate::domain::coercion::{parse_bool, parse_float, parse_int, split_list};
use crate::domain::{
    CoercedValue, Coercion, ConfigError, ConfigSpecError, ConstantValue, ErrorKind, Interpolation,
    Result, SectionRole,
};
use crate::ports::{SectionedDocument, DEFAULT_SECTION};
use crate::service::ConstantRegistry;
use directories::ProjectDirs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Section the cursor starts on when no other section is requested.
pub const DEFAULT_STARTING_SECTION: &str = DEFAULT_SECTION;

/// A cursor over a sectioned configuration document.
///
/// Unscoped reads such as [`ConfigSpec::get`] resolve against the current
/// section. The cursor is always either `DEFAULT` or the name of a section that
/// exists in the document; a failed move leaves it untouched.
///
/// The parsed document is shared through an `Arc`, so [`ConfigSpec::cursor`]
/// hands out independent cursors over the same document without re-reading it.
///
/// # Examples
///
/// ```rust,no_run
/// use sectioncfg::prelude::*;
///
/// # fn main() -> Result<()> {
/// let mut config = ConfigSpec::builder()
///     .file("release.ini")
///     .section("build")
///     .build()?;
///
/// let jobs = config.get_int("jobs")?;
/// let platforms = config.section_get("deliverable:installer", "platforms", Coercion::List, &Interpolation::default())?;
/// assert_eq!(config.get_section(), "build");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ConfigSpec {
    document: Arc<dyn SectionedDocument>,
    root_directory: PathBuf,
    current_section: String,
    default_section: String,
}

impl ConfigSpec {
    /// Loads a configuration file, starting on the `DEFAULT` section with the
    /// current working directory as root.
    ///
    /// # Errors
    ///
    /// Fails before parsing if `path` is not an existing regular file. A
    /// malformed file fails with `PARSE_ERROR`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().file(path.as_ref()).build()
    }

    /// Creates a builder for a `ConfigSpec`.
    pub fn builder() -> ConfigSpecBuilder {
        ConfigSpecBuilder::new()
    }

    /// Creates a cursor over an already parsed document.
    ///
    /// # Errors
    ///
    /// Fails if `section` is neither `DEFAULT` nor a section of the document.
    pub fn from_document(
        document: Arc<dyn SectionedDocument>,
        root_dir: impl Into<PathBuf>,
        section: &str,
    ) -> Result<Self> {
        let start = if section == DEFAULT_STARTING_SECTION {
            DEFAULT_STARTING_SECTION.to_string()
        } else {
            resolve_section(document.as_ref(), section).ok_or_else(|| {
                ConfigError::domain(format!("Invalid initial section '{}'", section))
            })?
        };

        Ok(Self {
            document,
            root_directory: root_dir.into(),
            current_section: start.clone(),
            default_section: start,
        })
    }

    /// Loads `file_name` from the OS-appropriate configuration directory of
    /// the application.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use sectioncfg::service::ConfigSpec;
    ///
    /// let config = ConfigSpec::from_default_location("release", "org.example", "release.ini").unwrap();
    /// ```
    pub fn from_default_location(app_name: &str, qualifier: &str, file_name: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            ConfigError::domain("Failed to determine project directories")
        })?;

        Self::new(proj_dirs.config_dir().join(file_name))
    }

    /// Returns a new cursor over the same document, positioned on this
    /// cursor's default section.
    pub fn cursor(&self) -> ConfigSpec {
        ConfigSpec {
            document: Arc::clone(&self.document),
            root_directory: self.root_directory.clone(),
            current_section: self.default_section.clone(),
            default_section: self.default_section.clone(),
        }
    }

    /// Looks up a built-in constant in the process-wide registry.
    pub fn get_constant(name: &str) -> Result<ConstantValue> {
        ConstantRegistry::global().get_constant(name)
    }

    /// Returns the names of the built-in constants.
    pub fn get_defined_constants() -> Vec<&'static str> {
        ConstantRegistry::global().get_defined_constants()
    }

    /// Returns the root directory supplied at construction.
    pub fn get_root_dir(&self) -> &Path {
        &self.root_directory
    }

    /// Returns the underlying parsed document.
    pub fn get_raw_config(&self) -> &Arc<dyn SectionedDocument> {
        &self.document
    }

    /// Returns the section names of the document, excluding `DEFAULT`.
    pub fn get_section_list(&self) -> Vec<String> {
        self.document.sections()
    }

    /// Returns the current section.
    pub fn get_section(&self) -> &str {
        &self.current_section
    }

    /// Returns the section the cursor started on.
    pub fn get_default_section(&self) -> &str {
        &self.default_section
    }

    /// Returns the keys visible from a section, `DEFAULT` keys included.
    ///
    /// Uses the current section when `section` is `None`.
    pub fn get_section_items(&self, section: Option<&str>) -> Result<Vec<String>> {
        let section = section.unwrap_or(&self.current_section);
        let items = self.document.items(section, true, &[])?;
        Ok(items.into_iter().map(|(key, _)| key).collect())
    }

    /// Returns the `(key, value)` pairs visible from a section, with values
    /// interpolated.
    ///
    /// Uses the current section when `section` is `None`.
    pub fn get_all(&self, section: Option<&str>) -> Result<Vec<(String, String)>> {
        let section = section.unwrap_or(&self.current_section);
        Ok(self.document.items(section, false, &[])?)
    }

    /// Returns the `(key, value)` pairs visible from a section, with values as
    /// written in the file.
    pub fn get_all_raw(&self, section: Option<&str>) -> Result<Vec<(String, String)>> {
        let section = section.unwrap_or(&self.current_section);
        Ok(self.document.items(section, true, &[])?)
    }

    /// Moves the cursor to `section`.
    ///
    /// Any case of `default` names the `DEFAULT` section unless the document
    /// has a section spelled exactly that way.
    ///
    /// # Errors
    ///
    /// Fails with `INVALID_SECTION` if the section does not exist. The cursor
    /// is left unchanged.
    pub fn set_section(&mut self, section: &str) -> Result<()> {
        if self.current_section == section {
            return Ok(());
        }

        let target = resolve_section(self.document.as_ref(), section).ok_or_else(|| {
            ConfigSpecError::with_kind(
                format!("Non-existent config spec section: {}", section),
                ErrorKind::InvalidSection,
            )
        })?;

        tracing::trace!("Section cursor moved from '{}' to '{}'", self.current_section, target);
        self.current_section = target;
        Ok(())
    }

    /// Moves the cursor to the section of a partner.
    ///
    /// # Errors
    ///
    /// Fails if no `partner:<partner>` section exists; the cursor is left unchanged.
    pub fn set_partner_section(&mut self, partner: &str) -> Result<()> {
        self.set_role_section(SectionRole::Partner, partner)
    }

    /// Moves the cursor to the section of a deliverable.
    ///
    /// # Errors
    ///
    /// Fails if no `deliverable:<id>` section exists; the cursor is left unchanged.
    pub fn set_deliverable_section(&mut self, deliverable: &str) -> Result<()> {
        self.set_role_section(SectionRole::Deliverable, deliverable)
    }

    fn set_role_section(&mut self, role: SectionRole, id: &str) -> Result<()> {
        if !self.valid_role(role, id) {
            return Err(ConfigError::domain(format!("Invalid/unknown {}: {}", role, id)));
        }
        self.set_section(&role.section_name(id))
    }

    /// Returns `true` if a `partner:<partner>` section exists.
    pub fn valid_partner(&self, partner: &str) -> bool {
        self.valid_role(SectionRole::Partner, partner)
    }

    /// Returns `true` if a `deliverable:<deliverable>` section exists.
    pub fn valid_deliverable(&self, deliverable: &str) -> bool {
        self.valid_role(SectionRole::Deliverable, deliverable)
    }

    fn valid_role(&self, role: SectionRole, id: &str) -> bool {
        let name = role.section_name(id);
        self.get_section_list().iter().any(|s| *s == name)
    }

    /// Returns the partner sections, in document order.
    pub fn get_partner_sections(&self) -> Vec<String> {
        self.role_sections(SectionRole::Partner)
    }

    /// Returns the deliverable sections, in document order.
    pub fn get_deliverable_sections(&self) -> Vec<String> {
        self.role_sections(SectionRole::Deliverable)
    }

    fn role_sections(&self, role: SectionRole) -> Vec<String> {
        self.get_section_list()
            .into_iter()
            .filter(|s| role.strip(s).is_some())
            .collect()
    }

    fn lookup(&self, name: &str, interpolation: &Interpolation) -> Result<String> {
        let vars = interpolation.validated_pairs()?;
        Ok(self
            .document
            .get(&self.current_section, name, interpolation.is_raw(), vars)?)
    }

    /// Reads `name` from the current section and coerces it.
    ///
    /// Missing keys fall back to `DEFAULT`. References of the form `%(key)s`
    /// are resolved from the interpolation overrides, then the section, then
    /// `DEFAULT`, unless `interpolation` is [`Interpolation::Raw`].
    ///
    /// # Errors
    ///
    /// Override pairs with an empty key fail with `COERCION_TYPE_ERROR` before
    /// the lookup. Lookup failures are reported with their translated kind, and
    /// text that does not fit `coercion` fails with `COERCION_TYPE_ERROR`.
    pub fn get(
        &self,
        name: &str,
        coercion: Coercion,
        interpolation: &Interpolation,
    ) -> Result<CoercedValue> {
        let value = self.lookup(name, interpolation)?;
        coercion.apply(name, &value)
    }

    /// Like [`ConfigSpec::get`], but returns `Ok(None)` for a missing key.
    pub fn get_opt(
        &self,
        name: &str,
        coercion: Coercion,
        interpolation: &Interpolation,
    ) -> Result<Option<CoercedValue>> {
        missing_as_none(self.get(name, coercion, interpolation))
    }

    /// Reads an interpolated string from the current section.
    pub fn get_str(&self, name: &str) -> Result<String> {
        self.lookup(name, &Interpolation::default())
    }

    /// Reads a boolean from the current section.
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        parse_bool(name, &self.get_str(name)?)
    }

    /// Reads an integer from the current section.
    pub fn get_int(&self, name: &str) -> Result<i64> {
        parse_int(name, &self.get_str(name)?)
    }

    /// Reads a float from the current section.
    pub fn get_float(&self, name: &str) -> Result<f64> {
        parse_float(name, &self.get_str(name)?)
    }

    /// Reads a whitespace-separated list from the current section.
    pub fn get_list(&self, name: &str) -> Result<Vec<String>> {
        Ok(split_list(&self.get_str(name)?))
    }

    /// Temporarily moves the cursor to `section`.
    ///
    /// The returned guard dereferences to this `ConfigSpec`; dropping it puts
    /// the cursor back where it was, on every exit path.
    ///
    /// # Errors
    ///
    /// Fails with `INVALID_SECTION` if the section does not exist.
    pub fn scoped_section(&mut self, section: &str) -> Result<SectionScope<'_>> {
        let saved = self.current_section.clone();
        self.set_section(section)?;
        Ok(SectionScope { spec: self, saved })
    }

    /// Reads `name` from `section` without moving the cursor.
    pub fn section_get(
        &mut self,
        section: &str,
        name: &str,
        coercion: Coercion,
        interpolation: &Interpolation,
    ) -> Result<CoercedValue> {
        let scope = self.scoped_section(section)?;
        scope.get(name, coercion, interpolation)
    }

    /// Like [`ConfigSpec::section_get`], but returns `Ok(None)` for a missing key.
    pub fn section_get_opt(
        &mut self,
        section: &str,
        name: &str,
        coercion: Coercion,
        interpolation: &Interpolation,
    ) -> Result<Option<CoercedValue>> {
        missing_as_none(self.section_get(section, name, coercion, interpolation))
    }

    /// Reads `name` from the section of `partner` without moving the cursor.
    pub fn partner_get(
        &mut self,
        partner: &str,
        name: &str,
        coercion: Coercion,
        interpolation: &Interpolation,
    ) -> Result<CoercedValue> {
        let section = SectionRole::Partner.section_name(partner);
        self.section_get(&section, name, coercion, interpolation)
    }

    /// Reads `name` from the section of `deliverable` without moving the cursor.
    pub fn deliverable_get(
        &mut self,
        deliverable: &str,
        name: &str,
        coercion: Coercion,
        interpolation: &Interpolation,
    ) -> Result<CoercedValue> {
        let section = SectionRole::Deliverable.section_name(deliverable);
        self.section_get(&section, name, coercion, interpolation)
    }
}

fn resolve_section(document: &dyn SectionedDocument, section: &str) -> Option<String> {
    if document.has_section(section) {
        Some(section.to_string())
    } else if section.eq_ignore_ascii_case(DEFAULT_SECTION) {
        Some(DEFAULT_SECTION.to_string())
    } else {
        None
    }
}

fn missing_as_none(result: Result<CoercedValue>) -> Result<Option<CoercedValue>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_kind(ErrorKind::NoOptionError) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Guard returned by [`ConfigSpec::scoped_section`].
///
/// Restores the cursor it was created from when dropped.
#[derive(Debug)]
pub struct SectionScope<'a> {
    spec: &'a mut ConfigSpec,
    saved: String,
}

impl Deref for SectionScope<'_> {
    type Target = ConfigSpec;

    fn deref(&self) -> &ConfigSpec {
        self.spec
    }
}

impl DerefMut for SectionScope<'_> {
    fn deref_mut(&mut self) -> &mut ConfigSpec {
        self.spec
    }
}

impl Drop for SectionScope<'_> {
    fn drop(&mut self) {
        if self.spec.current_section != self.saved {
            tracing::trace!(
                "Restoring section cursor from '{}' to '{}'",
                self.spec.current_section,
                self.saved
            );
            self.spec.current_section = std::mem::take(&mut self.saved);
        }
    }
}

/// Builder for constructing a [`ConfigSpec`] from a file.
///
/// # Examples
///
/// ```rust,no_run
/// use sectioncfg::service::ConfigSpecBuilder;
///
/// # fn main() -> sectioncfg::domain::Result<()> {
/// let config = ConfigSpecBuilder::new()
///     .file("/etc/release/release.ini")
///     .root_dir("/builds")
///     .section("partner:acme")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigSpecBuilder {
    file: Option<PathBuf>,
    root_dir: Option<PathBuf>,
    section: Option<String>,
}

impl ConfigSpecBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration file to load.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Sets the root directory; defaults to the current working directory.
    pub fn root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    /// Sets the starting section; defaults to `DEFAULT`.
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Loads the file and builds the `ConfigSpec`.
    ///
    /// # Errors
    ///
    /// Fails with a generic domain error if no file was given or it is not a
    /// regular file; this check happens before any parsing. A malformed file
    /// fails with `PARSE_ERROR`, and an unknown starting section fails with a
    /// generic domain error.
    pub fn build(self) -> Result<ConfigSpec> {
        let file = self
            .file
            .ok_or_else(|| ConfigError::domain("No config file specified."))?;

        if !file.is_file() {
            return Err(ConfigError::domain(format!(
                "Invalid config file specified: {}",
                file.display()
            )));
        }

        let root_dir = match self.root_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        let document = IniDocument::from_file(&file)?;
        let section = self.section.as_deref().unwrap_or(DEFAULT_STARTING_SECTION);

        tracing::debug!(
            "Opened config spec {:?} at section '{}' (root {:?})",
            file,
            section,
            root_dir
        );

        ConfigSpec::from_document(Arc::new(document), root_dir, section)
    }
}
