// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI file document adapter.
//!
//! This module provides the parser for sectioned `key = value` files and the
//! parsed [`IniDocument`], which resolves options through the `DEFAULT` section
//! and expands `%(key)s` references.

use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigParser, ParserError, ParserErrorKind, SectionedDocument, DEFAULT_SECTION};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for configuration files (10MB)
const MAX_INI_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum nesting of `%(key)s` references inside one value.
const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Pseudo-option that interpolates to the name of the section being read.
const SECTION_NAME_OPTION: &str = "__name__";

type ParseResult<T> = std::result::Result<T, ParserError>;

/// Options of one section, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Options(Vec<(String, String)>);

impl Options {
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Inserts a value, replacing an existing one in place.
    fn insert(&mut self, key: String, value: String) {
        match self.get_mut(&key) {
            Some(existing) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parser for INI-style documents.
///
/// # Format
///
/// ```ini
/// [DEFAULT]
/// product = firefox
///
/// [build]
/// ; full-line comment
/// name = %(product)s-nightly   ; inline comment
/// platforms = linux
///     mac
/// ```
///
/// Section names are case-sensitive; option names are lower-cased. Lines that
/// start with whitespace continue the previous option's value.
///
/// # Examples
///
/// ```rust
/// use sectioncfg::adapters::IniParser;
/// use sectioncfg::ports::{ConfigParser, SectionedDocument};
///
/// let parser = IniParser::new();
/// let doc = parser.parse("[DEFAULT]\nproduct = firefox\n[build]\nname = %(product)s-nightly\n").unwrap();
/// assert_eq!(doc.get("build", "name", false, &[]).unwrap(), "firefox-nightly");
/// ```
#[derive(Debug, Clone)]
pub struct IniParser;

impl IniParser {
    /// Creates a new INI parser.
    pub fn new() -> Self {
        IniParser
    }

    /// Returns the section name if `line` is a section header.
    fn section_header(line: &str) -> Option<&str> {
        let rest = line.strip_prefix('[')?;
        let end = rest.find(']')?;
        (end > 0).then(|| &rest[..end])
    }

    /// Splits an option line into its lower-cased name and cleaned value.
    fn option_line(line: &str) -> Option<(String, String)> {
        let first = line.chars().next()?;
        if first == ':' || first == '=' || first.is_whitespace() {
            return None;
        }

        let pos = line.find([':', '='])?;
        let name = line[..pos].trim_end().to_lowercase();
        let mut value = line[pos + 1..].trim_start();

        if let Some(semi) = value.find(';') {
            if value[..semi].ends_with(char::is_whitespace) {
                value = &value[..semi];
            }
        }

        let value = value.trim();
        let value = if value == "\"\"" { "" } else { value };
        Some((name, value.to_string()))
    }

    fn is_comment(line: &str) -> bool {
        if line.trim().is_empty() || line.starts_with('#') || line.starts_with(';') {
            return true;
        }
        let first_word = line.split_whitespace().next().unwrap_or_default();
        first_word.eq_ignore_ascii_case("rem") && line.starts_with(['r', 'R'])
    }
}

impl Default for IniParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Where option lines are currently being written.
#[derive(Clone, Copy)]
enum Cursor {
    Defaults,
    Section(usize),
}

impl ConfigParser for IniParser {
    type Document = IniDocument;

    fn parse(&self, content: &str) -> ParseResult<IniDocument> {
        let mut doc = IniDocument::default();
        let mut cursor: Option<Cursor> = None;
        let mut open_option: Option<String> = None;
        let mut bad_lines = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let lineno = index + 1;

            if Self::is_comment(line) {
                continue;
            }

            if line.starts_with(char::is_whitespace) {
                if let (Some(cursor), Some(option)) = (cursor, open_option.as_deref()) {
                    let more = line.trim();
                    if !more.is_empty() {
                        if let Some(value) = doc.options_mut(cursor).get_mut(option) {
                            value.push('\n');
                            value.push_str(more);
                        }
                    }
                    continue;
                }
            }

            if let Some(name) = Self::section_header(line) {
                cursor = Some(if name == DEFAULT_SECTION {
                    Cursor::Defaults
                } else {
                    Cursor::Section(doc.section_index_or_insert(name))
                });
                open_option = None;
                continue;
            }

            let Some(current) = cursor else {
                return Err(ParserError::new(
                    ParserErrorKind::MissingSectionHeader,
                    format!("File contains no section headers.\nline {}: {:?}", lineno, line),
                ));
            };

            match Self::option_line(line) {
                Some((name, value)) => {
                    doc.options_mut(current).insert(name.clone(), value);
                    open_option = Some(name);
                }
                None => bad_lines.push(format!("\n\t[line {:2}]: {:?}", lineno, line)),
            }
        }

        if !bad_lines.is_empty() {
            return Err(ParserError::new(
                ParserErrorKind::Parsing,
                format!("File contains parsing errors:{}", bad_lines.concat()),
            ));
        }

        tracing::trace!(
            "Parsed INI document: {} sections, {} default options",
            doc.sections.len(),
            doc.defaults.0.len()
        );

        Ok(doc)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["ini", "cfg", "conf"]
    }
}

/// Returns `true` if the extension of `path` is one `parser` accepts, ignoring case.
fn has_supported_extension<P: ConfigParser>(parser: &P, path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            parser
                .supported_extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Lookup chain used for option resolution and interpolation.
struct Chain<'a> {
    vars: &'a [(String, String)],
    section: Option<(&'a str, &'a Options)>,
    defaults: &'a Options,
}

impl<'a> Chain<'a> {
    fn lookup(&self, key: &str) -> Option<&'a str> {
        if let Some((_, v)) = self
            .vars
            .iter()
            .rev()
            .find(|(k, _)| k.to_lowercase() == key)
        {
            return Some(v.as_str());
        }
        if let Some((name, options)) = self.section {
            if key == SECTION_NAME_OPTION {
                return Some(name);
            }
            if let Some(v) = options.get(key) {
                return Some(v);
            }
        }
        self.defaults.get(key)
    }

    fn section_label(&self) -> &'a str {
        self.section.map(|(name, _)| name).unwrap_or(DEFAULT_SECTION)
    }

    fn interpolate(&self, option: &str, raw: &str) -> ParseResult<String> {
        let mut accum = String::with_capacity(raw.len());
        self.interpolate_some(option, &mut accum, raw, 1)?;
        Ok(accum)
    }

    fn interpolate_some(
        &self,
        option: &str,
        accum: &mut String,
        mut rest: &str,
        depth: usize,
    ) -> ParseResult<()> {
        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(ParserError::new(
                ParserErrorKind::InterpolationDepth,
                format!(
                    "Value interpolation too deeply recursive: section [{}], option '{}', rawval {:?}",
                    self.section_label(),
                    option,
                    rest
                ),
            ));
        }

        while !rest.is_empty() {
            let Some(p) = rest.find('%') else {
                accum.push_str(rest);
                return Ok(());
            };
            accum.push_str(&rest[..p]);
            rest = &rest[p..];

            match rest[1..].chars().next() {
                Some('%') => {
                    accum.push('%');
                    rest = &rest[2..];
                }
                Some('(') => {
                    let end = rest[2..]
                        .find(')')
                        .filter(|&end| end > 0 && rest[2 + end + 1..].starts_with('s'))
                        .ok_or_else(|| {
                            ParserError::new(
                                ParserErrorKind::InterpolationSyntax,
                                format!("bad interpolation variable reference {:?}", rest),
                            )
                        })?;
                    let var = rest[2..2 + end].to_lowercase();
                    rest = &rest[2 + end + 2..];

                    let value = self.lookup(&var).ok_or_else(|| {
                        ParserError::new(
                            ParserErrorKind::InterpolationMissingOption,
                            format!(
                                "Bad value substitution: section [{}], option '{}', key '{}'",
                                self.section_label(),
                                option,
                                var
                            ),
                        )
                    })?;

                    if value.contains('%') {
                        self.interpolate_some(option, accum, value, depth + 1)?;
                    } else {
                        accum.push_str(value);
                    }
                }
                _ => {
                    return Err(ParserError::new(
                        ParserErrorKind::InterpolationSyntax,
                        format!("'%' must be followed by '%' or '(', found: {:?}", rest),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// A parsed INI document.
///
/// The document is immutable once parsed. Wrap it in an `Arc` to share it
/// between several cursors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: Options,
    sections: Vec<(String, Options)>,
    file_path: Option<PathBuf>,
}

impl IniDocument {
    /// Reads and parses a document from disk.
    ///
    /// # Errors
    ///
    /// I/O failures are returned as [`ConfigError::IoError`]; malformed content
    /// is returned as a `PARSE_ERROR`. Bytes that are not valid UTF-8 are
    /// replaced with U+FFFD rather than rejected.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let parser = IniParser::new();

        if !has_supported_extension(&parser, path) {
            tracing::warn!(
                "Configuration file {:?} does not have a recognized extension ({:?}); reading it as INI",
                path,
                parser.supported_extensions()
            );
        }

        let metadata = fs::metadata(path)?;
        if metadata.len() > MAX_INI_FILE_SIZE {
            return Err(ConfigError::domain(format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_INI_FILE_SIZE
            )));
        }

        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let mut doc = parser.parse(&content)?;
        doc.file_path = Some(path.to_path_buf());

        tracing::debug!(
            "Loaded configuration file {:?} ({} sections)",
            path,
            doc.sections.len()
        );

        Ok(doc)
    }

    /// Returns the path the document was read from, if it came from a file.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn section(&self, name: &str) -> Option<&Options> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, options)| options)
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.sections.push((name.to_string(), Options::default()));
                self.sections.len() - 1
            }
        }
    }

    fn options_mut(&mut self, cursor: Cursor) -> &mut Options {
        match cursor {
            Cursor::Defaults => &mut self.defaults,
            Cursor::Section(index) => &mut self.sections[index].1,
        }
    }

    fn chain<'a>(&'a self, section: &'a str, vars: &'a [(String, String)]) -> ParseResult<Chain<'a>> {
        let section = if section == DEFAULT_SECTION {
            None
        } else {
            let options = self.section(section).ok_or_else(|| {
                ParserError::new(ParserErrorKind::NoSection, format!("No section: {:?}", section))
            })?;
            Some((section, options))
        };

        Ok(Chain {
            vars,
            section,
            defaults: &self.defaults,
        })
    }
}

impl SectionedDocument for IniDocument {
    fn sections(&self) -> Vec<String> {
        self.sections.iter().map(|(name, _)| name.clone()).collect()
    }

    fn has_section(&self, section: &str) -> bool {
        self.section(section).is_some()
    }

    fn get(
        &self,
        section: &str,
        option: &str,
        raw: bool,
        vars: &[(String, String)],
    ) -> ParseResult<String> {
        let chain = self.chain(section, vars)?;
        let option = option.to_lowercase();

        let value = chain.lookup(&option).ok_or_else(|| {
            ParserError::new(
                ParserErrorKind::NoOption,
                format!("No option {:?} in section: {:?}", option, section),
            )
        })?;

        if raw {
            Ok(value.to_string())
        } else {
            chain.interpolate(&option, value)
        }
    }

    fn items(
        &self,
        section: &str,
        raw: bool,
        vars: &[(String, String)],
    ) -> ParseResult<Vec<(String, String)>> {
        let chain = self.chain(section, vars)?;

        let mut merged = self.defaults.clone();
        if let Some((_, options)) = chain.section {
            for (k, v) in options.iter() {
                merged.insert(k.to_string(), v.to_string());
            }
        }
        for (k, v) in vars {
            merged.insert(k.to_lowercase(), v.clone());
        }

        if raw {
            return Ok(merged.0);
        }

        merged
            .0
            .into_iter()
            .map(|(k, v)| {
                let value = chain.interpolate(&k, &v)?;
                Ok::<_, ParserError>((k, value))
            })
            .collect()
    }
}
