// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for loading configuration files and reading through the
//! section cursor.

mod common;

use common::{write_config, FailingDocument, RELEASE_INI};
use sectioncfg::domain::{CoercedValue, Coercion, ConfigError, ErrorKind, Interpolation};
use sectioncfg::ports::ParserErrorKind;
use sectioncfg::service::{ConfigSpec, ConfigSpecBuilder};
use std::path::Path;
use std::sync::Arc;

fn load() -> (tempfile::NamedTempFile, ConfigSpec) {
    let file = write_config(RELEASE_INI);
    let config = ConfigSpec::builder()
        .file(file.path())
        .root_dir("/builds")
        .build()
        .unwrap();
    (file, config)
}

#[test]
fn test_load_from_file() {
    let (file, config) = load();
    assert_eq!(config.get_section(), "DEFAULT");
    assert_eq!(config.get_default_section(), "DEFAULT");
    assert_eq!(config.get_root_dir(), Path::new("/builds"));
    assert_eq!(
        config.get_section_list(),
        vec![
            "build",
            "partner:acme",
            "partner:globex",
            "deliverable:installer",
            "broken"
        ]
    );
    drop(file);
}

#[test]
fn test_new_uses_current_dir_as_root() {
    let file = write_config(RELEASE_INI);
    let config = ConfigSpec::new(file.path()).unwrap();
    assert_eq!(config.get_root_dir(), std::env::current_dir().unwrap());
}

#[test]
fn test_start_section() {
    let file = write_config(RELEASE_INI);
    let config = ConfigSpecBuilder::new()
        .file(file.path())
        .section("partner:acme")
        .build()
        .unwrap();
    assert_eq!(config.get_section(), "partner:acme");
    assert_eq!(config.get_default_section(), "partner:acme");
    assert_eq!(config.get_str("name").unwrap(), "acme-firefox");
}

#[test]
fn test_invalid_start_section() {
    let file = write_config(RELEASE_INI);
    let err = ConfigSpec::builder()
        .file(file.path())
        .section("release")
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), None);
    assert!(err.to_string().contains("release"));
}

#[test]
fn test_missing_file_fails_before_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.ini");

    let err = ConfigSpec::new(&missing).unwrap_err();
    assert_eq!(err.kind(), None);
    assert!(matches!(err, ConfigError::Spec(_)));

    // A directory is not a config file either
    let err = ConfigSpec::new(dir.path()).unwrap_err();
    assert_eq!(err.kind(), None);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = write_config("[build]\nthis line has no separator\n");
    let err = ConfigSpec::new(file.path()).unwrap_err();
    assert!(err.is_kind(ErrorKind::ParseError));

    let file = write_config("orphan = value\n[build]\n");
    let err = ConfigSpec::new(file.path()).unwrap_err();
    assert!(err.is_kind(ErrorKind::ParseError));
}

#[test]
fn test_non_utf8_file_loads() {
    let file = write_config(b"[build]\nname = caf\xe9\njobs = 2\n");
    let mut config = ConfigSpec::new(file.path()).unwrap();

    config.set_section("build").unwrap();
    assert_eq!(config.get_str("name").unwrap(), "caf\u{FFFD}");
    assert_eq!(config.get_int("jobs").unwrap(), 2);
}

#[test]
fn test_non_utf8_malformed_file_is_parse_error() {
    let file = write_config(b"[build]\ncaf\xe9 without separator\n");
    let err = ConfigSpec::new(file.path()).unwrap_err();
    assert!(err.is_kind(ErrorKind::ParseError));
}

#[test]
fn test_default_fallback_from_every_section() {
    let (_file, mut config) = load();
    for section in config.get_section_list() {
        config.set_section(&section).unwrap();
        assert_eq!(config.get_str("version").unwrap(), "3.6", "section {}", section);
        assert_eq!(config.get_int("jobs").unwrap(), 4, "section {}", section);
    }
}

#[test]
fn test_interpolation_chain() {
    let (_file, mut config) = load();
    config.set_section("build").unwrap();

    assert_eq!(config.get_str("name").unwrap(), "firefox-3.6");
    assert_eq!(config.get_str("output").unwrap(), "/builds/firefox/out");
    assert_eq!(config.get_str("literal").unwrap(), "100% done");

    let interp = Interpolation::overrides([("version", "4.0"), ("product", "seamonkey")]);
    let name = config.get("name", Coercion::Str, &interp).unwrap();
    assert_eq!(name.as_str(), Some("seamonkey-4.0"));

    let output = config.get("output", Coercion::Str, &interp).unwrap();
    assert_eq!(output.as_str(), Some("/builds/seamonkey/out"));
}

#[test]
fn test_raw_returns_literal_text() {
    let (_file, mut config) = load();
    config.set_section("build").unwrap();

    let value = config.get("name", Coercion::Str, &Interpolation::Raw).unwrap();
    assert_eq!(value.as_str(), Some("%(product)s-%(version)s"));

    let value = config.get("literal", Coercion::Str, &Interpolation::Raw).unwrap();
    assert_eq!(value.as_str(), Some("100%% done"));
}

#[test]
fn test_coercions() {
    let (_file, mut config) = load();
    config.set_section("build").unwrap();

    assert!(config.get_bool("signed").unwrap());
    assert_eq!(
        config.get_list("platforms").unwrap(),
        vec!["win32", "mac", "linux"]
    );
    assert_eq!(
        config
            .get("platforms", Coercion::List, &Interpolation::default())
            .unwrap(),
        CoercedValue::List(vec!["win32".into(), "mac".into(), "linux".into()])
    );

    let err = config.get_int("name").unwrap_err();
    assert!(err.is_kind(ErrorKind::CoercionTypeError));

    let err = config.get_bool("platforms").unwrap_err();
    assert!(err.is_kind(ErrorKind::CoercionTypeError));

    let timeout = config
        .deliverable_get("installer", "timeout", Coercion::Float, &Interpolation::default())
        .unwrap();
    assert_eq!(timeout.as_f64(), Some(1.5));
}

#[test]
fn test_interpolation_errors() {
    let (_file, mut config) = load();
    config.set_section("broken").unwrap();

    let err = config.get_str("dangling").unwrap_err();
    assert!(err.is_kind(ErrorKind::InterpolationMissingOptionError));

    let err = config.get_str("syntax").unwrap_err();
    assert!(err.is_kind(ErrorKind::InterpolationSyntaxError));

    // Raw reads never interpolate, so they cannot fail this way
    let value = config.get("dangling", Coercion::Str, &Interpolation::Raw).unwrap();
    assert_eq!(value.as_str(), Some("%(nowhere)s"));

    let err = config.get_all(None).unwrap_err();
    assert!(err.is_kind(ErrorKind::InterpolationMissingOptionError));
    assert!(config.get_section_items(None).is_ok());
}

#[test]
fn test_no_option_error() {
    let (_file, mut config) = load();
    config.set_section("partner:globex").unwrap();

    let err = config.get_str("sign").unwrap_err();
    assert!(err.is_kind(ErrorKind::NoOptionError));
    assert!(err.to_string().starts_with("ConfigSpec Error:"));
}

#[test]
fn test_section_get_restores_cursor_on_every_path() {
    let (_file, mut config) = load();
    config.set_section("build").unwrap();
    let none = Interpolation::default();

    let ok = config.section_get("partner:acme", "sign", Coercion::Bool, &none);
    assert_eq!(ok.unwrap(), CoercedValue::Bool(false));
    assert_eq!(config.get_section(), "build");

    let missing = config.section_get("partner:acme", "nothing", Coercion::Str, &none);
    assert!(missing.unwrap_err().is_kind(ErrorKind::NoOptionError));
    assert_eq!(config.get_section(), "build");

    let coercion = config.section_get("partner:acme", "name", Coercion::Int, &none);
    assert!(coercion.unwrap_err().is_kind(ErrorKind::CoercionTypeError));
    assert_eq!(config.get_section(), "build");

    let invalid = config.partner_get("initech", "name", Coercion::Str, &none);
    assert!(invalid.unwrap_err().is_kind(ErrorKind::InvalidSection));
    assert_eq!(config.get_section(), "build");

    let opt = config
        .section_get_opt("partner:globex", "sign", Coercion::Bool, &none)
        .unwrap();
    assert_eq!(opt, None);
    assert_eq!(config.get_section(), "build");
}

#[test]
fn test_partner_helpers() {
    let (_file, mut config) = load();

    assert!(config.valid_partner("acme"));
    assert!(config.valid_partner("globex"));
    assert!(!config.valid_partner("Acme"));
    assert!(!config.valid_partner("installer"));
    assert_eq!(
        config.get_partner_sections(),
        vec!["partner:acme", "partner:globex"]
    );

    config.set_section("build").unwrap();
    let err = config.set_partner_section("initech").unwrap_err();
    assert_eq!(err.kind(), None);
    assert!(err.to_string().contains("initech"));
    assert_eq!(config.get_section(), "build");

    config.set_partner_section("globex").unwrap();
    assert_eq!(config.get_section(), "partner:globex");
    assert_eq!(config.get_str("name").unwrap(), "globex");
}

#[test]
fn test_section_enumeration() {
    let (_file, config) = load();

    assert_eq!(
        config.get_section_items(Some("partner:acme")).unwrap(),
        vec!["product", "version", "root", "jobs", "name", "sign"]
    );
    assert_eq!(
        config.get_section_items(None).unwrap(),
        vec!["product", "version", "root", "jobs"]
    );

    let all = config.get_all(Some("build")).unwrap();
    assert!(all.contains(&("root".to_string(), "/builds/firefox".to_string())));

    let raw = config.get_all_raw(Some("build")).unwrap();
    assert!(raw.contains(&("root".to_string(), "/builds/%(product)s".to_string())));

    let err = config.get_section_items(Some("missing")).unwrap_err();
    assert!(err.is_kind(ErrorKind::NoSectionError));
}

#[test]
fn test_unmapped_parser_errors_pass_through() {
    let doc = Arc::new(FailingDocument::new(ParserErrorKind::InterpolationDepth));
    let config = ConfigSpec::from_document(doc, "/", "build").unwrap();

    let err = config.get_str("anything").unwrap_err();
    assert_eq!(err.kind(), None);
    match err {
        ConfigError::Parser(e) => assert_eq!(e.kind(), ParserErrorKind::InterpolationDepth),
        other => panic!("expected a pass-through parser error, got {:?}", other),
    }
}

#[test]
fn test_mapped_parser_errors_are_translated() {
    let doc = Arc::new(FailingDocument::new(ParserErrorKind::NoOption));
    let config = ConfigSpec::from_document(doc, "/", "build").unwrap();

    let err = config.get_str("anything").unwrap_err();
    assert!(err.is_kind(ErrorKind::NoOptionError));
    match err {
        ConfigError::Spec(e) => assert_eq!(e.origin(), Some(ParserErrorKind::NoOption)),
        other => panic!("expected a translated error, got {:?}", other),
    }
}

#[test]
fn test_deep_interpolation_passes_through() {
    let file = write_config("[DEFAULT]\nloop = %(loop)s\n");
    let config = ConfigSpec::new(file.path()).unwrap();

    let err = config.get_str("loop").unwrap_err();
    assert!(matches!(err, ConfigError::Parser(ref e) if e.kind() == ParserErrorKind::InterpolationDepth));
}

#[test]
fn test_cursors_share_document() {
    let (_file, mut config) = load();
    config.set_section("build").unwrap();

    let mut other = config.cursor();
    other.set_deliverable_section("installer").unwrap();

    assert_eq!(config.get_section(), "build");
    assert_eq!(other.get_str("ext").unwrap(), "exe");
    assert_eq!(
        config.get_raw_config().sections(),
        other.get_raw_config().sections()
    );
}

#[test]
fn test_cursors_across_threads() {
    let (_file, config) = load();

    let handles: Vec<_> = ["partner:acme", "partner:globex", "build"]
        .into_iter()
        .map(|section| {
            let mut cursor = config.cursor();
            std::thread::spawn(move || {
                cursor.set_section(section).unwrap();
                cursor.get_str("name").unwrap()
            })
        })
        .collect();

    let names: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(names, vec!["acme-firefox", "globex", "firefox-3.6"]);
}

#[test]
fn test_constants_without_a_document() {
    let make = ConfigSpec::get_constant("RUN_SHELL_COMMAND_IN_MEM_LINES").unwrap();
    assert!(make.as_i64().is_some());
    assert!(ConfigSpec::get_defined_constants().contains(&"S3_MIME_TYPES"));

    let err = ConfigSpec::get_constant("NOT_A_CONSTANT_AT_ALL").unwrap_err();
    assert!(err.to_string().contains("NOT_A_CONSTANT_AT_ALL"));
}
