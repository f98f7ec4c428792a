// SPDX-License-Identifier: MIT OR Apache-2.0

//! Walks through a release configuration file.
//!
//! This example demonstrates:
//! - Loading a configuration file and moving the section cursor
//! - `DEFAULT` inheritance and `%(key)s` interpolation
//! - Typed reads and scoped partner reads
//! - Built-in constants with environment overrides
//!
//! To run this example:
//! ```bash
//! # Optionally override a constant
//! export UNZIP=/opt/debug/unzip
//!
//! cargo run --example release_config
//! ```

use sectioncfg::prelude::*;
use std::io::Write;

const SAMPLE: &str = "\
[DEFAULT]
product = firefox
version = 3.6

[build]
name = %(product)s-%(version)s
jobs = 8
platforms = win32 mac linux

[partner:acme]
sign = yes
";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== sectioncfg: Release Configuration ===\n");

    let mut file = tempfile::Builder::new().suffix(".ini").tempfile()?;
    file.write_all(SAMPLE.as_bytes())?;

    let mut config = ConfigSpec::builder()
        .file(file.path())
        .section("build")
        .build()?;

    println!("Sections: {:?}", config.get_section_list());
    println!("Current section: {}\n", config.get_section());

    println!("--- Typed reads ---");
    println!("name      = {}", config.get_str("name")?);
    println!("jobs      = {}", config.get_int("jobs")?);
    println!("platforms = {:?}", config.get_list("platforms")?);

    let raw = config.get("name", Coercion::Str, &Interpolation::Raw)?;
    println!("name (raw) = {}", raw);

    let overrides = Interpolation::from_assignments(["version=4.0"])?;
    println!(
        "name (version=4.0) = {}\n",
        config.get("name", Coercion::Str, &overrides)?
    );

    println!("--- Partners ---");
    for section in config.get_partner_sections() {
        println!("  {}", section);
    }
    let sign = config.partner_get("acme", "sign", Coercion::Bool, &Interpolation::default())?;
    println!("acme signs builds: {}", sign);
    println!("cursor still on: {}\n", config.get_section());

    match config.set_section("release") {
        Ok(()) => println!("✗ unexpectedly moved to 'release'"),
        Err(e) => println!("✓ {} ({:?})", e, e.kind()),
    }

    println!("\n--- Constants ---");
    for name in ["UNZIP", "S3_PUSH_TIMEOUT", "BUILD_PLATFORMS"] {
        println!("{:<16} = {}", name, ConfigSpec::get_constant(name)?);
    }

    Ok(())
}
