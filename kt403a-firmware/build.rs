//! Build script for kt403a-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates player.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const DEVICES: [&str; 5] = ["usb", "sd", "aux", "sleep", "flash"];
const EQUALIZERS: [&str; 6] = ["normal", "pop", "rock", "jazz", "classic", "bass"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate player.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=player.toml");

    let config_path = Path::new("player.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: player.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a player.toml configuration file.         ║\n\
            ║  Please create one in the kt403a-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read player.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in player.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_player(&config, &mut errors);
    validate_poll(&config, &mut errors);

    if !errors.is_empty() {
        let msg = errors.join("\n");
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid player.toml                                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&msg)
        );
    }

    println!("cargo:warning=player.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate the [player] section
fn validate_player(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(player) = config.get("player") else {
        errors.push("Missing [player] section".to_string());
        return;
    };

    match player.get("device").and_then(|v| v.as_str()) {
        Some(device) if DEVICES.contains(&device) => {}
        Some(device) => errors.push(format!(
            "[player] device = \"{}\" is not one of {:?}",
            device, DEVICES
        )),
        None => errors.push("[player] device is required".to_string()),
    }

    if let Some(volume) = player.get("volume") {
        match volume.as_integer() {
            Some(v) if (0..=100).contains(&v) => {}
            _ => errors.push("[player] volume must be an integer 0-100".to_string()),
        }
    }

    if let Some(eq) = player.get("equalizer") {
        match eq.as_str() {
            Some(name) if EQUALIZERS.contains(&name) => {}
            _ => errors.push(format!(
                "[player] equalizer must be one of {:?}",
                EQUALIZERS
            )),
        }
    }
}

/// Validate the optional [poll] section
fn validate_poll(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(poll) = config.get("poll") else {
        return;
    };

    if let Some(interval) = poll.get("interval_s") {
        match interval.as_integer() {
            Some(v) if (1..=3600).contains(&v) => {}
            _ => errors.push("[poll] interval_s must be an integer 1-3600".to_string()),
        }
    }
}
