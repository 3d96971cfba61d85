//! Build script for shield-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates face.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest panel move accepted by the firmware parser
const MAX_DURATION_MS: i64 = 10_000;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate face.toml at compile time
///
/// The firmware falls back to defaults when the embedded file does not parse.
fn validate_config() {
    println!("cargo:rerun-if-changed=face.toml");

    let config_path = Path::new("face.toml");
    if !config_path.exists() {
        fail(
            "face.toml not found",
            &["The firmware embeds face.toml from the shield-firmware directory.".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read face.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in face.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_animation(&config, &mut errors);
    validate_choice(&config, "ticks", "overlap", &["drop", "coalesce"], &mut errors);
    validate_choice(&config, "clock", "style", &["24h", "12h"], &mut errors);
    validate_panels(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid face configuration", &errors);
    }

    println!("cargo:warning=face.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, details: &[String]) -> ! {
    let body = details
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// Only known sections, each a table
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        match name.as_str() {
            "animation" | "ticks" | "clock" | "panel" => {
                if !value.is_table() {
                    errors.push(format!("[{}] must be a table", name));
                }
            }
            _ => errors.push(format!("unknown section [{}]", name)),
        }
    }
}

fn validate_animation(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(animation) = config.get("animation").and_then(|a| a.as_table()) else {
        return;
    };

    for (key, value) in animation {
        match key.as_str() {
            "duration_ms" => match value.as_integer() {
                Some(ms) if (0..=MAX_DURATION_MS).contains(&ms) => {}
                _ => errors.push(format!(
                    "[animation] duration_ms must be 0-{}",
                    MAX_DURATION_MS
                )),
            },
            "curve" => {
                let names = ["linear", "ease_in", "ease_out", "ease_in_out"];
                if !value.as_str().is_some_and(|c| names.contains(&c)) {
                    errors.push("[animation] curve must be linear/ease_in/ease_out/ease_in_out".into());
                }
            }
            "completion" => {
                if !value
                    .as_str()
                    .is_some_and(|c| ["join", "primary"].contains(&c))
                {
                    errors.push("[animation] completion must be 'join' or 'primary'".into());
                }
            }
            _ => errors.push(format!("[animation] unknown key '{}'", key)),
        }
    }
}

/// A section holding a single string key with a fixed set of values
fn validate_choice(
    config: &toml::Value,
    section: &str,
    key: &str,
    allowed: &[&str],
    errors: &mut Vec<String>,
) {
    let Some(table) = config.get(section).and_then(|s| s.as_table()) else {
        return;
    };

    for (name, value) in table {
        if name != key {
            errors.push(format!("[{}] unknown key '{}'", section, name));
        } else if !value.as_str().is_some_and(|v| allowed.contains(&v)) {
            errors.push(format!(
                "[{}] {} must be one of: {}",
                section,
                key,
                allowed.join(", ")
            ));
        }
    }
}

fn validate_panels(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(panels) = config.get("panel").and_then(|p| p.as_table()) else {
        return;
    };

    for (name, panel) in panels {
        if name != "top" && name != "bottom" {
            errors.push(format!("unknown panel [panel.{}]", name));
            continue;
        }
        let Some(panel) = panel.as_table() else {
            errors.push(format!("[panel.{}] must be a table", name));
            continue;
        };

        let mut frames = Vec::new();
        for (key, value) in panel {
            if key != "closed" && key != "open" {
                errors.push(format!("[panel.{}] unknown key '{}'", name, key));
                continue;
            }
            match rect(value) {
                Some(frame) => frames.push(frame),
                None => errors.push(format!(
                    "[panel.{}] {} must be [x, y, width, height] (i16)",
                    name, key
                )),
            }
        }

        if frames.len() == 2 && frames[0] == frames[1] {
            errors.push(format!("[panel.{}] closed and open frames are equal", name));
        }
    }
}

fn rect(value: &toml::Value) -> Option<[i16; 4]> {
    let fields = value.as_array()?;
    if fields.len() != 4 {
        return None;
    }

    let mut out = [0i16; 4];
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = i16::try_from(field.as_integer()?).ok()?;
    }
    Some(out)
}
