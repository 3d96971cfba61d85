//! Minimal parser for `face.toml`
//!
//! Handles only the subset the face configuration uses. It does NOT support
//! the full TOML grammar.
//!
//! Supported:
//! - `[section]` and `[panel.top]` / `[panel.bottom]` headers
//! - `key = value` with integers, quoted strings, and `[x, y, w, h]` arrays
//! - Comments (`# ...`), whole-line or trailing
//!
//! Keys that are absent keep their [`FaceConfig::default`] value.

use super::types::{CompletionPolicy, FaceConfig, PanelGeometry, TickPolicy, MAX_DURATION_MS};
use crate::animation::Curve;
use crate::clock::HourStyle;
use crate::geometry::Rect;

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key not valid in the current section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Rectangle is not four integers
    InvalidRect,
}

/// Parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    /// Line number
    pub line: u16,
    /// Error kind
    pub kind: ParseErrorKind,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Animation,
    Ticks,
    Clock,
    PanelTop,
    PanelBottom,
}

/// Parse `face.toml` into a [`FaceConfig`]
pub fn parse_config(input: &str) -> Result<FaceConfig, ParseError> {
    let mut config = FaceConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = (index + 1).min(u16::MAX as usize) as u16;
        let fail = |kind| ParseError {
            line: line_no,
            kind,
        };

        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section(line).ok_or(fail(ParseErrorKind::InvalidSection))?;
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .ok_or(fail(ParseErrorKind::InvalidLine))?;

        apply(&mut config, section, key, value).map_err(fail)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section(line: &str) -> Option<Section> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    match name {
        "animation" => Some(Section::Animation),
        "ticks" => Some(Section::Ticks),
        "clock" => Some(Section::Clock),
        "panel.top" => Some(Section::PanelTop),
        "panel.bottom" => Some(Section::PanelBottom),
        _ => None,
    }
}

fn apply(
    config: &mut FaceConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseErrorKind> {
    use ParseErrorKind::*;

    match (section, key) {
        (Section::Animation, "duration_ms") => {
            let ms: u32 = value.parse().map_err(|_| InvalidValue)?;
            if ms > MAX_DURATION_MS {
                return Err(InvalidValue);
            }
            config.duration_ms = ms;
        }
        (Section::Animation, "curve") => {
            config.curve = Curve::from_name(parse_string(value)?).ok_or(InvalidValue)?;
        }
        (Section::Animation, "completion") => {
            config.completion =
                CompletionPolicy::from_name(parse_string(value)?).ok_or(InvalidValue)?;
        }
        (Section::Ticks, "overlap") => {
            config.overlap = TickPolicy::from_name(parse_string(value)?).ok_or(InvalidValue)?;
        }
        (Section::Clock, "style") => {
            config.clock_style = HourStyle::from_name(parse_string(value)?).ok_or(InvalidValue)?;
        }
        (Section::PanelTop, _) => apply_panel(&mut config.top, key, value)?,
        (Section::PanelBottom, _) => apply_panel(&mut config.bottom, key, value)?,
        _ => return Err(UnknownKey),
    }

    Ok(())
}

fn apply_panel(panel: &mut PanelGeometry, key: &str, value: &str) -> Result<(), ParseErrorKind> {
    match key {
        "closed" => panel.closed = parse_rect(value)?,
        "open" => panel.open = parse_rect(value)?,
        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

fn parse_string(value: &str) -> Result<&str, ParseErrorKind> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseErrorKind::InvalidValue)
}

fn parse_rect(value: &str) -> Result<Rect, ParseErrorKind> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseErrorKind::InvalidRect)?;

    let mut fields = [0i16; 4];
    let mut count = 0;
    for part in inner.split(',') {
        if count == fields.len() {
            return Err(ParseErrorKind::InvalidRect);
        }
        fields[count] = part.trim().parse().map_err(|_| ParseErrorKind::InvalidRect)?;
        count += 1;
    }
    if count != fields.len() {
        return Err(ParseErrorKind::InvalidRect);
    }

    Ok(Rect::new(fields[0], fields[1], fields[2], fields[3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
# Shield face configuration
[animation]
duration_ms = 400        # slower slide
curve = "linear"
completion = "primary"

[ticks]
overlap = "coalesce"

[clock]
style = "12h"

[panel.top]
closed = [0, 20, 144, 64]
open = [0, -12, 144, 64]

[panel.bottom]
closed = [0, 84, 144, 64]
open = [0, 116, 144, 64]
"#;

    #[test]
    fn test_parse_full() {
        let config = parse_config(FULL).unwrap();
        assert_eq!(config.duration_ms, 400);
        assert_eq!(config.curve, Curve::Linear);
        assert_eq!(config.completion, CompletionPolicy::Primary);
        assert_eq!(config.overlap, TickPolicy::Coalesce);
        assert_eq!(config.clock_style, HourStyle::Twelve);
        assert_eq!(config.top.closed, Rect::new(0, 20, 144, 64));
        assert_eq!(config.top.open, Rect::new(0, -12, 144, 64));
        assert_eq!(config.bottom.open, Rect::new(0, 116, 144, 64));
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse_config("").unwrap(), FaceConfig::default());
        assert_eq!(
            parse_config("# nothing here\n\n").unwrap(),
            FaceConfig::default()
        );
    }

    #[test]
    fn test_partial_keeps_defaults() {
        let config = parse_config("[animation]\nduration_ms = 300\n").unwrap();
        assert_eq!(config.duration_ms, 300);
        assert_eq!(config.top, FaceConfig::default().top);
    }

    #[test]
    fn test_unknown_section() {
        let err = parse_config("[animation]\ncurve = \"linear\"\n[shield]\n").unwrap_err();
        assert_eq!(
            err,
            ParseError {
                line: 3,
                kind: ParseErrorKind::InvalidSection
            }
        );
    }

    #[test]
    fn test_key_outside_section() {
        let err = parse_config("duration_ms = 250").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);
    }

    #[test]
    fn test_bad_values() {
        let err = parse_config("[animation]\ncurve = linear\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);

        let err = parse_config("[animation]\ncurve = \"bounce\"\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);

        let err = parse_config("[animation]\nduration_ms = 60000\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);

        let err = parse_config("[ticks]\noverlap = \"preempt\"\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);
    }

    #[test]
    fn test_bad_rect() {
        let err = parse_config("[panel.top]\nopen = [0, -10, 144]\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidRect);

        let err = parse_config("[panel.top]\nopen = [0, -10, 144, 66, 1]\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidRect);

        let err = parse_config("[panel.top]\nopen = 0, -10, 144, 66\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidRect);
    }

    #[test]
    fn test_missing_equals() {
        let err = parse_config("[clock]\nstyle \"24h\"\n").unwrap_err();
        assert_eq!(
            err,
            ParseError {
                line: 2,
                kind: ParseErrorKind::InvalidLine
            }
        );
    }
}
