// LogTally - ui/theme.rs
//
// Terminal colour scheme and level colour mapping.
// No dependencies on app state or business logic.

use owo_colors::{OwoColorize, Style};

/// Colour for a level name. `None` for levels without a colour.
pub fn level_style(level: &str) -> Option<Style> {
    match level {
        "INFO" => Some(Style::new().blue()),
        "ERROR" => Some(Style::new().red()),
        "DEBUG" => Some(Style::new().magenta()),
        "WARNING" => Some(Style::new().yellow()),
        _ => None,
    }
}

/// Table header style.
pub fn header_style() -> Style {
    Style::new().bright_blue().bold()
}

/// Source path style.
pub fn source_style() -> Style {
    Style::new().green()
}

/// Error message style.
pub fn error_style() -> Style {
    Style::new().red()
}

/// Apply `style` to `text` when colour is enabled.
pub fn paint(text: &str, style: Option<Style>, color: bool) -> String {
    match style {
        Some(style) if color => text.style(style).to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_levels_have_colours() {
        for level in ["INFO", "ERROR", "DEBUG", "WARNING"] {
            assert!(level_style(level).is_some(), "{level} should be coloured");
        }
        assert!(level_style("TRACE").is_none());
    }

    #[test]
    fn test_paint_plain_when_disabled() {
        assert_eq!(paint("ERROR", level_style("ERROR"), false), "ERROR");
        assert_eq!(paint("TRACE", level_style("TRACE"), true), "TRACE");
    }

    #[test]
    fn test_paint_wraps_in_escape_codes_when_enabled() {
        let painted = paint("ERROR", level_style("ERROR"), true);
        assert!(painted.contains("ERROR"));
        assert!(painted.starts_with("\u{1b}["), "{painted:?}");
    }
}
