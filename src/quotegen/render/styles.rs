//! Terminal styles for the editor panel, the preview outline and command messages.
//!
//! Templates only ever name styles semantically (`section-title`, `money`,
//! `placeholder`…) through the `style` filter; this module maps those names to actual
//! `console::Style` values. The palette follows the printed quote: navy headings and
//! gold accents.
//!
//! A style name with no registered style renders with a `(!?)` prefix so a typo in a
//! template shows up in the output instead of silently losing its styling.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const BANNER: &str = "banner";
    pub const SECTION_TITLE: &str = "section-title";
    pub const ACTIVE: &str = "active";
    pub const INACTIVE: &str = "inactive";
    pub const LABEL: &str = "label";
    pub const VALUE: &str = "value";
    pub const PLACEHOLDER: &str = "placeholder";
    pub const POSITION: &str = "position";
    pub const MONEY: &str = "money";
    pub const HINT: &str = "hint";
    pub const RULE: &str = "rule";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
}

const NAVY: (u8, u8, u8) = (26, 39, 68);
const GOLD: (u8, u8, u8) = (201, 168, 76);
const GREY: (u8, u8, u8) = (136, 136, 136);

/// A collection of named styles applied through the `style` template filter.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style, replacing any style already registered under that name.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Applies a named style, with ANSI codes.
    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            Some(style) => style.apply_to(text).to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }

    /// Same lookup as [`Theme::apply`] but leaves the text unstyled.
    pub fn apply_plain(&self, name: &str, text: &str) -> String {
        if self.has(name) {
            text.to_string()
        } else {
            format!("{} {}", MISSING_STYLE_INDICATOR, text)
        }
    }
}

pub static QUOTE_THEME: Lazy<Theme> = Lazy::new(|| {
    let navy = Style::new().color256(rgb_to_ansi256(NAVY));
    let gold = Style::new().color256(rgb_to_ansi256(GOLD));
    let grey = Style::new().color256(rgb_to_ansi256(GREY));

    Theme::new()
        .add(names::BANNER, gold.clone().bold())
        .add(names::SECTION_TITLE, navy.clone().bold().underlined())
        .add(names::ACTIVE, gold.clone().bold())
        .add(names::INACTIVE, grey.clone())
        .add(names::LABEL, navy.bold())
        .add(names::VALUE, Style::new())
        .add(names::PLACEHOLDER, grey.clone().italic())
        .add(names::POSITION, gold.clone())
        .add(names::MONEY, gold.bold())
        .add(names::HINT, grey.clone().dim())
        .add(names::RULE, grey)
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, Style::new())
});

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_style_shows_indicator() {
        let theme = Theme::new();
        assert_eq!(theme.apply("nope", "hello"), "(!?) hello");
        assert_eq!(theme.apply_plain("nope", "hello"), "(!?) hello");
    }

    #[test]
    fn plain_mode_keeps_text_for_known_styles() {
        assert_eq!(QUOTE_THEME.apply_plain(names::MONEY, "₹ 100"), "₹ 100");
    }

    #[test]
    fn every_style_name_is_registered() {
        for name in [
            names::BANNER,
            names::SECTION_TITLE,
            names::ACTIVE,
            names::INACTIVE,
            names::LABEL,
            names::VALUE,
            names::PLACEHOLDER,
            names::POSITION,
            names::MONEY,
            names::HINT,
            names::RULE,
            names::ERROR,
            names::WARNING,
            names::SUCCESS,
            names::INFO,
        ] {
            assert!(QUOTE_THEME.has(name), "missing style {}", name);
        }
    }

    #[test]
    fn greys_map_to_grayscale_ramp() {
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
        assert!(rgb_to_ansi256(GREY) >= 232);
    }

    #[test]
    fn colours_map_to_cube() {
        assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
    }
}
