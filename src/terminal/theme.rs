//! Highlight themes
//!
//! Maps token kinds and editor chrome to crossterm styles.

use crossterm::style::{Color, ContentStyle, Stylize};

use crate::core::lexer::TokenKind;

/// Helper macro to create RGB colors from hex values
macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        Color::Rgb {
            r: $r,
            g: $g,
            b: $b,
        }
    };
}

/// Names accepted by [`Theme::by_name`]
pub const THEME_NAMES: &[&str] = &["default", "mono"];

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    ingredient: ContentStyle,
    cookware: ContentStyle,
    timer: ContentStyle,
    comment: ContentStyle,
    metadata_key: ContentStyle,
    metadata_value: ContentStyle,
    text: ContentStyle,
    /// Unselected dropdown row
    pub dropdown: ContentStyle,
    /// Highlighted dropdown row
    pub dropdown_selected: ContentStyle,
    pub status: ContentStyle,
}

impl Theme {
    pub fn by_name(name: &str) -> Option<Theme> {
        match name {
            "default" => Some(Self::colors()),
            "mono" => Some(Self::mono()),
            _ => None,
        }
    }

    /// RGB palette for color terminals
    pub fn colors() -> Theme {
        let plain = ContentStyle::new();
        Theme {
            name: "default",
            ingredient: plain.with(rgb!(0x98, 0xc3, 0x79)).bold(),
            cookware: plain.with(rgb!(0xd1, 0x9a, 0x66)).bold(),
            timer: plain.with(rgb!(0xc6, 0x78, 0xdd)),
            comment: plain.with(rgb!(0x7f, 0x84, 0x8e)).italic(),
            metadata_key: plain.with(rgb!(0x61, 0xaf, 0xef)).bold(),
            metadata_value: plain.with(rgb!(0x56, 0xb6, 0xc2)),
            text: plain,
            dropdown: plain
                .with(rgb!(0xab, 0xb2, 0xbf))
                .on(rgb!(0x2c, 0x31, 0x3c)),
            dropdown_selected: plain
                .with(rgb!(0x28, 0x2c, 0x34))
                .on(rgb!(0x61, 0xaf, 0xef)),
            status: plain.reverse(),
        }
    }

    /// Attributes only, for terminals without color
    pub fn mono() -> Theme {
        let plain = ContentStyle::new();
        Theme {
            name: "mono",
            ingredient: plain.bold(),
            cookware: plain.underlined(),
            timer: plain.bold().underlined(),
            comment: plain.dim(),
            metadata_key: plain.bold(),
            metadata_value: plain.italic(),
            text: plain,
            dropdown: plain.reverse(),
            dropdown_selected: plain.bold(),
            status: plain.reverse(),
        }
    }

    pub fn style(&self, kind: TokenKind) -> ContentStyle {
        match kind {
            TokenKind::Ingredient => self.ingredient,
            TokenKind::Cookware => self.cookware,
            TokenKind::Timer => self.timer,
            TokenKind::Comment => self.comment,
            TokenKind::MetadataKey => self.metadata_key,
            TokenKind::MetadataValue => self.metadata_value,
            TokenKind::Text => self.text,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::colors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        for name in THEME_NAMES {
            assert_eq!(Theme::by_name(name).map(|t| t.name), Some(*name));
        }
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn test_text_is_unstyled() {
        assert_eq!(Theme::colors().style(TokenKind::Text), ContentStyle::new());
        assert_eq!(Theme::mono().style(TokenKind::Text), ContentStyle::new());
    }

    #[test]
    fn test_mono_has_no_colors() {
        let theme = Theme::mono();
        for kind in [
            TokenKind::Ingredient,
            TokenKind::Cookware,
            TokenKind::Timer,
            TokenKind::Comment,
            TokenKind::MetadataKey,
            TokenKind::MetadataValue,
        ] {
            let style = theme.style(kind);
            assert!(style.foreground_color.is_none());
            assert_ne!(style, ContentStyle::new());
        }
    }

    #[test]
    fn test_references_are_distinguishable() {
        let theme = Theme::colors();
        assert_ne!(
            theme.style(TokenKind::Ingredient),
            theme.style(TokenKind::Cookware)
        );
    }
}
