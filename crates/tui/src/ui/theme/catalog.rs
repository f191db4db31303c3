use ratatui::style::Color;

use super::{Ansi256Theme, DraculaTheme, MarketTheme, Theme};

/// Describes a selectable theme.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used for persistence.
    pub id: &'static str,
    /// Human-friendly display name.
    pub label: &'static str,
    /// Colors that summarize the palette.
    pub swatch: ThemeSwatch,
    /// Theme aliases (e.g., env overrides) that map back to this definition.
    pub aliases: &'static [&'static str],
    /// Whether the palette targets ANSI/8-bit terminals.
    pub is_ansi_fallback: bool,
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    /// Instantiate the theme represented by this definition.
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ThemeSwatch {
    pub background: Color,
    pub accent: Color,
    pub selection: Color,
}

/// Ordered list of selectable themes.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "market",
        label: "Local Market",
        swatch: ThemeSwatch {
            background: Color::Rgb(0x1F, 0x1B, 0x18),
            accent: Color::Rgb(0xF7, 0x84, 0x10),
            selection: Color::Rgb(0xE0, 0x75, 0x16),
        },
        aliases: &["market", "default", "orange", "localmarket"],
        is_ansi_fallback: false,
        factory: || Box::new(MarketTheme::new()),
    },
    ThemeDefinition {
        id: "dracula",
        label: "Dracula",
        swatch: ThemeSwatch {
            background: Color::Rgb(0x28, 0x2A, 0x36),
            accent: Color::Rgb(0xFF, 0xB8, 0x6C),
            selection: Color::Rgb(0x44, 0x47, 0x5A),
        },
        aliases: &["dracula"],
        is_ansi_fallback: false,
        factory: || Box::new(DraculaTheme::new()),
    },
    ThemeDefinition {
        id: "ansi256",
        label: "ANSI 256",
        swatch: ThemeSwatch {
            background: Color::Indexed(234),
            accent: Color::Indexed(208),
            selection: Color::Indexed(166),
        },
        aliases: &["ansi256", "ansi", "256"],
        is_ansi_fallback: true,
        factory: || Box::new(Ansi256Theme::new()),
    },
];

pub fn all() -> &'static [ThemeDefinition] {
    THEME_DEFINITIONS
}

/// Locate a definition by id or alias (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    let normalized = name.trim();
    THEME_DEFINITIONS.iter().find(|definition| {
        definition.id.eq_ignore_ascii_case(normalized) || definition.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(normalized))
    })
}

/// Preferred default for truecolor terminals.
pub fn default_truecolor() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[0]
}

/// Preferred default for ANSI-only terminals.
pub fn default_ansi() -> &'static ThemeDefinition {
    THEME_DEFINITIONS
        .iter()
        .find(|definition| definition.is_ansi_fallback)
        .unwrap_or(&THEME_DEFINITIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_ids_and_aliases() {
        assert_eq!(resolve("Dracula").map(|d| d.id), Some("dracula"));
        assert_eq!(resolve(" orange ").map(|d| d.id), Some("market"));
        assert_eq!(resolve("256").map(|d| d.id), Some("ansi256"));
        assert!(resolve("nord").is_none());
    }

    #[test]
    fn defaults_point_at_expected_palettes() {
        assert_eq!(default_truecolor().id, "market");
        assert!(default_ansi().is_ansi_fallback);
        assert_eq!(all().len(), 3);
    }
}
