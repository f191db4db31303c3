use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Market brand palette
pub const MARIGOLD: Color = Color::Rgb(0xF7, 0x84, 0x10); // #F78410 - brand / nav bar
pub const EMBER: Color = Color::Rgb(0xE0, 0x75, 0x16); // #E07516 - hover / secondary buttons
pub const SAFFRON: Color = Color::Rgb(0xF2, 0xA9, 0x45); // #F2A945 - highlights
pub const INK: Color = Color::Rgb(0x1F, 0x1B, 0x18); // #1F1B18 - background
pub const CARD: Color = Color::Rgb(0x2A, 0x24, 0x1F); // #2A241F - panels and cards
pub const CARD_MUTED: Color = Color::Rgb(0x3A, 0x31, 0x2A); // #3A312A - muted surfaces
pub const SAND: Color = Color::Rgb(0xF5, 0xEE, 0xE6); // #F5EEE6 - primary text
pub const DUNE: Color = Color::Rgb(0xC9, 0xB8, 0xA6); // #C9B8A6 - secondary text
pub const DUSK: Color = Color::Rgb(0x8A, 0x7B, 0x6E); // #8A7B6E - muted text
pub const OVERLAY: Color = Color::Rgb(0x12, 0x10, 0x0E); // #12100E - behind the panel

/// Default theme using the market's orange brand colors on a warm dark base.
#[derive(Debug, Clone)]
pub struct MarketTheme {
    roles: ThemeRoles,
}

impl MarketTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: INK,
                surface: CARD,
                surface_muted: CARD_MUTED,
                border: CARD_MUTED,

                text: SAND,
                text_secondary: DUNE,
                text_muted: DUSK,

                accent_primary: MARIGOLD,
                accent_secondary: SAFFRON,

                success: Color::Rgb(0x7B, 0xC6, 0x7E),
                warning: SAFFRON,
                error: Color::Rgb(0xE5, 0x53, 0x4B),

                selection_bg: EMBER,
                selection_fg: SAND,
                focus: SAFFRON,
                modal_bg: OVERLAY,
            },
        }
    }
}

impl Default for MarketTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for MarketTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
