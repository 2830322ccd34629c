use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Floodlit pitch palette: dark turf greens with trophy gold accents.
// Core
pub const BG: Color = Color::Rgb(0x10, 0x16, 0x13); // #101613 - Night turf
pub const SURFACE: Color = Color::Rgb(0x16, 0x20, 0x1A); // #16201a - Panels
pub const LINES: Color = Color::Rgb(0x2A, 0x3A, 0x30); // #2a3a30 - Pitch markings / borders
pub const FOREGROUND: Color = Color::Rgb(0xED, 0xF2, 0xEC); // #edf2ec - Body text
pub const MUTED: Color = Color::Rgb(0x8C, 0xA3, 0x93); // #8ca393 - Hints / secondary copy

// Accents
pub const GOLD: Color = Color::Rgb(0xE8, 0xC1, 0x5A); // #e8c15a - Trophy gold
pub const GRASS: Color = Color::Rgb(0x5D, 0xD4, 0x7E); // #5dd47e - Fresh grass
pub const SKY: Color = Color::Rgb(0x6F, 0xC3, 0xDF); // #6fc3df - Floodlight blue
pub const AMBER: Color = Color::Rgb(0xE8, 0xA3, 0x3D); // #e8a33d - Caution
pub const RED_CARD: Color = Color::Rgb(0xE0, 0x56, 0x5B); // #e0565b - Errors

pub const SELECTION: Color = Color::Rgb(0x24, 0x33, 0x2B); // #24332b - Selected row
pub const OVERLAY: Color = Color::Rgb(0x0A, 0x0F, 0x0C); // #0a0f0c - Backdrop dim
pub const ROW_EVEN: Color = Color::Rgb(0x13, 0x1B, 0x16); // #131b16
pub const ROW_ODD: Color = Color::Rgb(0x18, 0x23, 0x1C); // #18231c

/// Default palette tuned for truecolor terminals.
#[derive(Debug, Clone)]
pub struct PitchTheme {
    roles: ThemeRoles,
}

impl PitchTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: BG,
                surface: SURFACE,
                surface_muted: LINES,
                border: LINES,

                text: FOREGROUND,
                text_secondary: MUTED,
                text_muted: MUTED,

                accent_primary: GOLD,
                accent_secondary: GRASS,

                info: SKY,
                success: GRASS,
                warning: AMBER,
                error: RED_CARD,

                selection_bg: SELECTION,
                selection_fg: FOREGROUND,
                focus: GRASS,
                overlay_bg: OVERLAY,

                table_row_even: ROW_EVEN,
                table_row_odd: ROW_ODD,
            },
        }
    }
}

impl Theme for PitchTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// High-contrast pitch: gold borders and brighter secondary copy.
#[derive(Debug, Clone)]
pub struct PitchThemeHighContrast {
    roles: ThemeRoles,
}

impl PitchThemeHighContrast {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: BG,
                surface: SURFACE,
                surface_muted: LINES,
                border: GOLD,

                text: FOREGROUND,
                text_secondary: Color::Rgb(0xC2, 0xD4, 0xC7),
                text_muted: Color::Rgb(0xA6, 0xBC, 0xAC),

                accent_primary: GOLD,
                accent_secondary: GRASS,

                info: SKY,
                success: GRASS,
                warning: AMBER,
                error: RED_CARD,

                selection_bg: Color::Rgb(0x2E, 0x42, 0x36),
                selection_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
                focus: GOLD,
                overlay_bg: OVERLAY,

                table_row_even: ROW_EVEN,
                table_row_odd: ROW_ODD,
            },
        }
    }
}

impl Theme for PitchThemeHighContrast {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
