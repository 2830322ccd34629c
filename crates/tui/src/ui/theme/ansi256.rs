//! ANSI 256-color fallback theme for terminals without truecolor support.
//!
//! Approximates the pitch palette with indexed colors so the UI stays legible
//! inside macOS Terminal and other 8-bit color terminals.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

/// Indexed approximation of the pitch palette.
#[derive(Debug, Clone)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Ansi256Theme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(233),
                surface: Color::Indexed(234),
                surface_muted: Color::Indexed(237),
                border: Color::Indexed(238),

                text: Color::Indexed(255),
                text_secondary: Color::Indexed(247),
                text_muted: Color::Indexed(245),

                accent_primary: Color::Indexed(179),
                accent_secondary: Color::Indexed(78),

                info: Color::Indexed(110),
                success: Color::Indexed(78),
                warning: Color::Indexed(215),
                error: Color::Indexed(167),

                selection_bg: Color::Indexed(237),
                selection_fg: Color::Indexed(255),
                focus: Color::Indexed(78),
                overlay_bg: Color::Indexed(232),

                table_row_even: Color::Indexed(233),
                table_row_odd: Color::Indexed(235),
            },
        }
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

/// ANSI fallback with brighter borders and text.
#[derive(Debug, Clone)]
pub struct Ansi256ThemeHighContrast {
    roles: ThemeRoles,
}

impl Ansi256ThemeHighContrast {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(233),
                surface: Color::Indexed(234),
                surface_muted: Color::Indexed(238),
                border: Color::Indexed(179),

                text: Color::Indexed(231),
                text_secondary: Color::Indexed(251),
                text_muted: Color::Indexed(249),

                accent_primary: Color::Indexed(179),
                accent_secondary: Color::Indexed(78),

                info: Color::Indexed(110),
                success: Color::Indexed(78),
                warning: Color::Indexed(215),
                error: Color::Indexed(167),

                selection_bg: Color::Indexed(239),
                selection_fg: Color::Indexed(231),
                focus: Color::Indexed(179),
                overlay_bg: Color::Indexed(232),

                table_row_even: Color::Indexed(233),
                table_row_odd: Color::Indexed(235),
            },
        }
    }
}

impl Theme for Ansi256ThemeHighContrast {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
