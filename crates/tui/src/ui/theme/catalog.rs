//! Catalog of selectable themes.
//!
//! Each entry pairs a stable id (what gets persisted in preferences and
//! accepted by `--theme`) with a factory for the theme itself.

use super::ansi256::{Ansi256Theme, Ansi256ThemeHighContrast};
use super::pitch::{PitchTheme, PitchThemeHighContrast};
use super::roles::Theme;

/// A selectable theme with its metadata.
pub struct ThemeDefinition {
    /// Stable identifier used in preferences and on the command line.
    pub id: &'static str,
    /// Human-readable name shown in listings.
    pub name: &'static str,
    /// One-line description for listings.
    pub description: &'static str,
    /// Alternate names accepted by [`resolve`].
    pub aliases: &'static [&'static str],
    /// Whether the palette relies on truecolor support.
    pub requires_truecolor: bool,
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }
}

const THEMES: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "pitch",
        name: "Pitch",
        description: "Dark green-and-gold palette, the default",
        aliases: &["default"],
        requires_truecolor: true,
        factory: || Box::new(PitchTheme::new()),
    },
    ThemeDefinition {
        id: "pitch-hc",
        name: "Pitch High Contrast",
        description: "Pitch palette with brighter text and borders",
        aliases: &["pitch-high-contrast"],
        requires_truecolor: true,
        factory: || Box::new(PitchThemeHighContrast::new()),
    },
    ThemeDefinition {
        id: "ansi256",
        name: "ANSI 256",
        description: "Indexed-color fallback for 8-bit terminals",
        aliases: &["256", "fallback"],
        requires_truecolor: false,
        factory: || Box::new(Ansi256Theme::new()),
    },
    ThemeDefinition {
        id: "ansi256-hc",
        name: "ANSI 256 High Contrast",
        description: "Indexed-color fallback with brighter text",
        aliases: &["ansi256-high-contrast"],
        requires_truecolor: false,
        factory: || Box::new(Ansi256ThemeHighContrast::new()),
    },
];

/// All known themes in display order.
pub fn all() -> &'static [ThemeDefinition] {
    THEMES
}

/// Looks up a theme by its stable id.
pub fn find_by_id(id: &str) -> Option<&'static ThemeDefinition> {
    THEMES.iter().find(|t| t.id == id)
}

/// Looks up a theme by id or alias, ignoring case.
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    let normalized = name.to_ascii_lowercase();
    THEMES.iter().find(|definition| {
        definition.id.eq_ignore_ascii_case(&normalized)
            || definition
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(&normalized))
    })
}

/// Default theme for truecolor-capable terminals.
pub fn default_truecolor() -> &'static ThemeDefinition {
    find_by_id("pitch").unwrap_or(&THEMES[0])
}

/// Default theme for terminals limited to indexed colors.
pub fn default_ansi() -> &'static ThemeDefinition {
    find_by_id("ansi256").unwrap_or(&THEMES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for theme in all() {
            assert!(seen.insert(theme.id), "duplicate theme id: {}", theme.id);
        }
    }

    #[test]
    fn find_by_id_resolves_every_entry() {
        for theme in all() {
            let found = find_by_id(theme.id);
            assert!(found.is_some());
        }
        assert!(find_by_id("does-not-exist").is_none());
    }

    #[test]
    fn resolve_accepts_aliases_and_mixed_case() {
        assert_eq!(resolve("DEFAULT").map(|t| t.id), Some("pitch"));
        assert_eq!(resolve("Pitch-HC").map(|t| t.id), Some("pitch-hc"));
        assert_eq!(resolve("256").map(|t| t.id), Some("ansi256"));
        assert!(resolve("solarized").is_none());
    }

    #[test]
    fn defaults_match_capability() {
        assert!(default_truecolor().requires_truecolor);
        assert!(!default_ansi().requires_truecolor);
    }

    #[test]
    fn every_entry_builds() {
        for theme in all() {
            let built = theme.build();
            // A theme with identical foreground and background would be
            // unreadable; catch palette typos early.
            assert_ne!(built.roles().text, built.roles().background);
        }
    }
}
