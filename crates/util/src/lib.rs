//! Utility helpers shared by the King of the Pundits CLI and TUI.

pub mod preferences;
pub mod validation;

use std::path::PathBuf;

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde come back unchanged, as does `~` itself when no home
/// directory can be resolved.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs_next::home_dir()
    {
        return home.join(rest);
    }
    if path == "~"
        && let Some(home) = dirs_next::home_dir()
    {
        return home;
    }
    PathBuf::from(path)
}

/// Interprets common truthy spellings of an environment flag value.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Reads an environment flag, treating unset or falsy values as `false`.
pub fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| is_truthy(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_pass_through_expand_tilde() {
        assert_eq!(expand_tilde("/tmp/prefs.json"), PathBuf::from("/tmp/prefs.json"));
        assert_eq!(expand_tilde("relative/prefs.json"), PathBuf::from("relative/prefs.json"));
    }

    #[test]
    fn tilde_prefix_expands_to_home() {
        if let Some(home) = dirs_next::home_dir() {
            assert_eq!(expand_tilde("~/kotp/prefs.json"), home.join("kotp/prefs.json"));
            assert_eq!(expand_tilde("~"), home);
        }
    }

    #[test]
    fn truthy_spellings_are_recognized() {
        for value in ["1", "true", "YES", " on "] {
            assert!(is_truthy(value), "{value:?} should be truthy");
        }
        for value in ["0", "false", "off", "", "2"] {
            assert!(!is_truthy(value), "{value:?} should be falsy");
        }
    }
}
