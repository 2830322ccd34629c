//! Shared type definitions for the King of the Pundits terminal client.
//!
//! The TUI follows a message/effect loop: input events are translated into
//! [`Msg`]s, handlers mutate state synchronously and return [`Effect`]s, and
//! the runtime drains those effects once the current event turn has finished.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level screens reachable from the site navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Landing page with the season welcome.
    Home,
    /// League tables with expandable stat rows.
    Tables,
    /// Pundit roster, filterable by division.
    Pundits,
    /// Account screen with the login/register/reset forms.
    Account,
}

impl Route {
    /// Navigation order as rendered in the header and the slide-in panel.
    pub const ALL: [Route; 4] = [Route::Home, Route::Tables, Route::Pundits, Route::Account];

    /// Label shown on navigation links.
    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Tables => "Tables",
            Route::Pundits => "Pundits",
            Route::Account => "Account",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Competition tiers a pundit can be registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Division {
    Premier,
    Championship,
    Sunday,
}

impl Division {
    /// Stable ordering used by filters and the registration form.
    pub const ALL: [Division; 3] = [Division::Premier, Division::Championship, Division::Sunday];

    /// Human-readable name as printed in tables and forms.
    pub fn label(self) -> &'static str {
        match self {
            Division::Premier => "Premier Division",
            Division::Championship => "Championship",
            Division::Sunday => "Sunday League",
        }
    }

    /// Short identifier used on the command line and in the content files.
    pub fn id(self) -> &'static str {
        match self {
            Division::Premier => "premier",
            Division::Championship => "championship",
            Division::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Division {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "premier" => Ok(Division::Premier),
            "championship" => Ok(Division::Championship),
            "sunday" => Ok(Division::Sunday),
            other => Err(format!(
                "unknown division `{other}` (expected premier, championship or sunday)"
            )),
        }
    }
}

/// How prominently a status banner should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Messages delivered to the application by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic UI tick (animations, message expiry).
    Tick,
    /// Terminal resized to the given columns and rows.
    Resize(u16, u16),
}

/// Side effects reported by event handlers.
///
/// Handlers never navigate directly; they mutate their own state and hand the
/// runtime an effect to process after the turn. A handler may therefore close
/// the navigation panel and request a route switch in the same turn, with the
/// close visible before the new screen is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Request navigation to another screen.
    SwitchTo(Route),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_parses_case_insensitively() {
        assert_eq!("Premier".parse::<Division>(), Ok(Division::Premier));
        assert_eq!("CHAMPIONSHIP".parse::<Division>(), Ok(Division::Championship));
        assert_eq!("sunday".parse::<Division>(), Ok(Division::Sunday));
    }

    #[test]
    fn division_rejects_unknown_names() {
        let err = "premiership".parse::<Division>().expect_err("should not parse");
        assert!(err.contains("premiership"));
    }

    #[test]
    fn division_serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&Division::Sunday).expect("serialize division");
        assert_eq!(json, "\"sunday\"");
        let back: Division = serde_json::from_str("\"championship\"").expect("deserialize division");
        assert_eq!(back, Division::Championship);
    }

    #[test]
    fn division_ids_round_trip_through_from_str() {
        for division in Division::ALL {
            assert_eq!(division.id().parse::<Division>(), Ok(division));
        }
    }

    #[test]
    fn route_order_matches_navigation() {
        let labels: Vec<&str> = Route::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(labels, ["Home", "Tables", "Pundits", "Account"]);
    }
}
