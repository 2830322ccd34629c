//! Application state for the King of the Pundits TUI.
//!
//! [`App`] owns every piece of feature state; components borrow the slice
//! they draw and mutate it through their event handlers. Cross-cutting
//! objects (theme, preferences, flags) live in [`SharedCtx`] so they are not
//! threaded through every call site separately.

use std::time::Instant;

use kotp_content::SiteContent;
use kotp_types::{Effect, Msg, Route};
use kotp_util::env_flag;
use kotp_util::preferences::UserPreferences;
use tracing::info;

use crate::ui::components::auth::AuthState;
use crate::ui::components::nav_panel::NavPanelState;
use crate::ui::components::pundits::PunditsState;
use crate::ui::components::tables::TablesState;
use crate::ui::theme::{self, Theme};

/// Which part of the chrome owns keyboard input while the panel is closed.
///
/// `Nav` is the header navigation (the toggle below the breakpoint, the
/// inline links above it); `Content` is the active screen. The open panel
/// bypasses this entirely and traps input itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChromeFocus {
    Nav,
    #[default]
    Content,
}

/// Cross-cutting shared context owned by the App.
pub struct SharedCtx {
    /// Active theme, resolved once at startup.
    pub theme: Box<dyn Theme>,
    /// Catalog id of the active theme.
    pub active_theme_id: String,
    /// Persisted user preferences (theme choice).
    pub preferences: UserPreferences,
    /// Shows layout diagnostics in the footer (`KOTP_DEBUG`).
    pub debug_enabled: bool,
}

impl SharedCtx {
    pub fn new(preferences: UserPreferences) -> Self {
        let loaded = theme::load(preferences.preferred_theme().as_deref());
        Self {
            theme: loaded.theme,
            active_theme_id: loaded.definition.id.to_string(),
            preferences,
            debug_enabled: env_flag("KOTP_DEBUG"),
        }
    }
}

/// The main application state.
pub struct App {
    pub ctx: SharedCtx,
    /// Season content bundled into the binary.
    pub content: SiteContent,
    /// Screen currently mounted as the content view.
    pub route: Route,
    pub chrome_focus: ChromeFocus,
    /// Index of the header link selection while `chrome_focus` is `Nav` on a
    /// wide viewport.
    pub header_sel: usize,
    pub nav: NavPanelState,
    pub tables: TablesState,
    pub pundits: PunditsState,
    pub auth: AuthState,
}

impl App {
    pub fn new(content: SiteContent, preferences: UserPreferences) -> Self {
        info!("Welcome to King of the Pundits, {} season", content.season);
        Self {
            ctx: SharedCtx::new(preferences),
            route: Route::Home,
            chrome_focus: ChromeFocus::default(),
            header_sel: 0,
            nav: NavPanelState::new(Route::ALL.to_vec()),
            tables: TablesState::default(),
            pundits: PunditsState::default(),
            auth: AuthState::default(),
            content,
        }
    }

    /// App-level reducer for runtime messages. Components receive the same
    /// message afterwards through the main view.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                self.auth.expire_stale(Instant::now());
            }
            Msg::Resize(width, _) => {
                self.nav.handle_viewport_change(*width);
            }
        }
        Vec::new()
    }

    /// Whether the ticker should run at the fast interval. Only a pending
    /// status banner needs sub-second ticks; everything else renders on
    /// input.
    pub fn needs_animation(&self) -> bool {
        self.auth.has_pending_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use kotp_types::Severity;

    fn test_app() -> App {
        let content = SiteContent::from_embedded().expect("embedded content loads");
        let mut app = App::new(content, UserPreferences::ephemeral());
        app.update(&Msg::Resize(60, 24));
        app
    }

    #[test]
    fn resize_past_breakpoint_closes_panel_without_moving_focus() {
        let mut app = test_app();
        app.nav.open(crate::ui::components::nav_panel::Trigger::Toggle);
        app.chrome_focus = ChromeFocus::Content;

        app.update(&Msg::Resize(140, 40));
        assert!(!app.nav.is_open());
        assert_eq!(app.chrome_focus, ChromeFocus::Content);
    }

    #[test]
    fn tick_expires_a_stale_banner() {
        let mut app = test_app();
        let posted = Instant::now() - Duration::from_secs(6);
        app.auth.post_message(Severity::Info, "old news", posted);
        assert!(app.needs_animation());

        app.update(&Msg::Tick);
        assert!(!app.auth.has_pending_message());
        assert!(!app.needs_animation());
    }

    #[test]
    fn tick_keeps_a_fresh_banner() {
        let mut app = test_app();
        app.auth.post_message(Severity::Warning, "hold on", Instant::now());
        app.update(&Msg::Tick);
        assert!(app.auth.has_pending_message());
    }
}
