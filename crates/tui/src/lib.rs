//! Terminal user interface for the King of the Pundits fan site.
//!
//! The site's pages (home, league tables, pundit roster, account) render as
//! full-screen views with a shared header. On narrow terminals the header
//! collapses to a menu toggle that opens a slide-in navigation panel over a
//! dimmed backdrop; on wide terminals the links sit inline in the header.
//!
//! The UI follows a component architecture: each view handles its own input
//! and rendering, reports side effects back to the runtime, and reads shared
//! state from [`app::App`].

mod app;
mod ui;

use anyhow::Result;
use kotp_content::SiteContent;

pub use ui::theme::catalog as themes;

/// Runs the TUI until the user quits with Ctrl+C.
///
/// Sets up the terminal (raw mode, alternate screen, mouse capture), drives
/// the event loop, and restores the terminal on exit.
pub async fn run(content: SiteContent) -> Result<()> {
    ui::runtime::run_app(content).await
}
