//! Slide-in navigation panel.
//!
//! Below the breakpoint the header collapses the navigation links behind a
//! toggle control; activating it opens a right-hand drawer over a dimmed
//! backdrop. While the drawer is open it owns all input: Tab and the arrow
//! keys cycle a focus ring (close control first, then one entry per link),
//! Escape, the close control, or a click on the backdrop close it, and
//! activating a link closes it in the same event turn while the route switch
//! is left on the effect queue.
//!
//! The state is the single source of truth; the drawer, the backdrop, and the
//! content input suspension all derive from [`NavPanelState::is_open`].
//! Construction with no links disables the panel after one logged warning.

mod nav_panel_component;
mod state;

pub use nav_panel_component::NavPanelComponent;
pub use state::{DEFAULT_BREAKPOINT, NavPanelState, PanelItem, Trigger};
