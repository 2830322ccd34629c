//! Pundit roster screen.
//!
//! A two-pane view: the roster list on the left, narrowed by an optional
//! division filter, and a profile card for the selected pundit on the right.
//! The profile pulls the pundit's current-season record from the standings
//! when one exists.

mod pundits_component;
mod state;

pub use pundits_component::PunditsComponent;
pub use state::PunditsState;
