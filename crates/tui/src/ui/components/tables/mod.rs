//! League tables screen.
//!
//! Shows one division table at a time with clamped vertical scrolling. Every
//! row owns an expandable stat detail that toggles independently of its
//! neighbours, and a back-to-top control appears in the footer once the view
//! has scrolled at least one full viewport from the top.

mod state;
mod tables_component;

pub use state::{DETAIL_LINES, TablesState};
pub use tables_component::TablesComponent;
