//! UI components: navigation panel, home, tables, pundits, account.

pub mod auth;
pub mod common;
pub mod component;
pub mod home;
pub mod nav_panel;
pub mod pundits;
pub mod tables;

pub use auth::AuthComponent;
pub use component::*;
pub use home::HomeComponent;
pub use nav_panel::NavPanelComponent;
pub use pundits::PunditsComponent;
pub use tables::TablesComponent;

use ratatui::layout::{Position, Rect};

/// Finds the index of the target rect containing the given mouse position.
///
/// The container acts as an outer guard: positions outside it never match,
/// even when a stale target rect would.
pub fn find_target_index_by_mouse_position(container: &Rect, targets: &[Rect], x: u16, y: u16) -> Option<usize> {
    let position = Position { x, y };
    if !container.contains(position) {
        return None;
    }
    targets.iter().position(|target| target.contains(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_testing_respects_container_bounds() {
        let container = Rect::new(10, 10, 20, 10);
        let targets = vec![Rect::new(10, 10, 20, 2), Rect::new(10, 12, 20, 2)];

        assert_eq!(find_target_index_by_mouse_position(&container, &targets, 11, 11), Some(0));
        assert_eq!(find_target_index_by_mouse_position(&container, &targets, 11, 13), Some(1));
        // Inside container, between targets
        assert_eq!(find_target_index_by_mouse_position(&container, &targets, 11, 19), None);
        // Outside container entirely
        assert_eq!(find_target_index_by_mouse_position(&container, &targets, 0, 0), None);
    }
}
