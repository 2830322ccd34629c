use std::collections::HashSet;

use kotp_types::Division;
use ratatui::layout::Rect;

use crate::ui::components::common::ScrollMetrics;

/// Lines an expanded stat row adds beneath its table row.
pub const DETAIL_LINES: u16 = 2;

/// State for the league tables screen.
///
/// Each table row owns an expandable stat detail, keyed by pundit name so
/// expansion survives switching divisions. Scrolling goes through
/// [`ScrollMetrics`]; the back-to-top control derives its visibility from the
/// same metrics.
#[derive(Debug, Clone)]
pub struct TablesState {
    division: Division,
    selected: usize,
    expanded: HashSet<String>,
    pub scroll: ScrollMetrics,
    /// Last rendered rows viewport, for mouse hit testing.
    pub last_area: Rect,
    /// Hit rect per table row, `Rect::default()` while scrolled out of view.
    pub per_row_areas: Vec<Rect>,
}

impl Default for TablesState {
    fn default() -> Self {
        Self {
            division: Division::Premier,
            selected: 0,
            expanded: HashSet::new(),
            scroll: ScrollMetrics::default(),
            last_area: Rect::default(),
            per_row_areas: Vec::new(),
        }
    }
}

impl TablesState {
    pub fn division(&self) -> Division {
        self.division
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Switches to another division table, back at the top with a fresh
    /// selection. Expanded stat rows keep their state per pundit.
    pub fn set_division(&mut self, division: Division) {
        if self.division == division {
            return;
        }
        self.division = division;
        self.selected = 0;
        self.scroll.scroll_to_top();
    }

    /// Steps the division left or right through the fixed order, stopping at
    /// the edges.
    pub fn cycle_division(&mut self, forward: bool) {
        let all = Division::ALL;
        let index = all.iter().position(|d| *d == self.division).unwrap_or(0);
        let next = if forward {
            (index + 1).min(all.len() - 1)
        } else {
            index.saturating_sub(1)
        };
        self.set_division(all[next]);
    }

    /// Moves the selection, clamped to `row_count`.
    pub fn select_next(&mut self, row_count: usize) {
        if row_count == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(row_count - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select(&mut self, index: usize, row_count: usize) {
        if index < row_count {
            self.selected = index;
        }
    }

    pub fn is_expanded(&self, pundit: &str) -> bool {
        self.expanded.contains(pundit)
    }

    /// Flips one row's stat detail. Returns the new expanded state, which is
    /// what the row's toggle marker renders.
    pub fn toggle_expanded(&mut self, pundit: &str) -> bool {
        if self.expanded.remove(pundit) {
            false
        } else {
            self.expanded.insert(pundit.to_string());
            true
        }
    }

    /// First line and height of every row in the scrolled rows region, given
    /// the rendered row order. Shared by rendering and hit testing so the two
    /// can never disagree.
    pub fn row_layout(&self, pundits: &[&str]) -> Vec<(u16, u16)> {
        let mut layout = Vec::with_capacity(pundits.len());
        let mut line = 0u16;
        for pundit in pundits {
            let height = if self.is_expanded(pundit) {
                1 + DETAIL_LINES
            } else {
                1
            };
            layout.push((line, height));
            line = line.saturating_add(height);
        }
        layout
    }

    /// Total line count of the rows region.
    pub fn content_height(&self, pundits: &[&str]) -> u16 {
        self.row_layout(pundits)
            .last()
            .map(|(line, height)| line + height)
            .unwrap_or(0)
    }

    /// Whether the back-to-top control should be offered: only once the view
    /// has scrolled at least one full viewport away from the top.
    pub fn back_to_top_available(&self) -> bool {
        self.scroll.past_first_viewport()
    }

    /// Returns the rows region to the top.
    pub fn jump_to_top(&mut self) {
        self.scroll.scroll_to_top();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_expand_and_collapse_independently() {
        let mut state = TablesState::default();
        assert!(state.toggle_expanded("Rita"));
        assert!(state.toggle_expanded("Dev"));
        assert!(state.is_expanded("Rita"));
        assert!(state.is_expanded("Dev"));

        assert!(!state.toggle_expanded("Rita"));
        assert!(!state.is_expanded("Rita"));
        assert!(state.is_expanded("Dev"));
    }

    #[test]
    fn row_layout_grows_with_expanded_details() {
        let mut state = TablesState::default();
        let pundits = ["Rita", "Dev", "Mo"];
        assert_eq!(state.row_layout(&pundits), vec![(0, 1), (1, 1), (2, 1)]);
        assert_eq!(state.content_height(&pundits), 3);

        state.toggle_expanded("Dev");
        assert_eq!(
            state.row_layout(&pundits),
            vec![(0, 1), (1, 1 + DETAIL_LINES), (2 + DETAIL_LINES, 1)]
        );
        assert_eq!(state.content_height(&pundits), 3 + DETAIL_LINES);
    }

    #[test]
    fn division_switch_resets_selection_and_scroll() {
        let mut state = TablesState::default();
        state.scroll.update_viewport_height(5);
        state.scroll.update_content_height(30);
        state.select_next(10);
        state.scroll.scroll_lines(8);

        state.set_division(Division::Sunday);
        assert_eq!(state.division(), Division::Sunday);
        assert_eq!(state.selected(), 0);
        assert_eq!(state.scroll.offset(), 0);
    }

    #[test]
    fn division_cycling_stops_at_the_edges() {
        let mut state = TablesState::default();
        state.cycle_division(false);
        assert_eq!(state.division(), Division::Premier);

        state.cycle_division(true);
        assert_eq!(state.division(), Division::Championship);
        state.cycle_division(true);
        assert_eq!(state.division(), Division::Sunday);
        state.cycle_division(true);
        assert_eq!(state.division(), Division::Sunday);
    }

    #[test]
    fn selection_clamps_to_the_row_count() {
        let mut state = TablesState::default();
        state.select_prev();
        assert_eq!(state.selected(), 0);

        for _ in 0..10 {
            state.select_next(3);
        }
        assert_eq!(state.selected(), 2);
    }

    #[test]
    fn back_to_top_appears_after_a_full_viewport() {
        let mut state = TablesState::default();
        state.scroll.update_viewport_height(10);
        state.scroll.update_content_height(50);
        assert!(!state.back_to_top_available());

        state.scroll.scroll_lines(9);
        assert!(!state.back_to_top_available());

        state.scroll.scroll_lines(1);
        assert!(state.back_to_top_available());

        state.jump_to_top();
        assert_eq!(state.scroll.offset(), 0);
        assert!(!state.back_to_top_available());
    }
}
