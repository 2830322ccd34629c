use kotp_types::Division;
use ratatui::layout::Rect;

/// State for the pundit roster screen: a division filter plus the roster
/// selection. `None` shows every division.
#[derive(Debug, Clone, Default)]
pub struct PunditsState {
    filter: Option<Division>,
    selected: usize,
    /// Last rendered list area, for mouse hit testing.
    pub last_area: Rect,
    /// Hit rect per visible roster row.
    pub per_row_areas: Vec<Rect>,
}

impl PunditsState {
    pub fn filter(&self) -> Option<Division> {
        self.filter
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Steps the filter through All and each division, wrapping at both ends.
    /// Changing the filter restarts the selection at the top.
    pub fn cycle_filter(&mut self, forward: bool) {
        let order: Vec<Option<Division>> = std::iter::once(None)
            .chain(Division::ALL.iter().copied().map(Some))
            .collect();
        let index = order.iter().position(|f| *f == self.filter).unwrap_or(0);
        let next = if forward {
            (index + 1) % order.len()
        } else {
            (index + order.len() - 1) % order.len()
        };
        self.filter = order[next];
        self.selected = 0;
    }

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
}
