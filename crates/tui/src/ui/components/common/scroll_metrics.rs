//! Shared scrolling metrics for vertically scrollable panes.
//!
//! Tracks content height, viewport height, and the current offset in
//! terminal row units, so values apply directly to paragraph scrolling.
//! The tables view also uses the metrics to decide when its jump-to-top
//! control should appear.

#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollMetrics {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
}

impl ScrollMetrics {
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    pub const fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Maximum valid scroll offset.
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height && self.viewport_height > 0
    }

    /// True once the view has scrolled at least a full viewport down. The
    /// jump-to-top control stays hidden near the top of the content.
    pub fn past_first_viewport(&self) -> bool {
        self.viewport_height > 0 && self.offset >= self.viewport_height
    }

    /// Updates viewport height and clamps the current offset.
    pub fn update_viewport_height(&mut self, viewport_height: u16) {
        self.viewport_height = viewport_height;
        self.clamp_offset();
    }

    /// Updates content height and clamps the current offset.
    pub fn update_content_height(&mut self, content_height: u16) {
        self.content_height = content_height;
        self.clamp_offset();
    }

    /// Scrolls by relative line count (`+` down, `-` up).
    pub fn scroll_lines(&mut self, delta: i16) {
        if delta == 0 || !self.is_scrollable() {
            return;
        }
        let current = i32::from(self.offset);
        let max = i32::from(self.max_offset());
        let next = (current + i32::from(delta)).clamp(0, max);
        self.offset = next as u16;
    }

    /// Scrolls by viewport page increments.
    pub fn scroll_pages(&mut self, delta_pages: i16) {
        if delta_pages == 0 || self.viewport_height == 0 {
            return;
        }
        let delta = i32::from(self.viewport_height).saturating_mul(i32::from(delta_pages));
        self.scroll_lines(delta.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16);
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Adjusts the offset so `height` rows starting at `first_line` are fully
    /// inside the viewport, scrolling as little as possible.
    pub fn ensure_visible(&mut self, first_line: u16, height: u16) {
        if self.viewport_height == 0 {
            return;
        }
        if first_line < self.offset {
            self.offset = first_line;
            return;
        }
        let needed_end = u32::from(first_line) + u32::from(height.max(1));
        let view_end = u32::from(self.offset) + u32::from(self.viewport_height);
        if needed_end > view_end {
            let new_offset = needed_end.saturating_sub(u32::from(self.viewport_height));
            self.offset = new_offset.min(u32::from(self.max_offset())) as u16;
        }
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollMetrics;

    #[test]
    fn scrolling_clamps_to_bounds() {
        let mut metrics = ScrollMetrics::default();
        metrics.update_viewport_height(5);
        metrics.update_content_height(20);

        metrics.scroll_lines(3);
        assert_eq!(metrics.offset(), 3);

        metrics.scroll_lines(-10);
        assert_eq!(metrics.offset(), 0);

        metrics.scroll_lines(100);
        assert_eq!(metrics.offset(), 15);
    }

    #[test]
    fn page_scrolling_uses_viewport_height() {
        let mut metrics = ScrollMetrics::default();
        metrics.update_viewport_height(4);
        metrics.update_content_height(40);

        metrics.scroll_pages(1);
        assert_eq!(metrics.offset(), 4);

        metrics.scroll_pages(2);
        assert_eq!(metrics.offset(), 12);

        metrics.scroll_pages(-1);
        assert_eq!(metrics.offset(), 8);
    }

    #[test]
    fn jump_to_top_control_appears_after_one_viewport() {
        let mut metrics = ScrollMetrics::default();
        metrics.update_viewport_height(10);
        metrics.update_content_height(50);

        assert!(!metrics.past_first_viewport());
        metrics.scroll_lines(9);
        assert!(!metrics.past_first_viewport());
        metrics.scroll_lines(1);
        assert!(metrics.past_first_viewport());

        metrics.scroll_to_top();
        assert!(!metrics.past_first_viewport());
    }

    #[test]
    fn ensure_visible_scrolls_minimally() {
        let mut metrics = ScrollMetrics::default();
        metrics.update_viewport_height(5);
        metrics.update_content_height(30);

        // Below the viewport: scroll down just enough.
        metrics.ensure_visible(9, 2);
        assert_eq!(metrics.offset(), 6);

        // Already visible: no movement.
        metrics.ensure_visible(7, 2);
        assert_eq!(metrics.offset(), 6);

        // Above the viewport: snap up to the row.
        metrics.ensure_visible(2, 1);
        assert_eq!(metrics.offset(), 2);
    }
}
