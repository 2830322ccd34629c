use kotp_types::Route;
use ratatui::layout::Rect;
use tracing::warn;

/// Viewport width (columns) below which navigation collapses behind the
/// toggle control. Override with `KOTP_NAV_BREAKPOINT`.
pub const DEFAULT_BREAKPOINT: u16 = 100;

/// A focusable item inside the open panel, in ring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelItem {
    /// The close control at the top of the panel.
    Close,
    /// One navigation link.
    Link(Route),
}

/// The chrome control that opened the panel. Keyboard focus returns to it
/// when the panel closes while the control is still rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The menu toggle in the header.
    Toggle,
}

/// State for the slide-in navigation panel.
///
/// `is_open` is the single source of truth: the drawer, the dimmed backdrop,
/// and the suspension of content input are all derived from it at render and
/// routing time. All transitions go through [`open`](Self::open),
/// [`close`](Self::close), [`toggle`](Self::toggle) and
/// [`dispose`](Self::dispose), each of which guards on the current state so
/// repeat calls cannot double any side effect.
#[derive(Debug, Clone)]
pub struct NavPanelState {
    /// False when constructed without links or after `dispose`; a disabled
    /// panel ignores every transition and renders nothing.
    enabled: bool,
    is_open: bool,
    links: Vec<Route>,
    /// Focusable items, rebuilt each time the panel opens and discarded on
    /// close.
    focus_ring: Vec<PanelItem>,
    focus_idx: usize,
    last_trigger: Option<Trigger>,
    breakpoint: u16,
    viewport_width: u16,
    /// Last rendered drawer area; used for overlay-versus-panel hit testing.
    pub last_area: Rect,
    /// Last rendered row areas, one per ring item.
    pub per_item_areas: Vec<Rect>,
}

impl NavPanelState {
    /// Creates the panel state for the given navigation links.
    ///
    /// An empty link list leaves the panel permanently disabled: one warning
    /// is logged and every later transition is a no-op. The breakpoint comes
    /// from `KOTP_NAV_BREAKPOINT` when set to a valid column count.
    pub fn new(links: Vec<Route>) -> Self {
        Self::with_breakpoint(links, breakpoint_from_env())
    }

    /// Like [`new`](Self::new) with an explicit breakpoint.
    pub fn with_breakpoint(links: Vec<Route>, breakpoint: u16) -> Self {
        let enabled = !links.is_empty();
        if !enabled {
            warn!("navigation links missing; panel controller disabled");
        }
        Self {
            enabled,
            is_open: false,
            links,
            focus_ring: Vec::new(),
            focus_idx: 0,
            last_trigger: None,
            breakpoint,
            viewport_width: 0,
            last_area: Rect::default(),
            per_item_areas: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Navigation links in display order.
    pub fn links(&self) -> &[Route] {
        &self.links
    }

    pub fn breakpoint(&self) -> u16 {
        self.breakpoint
    }

    /// Whether navigation is currently collapsed behind the toggle control.
    /// Below the breakpoint the header shows the toggle; at or above it the
    /// links render inline and the panel cannot open.
    pub fn panel_mode_active(&self) -> bool {
        self.enabled && self.viewport_width < self.breakpoint
    }

    /// Opens the panel, snapshots the focus ring with focus on the close
    /// control, and remembers the opening trigger. No-op while already open,
    /// while disabled, or while the toggle is not rendered.
    pub fn open(&mut self, trigger: Trigger) {
        if !self.enabled || self.is_open || !self.panel_mode_active() {
            return;
        }
        self.focus_ring = self.build_ring();
        self.focus_idx = 0;
        self.last_trigger = Some(trigger);
        self.is_open = true;
    }

    /// Closes the panel and discards the focus ring. Returns the opening
    /// trigger when keyboard focus should return to it; `None` when the
    /// panel was already closed or the trigger is no longer rendered
    /// (viewport at or above the breakpoint).
    pub fn close(&mut self) -> Option<Trigger> {
        if !self.is_open {
            return None;
        }
        self.is_open = false;
        self.focus_ring.clear();
        self.focus_idx = 0;
        let trigger = self.last_trigger.take();
        if self.panel_mode_active() { trigger } else { None }
    }

    /// Opens when closed, closes when open. Returns the focus-restore
    /// trigger exactly as [`close`](Self::close) does.
    pub fn toggle(&mut self, trigger: Trigger) -> Option<Trigger> {
        if self.is_open {
            self.close()
        } else {
            self.open(trigger);
            None
        }
    }

    /// Resets to the closed, unfocused state and disables the panel for
    /// teardown. Later transitions are no-ops.
    pub fn dispose(&mut self) {
        self.is_open = false;
        self.focus_ring.clear();
        self.focus_idx = 0;
        self.last_trigger = None;
        self.last_area = Rect::default();
        self.per_item_areas.clear();
        self.enabled = false;
    }

    /// Records the new viewport width. Crossing the breakpoint upward while
    /// open forces an immediate close with no focus restore; shrinking back
    /// below it never reopens the panel.
    pub fn handle_viewport_change(&mut self, width: u16) {
        self.viewport_width = width;
        if self.is_open && width >= self.breakpoint {
            self.close();
        }
    }

    /// Moves focus to the next ring item, wrapping past the end. Inert while
    /// closed.
    pub fn focus_next(&mut self) {
        if !self.is_open || self.focus_ring.is_empty() {
            return;
        }
        self.focus_idx = (self.focus_idx + 1) % self.focus_ring.len();
    }

    /// Moves focus to the previous ring item, wrapping past the start. Inert
    /// while closed.
    pub fn focus_prev(&mut self) {
        if !self.is_open || self.focus_ring.is_empty() {
            return;
        }
        self.focus_idx = (self.focus_idx + self.focus_ring.len() - 1) % self.focus_ring.len();
    }

    /// Moves focus directly to a ring item, for mouse targeting.
    pub fn focus_item_at(&mut self, index: usize) {
        if self.is_open && index < self.focus_ring.len() {
            self.focus_idx = index;
        }
    }

    /// The ring item holding focus, while open.
    pub fn focused_item(&self) -> Option<PanelItem> {
        if !self.is_open {
            return None;
        }
        self.focus_ring.get(self.focus_idx).copied()
    }

    /// Ring items in order, while open.
    pub fn ring(&self) -> &[PanelItem] {
        &self.focus_ring
    }

    fn build_ring(&self) -> Vec<PanelItem> {
        let mut ring = Vec::with_capacity(self.links.len() + 1);
        ring.push(PanelItem::Close);
        ring.extend(self.links.iter().map(|route| PanelItem::Link(*route)));
        ring
    }
}

fn breakpoint_from_env() -> u16 {
    std::env::var("KOTP_NAV_BREAKPOINT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_BREAKPOINT)
}
