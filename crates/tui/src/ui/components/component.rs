//! Component abstraction shared by every view in the TUI.

use crossterm::event::{KeyEvent, MouseEvent};
use kotp_types::{Effect, Msg};
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::Frame;

use crate::app::App;

/// A UI element that handles its own events and rendering.
///
/// Components read and mutate their slice of [`App`] state, report side
/// effects back to the runtime instead of navigating directly, and draw into
/// the `Rect` they are handed. All handlers default to no-ops so small views
/// only implement what they need.
pub(crate) trait Component {
    /// Respond to an application-level message (tick, resize).
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a key event while this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a mouse event routed to this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Key hints rendered in the footer while this component is active.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Draw the component into `rect`. State changes belong in the event
    /// handlers; rendering may only record layout for later hit testing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
