use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use kotp_types::{Effect, Msg};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::Span,
    widgets::{Block, Clear},
};

use super::state::{PanelItem, Trigger};
use crate::app::{App, ChromeFocus};
use crate::ui::components::component::Component;
use crate::ui::components::find_target_index_by_mouse_position;
use crate::ui::theme::theme_helpers as th;

/// Slide-in navigation panel with a dimmed backdrop.
///
/// Rendered over the whole frame while [`NavPanelState::is_open`] and handed
/// every input event for that duration, so content beneath it neither scrolls
/// nor receives keys. All state transitions live in the state; this component
/// only maps events onto them and draws the result.
///
/// [`NavPanelState::is_open`]: super::NavPanelState::is_open
#[derive(Debug, Default)]
pub struct NavPanelComponent;

impl NavPanelComponent {
    fn activate(app: &mut App, item: PanelItem) -> Vec<Effect> {
        match item {
            PanelItem::Close => {
                Self::close_with_restore(app);
                Vec::new()
            }
            PanelItem::Link(route) => {
                // The close happens in this same event turn; the route switch
                // rides the effect queue and lands focus in the new screen,
                // not back on the toggle.
                let _ = app.nav.close();
                app.chrome_focus = ChromeFocus::Content;
                vec![Effect::SwitchTo(route)]
            }
        }
    }

    fn close_with_restore(app: &mut App) {
        if let Some(Trigger::Toggle) = app.nav.close() {
            app.chrome_focus = ChromeFocus::Nav;
        }
    }

    fn drawer_rect(area: Rect) -> Rect {
        let width = (u32::from(area.width) * 7 / 10)
            .clamp(u32::from(area.width.min(24)), u32::from(area.width)) as u16;
        Rect {
            x: area.right().saturating_sub(width),
            y: area.y,
            width,
            height: area.height,
        }
    }
}

impl Component for NavPanelComponent {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        // A resize invalidates the recorded layout until the next render;
        // stale rects must not steer clicks in the meantime.
        if let Msg::Resize(..) = msg {
            app.nav.last_area = Rect::default();
            app.nav.per_item_areas.clear();
        }
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => {
                Self::close_with_restore(app);
            }
            KeyCode::Tab | KeyCode::Down => {
                app.nav.focus_next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.nav.focus_prev();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(item) = app.nav.focused_item() {
                    return Self::activate(app, item);
                }
            }
            // Every other key is swallowed while the panel is open.
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }

        let position = Position {
            x: mouse.column,
            y: mouse.row,
        };
        if !app.nav.last_area.contains(position) {
            // Pointer went down on the dimmed backdrop.
            Self::close_with_restore(app);
            return Vec::new();
        }

        let target = find_target_index_by_mouse_position(
            &app.nav.last_area,
            &app.nav.per_item_areas,
            mouse.column,
            mouse.row,
        );
        if let Some(index) = target {
            app.nav.focus_item_at(index);
            if let Some(item) = app.nav.focused_item() {
                return Self::activate(app, item);
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        if !app.nav.is_open() {
            return;
        }
        let theme = &*app.ctx.theme;

        // Dim everything beneath, then clear and draw the drawer on top.
        frame.render_widget(Block::default().style(theme.overlay_background_style()), area);
        let drawer = Self::drawer_rect(area);
        frame.render_widget(Clear, drawer);
        frame.render_widget(th::block(theme, Some("Menu"), true), drawer);

        let items: Vec<PanelItem> = app.nav.ring().to_vec();
        let focused = app.nav.focused_item();
        let current_route = app.route;

        let mut constraints = vec![Constraint::Length(3); items.len()];
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).margin(1).split(drawer);

        let mut item_areas = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let row = rows[index];
            let label = match item {
                PanelItem::Close => "Close ✕".to_string(),
                PanelItem::Link(route) if *route == current_route => {
                    format!("{} ●", route.label())
                }
                PanelItem::Link(route) => route.label().to_string(),
            };
            th::render_button(frame, row, &label, true, focused == Some(*item), theme);
            item_areas.push(row);
        }

        app.nav.last_area = drawer;
        app.nav.per_item_areas = item_areas;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(
            &*app.ctx.theme,
            &[
                ("Esc", "close"),
                ("Tab/↓", "next"),
                ("S-Tab/↑", "previous"),
                ("Enter", "select"),
            ],
        )
    }
}
