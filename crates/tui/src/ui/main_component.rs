//! Top-level view: header chrome, the active screen and the hint bar.
//!
//! [`MainView`] owns the mounted content component and the navigation panel
//! overlay. Input is mediated here: the open panel traps everything, the
//! header chrome takes keys while `ChromeFocus::Nav`, and the content view
//! gets the rest.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use kotp_types::{Effect, Msg, Route};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, ChromeFocus};
use crate::ui::components::nav_panel::Trigger;
use crate::ui::components::{
    AuthComponent, Component, HomeComponent, NavPanelComponent, PunditsComponent, TablesComponent,
};
use crate::ui::theme::theme_helpers as th;

pub struct MainView {
    /// Current main view component.
    pub content_view: Option<Box<dyn Component>>,
    /// Slide-in navigation panel, rendered over everything while open.
    pub nav_panel_view: NavPanelComponent,

    /// Hit rect of the menu toggle while the header is in panel mode.
    toggle_area: Rect,
    /// Hit rects of the inline header links while above the breakpoint.
    nav_link_areas: Vec<Rect>,
}

impl MainView {
    pub fn new() -> Self {
        Self {
            content_view: Some(Box::new(HomeComponent)),
            nav_panel_view: NavPanelComponent::default(),
            toggle_area: Rect::default(),
            nav_link_areas: Vec::new(),
        }
    }

    /// Mounts the component for `route` and records it as current.
    ///
    /// Not intended to be called directly; navigation goes through
    /// `Effect::SwitchTo` so a closing panel finishes its turn first.
    pub fn set_current_route(&mut self, app: &mut App, route: Route) {
        let view: Box<dyn Component> = match route {
            Route::Home => Box::new(HomeComponent),
            Route::Tables => Box::new(TablesComponent),
            Route::Pundits => Box::new(PunditsComponent),
            Route::Account => Box::new(AuthComponent),
        };
        app.route = route;
        if let Some(index) = Route::ALL.iter().position(|r| *r == route) {
            app.header_sel = index;
        }
        self.content_view = Some(view);
    }

    fn render_header(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let nav_focused = app.chrome_focus == ChromeFocus::Nav && !app.nav.is_open();
        let block = th::block(theme, None, nav_focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let brand = Line::from(vec![
            Span::styled(
                "King of the Pundits",
                theme.accent_emphasis_style().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", app.content.season), theme.text_muted_style()),
        ]);
        frame.render_widget(Paragraph::new(brand), inner);

        self.toggle_area = Rect::default();
        self.nav_link_areas.clear();
        if !app.nav.is_enabled() {
            return;
        }

        if app.nav.panel_mode_active() {
            // Below the breakpoint the links collapse behind one control.
            let label = if app.nav.is_open() { "✕ Close" } else { "☰ Menu" };
            let width = (label.width() as u16 + 2).min(inner.width);
            let area = Rect::new(inner.right().saturating_sub(width), inner.y, width, 1);
            let style = if nav_focused {
                theme.selection_style()
            } else {
                theme.accent_primary_style()
            };
            frame.render_widget(Paragraph::new(label).centered().style(style), area);
            self.toggle_area = area;
        } else {
            let links = app.nav.links();
            let selected = app.header_sel.min(links.len().saturating_sub(1));
            let total: u16 = links
                .iter()
                .map(|route| route.label().width() as u16 + 2)
                .sum::<u16>()
                .saturating_sub(2);
            let start_x = inner.right().saturating_sub(total.min(inner.width));

            let mut spans: Vec<Span> = Vec::with_capacity(links.len() * 2);
            let mut x = start_x;
            for (index, route) in links.iter().enumerate() {
                if index > 0 {
                    spans.push(Span::raw("  "));
                    x += 2;
                }
                let label = route.label();
                let mut style = if *route == app.route {
                    theme.accent_emphasis_style().add_modifier(Modifier::UNDERLINED)
                } else {
                    theme.text_secondary_style()
                };
                if nav_focused && index == selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(label, style));
                let width = label.width() as u16;
                self.nav_link_areas.push(Rect::new(x, inner.y, width, 1));
                x += width;
            }
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(start_x, inner.y, total.min(inner.width), 1),
            );
        }
    }
}

impl Default for MainView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        let mut effects = app.update(msg);
        if let Msg::Resize(..) = msg {
            // Header rects are re-recorded on the next render; until then
            // they must not catch clicks at the old positions.
            self.toggle_area = Rect::default();
            self.nav_link_areas.clear();
        }
        effects.extend(self.nav_panel_view.handle_message(app, msg));
        if let Some(content) = self.content_view.as_mut() {
            effects.extend(content.handle_message(app, msg));
        }
        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        // The open panel owns the keyboard outright.
        if app.nav.is_open() {
            return self.nav_panel_view.handle_key_events(app, key);
        }

        if app.chrome_focus == ChromeFocus::Nav {
            match key.code {
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
                    app.chrome_focus = ChromeFocus::Content;
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if app.nav.panel_mode_active() {
                        app.nav.open(Trigger::Toggle);
                    } else if let Some(route) = app.nav.links().get(app.header_sel).copied() {
                        return vec![Effect::SwitchTo(route)];
                    }
                }
                KeyCode::Left | KeyCode::Right if !app.nav.panel_mode_active() => {
                    let len = app.nav.links().len();
                    if len > 0 {
                        app.header_sel = if key.code == KeyCode::Right {
                            (app.header_sel + 1) % len
                        } else {
                            (app.header_sel + len - 1) % len
                        };
                    }
                }
                _ => {}
            }
            return Vec::new();
        }

        if let Some(content) = self.content_view.as_mut() {
            return content.handle_key_events(app, key);
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if app.nav.is_open() {
            return self.nav_panel_view.handle_mouse_events(app, mouse);
        }

        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let position = Position {
                x: mouse.column,
                y: mouse.row,
            };
            if self.toggle_area.contains(position) {
                app.chrome_focus = ChromeFocus::Nav;
                app.nav.open(Trigger::Toggle);
                return Vec::new();
            }
            if let Some(index) = self
                .nav_link_areas
                .iter()
                .position(|area| area.contains(position))
            {
                app.header_sel = index;
                app.chrome_focus = ChromeFocus::Nav;
                if let Some(route) = app.nav.links().get(index).copied() {
                    return vec![Effect::SwitchTo(route)];
                }
                return Vec::new();
            }
        }

        if let Some(content) = self.content_view.as_mut() {
            return content.handle_mouse_events(app, mouse);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the whole frame so resizes never leave stale cells behind.
        let bg_fill =
            Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let [header_area, content_area, hints_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header_area, app);

        if let Some(current) = self.content_view.as_mut() {
            current.render(frame, content_area, app);
        }

        let mut hint_spans: Vec<Span> = self.get_hint_spans(app);
        if app.ctx.debug_enabled {
            hint_spans.push(Span::styled(
                format!(
                    " · {}x{} bp {}",
                    area.width,
                    area.height,
                    app.nav.breakpoint()
                ),
                app.ctx.theme.text_muted_style(),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style()),
            hints_area,
        );

        // The panel draws last so its backdrop dims all of the above.
        if app.nav.is_open() {
            self.nav_panel_view.render(frame, area, app);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> =
            vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];

        if app.nav.is_open() {
            hint_spans.extend(self.nav_panel_view.get_hint_spans(app));
            return hint_spans;
        }

        if app.chrome_focus == ChromeFocus::Nav {
            let hints: &[(&str, &str)] = if app.nav.panel_mode_active() {
                &[("Enter", "open menu"), ("Tab", "content")]
            } else {
                &[("←/→", "link"), ("Enter", "go"), ("Tab", "content")]
            };
            hint_spans.extend(th::build_hint_spans(&*app.ctx.theme, hints));
            return hint_spans;
        }

        if let Some(content) = self.content_view.as_ref() {
            hint_spans.extend(content.get_hint_spans(app));
        }
        hint_spans
    }
}
