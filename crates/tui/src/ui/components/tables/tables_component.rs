use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use kotp_content::Standing;
use kotp_types::{Division, Effect};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Paragraph,
};

use crate::app::{App, ChromeFocus};
use crate::ui::components::common::clip_to_width;
use crate::ui::components::component::Component;
use crate::ui::components::find_target_index_by_mouse_position;
use crate::ui::theme::theme_helpers as th;

const NAME_COLUMN_WIDTH: usize = 18;

/// League tables screen: one division table at a time, rows with expandable
/// stat details, and a back-to-top control once the view has scrolled a full
/// viewport away from the top.
#[derive(Debug, Default)]
pub struct TablesComponent;

impl TablesComponent {
    fn keep_selection_visible(app: &mut App) {
        let rows = app.content.standings_for(app.tables.division());
        let names: Vec<&str> = rows.iter().map(|s| s.pundit.as_str()).collect();
        let layout = app.tables.row_layout(&names);
        if let Some((line, height)) = layout.get(app.tables.selected()).copied() {
            app.tables.scroll.ensure_visible(line, height);
        }
    }

    fn toggle_row(app: &mut App, index: usize) {
        let rows = app.content.standings_for(app.tables.division());
        let Some(standing) = rows.get(index) else {
            return;
        };
        let pundit = standing.pundit.clone();
        app.tables.select(index, rows.len());
        app.tables.toggle_expanded(&pundit);
        Self::keep_selection_visible(app);
    }

    fn main_line(standing: &Standing, expanded: bool) -> String {
        let marker = if expanded { "▾" } else { "▸" };
        format!(
            "{marker} {:>2}  {:<width$} {:>3} {:>3} {:>3} {:>4}  {}",
            standing.position,
            clip_to_width(&standing.pundit, NAME_COLUMN_WIDTH),
            standing.played,
            standing.exact,
            standing.close,
            standing.points,
            standing.form,
            width = NAME_COLUMN_WIDTH,
        )
    }

    fn detail_lines(standing: &Standing) -> [String; 2] {
        [
            format!(
                "      accuracy {}% over {} rounds",
                standing.accuracy_pct(),
                standing.played
            ),
            format!(
                "      best round {} pts · longest scoring streak {}",
                standing.best_round, standing.streak
            ),
        ]
    }
}

impl Component for TablesComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let row_count = app.content.standings_for(app.tables.division()).len();
        match key.code {
            KeyCode::Down => {
                app.tables.select_next(row_count);
                Self::keep_selection_visible(app);
            }
            KeyCode::Up => {
                app.tables.select_prev();
                Self::keep_selection_visible(app);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let selected = app.tables.selected();
                Self::toggle_row(app, selected);
            }
            KeyCode::Left => {
                app.tables.cycle_division(false);
            }
            KeyCode::Right => {
                app.tables.cycle_division(true);
            }
            KeyCode::PageDown => {
                app.tables.scroll.scroll_pages(1);
            }
            KeyCode::PageUp => {
                app.tables.scroll.scroll_pages(-1);
            }
            KeyCode::Char('t') | KeyCode::Home => {
                app.tables.jump_to_top();
            }
            KeyCode::Tab | KeyCode::BackTab => {
                app.chrome_focus = ChromeFocus::Nav;
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                app.tables.scroll.scroll_lines(3);
            }
            MouseEventKind::ScrollUp => {
                app.tables.scroll.scroll_lines(-3);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let target = find_target_index_by_mouse_position(
                    &app.tables.last_area,
                    &app.tables.per_row_areas,
                    mouse.column,
                    mouse.row,
                );
                if let Some(index) = target {
                    app.chrome_focus = ChromeFocus::Content;
                    Self::toggle_row(app, index);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let focused = app.chrome_focus == ChromeFocus::Content;
        let block = th::block(theme, Some("League Tables"), focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [division_line, header_line, rows_area, footer_line] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        // Division strip
        let mut division_spans: Vec<Span> = Vec::new();
        for (i, division) in Division::ALL.iter().enumerate() {
            if i > 0 {
                division_spans.push(Span::styled("  ·  ", theme.text_muted_style()));
            }
            let style = if *division == app.tables.division() {
                theme.accent_emphasis_style()
            } else {
                theme.text_secondary_style()
            };
            division_spans.push(Span::styled(division.label(), style));
        }
        frame.render_widget(Paragraph::new(Line::from(division_spans)), division_line);

        // Column header
        let header = format!(
            "   {:>2}  {:<width$} {:>3} {:>3} {:>3} {:>4}  {}",
            "#",
            "Pundit",
            "P",
            "E",
            "C",
            "Pts",
            "Form",
            width = NAME_COLUMN_WIDTH,
        );
        frame.render_widget(
            Paragraph::new(header).style(th::table_header_row_style(theme)),
            header_line,
        );

        // Rows with their expanded details, scrolled as one region.
        let standings = app.content.standings_for(app.tables.division());
        let names: Vec<&str> = standings.iter().map(|s| s.pundit.as_str()).collect();
        let layout = app.tables.row_layout(&names);
        let content_height = app.tables.content_height(&names);
        app.tables.scroll.update_viewport_height(rows_area.height);
        app.tables.scroll.update_content_height(content_height);
        let offset = app.tables.scroll.offset();
        let selected = app.tables.selected();

        let mut lines: Vec<Line> = Vec::with_capacity(usize::from(content_height));
        for (index, standing) in standings.iter().enumerate() {
            let expanded = app.tables.is_expanded(&standing.pundit);
            let row_style = if index == selected && focused {
                th::table_selected_style(theme)
            } else {
                th::table_row_style(theme, index)
            };
            lines.push(Line::styled(Self::main_line(standing, expanded), row_style));
            if expanded {
                for detail in Self::detail_lines(standing) {
                    lines.push(Line::styled(detail, theme.text_muted_style()));
                }
            }
        }
        frame.render_widget(
            Paragraph::new(Text::from(lines)).scroll((offset, 0)),
            rows_area,
        );

        // Hit rects for the main line of each row currently on screen.
        let visible = offset..offset.saturating_add(rows_area.height);
        let per_row_areas = layout
            .iter()
            .map(|(line, _)| {
                if visible.contains(line) {
                    Rect::new(rows_area.x, rows_area.y + (line - offset), rows_area.width, 1)
                } else {
                    Rect::default()
                }
            })
            .collect();
        app.tables.last_area = rows_area;
        app.tables.per_row_areas = per_row_areas;

        // Footer: standings date, plus back-to-top once far from the top.
        let mut footer_spans = vec![Span::styled(
            format!("Updated {}", app.content.updated.format("%-d %B %Y")),
            app.ctx.theme.text_muted_style(),
        )];
        if app.tables.back_to_top_available() {
            footer_spans.push(Span::styled("  ·  ", app.ctx.theme.text_muted_style()));
            footer_spans.push(Span::styled("t", app.ctx.theme.accent_emphasis_style()));
            footer_spans.push(Span::styled(" back to top", app.ctx.theme.text_muted_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(footer_spans)), footer_line);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hints = vec![
            ("↑/↓", "row"),
            ("Enter", "stat details"),
            ("←/→", "division"),
        ];
        if app.tables.back_to_top_available() {
            hints.push(("t", "back to top"));
        }
        hints.push(("Tab", "navigation"));
        th::build_hint_spans(&*app.ctx.theme, &hints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use kotp_content::SiteContent;
    use kotp_types::Msg;
    use kotp_util::preferences::UserPreferences;

    fn test_app() -> App {
        let content = SiteContent::from_embedded().expect("embedded content loads");
        let mut app = App::new(content, UserPreferences::ephemeral());
        app.update(&Msg::Resize(120, 40));
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_toggles_the_selected_stat_row() {
        let mut app = test_app();
        let mut tables = TablesComponent;
        let first = app.content.standings_for(app.tables.division())[0]
            .pundit
            .clone();

        tables.handle_key_events(&mut app, key(KeyCode::Enter));
        assert!(app.tables.is_expanded(&first));

        tables.handle_key_events(&mut app, key(KeyCode::Enter));
        assert!(!app.tables.is_expanded(&first));
    }

    #[test]
    fn expanded_rows_stay_open_while_others_toggle() {
        let mut app = test_app();
        let mut tables = TablesComponent;
        let rows: Vec<String> = app
            .content
            .standings_for(app.tables.division())
            .iter()
            .map(|s| s.pundit.clone())
            .collect();

        tables.handle_key_events(&mut app, key(KeyCode::Enter));
        tables.handle_key_events(&mut app, key(KeyCode::Down));
        tables.handle_key_events(&mut app, key(KeyCode::Enter));
        assert!(app.tables.is_expanded(&rows[0]));
        assert!(app.tables.is_expanded(&rows[1]));
    }

    #[test]
    fn arrow_keys_switch_divisions() {
        let mut app = test_app();
        let mut tables = TablesComponent;

        tables.handle_key_events(&mut app, key(KeyCode::Right));
        assert_eq!(app.tables.division(), Division::Championship);

        tables.handle_key_events(&mut app, key(KeyCode::Left));
        assert_eq!(app.tables.division(), Division::Premier);
    }

    #[test]
    fn t_returns_a_scrolled_table_to_the_top() {
        let mut app = test_app();
        let mut tables = TablesComponent;
        app.tables.scroll.update_viewport_height(4);
        app.tables.scroll.update_content_height(30);
        app.tables.scroll.scroll_lines(12);
        assert!(app.tables.back_to_top_available());

        tables.handle_key_events(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.tables.scroll.offset(), 0);
        assert!(!app.tables.back_to_top_available());
    }

    #[test]
    fn tab_hands_focus_to_the_navigation_chrome() {
        let mut app = test_app();
        let mut tables = TablesComponent;
        app.chrome_focus = ChromeFocus::Content;

        tables.handle_key_events(&mut app, key(KeyCode::Tab));
        assert_eq!(app.chrome_focus, ChromeFocus::Nav);
    }

    #[test]
    fn clicking_a_row_hit_rect_selects_and_expands_it() {
        let mut app = test_app();
        let mut tables = TablesComponent;
        app.tables.last_area = Rect::new(2, 5, 60, 10);
        app.tables.per_row_areas = vec![
            Rect::new(2, 5, 60, 1),
            Rect::new(2, 6, 60, 1),
            Rect::new(2, 7, 60, 1),
        ];
        let second = app.content.standings_for(app.tables.division())[1]
            .pundit
            .clone();

        tables.handle_mouse_events(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 10,
                row: 6,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.tables.selected(), 1);
        assert!(app.tables.is_expanded(&second));
    }
}
