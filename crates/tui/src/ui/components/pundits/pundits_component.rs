use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use kotp_content::Pundit;
use kotp_types::{Division, Effect};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, ChromeFocus};
use crate::ui::components::component::Component;
use crate::ui::components::find_target_index_by_mouse_position;
use crate::ui::theme::theme_helpers as th;

/// Pundit roster screen: a filterable list on the left, a profile card for
/// the selected pundit on the right.
#[derive(Debug, Default)]
pub struct PunditsComponent;

impl PunditsComponent {
    fn filter_label(filter: Option<Division>) -> &'static str {
        match filter {
            None => "All divisions",
            Some(division) => division.label(),
        }
    }

    fn badge_text(division: Division) -> String {
        let id = division.id();
        format!(" {} ", id[..3].to_ascii_uppercase())
    }

    fn profile_lines<'a>(app: &'a App, pundit: &'a Pundit, width: usize) -> Vec<Line<'a>> {
        let theme = &*app.ctx.theme;
        let mut lines = vec![
            Line::styled(pundit.name.clone(), theme.accent_emphasis_style()),
            Line::from(vec![
                Span::styled(Self::badge_text(pundit.division), th::badge_style(theme)),
                Span::styled(
                    format!("  {}", pundit.division.label()),
                    theme.text_secondary_style(),
                ),
            ]),
            Line::default(),
            Line::styled(
                format!(
                    "Joined {} · {} season{}",
                    pundit.joined.format("%B %Y"),
                    pundit.seasons,
                    if pundit.seasons == 1 { "" } else { "s" }
                ),
                theme.text_primary_style(),
            ),
            Line::default(),
        ];
        for wrapped in textwrap::wrap(&pundit.catchphrase, width.max(12)) {
            lines.push(Line::styled(
                format!("“{wrapped}”"),
                theme.text_muted_style(),
            ));
        }
        lines.push(Line::default());

        match app.content.standings.iter().find(|s| s.pundit == pundit.name) {
            Some(standing) => {
                lines.push(Line::styled("This season", theme.text_secondary_style()));
                lines.push(Line::styled(
                    format!(
                        "#{} in the table · {} pts from {} rounds",
                        standing.position, standing.points, standing.played
                    ),
                    theme.text_primary_style(),
                ));
                lines.push(Line::styled(
                    format!(
                        "{} exact · {} close · form {}",
                        standing.exact, standing.close, standing.form
                    ),
                    theme.text_primary_style(),
                ));
            }
            None => lines.push(Line::styled(
                "No scored rounds yet this season.",
                theme.text_muted_style(),
            )),
        }
        lines
    }
}

impl Component for PunditsComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let roster_len = app.content.pundits_for(app.pundits.filter()).len();
        match key.code {
            KeyCode::Down => app.pundits.select_next(roster_len),
            KeyCode::Up => app.pundits.select_prev(),
            KeyCode::Left => app.pundits.cycle_filter(false),
            KeyCode::Right => app.pundits.cycle_filter(true),
            KeyCode::Tab | KeyCode::BackTab => {
                app.chrome_focus = ChromeFocus::Nav;
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let target = find_target_index_by_mouse_position(
                &app.pundits.last_area,
                &app.pundits.per_row_areas,
                mouse.column,
                mouse.row,
            );
            if let Some(index) = target {
                let roster_len = app.content.pundits_for(app.pundits.filter()).len();
                app.chrome_focus = ChromeFocus::Content;
                app.pundits.select(index, roster_len);
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let focused = app.chrome_focus == ChromeFocus::Content;
        let filter = app.pundits.filter();
        let roster: Vec<Pundit> = app
            .content
            .pundits_for(filter)
            .into_iter()
            .cloned()
            .collect();
        let selected = app.pundits.selected().min(roster.len().saturating_sub(1));

        let [list_rect, profile_rect] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(rect);

        // Roster list
        {
            let theme = &*app.ctx.theme;
            let title = format!("Pundits · {}", Self::filter_label(filter));
            let block = th::block(theme, Some(title.as_str()), focused);
            let inner = block.inner(list_rect);
            frame.render_widget(block, list_rect);

            let mut lines: Vec<Line> = Vec::with_capacity(roster.len());
            for (index, pundit) in roster.iter().enumerate() {
                let style = if index == selected && focused && !roster.is_empty() {
                    theme.selection_style()
                } else {
                    th::table_row_style(theme, index)
                };
                let name = format!(" {:<20}", pundit.name);
                lines.push(Line::from(vec![
                    Span::styled(name, style),
                    Span::styled(Self::badge_text(pundit.division), th::badge_style(theme)),
                ]));
            }
            if roster.is_empty() {
                lines.push(Line::styled(
                    " No pundits in this division.",
                    theme.text_muted_style(),
                ));
            }
            frame.render_widget(Paragraph::new(lines), inner);

            app.pundits.last_area = inner;
            app.pundits.per_row_areas = roster
                .iter()
                .enumerate()
                .map(|(index, _)| {
                    let y = inner.y.saturating_add(index as u16);
                    if y < inner.y.saturating_add(inner.height) {
                        Rect::new(inner.x, y, inner.width, 1)
                    } else {
                        Rect::default()
                    }
                })
                .collect();
        }

        // Profile card
        let block = th::block(&*app.ctx.theme, Some("Profile"), false);
        let inner = block.inner(profile_rect);
        frame.render_widget(block, profile_rect);
        if let Some(pundit) = roster.get(selected) {
            let lines = Self::profile_lines(app, pundit, usize::from(inner.width));
            frame.render_widget(Paragraph::new(lines), inner);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(
            &*app.ctx.theme,
            &[
                ("↑/↓", "pundit"),
                ("←/→", "division filter"),
                ("Tab", "navigation"),
            ],
        )
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
    fn right_narrows_the_roster_to_one_division() {
        let mut app = test_app();
        let mut pundits = PunditsComponent;
        let all = app.content.pundits_for(None).len();

        pundits.handle_key_events(&mut app, key(KeyCode::Right));
        assert_eq!(app.pundits.filter(), Some(Division::Premier));
        let narrowed = app.content.pundits_for(app.pundits.filter());
        assert!(narrowed.len() < all);
        assert!(narrowed.iter().all(|p| p.division == Division::Premier));
    }

    #[test]
    fn filter_change_pulls_selection_back_to_the_top() {
        let mut app = test_app();
        let mut pundits = PunditsComponent;

        pundits.handle_key_events(&mut app, key(KeyCode::Down));
        pundits.handle_key_events(&mut app, key(KeyCode::Down));
        assert_eq!(app.pundits.selected(), 2);

        pundits.handle_key_events(&mut app, key(KeyCode::Right));
        assert_eq!(app.pundits.selected(), 0);
    }

    #[test]
    fn selection_stays_inside_the_filtered_roster() {
        let mut app = test_app();
        let mut pundits = PunditsComponent;
        pundits.handle_key_events(&mut app, key(KeyCode::Right));
        let len = app.content.pundits_for(app.pundits.filter()).len();

        for _ in 0..len + 5 {
            pundits.handle_key_events(&mut app, key(KeyCode::Down));
        }
        assert_eq!(app.pundits.selected(), len - 1);
    }

    #[test]
    fn clicking_a_roster_row_selects_it() {
        let mut app = test_app();
        let mut pundits = PunditsComponent;
        app.pundits.last_area = Rect::new(1, 2, 30, 12);
        app.pundits.per_row_areas = (0..6)
            .map(|i| Rect::new(1, 2 + i as u16, 30, 1))
            .collect();

        pundits.handle_mouse_events(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 8,
                row: 5,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.pundits.selected(), 3);
        assert_eq!(app.chrome_focus, ChromeFocus::Content);
    }

    #[test]
    fn tab_hands_focus_to_the_navigation_chrome() {
        let mut app = test_app();
        let mut pundits = PunditsComponent;
        app.chrome_focus = ChromeFocus::Content;

        pundits.handle_key_events(&mut app, key(KeyCode::Tab));
        assert_eq!(app.chrome_focus, ChromeFocus::Nav);
    }
}
