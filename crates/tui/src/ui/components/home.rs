//! Landing screen: hero banner, season intro and a top-of-the-table teaser.

use crossterm::event::{KeyCode, KeyEvent};
use kotp_types::{Division, Effect};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, ChromeFocus};
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers as th;

const PAGE_WIDTH: u16 = 72;

const INTRO: &str = "Every week our pundits call the scores before a ball is kicked. \
Three points for the exact score, one for the right result, and a season-long \
table to settle who really knows their football. The crown changes heads more \
often than you would think.";

#[derive(Debug, Default)]
pub struct HomeComponent;

impl Component for HomeComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            app.chrome_focus = ChromeFocus::Nav;
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, None, app.chrome_focus == ChromeFocus::Content);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let width = inner.width.min(PAGE_WIDTH);
        let [_, column, _] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .areas(inner);

        let mut lines: Vec<Line> = vec![
            Line::default(),
            Line::styled(
                "KING OF THE PUNDITS",
                theme.accent_emphasis_style().add_modifier(Modifier::BOLD),
            )
            .centered(),
            Line::styled(
                "The Ultimate Football Prediction Battleground",
                theme.text_secondary_style(),
            )
            .centered(),
            Line::styled(
                format!(
                    "{} season · updated {}",
                    app.content.season,
                    app.content.updated.format("%-d %B %Y")
                ),
                theme.text_muted_style(),
            )
            .centered(),
            Line::default(),
        ];

        for wrapped in textwrap::wrap(INTRO, usize::from(width)) {
            lines.push(Line::styled(wrapped.into_owned(), theme.text_primary_style()));
        }
        lines.push(Line::default());

        lines.push(Line::styled(
            "Top of the Premier Division",
            th::table_header_style(theme),
        ));
        for standing in app.content.standings_for(Division::Premier).iter().take(3) {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:>2}  ", standing.position),
                    theme.accent_primary_style(),
                ),
                Span::styled(
                    format!("{:<24}", standing.pundit),
                    theme.text_primary_style(),
                ),
                Span::styled(
                    format!("{:>4} pts", standing.points),
                    theme.text_secondary_style(),
                ),
            ]));
        }
        lines.push(Line::default());

        for (route_label, blurb) in [
            ("Tables", "full standings for every division"),
            ("Pundits", "meet this season's roster"),
            ("Account", "join the league"),
        ] {
            lines.push(Line::from(vec![
                Span::styled(format!("{route_label:<10}"), theme.accent_emphasis_style()),
                Span::styled(blurb, theme.text_muted_style()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), column);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[("Tab", "navigation")])
    }
}
