use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use kotp_types::{Effect, Severity};
use kotp_util::validation::{StrengthLevel, looks_like_email, password_score};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, ChromeFocus};
use crate::ui::components::auth::state::{AuthSlot, AuthState, AuthTab};
use crate::ui::components::common::TextInputState;
use crate::ui::components::component::Component;
use crate::ui::components::find_target_index_by_mouse_position;
use crate::ui::theme::Theme;
use crate::ui::theme::theme_helpers as th;

const LABEL_WIDTH: usize = 18;
const CARD_WIDTH: u16 = 64;

const RESET_INTRO: &str =
    "Enter your email address and we'll send you a link to reset your password.";

/// Account screen: sign in, register and reset forms, validated locally.
#[derive(Debug, Default)]
pub struct AuthComponent;

/// Everything needed to draw one text field row.
struct FieldView<'a> {
    label: &'static str,
    placeholder: &'static str,
    buffer: &'a TextInputState,
    masked: bool,
    is_email: bool,
}

fn field_view(auth: &AuthState, slot: AuthSlot) -> Option<FieldView<'_>> {
    match (auth.active_tab(), slot) {
        (AuthTab::SignIn, AuthSlot::Email) => Some(FieldView {
            label: "Email Address",
            placeholder: "your@email.com",
            buffer: &auth.sign_in.email,
            masked: false,
            is_email: true,
        }),
        (AuthTab::SignIn, AuthSlot::Password) => Some(FieldView {
            label: "Password",
            placeholder: "Enter your password",
            buffer: &auth.sign_in.password,
            masked: !auth.sign_in.show_password,
            is_email: false,
        }),
        (AuthTab::Register, AuthSlot::Username) => Some(FieldView {
            label: "Username",
            placeholder: "Choose a username",
            buffer: &auth.register.username,
            masked: false,
            is_email: false,
        }),
        (AuthTab::Register, AuthSlot::Email) => Some(FieldView {
            label: "Email Address",
            placeholder: "your@email.com",
            buffer: &auth.register.email,
            masked: false,
            is_email: true,
        }),
        (AuthTab::Register, AuthSlot::Password) => Some(FieldView {
            label: "Password",
            placeholder: "Minimum 8 characters",
            buffer: &auth.register.password,
            masked: !auth.register.show_password,
            is_email: false,
        }),
        (AuthTab::Register, AuthSlot::Confirm) => Some(FieldView {
            label: "Confirm Password",
            placeholder: "Confirm your password",
            buffer: &auth.register.confirm,
            masked: true,
            is_email: false,
        }),
        (AuthTab::Reset, AuthSlot::Email) => Some(FieldView {
            label: "Email Address",
            placeholder: "your@email.com",
            buffer: &auth.reset.email,
            masked: false,
            is_email: true,
        }),
        _ => None,
    }
}

fn field_masked(auth: &AuthState, slot: AuthSlot) -> bool {
    field_view(auth, slot).is_some_and(|view| view.masked)
}

/// Maps a click column back to a byte cursor inside the field value.
fn cursor_from_click(buffer: &TextInputState, masked: bool, value_x: u16, column: u16) -> usize {
    let relative = usize::from(column.saturating_sub(value_x));
    if masked {
        // Mask glyphs are all one column wide.
        return buffer
            .input()
            .char_indices()
            .nth(relative)
            .map(|(index, _)| index)
            .unwrap_or(buffer.input().len());
    }
    let mut cumulative = 0usize;
    for (index, ch) in buffer.input().char_indices() {
        if cumulative >= relative {
            return index;
        }
        cumulative += ch.width().unwrap_or(1);
    }
    buffer.input().len()
}

fn render_checkbox(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    checked: bool,
    focused: bool,
    theme: &dyn Theme,
) {
    let glyph = if checked { "[x]" } else { "[ ]" };
    let style = if focused {
        theme.selection_style()
    } else {
        theme.text_primary_style()
    };
    frame.render_widget(Paragraph::new(format!("{glyph} {label}")).style(style), area);
}

fn severity_style(theme: &dyn Theme, severity: Severity) -> (char, Style) {
    match severity {
        Severity::Info => ('ℹ', theme.status_info()),
        Severity::Success => ('✓', theme.status_success()),
        Severity::Warning => ('⚠', theme.status_warning()),
        Severity::Error => ('✗', theme.status_error()),
    }
}

impl Component for AuthComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('r') = key.code {
                app.auth.reduce_toggle_show_password();
            }
            return Vec::new();
        }

        match key.code {
            KeyCode::Tab => {
                if app.auth.apply_next_focus() {
                    app.chrome_focus = ChromeFocus::Nav;
                }
            }
            KeyCode::BackTab => {
                if app.auth.apply_previous_focus() {
                    app.chrome_focus = ChromeFocus::Nav;
                }
            }
            KeyCode::Down => app.auth.reduce_move_focus_down(),
            KeyCode::Up => app.auth.reduce_move_focus_up(),
            KeyCode::Esc => app.auth.clear_message(),
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match app.auth.focused_slot() {
                    AuthSlot::TabBar => app.auth.reduce_cycle_tab(forward),
                    AuthSlot::Division => app.auth.reduce_cycle_division(forward),
                    _ => {
                        if let Some(buffer) = app.auth.focused_input_mut() {
                            if forward {
                                buffer.move_right();
                            } else {
                                buffer.move_left();
                            }
                        }
                    }
                }
            }
            KeyCode::Enter => match app.auth.focused_slot() {
                AuthSlot::TabBar => {}
                AuthSlot::RememberMe | AuthSlot::Terms => app.auth.reduce_toggle_flag(),
                AuthSlot::Division => app.auth.reduce_cycle_division(true),
                _ => app.auth.submit(Instant::now()),
            },
            KeyCode::Char(' ') => match app.auth.focused_slot() {
                AuthSlot::RememberMe | AuthSlot::Terms => app.auth.reduce_toggle_flag(),
                AuthSlot::Submit => app.auth.submit(Instant::now()),
                _ => {
                    if let Some(buffer) = app.auth.focused_input_mut() {
                        buffer.insert_char(' ');
                    }
                }
            },
            KeyCode::Backspace => {
                if let Some(buffer) = app.auth.focused_input_mut() {
                    buffer.backspace();
                }
            }
            KeyCode::Char(c) if !c.is_control() => {
                if let Some(buffer) = app.auth.focused_input_mut() {
                    buffer.insert_char(c);
                }
            }
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

        if let Some(index) = app
            .auth
            .tab_areas
            .iter()
            .position(|area| area.contains(position))
        {
            app.chrome_focus = ChromeFocus::Content;
            app.auth.switch_tab(AuthTab::ALL[index]);
            return Vec::new();
        }

        let target = find_target_index_by_mouse_position(
            &app.auth.last_area,
            &app.auth.per_slot_areas,
            mouse.column,
            mouse.row,
        );
        let Some(index) = target else {
            return Vec::new();
        };

        app.chrome_focus = ChromeFocus::Content;
        app.auth.apply_focus(index);
        match app.auth.focused_slot() {
            AuthSlot::Submit => app.auth.submit(Instant::now()),
            AuthSlot::RememberMe | AuthSlot::Terms => app.auth.reduce_toggle_flag(),
            AuthSlot::Division => app.auth.reduce_cycle_division(true),
            AuthSlot::TabBar => {}
            slot => {
                let masked = field_masked(&app.auth, slot);
                let value_x = app.auth.per_slot_areas[index].x + LABEL_WIDTH as u16;
                if let Some(buffer) = app.auth.focused_input_mut() {
                    let cursor = cursor_from_click(buffer, masked, value_x, mouse.column);
                    buffer.set_cursor(cursor);
                }
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let focused_chrome = app.chrome_focus == ChromeFocus::Content;
        let auth = &app.auth;
        let theme = &*app.ctx.theme;

        let card_width = rect.width.min(CARD_WIDTH);
        let [_, card, _] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(card_width),
            Constraint::Min(0),
        ])
        .areas(rect);

        let block = th::block(theme, Some("Account"), focused_chrome);
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let slots = auth.slots();
        let mut slot_areas = vec![Rect::default(); slots.len()];
        let mut tab_areas: Vec<Rect> = Vec::with_capacity(AuthTab::ALL.len());
        let mut cursor: Option<Position> = None;
        let mut y = inner.y;

        for (index, slot) in slots.iter().enumerate() {
            if y >= inner.bottom() {
                break;
            }
            let slot_focused = focused_chrome && index == auth.focus();
            match slot {
                AuthSlot::TabBar => {
                    let row = Rect::new(inner.x, y, inner.width, 1);
                    let mut spans: Vec<Span> = Vec::new();
                    let mut x = inner.x;
                    for (tab_index, tab) in AuthTab::ALL.iter().enumerate() {
                        if tab_index > 0 {
                            spans.push(Span::styled("   ", theme.text_muted_style()));
                            x += 3;
                        }
                        let label = tab.label();
                        let width = label.width() as u16;
                        let style = if *tab == auth.active_tab() {
                            let mut style =
                                theme.accent_emphasis_style().add_modifier(Modifier::UNDERLINED);
                            if slot_focused {
                                style = style.add_modifier(Modifier::REVERSED);
                            }
                            style
                        } else {
                            theme.text_secondary_style()
                        };
                        spans.push(Span::styled(label, style));
                        tab_areas.push(Rect::new(x, y, width, 1));
                        x += width;
                    }
                    frame.render_widget(Paragraph::new(Line::from(spans)), row);
                    slot_areas[index] = row;
                    y += 2;

                    if auth.active_tab() == AuthTab::Reset {
                        for wrapped in textwrap::wrap(RESET_INTRO, usize::from(inner.width)) {
                            if y >= inner.bottom() {
                                break;
                            }
                            frame.render_widget(
                                Paragraph::new(wrapped.into_owned())
                                    .style(theme.text_secondary_style()),
                                Rect::new(inner.x, y, inner.width, 1),
                            );
                            y += 1;
                        }
                        y += 1;
                    }
                }
                AuthSlot::Division => {
                    let area = Rect::new(inner.x, y, inner.width, 1);
                    let label_style = if slot_focused {
                        theme.accent_emphasis_style()
                    } else {
                        theme.text_secondary_style()
                    };
                    let (value, value_style) = match auth.register.division {
                        Some(division) => (
                            division.label().to_string(),
                            th::input_style(theme, true, slot_focused),
                        ),
                        None => ("Choose your division".to_string(), theme.text_muted_style()),
                    };
                    let value = if slot_focused {
                        format!("◂ {value} ▸")
                    } else {
                        value
                    };
                    let line = Line::from(vec![
                        Span::styled(
                            format!("{:<width$}", "Select Division", width = LABEL_WIDTH),
                            label_style,
                        ),
                        Span::styled(value, value_style),
                    ]);
                    frame.render_widget(Paragraph::new(line), area);
                    slot_areas[index] = area;
                    y += 1;
                }
                AuthSlot::RememberMe => {
                    let area = Rect::new(inner.x, y, inner.width, 1);
                    render_checkbox(
                        frame,
                        area,
                        "Remember me",
                        auth.sign_in.remember_me,
                        slot_focused,
                        theme,
                    );
                    slot_areas[index] = area;
                    y += 1;
                }
                AuthSlot::Terms => {
                    let area = Rect::new(inner.x, y, inner.width, 1);
                    render_checkbox(
                        frame,
                        area,
                        "I agree to the Terms and Conditions",
                        auth.register.accept_terms,
                        slot_focused,
                        theme,
                    );
                    slot_areas[index] = area;
                    y += 1;
                }
                AuthSlot::Submit => {
                    if y + 4 > inner.bottom() {
                        continue;
                    }
                    y += 1;
                    let label = auth.active_tab().submit_label();
                    let width = (label.width() as u16 + 4).min(inner.width);
                    let area = Rect::new(inner.x, y, width, 3);
                    th::render_button(frame, area, label, true, slot_focused, theme);
                    slot_areas[index] = area;
                    y += 3;
                }
                _ => {
                    let Some(view) = field_view(auth, *slot) else {
                        continue;
                    };
                    let area = Rect::new(inner.x, y, inner.width, 1);
                    let label_style = if slot_focused {
                        theme.accent_emphasis_style()
                    } else {
                        theme.text_secondary_style()
                    };
                    let valid = !view.is_email
                        || view.buffer.is_empty()
                        || looks_like_email(view.buffer.input().trim());
                    let value_span = if view.buffer.input().is_empty() {
                        Span::styled(view.placeholder, theme.text_muted_style())
                    } else if view.masked {
                        Span::styled(
                            "•".repeat(view.buffer.input().chars().count()),
                            th::input_style(theme, valid, slot_focused),
                        )
                    } else {
                        Span::styled(
                            view.buffer.input().to_string(),
                            th::input_style(theme, valid, slot_focused),
                        )
                    };
                    let line = Line::from(vec![
                        Span::styled(
                            format!("{:<width$}", view.label, width = LABEL_WIDTH),
                            label_style,
                        ),
                        value_span,
                    ]);
                    frame.render_widget(Paragraph::new(line), area);
                    slot_areas[index] = area;

                    if slot_focused {
                        let offset = if view.masked {
                            view.buffer.cursor_chars()
                        } else {
                            view.buffer.cursor_columns()
                        };
                        let x = (inner.x + LABEL_WIDTH as u16)
                            .saturating_add(offset as u16)
                            .min(inner.right().saturating_sub(1));
                        cursor = Some(Position::new(x, y));
                    }
                    y += 1;

                    // Live strength meter under the register password.
                    if auth.active_tab() == AuthTab::Register
                        && *slot == AuthSlot::Password
                        && !auth.register.password.input().is_empty()
                        && y < inner.bottom()
                    {
                        let score = password_score(auth.register.password.input());
                        let level = StrengthLevel::from_score(score);
                        let style = match level {
                            StrengthLevel::Weak => theme.status_error(),
                            StrengthLevel::Fair => theme.status_warning(),
                            StrengthLevel::Good => theme.status_info(),
                            StrengthLevel::Strong | StrengthLevel::VeryStrong => {
                                theme.status_success()
                            }
                        };
                        let bar: String =
                            (0..5).map(|i| if i < score { '█' } else { '░' }).collect();
                        let line = Line::from(vec![
                            Span::styled(format!("{:<width$}", "", width = LABEL_WIDTH), Style::default()),
                            Span::styled(format!("{bar}  {} password", level.label()), style),
                        ]);
                        frame.render_widget(Paragraph::new(line), Rect::new(inner.x, y, inner.width, 1));
                        y += 1;
                    }
                }
            }
        }

        // Status banner, wrapped under the form.
        if let Some(message) = auth.message() {
            let top = (y + 1).min(inner.bottom().saturating_sub(1));
            let height = inner.bottom().saturating_sub(top);
            if height > 0 {
                let (glyph, style) = severity_style(theme, message.severity);
                frame.render_widget(
                    Paragraph::new(format!("{glyph} {}", message.text))
                        .style(style)
                        .wrap(Wrap { trim: true }),
                    Rect::new(inner.x, top, inner.width, height),
                );
            }
        }

        app.auth.last_area = inner;
        app.auth.per_slot_areas = slot_areas;
        app.auth.tab_areas = tab_areas;
        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hints: Vec<(&str, &str)> = match app.auth.focused_slot() {
            AuthSlot::TabBar => vec![("←/→", "tab")],
            AuthSlot::Division => vec![("←/→", "division")],
            AuthSlot::RememberMe | AuthSlot::Terms => vec![("Space", "toggle")],
            AuthSlot::Submit => vec![("Enter", "submit")],
            _ => vec![("Enter", "submit")],
        };
        if app.auth.active_tab() != AuthTab::Reset {
            hints.push(("C-r", "show password"));
        }
        hints.push(("Tab", "next field"));
        th::build_hint_spans(&*app.ctx.theme, &hints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn type_text(auth: &mut AuthComponent, app: &mut App, text: &str) {
        for c in text.chars() {
            auth.handle_key_events(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typed_characters_flow_into_the_focused_field() {
        let mut app = test_app();
        let mut auth = AuthComponent;

        auth.handle_key_events(&mut app, key(KeyCode::Tab));
        assert_eq!(app.auth.focused_slot(), AuthSlot::Email);
        type_text(&mut auth, &mut app, "rita@example.com");
        assert_eq!(app.auth.sign_in.email.input(), "rita@example.com");
    }

    #[test]
    fn enter_in_a_field_submits_the_form() {
        let mut app = test_app();
        let mut auth = AuthComponent;

        auth.handle_key_events(&mut app, key(KeyCode::Tab));
        type_text(&mut auth, &mut app, "nope");
        auth.handle_key_events(&mut app, key(KeyCode::Enter));

        let message = app.auth.message().expect("validation banner");
        assert_eq!(message.text, "Enter a valid email address");
    }

    #[test]
    fn ctrl_r_unmasks_the_password_for_this_form_only() {
        let mut app = test_app();
        let mut auth = AuthComponent;

        auth.handle_key_events(
            &mut app,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert!(app.auth.sign_in.show_password);
        assert!(!app.auth.register.show_password);
    }

    #[test]
    fn tab_rings_through_every_slot_then_hands_off_to_the_chrome() {
        let mut app = test_app();
        let mut auth = AuthComponent;
        let slots = app.auth.slots().len();

        for _ in 0..slots - 1 {
            auth.handle_key_events(&mut app, key(KeyCode::Tab));
            assert_eq!(app.chrome_focus, ChromeFocus::Content);
        }
        auth.handle_key_events(&mut app, key(KeyCode::Tab));
        assert_eq!(app.chrome_focus, ChromeFocus::Nav);
        assert_eq!(app.auth.focused_slot(), AuthSlot::TabBar);
    }

    #[test]
    fn left_right_switch_tabs_while_the_tab_bar_is_focused() {
        let mut app = test_app();
        let mut auth = AuthComponent;

        auth.handle_key_events(&mut app, key(KeyCode::Right));
        assert_eq!(app.auth.active_tab(), AuthTab::Register);
        auth.handle_key_events(&mut app, key(KeyCode::Left));
        assert_eq!(app.auth.active_tab(), AuthTab::SignIn);
    }

    #[test]
    fn clicking_a_tab_label_switches_and_clears_the_banner() {
        let mut app = test_app();
        let mut auth = AuthComponent;
        app.auth
            .post_message(Severity::Error, "stale", Instant::now());
        app.auth.tab_areas = vec![
            Rect::new(2, 3, 7, 1),
            Rect::new(12, 3, 8, 1),
            Rect::new(23, 3, 14, 1),
        ];

        auth.handle_mouse_events(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 14,
                row: 3,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.auth.active_tab(), AuthTab::Register);
        assert!(app.auth.message().is_none());
    }

    #[test]
    fn space_toggles_the_terms_checkbox() {
        let mut app = test_app();
        let mut auth = AuthComponent;
        app.auth.switch_tab(AuthTab::Register);
        while app.auth.focused_slot() != AuthSlot::Terms {
            auth.handle_key_events(&mut app, key(KeyCode::Down));
        }

        auth.handle_key_events(&mut app, key(KeyCode::Char(' ')));
        assert!(app.auth.register.accept_terms);
        auth.handle_key_events(&mut app, key(KeyCode::Char(' ')));
        assert!(!app.auth.register.accept_terms);
    }

    #[test]
    fn click_in_a_field_places_the_cursor() {
        let mut buffer = TextInputState::default();
        buffer.set_input("rita@example.com");
        // Click on the '@' (four columns into the value).
        assert_eq!(cursor_from_click(&buffer, false, 20, 24), 4);
        // Click far past the end clamps to the end.
        assert_eq!(cursor_from_click(&buffer, false, 20, 70), 16);
        // Masked fields count glyphs, not widths.
        let mut masked = TextInputState::default();
        masked.set_input("pä🙂s");
        assert_eq!(cursor_from_click(&masked, true, 0, 2), "pä".len());
    }
}
