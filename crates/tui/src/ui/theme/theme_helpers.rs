use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::roles::Theme;
use crate::ui::theme::roles::ThemeRoles;

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(
            t,
            theme.text_secondary_style().add_modifier(Modifier::BOLD),
        ));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for table headers: bold secondary text.
pub fn table_header_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.text_secondary_style().add_modifier(Modifier::BOLD)
}

/// Background style for the entire header row to avoid gaps between columns.
pub fn table_header_row_style<T: Theme + ?Sized>(theme: &T) -> Style {
    Style::default()
        .bg(theme.roles().surface_muted)
        .fg(theme.roles().text_secondary)
}

/// Row style for a given row index. The even/odd tones come straight from the
/// palette so zebra striping works on indexed colors too.
pub fn table_row_style<T: Theme + ?Sized>(theme: &T, row_index: usize) -> Style {
    let ThemeRoles {
        table_row_even,
        table_row_odd,
        text,
        ..
    } = *theme.roles();
    let bg = if row_index % 2 == 0 {
        table_row_even
    } else {
        table_row_odd
    };
    Style::default().bg(bg).fg(text)
}

/// Style for a selected row.
pub fn table_selected_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.selection_style().add_modifier(Modifier::BOLD)
}

/// Style for input fields; caller sets the block border based on focus.
pub fn input_style<T: Theme + ?Sized>(theme: &T, valid: bool, focused: bool) -> Style {
    let ThemeRoles {
        surface, text, error, ..
    } = *theme.roles();
    let mut style = Style::default().bg(surface).fg(text);
    if !valid {
        style = style.fg(error);
    }
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Badge/tag style (filled accent, readable text).
pub fn badge_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { accent_secondary, .. } = *theme.roles();
    Style::default().bg(accent_secondary).fg(Color::Black)
}

fn button_style<T: Theme + ?Sized>(theme: &T, enabled: bool, focused: bool) -> Style {
    if !enabled {
        let ThemeRoles {
            surface_muted,
            text_muted,
            ..
        } = *theme.roles();
        return Style::default().bg(surface_muted).fg(text_muted);
    }
    if focused {
        let ThemeRoles {
            accent_primary,
            background,
            ..
        } = *theme.roles();
        Style::default()
            .bg(accent_primary)
            .fg(background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.roles().accent_secondary)
    }
}

/// Renders a standard bordered button.
pub fn render_button<T: Theme + ?Sized>(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_enabled: bool,
    is_focused: bool,
    theme: &T,
) {
    let border_style = if is_enabled {
        theme.border_style(is_focused)
    } else {
        theme.text_muted_style()
    };

    frame.render_widget(
        Paragraph::new(label)
            .centered()
            .block(Block::bordered().border_style(border_style))
            .style(button_style(theme, is_enabled, is_focused)),
        area,
    );
}

/// Builds the spans for a key-hint bar from `(key, action)` pairs.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(
    theme: &T,
    hints: &[(&'a str, &'a str)],
) -> Vec<Span<'a>> {
    let key_style = theme.accent_emphasis_style();
    let label_style = theme.text_muted_style();
    let mut spans = Vec::with_capacity(hints.len() * 4);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", label_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(" ", label_style));
        spans.push(Span::styled(*action, label_style));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::pitch::PitchTheme;

    #[test]
    fn row_styles_alternate() {
        let theme = PitchTheme::new();
        let even = table_row_style(&theme, 0);
        let odd = table_row_style(&theme, 1);
        assert_ne!(even.bg, odd.bg);
        assert_eq!(even.bg, table_row_style(&theme, 2).bg);
    }

    #[test]
    fn invalid_input_uses_error_foreground() {
        let theme = PitchTheme::new();
        let style = input_style(&theme, false, false);
        assert_eq!(style.fg, Some(theme.roles().error));
    }

    #[test]
    fn hint_spans_pair_keys_with_actions() {
        let theme = PitchTheme::new();
        let spans = build_hint_spans(&theme, &[("Esc", "close"), ("Tab", "next")]);
        let joined: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(joined, "Esc close  Tab next");
    }
}
