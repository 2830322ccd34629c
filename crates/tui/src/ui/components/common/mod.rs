pub mod scroll_metrics;
pub mod text_input;

pub use scroll_metrics::ScrollMetrics;
pub use text_input::TextInputState;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Clips `text` to at most `max_width` display columns, ending with an
/// ellipsis when anything was cut.
pub fn clip_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let mut clipped = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + char_width + 1 > max_width {
            break;
        }
        used += char_width;
        clipped.push(ch);
    }
    clipped.push('…');
    clipped
}
