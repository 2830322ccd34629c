//! Reusable UTF-8 safe text input state with cursor management.
//!
//! Backs the account form fields. The cursor is a byte index that always
//! lands on a UTF-8 boundary, so editing around multi-byte characters never
//! splits a scalar.

use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    input: String,
    cursor: usize,
}

impl TextInputState {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.input.trim().is_empty()
    }

    /// Cursor position in characters, for rendering masked fields.
    pub fn cursor_chars(&self) -> usize {
        self.input[..self.cursor].chars().count()
    }

    /// Cursor position in terminal columns, for placing the visible cursor.
    pub fn cursor_columns(&self) -> usize {
        UnicodeWidthStr::width(&self.input[..self.cursor])
    }

    pub fn set_input<S: Into<String>>(&mut self, s: S) {
        self.input = s.into();
        self.cursor = self.input.len();
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.input.len());
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev_len = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        self.cursor = self.cursor.saturating_sub(prev_len);
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if self.cursor >= self.input.len() {
            return;
        }
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor = self.cursor.saturating_add(next.len_utf8());
        }
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace the char immediately before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        let start = self.cursor - prev;
        self.input.drain(start..self.cursor);
        self.cursor = start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = TextInputState::default();
        st.set_input("h🙂llo");
        st.set_cursor(1); // between h and 🙂
        st.insert_char('e');
        assert_eq!(st.input(), "he🙂llo");
        st.move_right(); // step over 🙂
        st.backspace(); // delete 🙂
        assert_eq!(st.input(), "hello");
        st.move_left();
        st.backspace();
        assert_eq!(st.input(), "ello");
    }

    #[test]
    fn cursor_chars_counts_scalars_not_bytes() {
        let mut st = TextInputState::default();
        st.set_input("pä🙂s");
        st.set_cursor(st.input().len());
        assert_eq!(st.cursor_chars(), 4);
        // The emoji is two columns wide on screen.
        assert_eq!(st.cursor_columns(), 5);
    }

    #[test]
    fn clear_resets_buffer_and_cursor() {
        let mut st = TextInputState::default();
        st.set_input("secret");
        st.set_cursor(3);
        st.clear();
        assert_eq!(st.input(), "");
        assert_eq!(st.cursor(), 0);
        st.insert_char('a');
        assert_eq!(st.input(), "a");
    }
}
