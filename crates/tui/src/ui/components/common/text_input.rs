//! UTF-8 safe text input state with cursor management.
//!
//! Backs the numeric, time and free-text inputs of the filter panel.

use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    /// The underlying text buffer
    input: String,
    /// Cursor byte index into `input` (always on a UTF-8 boundary)
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.input.trim().is_empty()
    }

    /// Display column of the cursor, for placing the terminal cursor.
    pub fn cursor_column(&self) -> u16 {
        u16::try_from(self.input[..self.cursor].width()).unwrap_or(u16::MAX)
    }

    /// Replaces the buffer. The cursor moves to the end when the text changes.
    pub fn set_input<S: Into<String>>(&mut self, s: S) {
        let next = s.into();
        if next != self.input {
            self.input = next;
            self.cursor = self.input.len();
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace the char immediately before the cursor.
    pub fn backspace(&mut self) {
        if let Some(prev) = self.input[..self.cursor].chars().next_back() {
            let start = self.cursor - prev.len_utf8();
            self.input.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            let end = self.cursor + next.len_utf8();
            self.input.drain(self.cursor..end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = TextInputState::new();
        st.set_input("Ko Phañgan");
        st.move_home();
        st.move_right();
        st.move_right();
        st.insert_char('h');
        assert_eq!(st.input(), "Koh Phañgan");
        st.move_end();
        st.move_left();
        st.move_left();
        st.move_left();
        st.backspace();
        assert_eq!(st.input(), "Koh Phagan");
        st.delete();
        assert_eq!(st.input(), "Koh Phaan");
    }

    #[test]
    fn set_input_keeps_cursor_when_unchanged() {
        let mut st = TextInputState::new();
        st.set_input("130");
        st.move_left();
        st.set_input("130");
        assert_eq!(st.cursor(), 2);
        st.set_input("1300");
        assert_eq!(st.cursor(), 4);
        assert_eq!(st.cursor_column(), 4);
    }

    #[test]
    fn edits_at_buffer_edges_are_noops() {
        let mut st = TextInputState::new();
        st.backspace();
        st.delete();
        st.move_left();
        st.move_right();
        assert!(st.is_empty());
        assert_eq!(st.cursor(), 0);
    }
}
