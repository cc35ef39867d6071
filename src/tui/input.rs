//! Single-buffer text input shared by the search box and the compose box.

use unicode_width::UnicodeWidthChar;

/// Editable text with a character-indexed cursor.
#[derive(Debug, Default, Clone)]
pub struct TextInput {
    text: String,
    /// Cursor position (character offset into `text`).
    cursor: usize,
}

impl TextInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let byte_pos = self.char_to_byte(self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let end = self.char_to_byte(self.cursor);
            let start = self.char_to_byte(self.cursor - 1);
            self.text.drain(start..end);
            self.cursor -= 1;
        }
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let start = self.char_to_byte(self.cursor);
            let end = self.char_to_byte(self.cursor + 1);
            self.text.drain(start..end);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Take the text as typed and clear the input.
    ///
    /// Returns None (leaving the input untouched) if it is blank.
    pub fn submit(&mut self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        self.cursor = 0;
        Some(std::mem::take(&mut self.text))
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn char_to_byte(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Project the text onto a single line `width` columns wide.
    ///
    /// Newlines are shown as " | ". The window scrolls horizontally so the
    /// cursor stays visible.
    pub fn display(&self, width: usize) -> DisplayLine {
        let mut cells: Vec<char> = Vec::with_capacity(self.text.len());
        let mut cursor_cell = 0;
        for (idx, ch) in self.text.chars().enumerate() {
            if idx == self.cursor {
                cursor_cell = cells.len();
            }
            if ch == '\n' {
                cells.extend([' ', '|', ' ']);
            } else {
                cells.push(ch);
            }
        }
        if self.cursor >= self.char_count() {
            cursor_cell = cells.len();
        }

        if width == 0 {
            return DisplayLine::default();
        }

        // Walk back from the cursor until the window is full.
        let mut start = 0;
        let mut used = 1; // the cursor cell itself
        for i in (0..cursor_cell).rev() {
            let w = cells[i].width().unwrap_or(0);
            if used + w > width {
                start = i + 1;
                break;
            }
            used += w;
        }

        let mut visible = String::new();
        let mut columns = 0;
        let mut cursor_column = 0;
        for (i, ch) in cells.iter().enumerate().skip(start) {
            if i == cursor_cell {
                cursor_column = columns;
            }
            let w = ch.width().unwrap_or(0);
            if columns + w > width {
                break;
            }
            visible.push(*ch);
            columns += w;
        }
        if cursor_cell >= cells.len() {
            cursor_column = columns;
        }

        DisplayLine {
            visible,
            cursor_column: cursor_column.min(width.saturating_sub(1)),
        }
    }
}

/// What an input shows on screen and where its cursor sits.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DisplayLine {
    pub visible: String,
    /// Cursor offset within `visible`, in terminal columns.
    pub cursor_column: usize,
}
