//! Editing session
//!
//! Owns the recipe buffer, the cursor and the autocomplete dropdown state.
//! Every text edit or cursor move runs one synchronous recompute pass
//! (name extraction + completion context); dropdown navigation keys only
//! touch the selection.

use tracing::{debug, trace};

use super::buffer::{Buffer, BufferError};
use super::completion::{AutocompleteState, apply_completion};
use super::input::Key;
use super::lexer::{Token, tokenize};
use super::names::NameSet;
use super::utf8::{
    byte_at_visual_x, floor_char_boundary, next_grapheme_boundary, prev_grapheme_boundary,
    visual_width,
};

/// What a key press did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Dropdown selection moved
    Navigated,
    /// A candidate was inserted into the text
    Accepted(String),
    /// Dropdown closed without touching the text
    Dismissed,
    /// Text or cursor changed
    Edited,
    /// Key means nothing to the session (callers may bind it to a command)
    Ignored,
}

/// A recipe being edited
#[derive(Debug)]
pub struct EditorSession {
    buffer: Buffer,
    /// Snapshot of the buffer, refreshed after every edit
    text: String,
    /// Byte offset, always on a char boundary
    cursor: usize,
    known: NameSet,
    autocomplete: Option<AutocompleteState>,
    tab_width: usize,
    /// Visual column kept across consecutive Up/Down moves
    goal_x: Option<usize>,
}

impl EditorSession {
    pub fn new(buffer: Buffer, known: NameSet) -> Self {
        let text = buffer.to_string();
        Self {
            buffer,
            text,
            cursor: 0,
            known,
            autocomplete: None,
            tab_width: 4,
            goal_x: None,
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    // ==================== Accessors ====================

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn known_names(&self) -> &NameSet {
        &self.known
    }

    pub fn autocomplete(&self) -> Option<&AutocompleteState> {
        self.autocomplete.as_ref()
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Highlight tokens of the current text
    pub fn tokens(&self) -> Vec<Token<'_>> {
        tokenize(&self.text)
    }

    /// Replace the known-name pool (e.g. after a library refresh)
    pub fn set_known_names(&mut self, known: NameSet) {
        self.known = known;
        if self.autocomplete.is_some() {
            self.recompute();
        }
    }

    // ==================== Key Handling ====================

    /// Feed one key press through the autocomplete state machine.
    ///
    /// While the dropdown is open Up/Down move the selection, Enter/Tab accept
    /// it and Esc closes it. Everything else edits the text.
    pub fn handle_key(&mut self, key: &Key) -> KeyOutcome {
        if let Some(state) = self.autocomplete.as_mut() {
            match key {
                Key::Down => {
                    state.select_next();
                    return KeyOutcome::Navigated;
                }
                Key::Up => {
                    state.select_prev();
                    return KeyOutcome::Navigated;
                }
                Key::Enter | Key::Tab => {
                    if let Some(item) = state.selected().map(str::to_string) {
                        return self.accept(&item);
                    }
                }
                Key::Esc => {
                    self.autocomplete = None;
                    return KeyOutcome::Dismissed;
                }
                _ => {}
            }
        }

        match key {
            Key::Char(c) => self.insert_char(*c),
            Key::Enter => self.insert_char('\n'),
            Key::Tab => self.insert_char('\t'),
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete_forward(),
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            Key::Home => self.move_home(),
            Key::End => self.move_end(),
            Key::Up => self.move_up(),
            Key::Down => self.move_down(),
            Key::Esc | Key::Ctrl(_) | Key::Null => return KeyOutcome::Ignored,
        }
        KeyOutcome::Edited
    }

    /// Insert `item` for the active completion and close the dropdown
    pub fn accept(&mut self, item: &str) -> KeyOutcome {
        let Some(state) = self.autocomplete.take() else {
            return KeyOutcome::Ignored;
        };
        let context = state.context();
        let (new_text, new_cursor) = apply_completion(&self.text, self.cursor, &context, item);

        // Same splice as `apply_completion`, applied to the rope in place
        let start = context.trigger_index.min(self.cursor);
        let removed = self.cursor - start;
        let inserted_len = new_text.len() + removed - self.text.len();
        self.buffer.delete(start, removed);
        self.buffer.insert(start, &new_text[start..start + inserted_len]);

        debug!(item, trigger = %context.trigger, cursor = new_cursor, "accepted completion");
        self.cursor = new_cursor;
        self.text = new_text;
        self.goal_x = None;
        KeyOutcome::Accepted(item.to_string())
    }

    // ==================== Editing ====================

    pub fn insert_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut utf8));
    }

    pub fn insert_str(&mut self, s: &str) {
        self.buffer.insert(self.cursor, s);
        self.cursor += s.len();
        self.sync();
    }

    /// Delete the grapheme before the cursor
    pub fn backspace(&mut self) {
        let start = prev_grapheme_boundary(&self.text, self.cursor);
        if start < self.cursor {
            self.buffer.delete(start, self.cursor - start);
            self.cursor = start;
        }
        self.sync();
    }

    /// Delete the grapheme under the cursor
    pub fn delete_forward(&mut self) {
        let end = next_grapheme_boundary(&self.text, self.cursor);
        if end > self.cursor {
            self.buffer.delete(self.cursor, end - self.cursor);
        }
        self.sync();
    }

    // ==================== Cursor Motion ====================

    /// Place the cursor at a byte offset (mouse click)
    pub fn click(&mut self, offset: usize) {
        self.set_cursor(offset);
    }

    pub fn move_left(&mut self) {
        self.set_cursor(prev_grapheme_boundary(&self.text, self.cursor));
    }

    pub fn move_right(&mut self) {
        self.set_cursor(next_grapheme_boundary(&self.text, self.cursor));
    }

    pub fn move_home(&mut self) {
        let (start, _) = self.current_line();
        self.set_cursor(start);
    }

    pub fn move_end(&mut self) {
        let (start, line) = self.current_line();
        self.set_cursor(start + line.len());
    }

    pub fn move_up(&mut self) {
        let line_idx = self.buffer.byte_to_line(self.cursor);
        if line_idx == 0 {
            self.set_cursor(0);
            return;
        }
        self.move_to_line(line_idx - 1);
    }

    pub fn move_down(&mut self) {
        let line_idx = self.buffer.byte_to_line(self.cursor);
        if line_idx + 1 >= self.buffer.line_count() {
            self.set_cursor(self.text.len());
            return;
        }
        self.move_to_line(line_idx + 1);
    }

    /// Line index and visual column of the cursor
    pub fn cursor_position(&self) -> (usize, usize) {
        let (start, _) = self.current_line();
        let line_idx = self.buffer.byte_to_line(self.cursor);
        (line_idx, visual_width(&self.text[start..self.cursor], self.tab_width))
    }

    // ==================== File ====================

    pub fn save(&mut self) -> Result<(), BufferError> {
        self.buffer.save()
    }

    // ==================== Internals ====================

    /// Start offset and content of the cursor's line
    fn current_line(&self) -> (usize, String) {
        let line_idx = self.buffer.byte_to_line(self.cursor);
        let start = self.buffer.line_to_byte(line_idx).unwrap_or(0);
        let line = self.buffer.line(line_idx).unwrap_or_default();
        (start, line)
    }

    fn move_to_line(&mut self, target: usize) {
        let column = self.goal_x.unwrap_or_else(|| self.cursor_position().1);
        let start = self.buffer.line_to_byte(target).unwrap_or(0);
        let line = self.buffer.line(target).unwrap_or_default();
        self.set_cursor(start + byte_at_visual_x(&line, column, self.tab_width));
        self.goal_x = Some(column);
    }

    fn set_cursor(&mut self, offset: usize) {
        self.cursor = floor_char_boundary(&self.text, offset);
        self.goal_x = None;
        self.recompute();
    }

    /// Refresh the text snapshot after a buffer edit, then recompute
    fn sync(&mut self) {
        self.text = self.buffer.to_string();
        self.cursor = floor_char_boundary(&self.text, self.cursor);
        self.goal_x = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        let previous = self.autocomplete.take();
        self.autocomplete =
            AutocompleteState::recompute(previous.as_ref(), &self.text, self.cursor, &self.known);
        trace!(
            cursor = self.cursor,
            active = self.autocomplete.is_some(),
            "recomputed autocomplete"
        );
    }
}
