//! Terminal rendering module
//!
//! Writes highlighted recipe text with crossterm styles: either as a plain
//! stream (for `pantry highlight`) or as a full editor frame with the
//! autocomplete dropdown drawn under the cursor line.

use std::io::{self, Write};
use std::ops::Range;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{PrintStyledContent, ResetColor};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use unicode_segmentation::UnicodeSegmentation;

use crate::core::completion::AutocompleteState;
use crate::core::lexer::{Token, TokenKind};
use crate::core::session::EditorSession;
use crate::core::utf8::{byte_at_visual_x, grapheme_width, visual_width};
use crate::terminal::theme::Theme;

/// Write every token in its theme style
pub fn write_highlighted<W: Write>(
    out: &mut W,
    tokens: &[Token<'_>],
    theme: &Theme,
) -> io::Result<()> {
    for token in tokens {
        queue!(out, PrintStyledContent(theme.style(token.kind).apply(token.text)))?;
    }
    queue!(out, ResetColor)?;
    out.flush()
}

/// Pieces of `tokens` that fall inside the byte range `range`.
///
/// Tokens must be sorted and contiguous (as produced by the lexer); `range`
/// must lie on char boundaries.
pub fn line_segments<'a>(
    tokens: &[Token<'a>],
    range: Range<usize>,
) -> Vec<(TokenKind, &'a str)> {
    let first = tokens.partition_point(|t| t.end() <= range.start);
    tokens[first..]
        .iter()
        .take_while(|t| t.start < range.end)
        .filter_map(|t| {
            let from = range.start.max(t.start) - t.start;
            let to = range.end.min(t.end()) - t.start;
            (from < to).then(|| (t.kind, &t.text[from..to]))
        })
        .collect()
}

/// Rows of the dropdown list to show so that `selected` stays visible
pub fn dropdown_window(len: usize, selected: usize, height: usize) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let height = height.max(1).min(len);
    let first = (selected + 1).saturating_sub(height).min(len - height);
    first..first + height
}

/// Expand tabs and clip to the columns left on screen.
/// Returns the rendered string and its width.
fn clip(text: &str, start_x: usize, max_x: usize, tab_width: usize) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut x = start_x;
    for grapheme in text.graphemes(true) {
        let width = if grapheme == "\t" {
            (x / tab_width + 1) * tab_width - x
        } else {
            grapheme_width(grapheme)
        };
        if x + width > max_x {
            break;
        }
        if grapheme == "\t" {
            out.extend(std::iter::repeat_n(' ', width));
        } else if width > 0 || !grapheme.chars().all(char::is_control) {
            out.push_str(grapheme);
        }
        x += width;
    }
    (out, x - start_x)
}

/// Scroll state of the editor frame
#[derive(Debug, Default)]
pub struct EditorView {
    /// First buffer line on screen
    pub scroll: usize,
}

impl EditorView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust scrolling so `cursor_line` is inside a window of `text_rows` lines
    pub fn follow(&mut self, cursor_line: usize, text_rows: usize) {
        let text_rows = text_rows.max(1);
        if cursor_line < self.scroll {
            self.scroll = cursor_line;
        } else if cursor_line >= self.scroll + text_rows {
            self.scroll = cursor_line + 1 - text_rows;
        }
    }

    /// Byte offset under a screen cell, for mouse clicks
    pub fn offset_at(
        &self,
        session: &EditorSession,
        column: u16,
        row: u16,
        size: (u16, u16),
    ) -> Option<usize> {
        let text_rows = usize::from(size.1.saturating_sub(1));
        let row = usize::from(row);
        if row >= text_rows {
            return None;
        }
        let buffer = session.buffer();
        let line_idx = self.scroll + row;
        if line_idx >= buffer.line_count() {
            return Some(session.text().len());
        }
        let start = buffer.line_to_byte(line_idx)?;
        let line = buffer.line(line_idx)?;
        Some(start + byte_at_visual_x(&line, usize::from(column), session.tab_width()))
    }

    /// Draw one full frame: text, dropdown, status line, cursor
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        session: &EditorSession,
        theme: &Theme,
        size: (u16, u16),
        dropdown_height: usize,
        status: &str,
    ) -> io::Result<()> {
        let (cols, rows) = (usize::from(size.0), usize::from(size.1));
        let text_rows = rows.saturating_sub(1);
        let tab_width = session.tab_width();
        let buffer = session.buffer();
        let (cursor_line, cursor_x) = session.cursor_position();
        self.follow(cursor_line, text_rows);

        queue!(out, Hide)?;

        let tokens = session.tokens();
        for row in 0..text_rows {
            queue!(out, MoveTo(0, row as u16), Clear(ClearType::UntilNewLine))?;
            let line_idx = self.scroll + row;
            let (Some(start), Some(line)) = (buffer.line_to_byte(line_idx), buffer.line(line_idx))
            else {
                continue;
            };
            let mut x = 0;
            for (kind, piece) in line_segments(&tokens, start..start + line.len()) {
                let (clipped, width) = clip(piece, x, cols, tab_width);
                if !clipped.is_empty() {
                    queue!(out, PrintStyledContent(theme.style(kind).apply(clipped)))?;
                }
                x += width;
                if x >= cols {
                    break;
                }
            }
        }

        if let Some(state) = session.autocomplete() {
            self.render_dropdown(out, session, state, theme, size, dropdown_height)?;
        }

        // Status line
        let (status, _) = clip(status, 0, cols, tab_width);
        let padded = format!("{:<width$}", status, width = cols);
        queue!(
            out,
            MoveTo(0, text_rows as u16),
            PrintStyledContent(theme.status.apply(padded))
        )?;

        let screen_row = cursor_line.saturating_sub(self.scroll);
        queue!(
            out,
            MoveTo(cursor_x.min(cols.saturating_sub(1)) as u16, screen_row as u16),
            Show
        )?;
        out.flush()
    }

    fn render_dropdown<W: Write>(
        &self,
        out: &mut W,
        session: &EditorSession,
        state: &AutocompleteState,
        theme: &Theme,
        size: (u16, u16),
        dropdown_height: usize,
    ) -> io::Result<()> {
        let (cols, rows) = (usize::from(size.0), usize::from(size.1));
        let text_rows = rows.saturating_sub(1);
        let buffer = session.buffer();

        let window = dropdown_window(state.items.len(), state.selected_index, dropdown_height);
        let height = window.len();

        // Anchor under the trigger; flip above the line when there is no room
        let line_idx = buffer.byte_to_line(state.trigger_index);
        let line_start = buffer.line_to_byte(line_idx).unwrap_or(0);
        let anchor_x = visual_width(
            &session.text()[line_start..state.trigger_index],
            session.tab_width(),
        );
        let cursor_row = line_idx.saturating_sub(self.scroll);
        let top = if cursor_row + 1 + height <= text_rows {
            cursor_row + 1
        } else {
            cursor_row.saturating_sub(height)
        };

        let widest = state.items[window.clone()]
            .iter()
            .map(|item| visual_width(item, 1))
            .max()
            .unwrap_or(0);
        let width = (widest + 2).min(cols);
        let left = anchor_x.min(cols.saturating_sub(width));

        for (offset, idx) in window.enumerate() {
            let row = top + offset;
            if row >= text_rows {
                break;
            }
            let (label, label_width) = clip(&state.items[idx], 0, width.saturating_sub(2), 1);
            let cell = format!(" {}{} ", label, " ".repeat(width.saturating_sub(2 + label_width)));
            let style = if idx == state.selected_index {
                theme.dropdown_selected
            } else {
                theme.dropdown
            };
            queue!(out, MoveTo(left as u16, row as u16), PrintStyledContent(style.apply(cell)))?;
        }
        queue!(out, ResetColor)?;
        Ok(())
    }
}
