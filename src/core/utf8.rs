use unicode_segmentation::UnicodeSegmentation;

/// Largest char boundary at or below `offset`, clamped to the text length.
///
/// Cursor offsets are byte offsets; this keeps slicing total for callers
/// that hand in a stale or mid-character position.
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Byte offset of the grapheme boundary before `offset` (0 at the start)
pub fn prev_grapheme_boundary(text: &str, offset: usize) -> usize {
    let offset = floor_char_boundary(text, offset);
    text[..offset]
        .grapheme_indices(true)
        .next_back()
        .map_or(0, |(idx, _)| idx)
}

/// Byte offset of the grapheme boundary after `offset` (text length at the end)
pub fn next_grapheme_boundary(text: &str, offset: usize) -> usize {
    let offset = floor_char_boundary(text, offset);
    text[offset..]
        .graphemes(true)
        .next()
        .map_or(text.len(), |g| offset + g.len())
}

/// Get the display width of a single character (for monospace terminal display)
/// Returns 0 for control characters, 1 for ASCII, 2 for wide CJK characters, etc.
pub fn char_width(c: char) -> usize {
    unicode_width::UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Get the display width of a grapheme cluster (sum of all character widths)
pub fn grapheme_width(g: &str) -> usize {
    g.chars().map(char_width).sum()
}

/// Visual (display) width of `text`, with tabs expanding to the next tab stop
pub fn visual_width(text: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut visual_x = 0;
    for grapheme in text.graphemes(true) {
        if grapheme == "\t" {
            visual_x = (visual_x / tab_width + 1) * tab_width;
        } else {
            visual_x += grapheme_width(grapheme);
        }
    }
    visual_x
}

/// Byte offset within `line` whose visual column is closest to, but not past,
/// `target_x`. Used to keep the column when moving between lines.
pub fn byte_at_visual_x(line: &str, target_x: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut visual_x = 0;

    for (idx, grapheme) in line.grapheme_indices(true) {
        let width = if grapheme == "\t" {
            (visual_x / tab_width + 1) * tab_width - visual_x
        } else {
            grapheme_width(grapheme)
        };
        if visual_x + width > target_x {
            return idx;
        }
        visual_x += width;
    }

    line.len()
}
