//! Cooklang Token Lexer
//!
//! A pull-parser that splits recipe markup into highlight tokens
//! (ingredients, cookware, timers, comments, metadata and plain text).
//!
//! Key design principles:
//! - **Zero-copy:** Token.text is a &str slice of original input
//! - **Lossless:** token texts concatenate back to the exact input
//! - **Earliest match wins:** every scan rule reports its leftmost match in the
//!   unconsumed input; the lowest start offset is emitted next and ties go to
//!   the rule declared first in [`RULES`]
//! - **Match caching:** a rule's next match stays valid until the scan position
//!   passes its start, so each rule is only re-searched when it falls behind

use std::collections::VecDeque;
use std::ops::Range;

use serde::Serialize;

// =============================================================================
// TOKEN TYPES
// =============================================================================

/// Token kind for recipe highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Ingredient,    // @salt, @olive oil{2%tbsp}
    Cookware,      // #pan, #large pot{}
    Timer,         // ~{10%minutes}, ~rest{5%min}
    Comment,       // -- note, [- block -]
    MetadataKey,   // ">> servings:"
    MetadataValue, // " 4"
    Text,
}

impl TokenKind {
    /// Stable name used by renderers and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Ingredient => "ingredient",
            TokenKind::Cookware => "cookware",
            TokenKind::Timer => "timer",
            TokenKind::Comment => "comment",
            TokenKind::MetadataKey => "metadata-key",
            TokenKind::MetadataValue => "metadata-value",
            TokenKind::Text => "text",
        }
    }

    /// Returns true for tokens that carry a referenced name
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            TokenKind::Ingredient | TokenKind::Cookware | TokenKind::Timer
        )
    }
}

// =============================================================================
// TOKEN STRUCTURE
// =============================================================================

/// A token with zero-copy text slice and position information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token<'a> {
    /// The kind of this token
    pub kind: TokenKind,
    /// Zero-copy slice into original input
    pub text: &'a str,
    /// Byte offset from start of input
    pub start: usize,
    /// Byte length
    #[serde(skip)]
    pub len: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, start: usize) -> Self {
        Self {
            kind,
            text,
            start,
            len: text.len(),
        }
    }

    /// Byte offset of end (exclusive)
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Referenced name of an ingredient, cookware or timer token.
    ///
    /// Strips the sigil and any brace group: `@olive oil{2%tbsp}` -> `olive oil`.
    pub fn name(&self) -> Option<&'a str> {
        if !self.kind.is_reference() {
            return None;
        }
        let body = &self.text[1..];
        let body = match body.find('{') {
            Some(idx) => &body[..idx],
            None => body,
        };
        Some(body.trim())
    }
}

// =============================================================================
// CHARACTER CLASSES
// =============================================================================

/// Unicode-aware word character (letters, digits, underscore)
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Characters that end a line for comments and metadata
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Characters that cannot appear in a braced name
fn ends_braced_name(ch: char) -> bool {
    matches!(ch, '{' | '@' | '#' | '~' | '\n')
}

fn line_end(input: &str, from: usize) -> usize {
    input[from..]
        .find(is_line_terminator)
        .map_or(input.len(), |idx| from + idx)
}

fn is_line_start(input: &str, pos: usize) -> bool {
    pos == 0 || input[..pos].chars().next_back().is_some_and(is_line_terminator)
}

/// Byte offset just past the first `}` at or after `from`
fn close_brace(input: &str, from: usize) -> Option<usize> {
    input[from..].find('}').map(|idx| from + idx + 1)
}

// =============================================================================
// SCAN RULES
// =============================================================================

/// One pattern of the scanner. Declaration order in [`RULES`] is the tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// `[- ... -]`, may span lines
    BlockComment,
    /// `--` to end of line
    LineComment,
    /// `>>` at line start to end of line
    Metadata,
    /// `~name{...}` or `~{...}`
    Timer,
    /// `@name with spaces{...}`
    IngredientBraced,
    /// `@name with spaces` directly before a `{` that is never closed
    IngredientBeforeBrace,
    /// `@word`
    IngredientWord,
    /// `#name with spaces{...}`
    CookwareBraced,
    /// `#word`
    CookwareWord,
}

const RULES: [Rule; 9] = [
    Rule::BlockComment,
    Rule::LineComment,
    Rule::Metadata,
    Rule::Timer,
    Rule::IngredientBraced,
    Rule::IngredientBeforeBrace,
    Rule::IngredientWord,
    Rule::CookwareBraced,
    Rule::CookwareWord,
];

impl Rule {
    fn kind(self) -> TokenKind {
        match self {
            Rule::BlockComment | Rule::LineComment => TokenKind::Comment,
            Rule::Metadata => TokenKind::MetadataKey,
            Rule::Timer => TokenKind::Timer,
            Rule::IngredientBraced | Rule::IngredientBeforeBrace | Rule::IngredientWord => {
                TokenKind::Ingredient
            }
            Rule::CookwareBraced | Rule::CookwareWord => TokenKind::Cookware,
        }
    }

    /// Leftmost match starting at or after `from`, as an absolute byte range
    fn find(self, input: &str, from: usize) -> Option<Range<usize>> {
        match self {
            Rule::BlockComment => {
                let start = from + input[from..].find("[-")?;
                let body = start + 2;
                let end = body + input[body..].find("-]")? + 2;
                Some(start..end)
            }
            Rule::LineComment => {
                let start = from + input[from..].find("--")?;
                Some(start..line_end(input, start))
            }
            Rule::Metadata => input[from..]
                .match_indices(">>")
                .map(|(idx, _)| from + idx)
                .find(|&start| is_line_start(input, start))
                .map(|start| start..line_end(input, start)),
            Rule::Timer => {
                // Only the first `~` can match: a later one would need a `}`
                // after the same or a later `{`.
                let start = from + input[from..].find('~')?;
                let open = start + 1 + input[start + 1..].find('{')?;
                let end = close_brace(input, open + 1)?;
                Some(start..end)
            }
            Rule::IngredientBraced => find_braced(input, from, '@'),
            Rule::CookwareBraced => find_braced(input, from, '#'),
            Rule::IngredientBeforeBrace => find_before_brace(input, from),
            Rule::IngredientWord => find_word(input, from, '@'),
            Rule::CookwareWord => find_word(input, from, '#'),
        }
    }
}

/// `<sigil><name>{...}` where the name excludes `{ @ # ~` and newlines
fn find_braced(input: &str, from: usize, sigil: char) -> Option<Range<usize>> {
    for (idx, _) in input[from..].match_indices(sigil) {
        let start = from + idx;
        let name_start = start + sigil.len_utf8();
        let Some(stop) = input[name_start..].find(ends_braced_name) else {
            return None;
        };
        let open = name_start + stop;
        if input[open..].starts_with('{') {
            // No `}` after this brace means no later brace can close either
            return close_brace(input, open + 1).map(|end| start..end);
        }
    }
    None
}

/// `@word[ word...]` immediately followed by `{`, brace excluded
fn find_before_brace(input: &str, from: usize) -> Option<Range<usize>> {
    for (idx, _) in input[from..].match_indices('@') {
        let start = from + idx;
        let mut chars = input[start + 1..].char_indices();
        if !chars.next().is_some_and(|(_, ch)| is_word_char(ch)) {
            continue;
        }
        let stop = chars
            .find(|&(_, ch)| !(is_word_char(ch) || ch == ' '))
            .map(|(offset, ch)| (start + 1 + offset, ch));
        if let Some((end, '{')) = stop {
            return Some(start..end);
        }
    }
    None
}

/// `<sigil>` followed by one or more word characters
fn find_word(input: &str, from: usize, sigil: char) -> Option<Range<usize>> {
    for (idx, _) in input[from..].match_indices(sigil) {
        let start = from + idx;
        let name_start = start + sigil.len_utf8();
        let name_len = input[name_start..]
            .find(|ch: char| !is_word_char(ch))
            .unwrap_or(input.len() - name_start);
        if name_len > 0 {
            return Some(start..name_start + name_len);
        }
    }
    None
}

// =============================================================================
// LEXER ITERATOR
// =============================================================================

/// Cached search result of one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cached {
    Unsearched,
    NoMatch,
    Match(usize, usize),
}

/// Pull-parser lexer that yields tokens lazily
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    cache: [Cached; RULES.len()],
    pending: VecDeque<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            cache: [Cached::Unsearched; RULES.len()],
            pending: VecDeque::new(),
        }
    }

    /// Earliest match among all rules; ties keep the first declared rule
    fn earliest(&mut self) -> Option<(Rule, Range<usize>)> {
        let mut best: Option<(Rule, Range<usize>)> = None;

        for (slot, rule) in RULES.iter().enumerate() {
            let stale = match self.cache[slot] {
                Cached::Unsearched => true,
                Cached::Match(start, _) => start < self.pos,
                Cached::NoMatch => false,
            };
            if stale {
                self.cache[slot] = match rule.find(self.input, self.pos) {
                    Some(range) => Cached::Match(range.start, range.end),
                    None => Cached::NoMatch,
                };
            }

            if let Cached::Match(start, end) = self.cache[slot] {
                let earlier = best.as_ref().is_none_or(|(_, b)| start < b.start);
                if earlier {
                    best = Some((*rule, start..end));
                }
            }
        }

        best
    }

    fn push(&mut self, kind: TokenKind, range: Range<usize>) {
        let text = &self.input[range.clone()];
        self.pending.push_back(Token::new(kind, text, range.start));
    }

    /// Queue the tokens of one match, splitting metadata at the first `:`
    fn push_match(&mut self, rule: Rule, range: Range<usize>) {
        if rule != Rule::Metadata {
            self.push(rule.kind(), range);
            return;
        }
        match self.input[range.clone()].find(':') {
            Some(colon) => {
                let split = range.start + colon + 1;
                self.push(TokenKind::MetadataKey, range.start..split);
                self.push(TokenKind::MetadataValue, split..range.end);
            }
            None => self.push(TokenKind::MetadataKey, range),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }
        if self.pos >= self.input.len() {
            return None;
        }

        match self.earliest() {
            Some((rule, range)) => {
                if range.start > self.pos {
                    self.push(TokenKind::Text, self.pos..range.start);
                }
                self.pos = range.end;
                self.push_match(rule, range);
            }
            None => {
                self.push(TokenKind::Text, self.pos..self.input.len());
                self.pos = self.input.len();
            }
        }

        self.pending.pop_front()
    }
}

/// Tokenize a whole recipe source
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}

// =============================================================================
// TESTS
// =============================================================================
