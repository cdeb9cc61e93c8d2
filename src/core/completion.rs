//! Name Completion
//!
//! Context-sensitive completion for `@ingredient` and `#cookware` references.
//! Everything here is a pure function of (text, cursor, known names); the
//! editing session owns the resulting [`AutocompleteState`].

use std::cmp::Ordering;
use std::fmt;

use feruca::Collator;
use serde::Serialize;
use tracing::debug;

use super::lexer::is_word_char;
use super::names::NameSet;
use super::utf8::floor_char_boundary;

/// Character that opens a completable reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Trigger {
    /// `@`
    #[serde(rename = "@")]
    Ingredient,
    /// `#`
    #[serde(rename = "#")]
    Cookware,
}

impl Trigger {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '@' => Some(Trigger::Ingredient),
            '#' => Some(Trigger::Cookware),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Trigger::Ingredient => '@',
            Trigger::Cookware => '#',
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// "The user is typing a name after this trigger at this offset"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutocompleteContext {
    pub trigger: Trigger,
    /// Text between the trigger and the cursor
    pub query: String,
    /// Byte offset of the trigger character
    pub trigger_index: usize,
}

/// Find the completion context at `cursor`, if any.
///
/// Scans backwards from the cursor to the nearest `@`/`#` on the same line.
/// A trigger glued to a preceding word character (`email@host`) does not
/// count, and neither does a query that already contains a `{`.
pub fn compute_context(text: &str, cursor: usize) -> Option<AutocompleteContext> {
    let cursor = floor_char_boundary(text, cursor);
    let before = &text[..cursor];

    for (idx, ch) in before.char_indices().rev() {
        if ch == '\n' || ch == '\r' {
            return None;
        }
        let Some(trigger) = Trigger::from_char(ch) else {
            continue;
        };
        if before[..idx].chars().next_back().is_some_and(is_word_char) {
            return None;
        }
        let query = &before[idx + ch.len_utf8()..];
        if query.contains('{') {
            return None;
        }
        return Some(AutocompleteContext {
            trigger,
            query: query.to_string(),
            trigger_index: idx,
        });
    }

    None
}

/// Unicode collation (CLDR root order), falling back to code points for a
/// total order
fn collate(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

/// Rank candidate names for a context.
///
/// The pool is `known` for the context's trigger plus every name already used
/// in `text`. Names containing the query (case-insensitively) are kept;
/// prefix matches come first, each group in collation order.
pub fn compute_candidates(
    context: &AutocompleteContext,
    known: &NameSet,
    text: &str,
) -> Vec<String> {
    let in_document = NameSet::extract(text);
    let query = context.query.to_lowercase();

    let mut ranked: Vec<(bool, &String)> = known
        .for_trigger(context.trigger)
        .union(in_document.for_trigger(context.trigger))
        .filter_map(|name| {
            let lower = name.to_lowercase();
            lower
                .contains(&query)
                .then(|| (lower.starts_with(&query), name))
        })
        .collect();

    let mut collator = Collator::default();
    ranked.sort_by(|(a_prefix, a), (b_prefix, b)| {
        b_prefix
            .cmp(a_prefix)
            .then_with(|| collate(&mut collator, a, b))
    });

    ranked.into_iter().map(|(_, name)| name.clone()).collect()
}

/// Splice `chosen` into `text` in place of the typed query.
///
/// Keeps everything before the trigger and everything from the cursor on.
/// Names containing a space get an empty `{}` so they stay one reference.
/// Returns the new text and the cursor placed right after the inserted name.
pub fn apply_completion(
    text: &str,
    cursor: usize,
    context: &AutocompleteContext,
    chosen: &str,
) -> (String, usize) {
    let trigger_index = floor_char_boundary(text, context.trigger_index);
    let cursor = floor_char_boundary(text, cursor).max(trigger_index);

    let mut out = String::with_capacity(text.len() + chosen.len() + 3);
    out.push_str(&text[..trigger_index]);
    out.push(context.trigger.as_char());
    out.push_str(chosen);
    let new_cursor = out.len();
    if chosen.contains(' ') {
        out.push_str("{}");
    }
    out.push_str(&text[cursor..]);

    (out, new_cursor)
}

// =============================================================================
// AUTOCOMPLETE STATE
// =============================================================================

/// Live suggestion list of an editing session.
///
/// Only exists while a context is active and at least one candidate matches,
/// so `items` is never empty and `selected_index < items.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutocompleteState {
    pub trigger: Trigger,
    pub query: String,
    pub trigger_index: usize,
    pub items: Vec<String>,
    pub selected_index: usize,
}

impl AutocompleteState {
    /// Recompute the state after an edit or cursor move.
    ///
    /// With the same trigger as `previous` the selection is kept (clamped to
    /// the new list); a new trigger starts at the first item.
    pub fn recompute(
        previous: Option<&AutocompleteState>,
        text: &str,
        cursor: usize,
        known: &NameSet,
    ) -> Option<AutocompleteState> {
        let context = compute_context(text, cursor)?;
        let items = compute_candidates(&context, known, text);
        if items.is_empty() {
            debug!(query = %context.query, trigger = %context.trigger, "no completion candidates");
            return None;
        }

        let selected_index = match previous {
            Some(prev) if prev.trigger == context.trigger => {
                prev.selected_index.min(items.len() - 1)
            }
            _ => 0,
        };

        Some(AutocompleteState {
            trigger: context.trigger,
            query: context.query,
            trigger_index: context.trigger_index,
            items,
            selected_index,
        })
    }

    /// The context this state was computed from
    pub fn context(&self) -> AutocompleteContext {
        AutocompleteContext {
            trigger: self.trigger,
            query: self.query.clone(),
            trigger_index: self.trigger_index,
        }
    }

    /// Currently highlighted candidate
    pub fn selected(&self) -> Option<&str> {
        self.items.get(self.selected_index).map(String::as_str)
    }

    /// Move selection down, wrapping to the top
    pub fn select_next(&mut self) {
        let count = self.items.len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
        }
    }

    /// Move selection up, wrapping to the bottom
    pub fn select_prev(&mut self) {
        let count = self.items.len();
        if count > 0 {
            self.selected_index = (self.selected_index + count - 1) % count;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
