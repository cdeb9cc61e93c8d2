//! Command runners for the pantry binary.
//!
//! - `highlight` / `names`: one recipe file, printed highlighted or as names
//! - `complete` / `query`: completion candidates and search-phrase parsing
//! - `search`: title and ingredient search over a recipe directory
//! - `edit`: the interactive terminal editor

mod complete;
mod highlight;
mod search;
mod tui;

use std::io;
use std::path::{Path, PathBuf};

use pantry::config::Config;
use pantry::core::buffer::{Buffer, BufferError};
use pantry::core::library::{Library, LibraryError};
use pantry::core::names::NameSet;
use pantry::core::query::parse_query;
use pantry::terminal::theme::{THEME_NAMES, Theme};
use thiserror::Error;

pub use complete::{run_complete, run_query};
pub use highlight::{run_highlight, run_names};
pub use search::run_search;
pub use tui::run_editor;

/// Errors surfaced by the command runners
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error("Unknown theme '{0}' (available: {names})", names = THEME_NAMES.join(", "))]
    UnknownTheme(String),

    #[error("Cursor offset {cursor} is past the end of {} ({len} bytes)", .path.display())]
    CursorOutOfRange {
        path: PathBuf,
        cursor: usize,
        len: usize,
    },

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolve the configured theme name
pub fn theme_from_config(config: &Config) -> Result<Theme, RunError> {
    Theme::by_name(config.theme())
        .ok_or_else(|| RunError::UnknownTheme(config.theme().to_string()))
}

/// Known names of a library directory, or none without a library
fn load_known_names(library: Option<&Path>) -> Result<NameSet, RunError> {
    match library {
        Some(dir) => Ok(Library::load(dir)?.known_names()),
        None => Ok(NameSet::new()),
    }
}

/// Read a recipe file as text
fn read_recipe(path: &Path) -> Result<String, RunError> {
    Ok(Buffer::from_file(path)?.to_string())
}

/// Query terms from command-line words.
///
/// The shell has already split the words, so a word containing a space was
/// quoted by the user and stays one term unless it carries its own quotes.
fn query_terms(words: &[String]) -> Vec<String> {
    let phrase = words
        .iter()
        .map(|word| {
            let quoted = word.starts_with('"') || word.starts_with('\'');
            if word.contains(' ') && !quoted {
                format!("\"{}\"", word)
            } else {
                word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    parse_query(&phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme() {
        let mut config = Config::default();
        config.set("theme", "neon");
        let err = theme_from_config(&config).expect_err("unknown theme");
        assert_eq!(
            err.to_string(),
            "Unknown theme 'neon' (available: default, mono)"
        );
    }

    #[test]
    fn test_known_names_without_library() {
        let names = load_known_names(None).expect("empty names");
        assert!(names.is_empty());
    }

    #[test]
    fn test_missing_recipe() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_recipe(&dir.path().join("absent.cook")).expect_err("missing");
        assert!(matches!(err, RunError::Buffer(BufferError::NotFound(_))));
    }

    #[test]
    fn test_query_terms_keep_shell_words() {
        let words = vec!["olive oil".to_string(), "salt".to_string()];
        assert_eq!(query_terms(&words), vec!["olive oil", "salt"]);
    }

    #[test]
    fn test_query_terms_mixed_quoting() {
        let words = vec![
            "cook's salt".to_string(),
            "\"sea salt\"".to_string(),
            "'black pepper'".to_string(),
        ];
        assert_eq!(
            query_terms(&words),
            vec!["cook's salt", "sea salt", "black pepper"]
        );
    }
}
