//! `complete` and `query` commands

use std::io::Write;
use std::path::Path;

use pantry::core::completion::{AutocompleteContext, compute_candidates, compute_context};
use serde::Serialize;

use super::{RunError, load_known_names, query_terms, read_recipe};

/// Completion state at one cursor position
#[derive(Debug, Serialize)]
struct CompletionReport {
    context: Option<AutocompleteContext>,
    candidates: Vec<String>,
}

/// Print the completion context and ranked candidates at `cursor`
pub fn run_complete<W: Write>(
    path: &Path,
    cursor: usize,
    library: Option<&Path>,
    json: bool,
    out: &mut W,
) -> Result<(), RunError> {
    let text = read_recipe(path)?;
    if cursor > text.len() {
        return Err(RunError::CursorOutOfRange {
            path: path.to_path_buf(),
            cursor,
            len: text.len(),
        });
    }
    let known = load_known_names(library)?;

    let context = compute_context(&text, cursor);
    let candidates = context
        .as_ref()
        .map(|ctx| compute_candidates(ctx, &known, &text))
        .unwrap_or_default();
    let report = CompletionReport {
        context,
        candidates,
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    match &report.context {
        Some(ctx) => {
            writeln!(out, "{}{} (trigger at {})", ctx.trigger, ctx.query, ctx.trigger_index)?;
            for candidate in &report.candidates {
                writeln!(out, "  {}", candidate)?;
            }
        }
        None => writeln!(out, "no completion here")?,
    }
    Ok(())
}

/// Print the terms of a search phrase, one per line
pub fn run_query<W: Write>(phrase: &[String], out: &mut W) -> Result<(), RunError> {
    for term in query_terms(phrase) {
        writeln!(out, "{}", term)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_complete_with_library() {
        let dir = tempfile::tempdir().expect("tempdir");
        let library = dir.path().join("library");
        fs::create_dir(&library).expect("library dir");
        fs::write(library.join("salad.cook"), "Toss @tomatoes with @tarragon.").expect("write");
        let recipe = dir.path().join("draft.cook");
        fs::write(&recipe, "Add @ta").expect("write");

        let mut out = Vec::new();
        run_complete(&recipe, 7, Some(&library), false, &mut out).expect("complete");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "@ta (trigger at 4)\n  ta\n  tarragon\n"
        );
    }

    #[test]
    fn test_complete_json_without_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        let recipe = dir.path().join("draft.cook");
        fs::write(&recipe, "mail@host").expect("write");

        let mut out = Vec::new();
        run_complete(&recipe, 9, None, true, &mut out).expect("complete");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert!(value["context"].is_null());
        assert_eq!(value["candidates"], serde_json::json!([]));
    }

    #[test]
    fn test_cursor_past_end() {
        let dir = tempfile::tempdir().expect("tempdir");
        let recipe = dir.path().join("draft.cook");
        fs::write(&recipe, "abc").expect("write");
        let err = run_complete(&recipe, 4, None, false, &mut Vec::new()).expect_err("out of range");
        assert!(matches!(err, RunError::CursorOutOfRange { len: 3, .. }));
    }

    #[test]
    fn test_query_terms() {
        let mut out = Vec::new();
        let phrase = vec!["Tomato".to_string(), "\"olive oil\"".to_string()];
        run_query(&phrase, &mut out).expect("query");
        assert_eq!(String::from_utf8(out).expect("utf8"), "tomato\nolive oil\n");
    }

    #[test]
    fn test_query_keeps_spaced_word_whole() {
        let mut out = Vec::new();
        let phrase = vec!["olive oil".to_string(), "salt".to_string()];
        run_query(&phrase, &mut out).expect("query");
        assert_eq!(String::from_utf8(out).expect("utf8"), "olive oil\nsalt\n");
    }
}
