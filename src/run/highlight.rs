//! `highlight` and `names` commands

use std::io::Write;
use std::path::Path;

use pantry::core::lexer::tokenize;
use pantry::core::names::NameSet;
use pantry::terminal::render::write_highlighted;
use pantry::terminal::theme::Theme;
use tracing::debug;

use super::{RunError, read_recipe};

/// Print a recipe highlighted, or its tokens as JSON
pub fn run_highlight<W: Write>(
    path: &Path,
    json: bool,
    theme: &Theme,
    out: &mut W,
) -> Result<(), RunError> {
    let source = read_recipe(path)?;
    let tokens = tokenize(&source);
    debug!(tokens = tokens.len(), "tokenized recipe");

    if json {
        serde_json::to_writer_pretty(&mut *out, &tokens)?;
        writeln!(out)?;
    } else {
        write_highlighted(out, &tokens, theme)?;
        if !source.ends_with('\n') {
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Print the ingredient and cookware names a recipe references
pub fn run_names<W: Write>(path: &Path, json: bool, out: &mut W) -> Result<(), RunError> {
    let source = read_recipe(path)?;
    let names = NameSet::extract(&source);

    if json {
        serde_json::to_writer_pretty(&mut *out, &names)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "ingredients:")?;
    for name in &names.ingredients {
        writeln!(out, "  {}", name)?;
    }
    writeln!(out, "cookware:")?;
    for name in &names.cookware {
        writeln!(out, "  {}", name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn recipe(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pancakes.cook");
        fs::write(&path, content).expect("write recipe");
        (dir, path)
    }

    #[test]
    fn test_names_text_output() {
        let (_dir, path) = recipe("Whisk @eggs{2} and @milk in a #bowl.");
        let mut out = Vec::new();
        run_names(&path, false, &mut out).expect("names");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "ingredients:\n  eggs\n  milk\ncookware:\n  bowl\n"
        );
    }

    #[test]
    fn test_highlight_json() {
        let (_dir, path) = recipe(">> serves: 4");
        let mut out = Vec::new();
        run_highlight(&path, true, &Theme::mono(), &mut out).expect("highlight");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value[0]["kind"], "metadata-key");
        assert_eq!(value[0]["text"], ">> serves:");
        assert_eq!(value[1]["start"], 10);
    }
}
