//! `search` command

use std::io::Write;
use std::path::Path;

use pantry::core::library::{Library, Recipe};
use pantry::core::search::{IngredientMatch, search_by_ingredients, search_by_title};
use serde::Serialize;
use tracing::info;

use super::{RunError, query_terms};

#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    titles: Option<Vec<&'a Recipe>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ingredients: Option<Vec<IngredientMatch>>,
}

/// Search a library by title and/or ingredients.
///
/// With neither a title nor ingredient terms every recipe is listed.
pub fn run_search<W: Write>(
    library: &Path,
    title: Option<&str>,
    ingredients: &[String],
    json: bool,
    out: &mut W,
) -> Result<(), RunError> {
    let library = Library::load(library)?;
    let recipes = library.recipes();
    let terms = query_terms(ingredients);

    let titles = match title {
        Some(phrase) => Some(search_by_title(recipes.iter().copied(), phrase)),
        None if terms.is_empty() => Some(recipes.clone()),
        None => None,
    };
    let matches =
        (!terms.is_empty()).then(|| search_by_ingredients(recipes.iter().copied(), &terms));
    info!(
        titles = titles.as_ref().map_or(0, Vec::len),
        ingredient_matches = matches.as_ref().map_or(0, Vec::len),
        "search finished"
    );

    let report = SearchReport {
        titles,
        ingredients: matches,
    };
    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    if let Some(titles) = &report.titles {
        for recipe in titles {
            writeln!(out, "{}\t{}", recipe.slug, recipe.title)?;
        }
    }
    if let Some(matches) = &report.ingredients {
        for hit in matches {
            writeln!(
                out,
                "{}\t{}\t{}/{}\t{}",
                hit.slug,
                hit.title,
                hit.matched_count(),
                hit.total_ingredients,
                hit.matched.join(", ")
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn library() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("caprese.cook"),
            ">> title: Caprese Salad\nSlice @tomatoes and @mozzarella, drizzle @olive oil{}.",
        )
        .expect("write");
        fs::write(dir.path().join("tomato-soup.cook"), "Simmer @tomatoes{6} in a #pot.")
            .expect("write");
        dir
    }

    #[test]
    fn test_ingredient_search_output() {
        let dir = library();
        let mut out = Vec::new();
        let terms = vec!["tomato".to_string(), "\"olive oil\"".to_string()];
        run_search(dir.path(), None, &terms, false, &mut out).expect("search");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "caprese\tCaprese Salad\t2/3\ttomatoes, olive oil\n\
             tomato-soup\ttomato soup\t1/1\ttomatoes\n"
        );
    }

    #[test]
    fn test_title_search_json() {
        let dir = library();
        let mut out = Vec::new();
        run_search(dir.path(), Some("soup"), &[], true, &mut out).expect("search");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value["titles"][0]["slug"], "tomato-soup");
        assert!(value.get("ingredients").is_none());
    }

    #[test]
    fn test_lists_everything_without_filters() {
        let dir = library();
        let mut out = Vec::new();
        run_search(dir.path(), None, &[], false, &mut out).expect("search");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "caprese\tCaprese Salad\ntomato-soup\ttomato soup\n"
        );
    }
}
