//! Recipe search by title and by ingredients

use serde::Serialize;

use super::lexer::{TokenKind, tokenize};
use super::library::Recipe;

/// Recipes whose title contains `phrase` (trimmed, case-insensitive)
pub fn search_by_title<'a>(
    recipes: impl IntoIterator<Item = &'a Recipe>,
    phrase: &str,
) -> Vec<&'a Recipe> {
    let phrase = phrase.trim().to_lowercase();
    if phrase.is_empty() {
        return Vec::new();
    }
    recipes
        .into_iter()
        .filter(|recipe| recipe.title.to_lowercase().contains(&phrase))
        .collect()
}

/// Lowercased ingredient names of a recipe, in document order
pub fn recipe_ingredients(source: &str) -> Vec<String> {
    tokenize(source)
        .into_iter()
        .filter(|token| token.kind == TokenKind::Ingredient)
        .filter_map(|token| token.name())
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// One recipe hit for an ingredient search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientMatch {
    pub slug: String,
    pub title: String,
    /// Distinct recipe ingredients that matched a term, in document order
    pub matched: Vec<String>,
    pub total_ingredients: usize,
}

impl IngredientMatch {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }
}

/// Rank recipes by how many of their ingredients match the query terms.
///
/// An ingredient matches a term when either one contains the other, so
/// `tomato` finds `cherry tomatoes` and `olive oil` finds `oil`.
pub fn search_by_ingredients<'a>(
    recipes: impl IntoIterator<Item = &'a Recipe>,
    terms: &[String],
) -> Vec<IngredientMatch> {
    let terms: Vec<String> = terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<IngredientMatch> = recipes
        .into_iter()
        .filter_map(|recipe| {
            let ingredients = recipe_ingredients(&recipe.source);
            let mut matched: Vec<String> = Vec::new();
            for ingredient in &ingredients {
                let hit = terms
                    .iter()
                    .any(|term| ingredient.contains(term.as_str()) || term.contains(ingredient.as_str()));
                if hit && !matched.contains(ingredient) {
                    matched.push(ingredient.clone());
                }
            }
            (!matched.is_empty()).then(|| IngredientMatch {
                slug: recipe.slug.clone(),
                title: recipe.title.clone(),
                matched,
                total_ingredients: ingredients.len(),
            })
        })
        .collect();

    // sort_by is stable: equal counts keep library order
    results.sort_by(|a, b| b.matched_count().cmp(&a.matched_count()));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipes() -> Vec<Recipe> {
        vec![
            Recipe::new("bruschetta", ">> title: Bruschetta\nTop @bread{} with @cherry tomatoes{} and @olive oil{}."),
            Recipe::new("garlic-oil", "Warm @olive oil{} with @garlic{2%cloves}."),
            Recipe::new("tea", "Steep @tea{1%bag} in @water."),
        ]
    }

    #[test]
    fn test_recipe_ingredients() {
        assert_eq!(
            recipe_ingredients("Mix @Flour{200%g}, @salt and @ eggs; @Flour again"),
            vec!["flour", "salt", "flour"]
        );
    }

    #[test]
    fn test_title_search() {
        let recipes = recipes();
        let hits = search_by_title(&recipes, "  BRUSCH ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "bruschetta");
        assert!(search_by_title(&recipes, "   ").is_empty());
    }

    #[test]
    fn test_ingredient_search_ranks_by_match_count() {
        let recipes = recipes();
        let terms = vec!["tomato".to_string(), "oil".to_string()];
        let hits = search_by_ingredients(&recipes, &terms);

        let slugs: Vec<&str> = hits.iter().map(|h| h.slug.as_str()).collect();
        assert_eq!(slugs, vec!["bruschetta", "garlic-oil"]);
        assert_eq!(hits[0].matched, vec!["cherry tomatoes", "olive oil"]);
        assert_eq!(hits[0].total_ingredients, 3);
        assert_eq!(hits[1].matched, vec!["olive oil"]);
    }

    #[test]
    fn test_term_containing_ingredient_matches() {
        let recipes = recipes();
        let hits = search_by_ingredients(&recipes, &["hot water".to_string()]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "tea");
        assert_eq!(hits[0].matched, vec!["water"]);
    }

    #[test]
    fn test_no_terms_no_results() {
        let recipes = recipes();
        assert!(search_by_ingredients(&recipes, &[]).is_empty());
        assert!(search_by_ingredients(&recipes, &["saffron".to_string()]).is_empty());
    }
}
