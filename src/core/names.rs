//! Name Extraction
//!
//! Collects the ingredient and cookware names a recipe already references.
//! Unlike the lexer this tolerates half-typed markup: `@name{` counts even
//! without its closing brace, so names feed autocomplete while typing.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::completion::Trigger;

/// `@name{` with the name running up to the first `{ @ # ~` or newline
static INGREDIENT_BRACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([^{@#~\n]*?)\{").expect("ingredient brace pattern"));
/// `@word`, checked afterwards for a following `{`
static INGREDIENT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([\p{Alphabetic}\p{N}_]+)").expect("ingredient word pattern"));
static COOKWARE_BRACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([^{@#~\n]*?)\{").expect("cookware brace pattern"));
static COOKWARE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([\p{Alphabetic}\p{N}_]+)").expect("cookware word pattern"));

/// Ingredient and cookware names, each kept as an ordered set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameSet {
    pub ingredients: BTreeSet<String>,
    pub cookware: BTreeSet<String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from caller-supplied known names
    pub fn from_known<I, C>(ingredients: I, cookware: C) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            cookware: cookware.into_iter().map(Into::into).collect(),
        }
    }

    /// Extract every name referenced in `source`
    pub fn extract(source: &str) -> Self {
        Self {
            ingredients: collect(source, &INGREDIENT_BRACED, &INGREDIENT_WORD),
            cookware: collect(source, &COOKWARE_BRACED, &COOKWARE_WORD),
        }
    }

    /// Names for the given trigger
    pub fn for_trigger(&self, trigger: Trigger) -> &BTreeSet<String> {
        match trigger {
            Trigger::Ingredient => &self.ingredients,
            Trigger::Cookware => &self.cookware,
        }
    }

    /// Add every name of `other`
    pub fn extend(&mut self, other: &NameSet) {
        self.ingredients.extend(other.ingredients.iter().cloned());
        self.cookware.extend(other.cookware.iter().cloned());
    }

    /// Union of both sets
    pub fn union(&self, other: &NameSet) -> NameSet {
        let mut merged = self.clone();
        merged.extend(other);
        merged
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.cookware.is_empty()
    }
}

fn collect(source: &str, braced: &Regex, word: &Regex) -> BTreeSet<String> {
    let mut names = BTreeSet::new();

    for caps in braced.captures_iter(source) {
        let name = caps[1].trim();
        if !name.is_empty() {
            names.insert(name.to_string());
        }
    }

    for caps in word.captures_iter(source) {
        let whole = caps.get(0).map_or(0, |m| m.end());
        // `@flour{` is already covered by the braced pass
        if source[whole..].starts_with('{') {
            continue;
        }
        names.insert(caps[1].to_string());
    }

    names
}

// =============================================================================
// TESTS
// =============================================================================
