//! Recipe library
//!
//! A directory tree of `*.cook` files. The names used across the library are
//! the "known names" offered by autocomplete.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::names::NameSet;

/// File extension of recipe files
pub const RECIPE_EXTENSION: &str = "cook";

/// Errors raised while loading a library
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Library directory does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Library path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to walk library: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One stored recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub slug: String,
    pub title: String,
    pub path: PathBuf,
    #[serde(skip)]
    pub source: String,
}

impl Recipe {
    pub fn new(slug: impl Into<String>, source: impl Into<String>) -> Self {
        let slug = slug.into();
        let source = source.into();
        let title = title_of(&slug, &source);
        Self {
            slug,
            title,
            path: PathBuf::new(),
            source,
        }
    }
}

/// Title from a `>> title:` line, else the slug with separators spaced out
fn title_of(slug: &str, source: &str) -> String {
    source
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix(">>"))
        .filter_map(|rest| rest.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("title"))
        .map(|(_, value)| value.trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| slug.replace(['-', '_'], " "))
}

/// All recipes under one directory, keyed by slug
#[derive(Debug, Default)]
pub struct Library {
    recipes: BTreeMap<String, Recipe>,
}

impl Library {
    /// Walk `dir` for `*.cook` files.
    ///
    /// Unreadable files and duplicate slugs are skipped with a warning.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(LibraryError::NotFound(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(LibraryError::NotADirectory(dir.to_path_buf()));
        }

        let mut library = Library::default();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().is_none_or(|ext| ext != RECIPE_EXTENSION)
            {
                continue;
            }
            let Some(slug) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };

            let source = match fs::read(path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable recipe");
                    continue;
                }
            };
            if library.recipes.contains_key(&slug) {
                warn!(path = %path.display(), slug, "skipping recipe with duplicate slug");
                continue;
            }

            debug!(slug, "loaded recipe");
            let mut recipe = Recipe::new(slug.clone(), source);
            recipe.path = path.to_path_buf();
            library.recipes.insert(slug, recipe);
        }

        info!(root = %dir.display(), recipes = library.recipes.len(), "loaded library");
        Ok(library)
    }

    /// Build a library from in-memory recipes
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self {
            recipes: recipes
                .into_iter()
                .map(|recipe| (recipe.slug.clone(), recipe))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&Recipe> {
        self.recipes.get(slug)
    }

    /// Recipes ordered by title (then slug)
    pub fn recipes(&self) -> Vec<&Recipe> {
        let mut recipes: Vec<&Recipe> = self.recipes.values().collect();
        recipes.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.slug.cmp(&b.slug))
        });
        recipes
    }

    /// Every ingredient and cookware name used anywhere in the library
    pub fn known_names(&self) -> NameSet {
        let mut names = NameSet::new();
        for recipe in self.recipes.values() {
            names.extend(&NameSet::extract(&recipe.source));
        }
        names
    }
}
