//! A static, in-memory word catalog.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{WordProvider, WordsError, is_random_category};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A named group of candidate secret words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name, also the lookup key.
    pub name: String,
    /// Candidate words, in dataset order.
    pub words: Vec<String>,
}

impl Category {
    /// Builds a category from string slices.
    pub fn new(name: &str, words: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// An ordered list of categories implementing [`WordProvider`].
///
/// An empty catalog is a valid value (`Catalog::default()`); the engine
/// treats the resulting empty word pool as a degenerate round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Creates a catalog from categories.
    ///
    /// # Errors
    /// - [`WordsError::InvalidCategoryName`] if a name is blank or equals
    ///   the random sentinel.
    /// - [`WordsError::DuplicateCategory`] if two categories share a name.
    pub fn new(categories: Vec<Category>) -> Result<Self, WordsError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if category.name.trim().is_empty() || is_random_category(&category.name) {
                return Err(WordsError::InvalidCategoryName(category.name.clone()));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(WordsError::DuplicateCategory(category.name.clone()));
            }
        }
        Ok(Self { categories })
    }

    /// Parses a catalog from a JSON array of `{ "name", "words" }` objects.
    ///
    /// Unlike [`Catalog::new`], a loaded catalog must be playable: at least
    /// one category must contain a word.
    ///
    /// # Errors
    /// [`WordsError::Json`] on malformed input, [`WordsError::EmptyCatalog`]
    /// if no words were found, plus everything [`Catalog::new`] rejects.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, WordsError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        let catalog = Self::new(categories)?;
        if catalog.word_count() == 0 {
            return Err(WordsError::EmptyCatalog);
        }
        tracing::debug!(
            categories = catalog.categories.len(),
            words = catalog.word_count(),
            "word catalog loaded"
        );
        Ok(catalog)
    }

    /// The small catalog bundled with the engine.
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                Category::new(
                    "Animals",
                    &["Elephant", "Penguin", "Giraffe", "Dolphin", "Kangaroo", "Owl", "Zebra", "Octopus"],
                ),
                Category::new(
                    "Fruits & Vegetables",
                    &["Banana", "Carrot", "Pineapple", "Broccoli", "Strawberry", "Pumpkin", "Cucumber"],
                ),
                Category::new(
                    "Professions",
                    &["Firefighter", "Dentist", "Pilot", "Baker", "Teacher", "Plumber", "Astronaut"],
                ),
                Category::new(
                    "Sports",
                    &["Football", "Tennis", "Swimming", "Basketball", "Skiing", "Boxing", "Golf"],
                ),
            ],
        }
    }

    /// The categories, in order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Total number of words across all categories.
    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|c| c.words.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl WordProvider for Catalog {
    fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    fn category_words(&self, name: &str) -> Option<Vec<String>> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.words.clone())
    }

    fn all_words(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|c| c.words.iter().cloned())
            .collect()
    }
}
