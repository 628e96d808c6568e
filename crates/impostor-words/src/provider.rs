//! The [`WordProvider`] trait: how the engine looks up candidate words.

/// Category name that requests a word drawn from every category.
pub const RANDOM_CATEGORY: &str = "Random";

/// Returns `true` if `name` asks for the union of all categories.
///
/// An empty name is treated the same as the sentinel.
pub fn is_random_category(name: &str) -> bool {
    name.is_empty() || name == RANDOM_CATEGORY
}

/// Read-only lookup of words by category.
///
/// Implementors only describe their categories; [`words_for`] carries the
/// resolution rule shared by every provider.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` because the provider lives inside the session
/// actor's task for the whole lifetime of the session.
///
/// [`words_for`]: WordProvider::words_for
pub trait WordProvider: Send + Sync + 'static {
    /// Names of all categories, in display order.
    fn category_names(&self) -> Vec<String>;

    /// Words of a single category, or `None` if no category has that name.
    fn category_words(&self, name: &str) -> Option<Vec<String>>;

    /// All words of all categories, concatenated in category order.
    fn all_words(&self) -> Vec<String> {
        self.category_names()
            .iter()
            .filter_map(|name| self.category_words(name))
            .flatten()
            .collect()
    }

    /// Resolves the word pool for a round.
    ///
    /// The random sentinel and unknown categories both fall back to
    /// [`all_words`](WordProvider::all_words). The result may be empty;
    /// deciding what to do with an empty pool is the caller's job.
    fn words_for(&self, category: &str) -> Vec<String> {
        if is_random_category(category) {
            return self.all_words();
        }
        match self.category_words(category) {
            Some(words) => words,
            None => {
                tracing::debug!(category, "unknown category, using all words");
                self.all_words()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two fixed categories, no catalog validation involved.
    struct Fixed;

    impl WordProvider for Fixed {
        fn category_names(&self) -> Vec<String> {
            vec!["Colors".into(), "Shapes".into()]
        }

        fn category_words(&self, name: &str) -> Option<Vec<String>> {
            match name {
                "Colors" => Some(vec!["Red".into(), "Blue".into()]),
                "Shapes" => Some(vec!["Circle".into()]),
                _ => None,
            }
        }
    }

    #[test]
    fn test_is_random_category() {
        assert!(is_random_category(RANDOM_CATEGORY));
        assert!(is_random_category(""));
        assert!(!is_random_category("Colors"));
        assert!(!is_random_category("random"));
    }

    #[test]
    fn test_words_for_named_category() {
        assert_eq!(Fixed.words_for("Shapes"), vec!["Circle".to_string()]);
    }

    #[test]
    fn test_words_for_random_is_union_in_order() {
        assert_eq!(Fixed.words_for(RANDOM_CATEGORY), vec!["Red", "Blue", "Circle"]);
    }

    #[test]
    fn test_words_for_unknown_falls_back_to_union() {
        assert_eq!(Fixed.words_for("Planets").len(), 3);
    }
}
