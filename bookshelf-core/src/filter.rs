//! Catalog filtering
//!
//! Matching is a pure function of the criteria and the book list: the
//! result is the ordered subsequence of books passing the genre, author and
//! title predicates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::BookRecord;

/// Sentinel that disables the genre or author predicate
pub const ANY: &str = "any";

/// Blank ids count as absent, so they disable the predicate like `"any"`
fn is_unset(value: &str) -> bool {
    value == ANY || value.trim().is_empty()
}

/// One filter submission: genre, author and title substring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// `"any"` or a genre id
    pub genre: String,

    /// `"any"` or an author id
    pub author: String,

    /// Raw title text; blank means no title filter
    pub title: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            genre: ANY.to_string(),
            author: ANY.to_string(),
            title: String::new(),
        }
    }
}

impl FilterCriteria {
    /// Criteria that match every book
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Build criteria from optional fields, as submitted by a form.
    ///
    /// Absent fields fall back to `"any"` / empty title.
    pub fn from_optional(genre: Option<&str>, author: Option<&str>, title: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            genre: genre.map(str::to_string).unwrap_or(defaults.genre),
            author: author.map(str::to_string).unwrap_or(defaults.author),
            title: title.map(str::to_string).unwrap_or(defaults.title),
        }
    }

    /// Build criteria from `key=value` pairs. Unknown keys are ignored and
    /// missing keys keep their neutral value.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .fold(Self::default(), |criteria, (key, value)| match key {
                "genre" => criteria.with_genre(value),
                "author" => criteria.with_author(value),
                "title" => criteria.with_title(value),
                _ => criteria,
            })
    }

    /// True when no predicate narrows the catalog
    pub fn is_neutral(&self) -> bool {
        is_unset(&self.genre) && is_unset(&self.author) && self.title.trim().is_empty()
    }

    fn matches_genre(&self, book: &BookRecord) -> bool {
        is_unset(&self.genre) || book.has_genre(&self.genre)
    }

    fn matches_author(&self, book: &BookRecord) -> bool {
        is_unset(&self.author) || book.author == self.author
    }

    fn matches_title(&self, book: &BookRecord) -> bool {
        self.title.trim().is_empty()
            || book
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase())
    }

    /// Whether a single book satisfies all three predicates
    pub fn matches(&self, book: &BookRecord) -> bool {
        self.matches_genre(book) && self.matches_author(book) && self.matches_title(book)
    }
}

/// Books matching `criteria`, in `books` order
pub fn evaluate<'a>(criteria: &FilterCriteria, books: &'a [BookRecord]) -> Vec<&'a BookRecord> {
    books.iter().filter(|book| criteria.matches(book)).collect()
}

/// Positions in `books` of the books matching `criteria`, ascending
pub fn evaluate_indices(criteria: &FilterCriteria, books: &[BookRecord]) -> Vec<usize> {
    let indices: Vec<usize> = books
        .iter()
        .enumerate()
        .filter(|(_, book)| criteria.matches(book))
        .map(|(index, _)| index)
        .collect();

    debug!(
        genre = %criteria.genre,
        author = %criteria.author,
        title = %criteria.title,
        matches = indices.len(),
        total = books.len(),
        "Evaluated filter"
    );
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn books() -> Vec<BookRecord> {
        vec![
            BookRecord::new("1", "Alpha", "a1", "", ["g1"]),
            BookRecord::new("2", "Beta", "a2", "", ["g2"]),
            BookRecord::new("3", "Alphabet Soup", "a2", "", ["g1", "g2"]),
        ]
    }

    fn ids(matches: &[&BookRecord]) -> Vec<String> {
        matches.iter().map(|b| b.id.clone()).collect()
    }

    #[test]
    fn test_neutral_criteria_is_identity() {
        let books = books();
        let matches = evaluate(&FilterCriteria::any(), &books);
        assert_eq!(ids(&matches), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_title_is_case_insensitive_substring() {
        let books = books();
        let criteria = FilterCriteria::any().with_title("ALPHA");
        assert_eq!(ids(&evaluate(&criteria, &books)), vec!["1", "3"]);
    }

    #[test]
    fn test_blank_title_matches_everything() {
        let books = books();
        let criteria = FilterCriteria::any().with_title("   ");
        assert_eq!(evaluate(&criteria, &books).len(), 3);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let books = books();
        let criteria = FilterCriteria::any()
            .with_genre("g1")
            .with_author("a2")
            .with_title("soup");
        assert_eq!(ids(&evaluate(&criteria, &books)), vec!["3"]);

        let criteria = FilterCriteria::any().with_genre("g2").with_author("a1");
        assert!(evaluate(&criteria, &books).is_empty());
    }

    #[test]
    fn test_unknown_genre_matches_nothing() {
        let books = books();
        let criteria = FilterCriteria::any().with_genre("g404");
        assert!(evaluate(&criteria, &books).is_empty());
    }

    #[test]
    fn test_indices_agree_with_records() {
        let books = books();
        let criteria = FilterCriteria::any().with_genre("g2");
        let indices = evaluate_indices(&criteria, &books);
        assert_eq!(indices, vec![1, 2]);

        let records: Vec<&BookRecord> = indices.iter().map(|&i| &books[i]).collect();
        assert_eq!(records, evaluate(&criteria, &books));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let books = books();
        let criteria = FilterCriteria::any().with_title("a");
        assert_eq!(evaluate(&criteria, &books), evaluate(&criteria, &books));
    }

    #[test]
    fn test_absent_fields_default_to_neutral() {
        let criteria = FilterCriteria::from_optional(None, Some("a1"), None);
        assert_eq!(criteria.genre, ANY);
        assert_eq!(criteria.author, "a1");
        assert_eq!(criteria.title, "");

        let parsed: FilterCriteria = serde_json::from_str(r#"{"genre": "g1"}"#).unwrap();
        assert_eq!(parsed, FilterCriteria::any().with_genre("g1"));
    }

    #[test]
    fn test_from_pairs() {
        let criteria = FilterCriteria::from_pairs([("title", "beta"), ("shelf", "x")]);
        assert_eq!(criteria, FilterCriteria::any().with_title("beta"));
        assert!(!criteria.is_neutral());
        assert!(FilterCriteria::from_pairs(Vec::<(&str, &str)>::new()).is_neutral());
    }

    #[test]
    fn test_blank_genre_and_author_are_neutral() {
        let books = books();
        let criteria = FilterCriteria::from_pairs([("genre", ""), ("author", "  ")]);
        assert!(criteria.is_neutral());
        assert_eq!(ids(&evaluate(&criteria, &books)), vec!["1", "2", "3"]);

        let criteria = FilterCriteria::from_optional(Some(""), Some("a2"), None);
        assert_eq!(ids(&evaluate(&criteria, &books)), vec!["2", "3"]);
    }

    #[test]
    fn test_results_are_ordered_subsequences() {
        let books = books();
        let genres = [ANY, "g1", "g2", "g404", ""];
        let authors = [ANY, "a1", "a2"];
        let titles = ["", "a", "ALPHA", "soup", "zzz"];

        for genre in genres {
            for author in authors {
                for title in titles {
                    let criteria = FilterCriteria::from_pairs([
                        ("genre", genre),
                        ("author", author),
                        ("title", title),
                    ]);
                    let indices = evaluate_indices(&criteria, &books);

                    assert!(
                        indices.windows(2).all(|pair| pair[0] < pair[1]),
                        "order lost for {criteria:?}"
                    );
                    let mut rest = books.iter();
                    for book in evaluate(&criteria, &books) {
                        assert!(
                            rest.any(|candidate| std::ptr::eq(candidate, book)),
                            "{} is not an in-order element of the input for {criteria:?}",
                            book.id
                        );
                    }
                }
            }
        }
    }
}
