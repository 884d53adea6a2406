//! Book records and the immutable catalog that owns them

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::warn;

use crate::error::{BookshelfError, Result};

/// Author id -> display name
pub type AuthorMap = BTreeMap<String, String>;

/// Genre id -> display name
pub type GenreMap = BTreeMap<String, String>;

/// A single book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Unique, immutable identifier
    pub id: String,

    pub title: String,

    /// Key into the catalog's author map
    pub author: String,

    /// Cover image URL
    #[serde(default)]
    pub image: String,

    /// Genre ids this book belongs to
    #[serde(default)]
    pub genres: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Publication date (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
}

impl BookRecord {
    /// Create a record with the fields browsing needs; display-only fields
    /// start empty.
    pub fn new<I, S>(id: &str, title: &str, author: &str, image: &str, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            image: image.to_string(),
            genres: genres.into_iter().map(Into::into).collect(),
            description: None,
            published: None,
            pages: None,
        }
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.contains(genre)
    }

    /// Publication year taken from the leading digits of `published`
    pub fn published_year(&self) -> Option<&str> {
        let published = self.published.as_deref()?;
        let year = published.split('-').next()?;
        if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
            Some(year)
        } else {
            None
        }
    }
}

/// The full, read-only set of books available to browse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub authors: AuthorMap,

    #[serde(default)]
    pub genres: GenreMap,

    #[serde(default)]
    books: Vec<BookRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate book ids.
    ///
    /// Books whose author or genres are missing from the lookup maps are
    /// kept but logged.
    pub fn new(books: Vec<BookRecord>, authors: AuthorMap, genres: GenreMap) -> Result<Self> {
        let catalog = Self {
            authors,
            genres,
            books,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.books.len());
        for book in &self.books {
            if !seen.insert(book.id.as_str()) {
                return Err(BookshelfError::DuplicateBook {
                    id: book.id.clone(),
                });
            }
            if !self.authors.contains_key(&book.author) {
                warn!(book = %book.id, author = %book.author, "Book references unknown author");
            }
            for genre in book.genres.iter().filter(|g| !self.genres.contains_key(*g)) {
                warn!(book = %book.id, genre = %genre, "Book references unknown genre");
            }
        }
        Ok(())
    }

    /// All books, in catalog order
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn find(&self, id: &str) -> Option<&BookRecord> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn author_name(&self, author_id: &str) -> Option<&str> {
        self.authors.get(author_id).map(String::as_str)
    }

    pub fn genre_name(&self, genre_id: &str) -> Option<&str> {
        self.genres.get(genre_id).map(String::as_str)
    }

    /// Display names of a book's genres, falling back to the raw id
    pub fn genre_names<'a>(&'a self, book: &'a BookRecord) -> Vec<&'a str> {
        book.genres
            .iter()
            .map(|id| self.genre_name(id).unwrap_or(id.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
