//! Terminal and HTML output for the bookshelf CLI

use std::fmt::Write as _;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use bookshelf_core::catalog::{AuthorMap, BookRecord, GenreMap};
use bookshelf_core::dropdown::DropdownOption;
use bookshelf_core::host::DetailsDisplay;
use bookshelf_core::preview::{escape_html, PreviewUnit};
use bookshelf_core::theme::Theme;
use bookshelf_core::RemainingIndicator;

/// Table row for one visible preview unit
#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
}

/// Table row for a pick-list option
#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Label")]
    label: String,
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

/// Visible units as a table
pub fn units_table(units: &[PreviewUnit]) -> String {
    let rows: Vec<PreviewRow> = units
        .iter()
        .map(|unit| {
            let rendered = unit.rendered();
            PreviewRow {
                id: rendered.preview_id.clone(),
                title: truncate(&rendered.title, 50),
                author: rendered.author.clone(),
            }
        })
        .collect();
    render_table(&rows)
}

pub fn options_table(options: &[DropdownOption]) -> String {
    let rows: Vec<OptionRow> = options
        .iter()
        .map(|option| OptionRow {
            value: option.value.clone(),
            label: option.label.clone(),
        })
        .collect();
    render_table(&rows)
}

/// One-line summary under the results table
pub fn indicator_line(shown: usize, matches: usize, indicator: &RemainingIndicator) -> String {
    let state = if indicator.more_available {
        "more available"
    } else {
        "all shown"
    };
    format!(
        "Showing {shown} of {matches} match(es). {} [{state}]",
        indicator.label()
    )
}

/// JSON view of a book with resolved display names
pub fn book_json(book: &BookRecord, authors: &AuthorMap, genres: &GenreMap) -> serde_json::Value {
    serde_json::json!({
        "id": book.id,
        "title": book.title,
        "author": authors.get(&book.author).unwrap_or(&book.author),
        "image": book.image,
        "genres": book
            .genres
            .iter()
            .map(|g| genres.get(g).unwrap_or(g))
            .collect::<Vec<_>>(),
        "description": book.description,
        "published": book.published,
        "pages": book.pages,
    })
}

/// Details display that formats the selected book as text or JSON.
///
/// Output is buffered until the caller takes it, so it lands on whatever
/// writer the command is using.
pub struct ConsoleDetails {
    authors: AuthorMap,
    genres: GenreMap,
    json: bool,
    pending: String,
}

impl ConsoleDetails {
    pub fn new(authors: AuthorMap, genres: GenreMap, json: bool) -> Self {
        Self {
            authors,
            genres,
            json,
            pending: String::new(),
        }
    }

    /// Drain everything displayed since the last call
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.pending)
    }

    fn describe(&self, book: &BookRecord) -> String {
        let mut out = String::new();
        let author = self
            .authors
            .get(&book.author)
            .map(String::as_str)
            .unwrap_or("Unknown Author");
        let genres: Vec<&str> = book
            .genres
            .iter()
            .map(|g| self.genres.get(g).map(String::as_str).unwrap_or(g.as_str()))
            .collect();

        let _ = writeln!(out);
        let _ = writeln!(out, "Title:  {}", book.title);
        let _ = writeln!(out, "Author: {author}");
        if !genres.is_empty() {
            let _ = writeln!(out, "Genres: {}", genres.join(", "));
        }
        if let Some(year) = book.published_year() {
            let _ = writeln!(out, "Year:   {year}");
        }
        if let Some(pages) = book.pages {
            let _ = writeln!(out, "Pages:  {pages}");
        }
        if !book.image.is_empty() {
            let _ = writeln!(out, "Cover:  {}", book.image);
        }
        if let Some(description) = &book.description {
            let _ = writeln!(out);
            let _ = writeln!(out, "Description:");
            for line in description.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
        out
    }
}

impl DetailsDisplay for ConsoleDetails {
    fn display(&mut self, book: &BookRecord) {
        if self.json {
            let value = book_json(book, &self.authors, &self.genres);
            match serde_json::to_string_pretty(&value) {
                Ok(text) => {
                    self.pending.push_str(&text);
                    self.pending.push('\n');
                }
                Err(e) => tracing::error!("Failed to serialize book {}: {}", book.id, e),
            }
        } else {
            let text = self.describe(book);
            self.pending.push_str(&text);
        }
    }
}

/// Standalone HTML page with the theme variables and the visible units
pub fn html_page(theme: Theme, units: &[PreviewUnit], indicator: &RemainingIndicator) -> String {
    let mut page = String::new();
    let _ = writeln!(page, "<!DOCTYPE html>");
    let _ = writeln!(page, "<html data-theme=\"{theme}\">");
    let _ = writeln!(page, "<head>");
    let _ = writeln!(page, "<meta charset=\"utf-8\" />");
    let _ = writeln!(page, "<title>Bookshelf</title>");
    let _ = writeln!(page, "<style>");
    let _ = writeln!(page, ":root {{ {} }}", theme.palette().css_variables());
    let _ = writeln!(
        page,
        "body {{ color: rgb(var(--color-dark)); background: rgb(var(--color-light)); }}"
    );
    let _ = writeln!(page, "</style>");
    let _ = writeln!(page, "</head>");
    let _ = writeln!(page, "<body>");
    let _ = writeln!(page, "<main data-list-items>");
    for unit in units {
        page.push_str(&unit.rendered().to_html());
    }
    let _ = writeln!(page, "</main>");
    let disabled = if indicator.more_available {
        ""
    } else {
        " disabled"
    };
    let _ = writeln!(
        page,
        "<button data-list-button{disabled}>{}</button>",
        escape_html(&indicator.label())
    );
    let _ = writeln!(page, "</body>");
    let _ = writeln!(page, "</html>");
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::preview::SelectionBus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long title indeed", 10), "a very ...");
    }

    #[test]
    fn test_describe_includes_resolved_names() {
        let authors = AuthorMap::from([("a1".to_string(), "Ann Author".to_string())]);
        let genres = GenreMap::from([("g1".to_string(), "Fantasy".to_string())]);
        let mut book = BookRecord::new("1", "Alpha", "a1", "", ["g1"]);
        book.published = Some("2001-01-01".to_string());

        let details = ConsoleDetails::new(authors, genres, false);
        let text = details.describe(&book);

        assert!(text.contains("Author: Ann Author"));
        assert!(text.contains("Genres: Fantasy"));
        assert!(text.contains("Year:   2001"));
        assert!(!text.contains("Cover:"));
    }

    #[test]
    fn test_display_buffers_until_taken() {
        let authors = AuthorMap::from([("a1".to_string(), "Ann Author".to_string())]);
        let book = BookRecord::new("1", "Alpha", "a1", "", ["g1"]);

        let mut details = ConsoleDetails::new(authors.clone(), GenreMap::new(), false);
        details.display(&book);
        assert!(details.take_output().contains("Title:  Alpha"));
        assert_eq!(details.take_output(), "");

        let mut details = ConsoleDetails::new(authors, GenreMap::new(), true);
        details.display(&book);
        let value: serde_json::Value = serde_json::from_str(&details.take_output()).unwrap();
        assert_eq!(value["author"], "Ann Author");
        assert_eq!(value["genres"][0], "g1");
    }

    #[test]
    fn test_html_page_embeds_units_and_theme() {
        let bus = SelectionBus::new();
        let book = BookRecord::new("7", "Seven", "a1", "", ["g1"]);
        let units = vec![PreviewUnit::for_book(&book, Some("Ann"), bus)];
        let indicator = RemainingIndicator {
            remaining: 0,
            more_available: false,
        };

        let page = html_page(Theme::Night, &units, &indicator);

        assert!(page.contains("<html data-theme=\"night\">"));
        assert!(page.contains("--color-dark: 255, 255, 255;"));
        assert!(page.contains("data-preview=\"7\""));
        assert!(page.contains("<button data-list-button disabled>Show more (0)</button>"));
    }
}
