//! Loading catalogs from disk and browsing them

use bookshelf_core::catalog::Catalog;
use bookshelf_core::host::{MemoryList, MemoryShowMore, RecordedDetails};
use bookshelf_core::{BookshelfError, CatalogController, FilterCriteria};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const CATALOG_YAML: &str = r#"
authors:
  a1: Ann Author
  a2: Bob Writer
genres:
  g1: Fantasy
  g2: Horror
books:
  - id: "1"
    title: The Hobbit
    author: a1
    image: https://example.com/hobbit.jpg
    genres: [g1]
    description: There and back again.
    published: "1937-09-21T00:00:00.000Z"
    pages: 310
  - id: "2"
    title: It
    author: a2
    image: https://example.com/it.jpg
    genres: [g2]
  - id: "3"
    title: The Shining
    author: a2
    image: https://example.com/shining.jpg
    genres: [g2]
"#;

fn write_catalog(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn yaml_and_json_catalogs_load_identically() {
    let dir = TempDir::new().unwrap();
    let yaml_path = write_catalog(&dir, "books.yaml", CATALOG_YAML);
    let from_yaml = Catalog::load(&yaml_path).unwrap();

    let json = serde_json::to_string(&from_yaml).unwrap();
    let json_path = write_catalog(&dir, "books.json", &json);
    let from_json = Catalog::load(&json_path).unwrap();

    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml.len(), 3);
    assert_eq!(from_yaml.find("1").unwrap().pages, Some(310));
}

#[test]
fn yml_extension_is_accepted() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, "books.YML", CATALOG_YAML);
    assert_eq!(Catalog::load(&path).unwrap().len(), 3);
}

#[test]
fn loaded_catalog_browses_by_author() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, "books.yaml", CATALOG_YAML);
    let catalog = Catalog::load(&path).unwrap();

    let mut controller =
        CatalogController::<MemoryList, MemoryShowMore, RecordedDetails>::builder(catalog)
            .page_size(1)
            .list(MemoryList::new())
            .show_more(MemoryShowMore::new())
            .details(RecordedDetails::new())
            .build()
            .unwrap();

    controller.on_filter_submitted(FilterCriteria::any().with_author("a2").with_title("the"));
    assert_eq!(controller.list().preview_ids(), vec!["3"]);
    assert!(!controller.show_more().enabled);

    controller.on_filter_submitted(FilterCriteria::any().with_author("a2"));
    assert_eq!(controller.list().preview_ids(), vec!["2"]);
    assert_eq!(controller.show_more().label, "Show more (1)");
}

#[test]
fn duplicate_ids_are_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let yaml = r#"
books:
  - { id: "1", title: One, author: a1 }
  - { id: "1", title: Uno, author: a1 }
"#;
    let path = write_catalog(&dir, "dupes.yaml", yaml);

    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, BookshelfError::DuplicateBook { ref id } if id == "1"));
    assert_eq!(err.to_string(), "Duplicate book id in catalog: 1");
}

#[test]
fn bad_json_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, "broken.json", "{ \"books\": [ }");

    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, BookshelfError::CatalogJson { .. }));
    assert!(err.to_string().contains("broken.json"));
}
