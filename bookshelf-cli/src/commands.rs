//! One-shot commands: list, show, genres, authors and render

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::debug;

use bookshelf_core::catalog::Catalog;
use bookshelf_core::dropdown::{populate_dropdown, ALL_AUTHORS_LABEL, ALL_GENRES_LABEL};
use bookshelf_core::host::{ListContainer, MemoryList, MemoryShowMore};
use bookshelf_core::theme::Theme;
use bookshelf_core::{BookshelfConfig, CatalogController, FilterCriteria};

use crate::output::{self, ConsoleDetails};

pub type CliController = CatalogController<MemoryList, MemoryShowMore, ConsoleDetails>;

/// Filter flags shared by list and render
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Genre id to keep (default: any)
    #[clap(long)]
    pub genre: Option<String>,

    /// Author id to keep (default: any)
    #[clap(long)]
    pub author: Option<String>,

    /// Case-insensitive title substring
    #[clap(long)]
    pub title: Option<String>,
}

impl FilterArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_optional(
            self.genre.as_deref(),
            self.author.as_deref(),
            self.title.as_deref(),
        )
    }
}

/// Effective settings after merging the config file with CLI flags
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog: PathBuf,
    pub page_size: usize,
    pub theme: Theme,
}

impl Settings {
    pub fn resolve(
        config_path: Option<&Path>,
        catalog: Option<PathBuf>,
        page_size: Option<usize>,
        theme: Option<Theme>,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => BookshelfConfig::load_from_path(path)?,
            None => BookshelfConfig::load()?,
        };

        let Some(catalog) = catalog.or(config.catalog) else {
            bail!("No catalog given.\n\nPass --catalog <file> or set `catalog` in the bookshelf config file.");
        };

        let settings = Self {
            catalog,
            page_size: page_size.unwrap_or(config.page_size),
            theme: theme.unwrap_or(config.theme),
        };
        debug!(?settings, "Resolved settings");
        Ok(settings)
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        Catalog::load(&self.catalog)
            .with_context(|| format!("Failed to load catalog {}", self.catalog.display()))
    }

    /// Controller over the catalog, showing the unfiltered first page
    pub fn open_controller(&self, json_details: bool) -> Result<CliController> {
        let catalog = self.load_catalog()?;
        let details = ConsoleDetails::new(catalog.authors.clone(), catalog.genres.clone(), json_details);

        let controller = CliController::builder(catalog)
            .page_size(self.page_size)
            .list(MemoryList::new())
            .show_more(MemoryShowMore::new())
            .details(details)
            .build()?;
        Ok(controller)
    }
}

/// Submit the filter and reveal up to `pages` pages
fn browse_pages(controller: &mut CliController, filter: &FilterArgs, pages: usize) {
    controller.on_filter_submitted(filter.criteria());
    for _ in 1..pages {
        if !controller.on_show_more_requested() {
            break;
        }
    }
}

pub fn execute_list(settings: &Settings, filter: &FilterArgs, pages: usize, json: bool) -> Result<()> {
    let mut controller = settings.open_controller(false)?;
    browse_pages(&mut controller, filter, pages);

    let catalog = controller.catalog();
    let indicator = controller.indicator();
    let shown = controller.list().units().len();
    let matches = controller.state().match_count();

    if json {
        let books: Vec<serde_json::Value> = controller
            .visible_books()
            .into_iter()
            .map(|book| output::book_json(book, &catalog.authors, &catalog.genres))
            .collect();
        let value = serde_json::json!({
            "matches": matches,
            "page": controller.state().page_index(),
            "pageSize": controller.state().page_size(),
            "remaining": indicator.remaining,
            "moreAvailable": indicator.more_available,
            "books": books,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if shown == 0 {
        println!("No books found.");
        return Ok(());
    }

    println!("{}", output::units_table(controller.list().units()));
    println!("{}", output::indicator_line(shown, matches, &indicator));
    Ok(())
}

pub fn execute_show(settings: &Settings, id: &str, json: bool) -> Result<()> {
    let mut controller = settings.open_controller(json)?;
    if !controller.on_unit_selected(id) {
        bail!("Book '{}' not found in catalog", id);
    }
    print!("{}", controller.details_mut().take_output());
    Ok(())
}

/// Which pick-list to print
#[derive(Debug, Clone, Copy)]
pub enum Vocabulary {
    Genres,
    Authors,
}

pub fn execute_vocabulary(settings: &Settings, vocabulary: Vocabulary, json: bool) -> Result<()> {
    let catalog = settings.load_catalog()?;
    let options = match vocabulary {
        Vocabulary::Genres => populate_dropdown(&catalog.genres, ALL_GENRES_LABEL),
        Vocabulary::Authors => populate_dropdown(&catalog.authors, ALL_AUTHORS_LABEL),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        println!("{}", output::options_table(&options));
    }
    Ok(())
}

pub fn execute_render(
    settings: &Settings,
    filter: &FilterArgs,
    pages: usize,
    output_path: Option<&Path>,
) -> Result<()> {
    let mut controller = settings.open_controller(false)?;
    browse_pages(&mut controller, filter, pages);

    let page = output::html_page(
        settings.theme,
        controller.list().units(),
        &controller.indicator(),
    );

    match output_path {
        Some(path) => {
            std::fs::write(path, page)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Rendered {} book(s) to {}",
                controller.list().units().len(),
                path.display()
            );
        }
        None => print!("{page}"),
    }
    Ok(())
}
