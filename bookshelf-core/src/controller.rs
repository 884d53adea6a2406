//! Catalog controller - ties filtering, paging and preview rendering together
//!
//! The controller owns all browsing state. Two external triggers drive it:
//! a filter submission rebuilds the visible list from the first page, and a
//! show-more request appends the next page. Selections come back from the
//! preview units over the shared [`SelectionBus`].

use std::num::NonZeroUsize;
use tracing::{debug, info};

use crate::catalog::{BookRecord, Catalog};
use crate::error::{BookshelfError, Result};
use crate::filter::{self, FilterCriteria};
use crate::host::{DetailsDisplay, Fragment, ListContainer, ShowMoreControl};
use crate::paginator::Paginator;
use crate::preview::{PreviewUnit, SelectionBus};

/// Books per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 36;

/// Browsing state: current criteria, their matches and the revealed page
#[derive(Debug, Clone)]
pub struct CatalogState {
    criteria: FilterCriteria,
    /// Positions into the catalog's book list, ascending
    matches: Vec<usize>,
    paginator: Paginator,
}

impl CatalogState {
    fn new(total: usize, page_size: NonZeroUsize) -> Self {
        Self {
            criteria: FilterCriteria::any(),
            matches: (0..total).collect(),
            paginator: Paginator::new(page_size),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page_index(&self) -> usize {
        self.paginator.page_index()
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn remaining(&self) -> usize {
        self.paginator.remaining(&self.matches)
    }
}

/// Whether more results can be requested, and how many
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingIndicator {
    pub remaining: usize,
    pub more_available: bool,
}

impl RemainingIndicator {
    fn new(remaining: usize) -> Self {
        Self {
            remaining,
            more_available: remaining > 0,
        }
    }

    /// Text for the show-more control
    pub fn label(&self) -> String {
        format!("Show more ({})", self.remaining)
    }
}

/// Orchestrates filter submissions, show-more requests and selections
#[derive(Debug)]
pub struct CatalogController<L, S, D> {
    catalog: Catalog,
    state: CatalogState,
    indicator: RemainingIndicator,
    bus: SelectionBus,
    list: L,
    show_more: S,
    details: D,
}

impl<L, S, D> CatalogController<L, S, D>
where
    L: ListContainer,
    S: ShowMoreControl,
    D: DetailsDisplay,
{
    pub fn builder(catalog: Catalog) -> CatalogControllerBuilder<L, S, D> {
        CatalogControllerBuilder {
            catalog,
            page_size: DEFAULT_PAGE_SIZE,
            bus: SelectionBus::new(),
            list: None,
            show_more: None,
            details: None,
        }
    }

    /// Apply new criteria and show their first page, replacing whatever
    /// was visible before
    pub fn on_filter_submitted(&mut self, criteria: FilterCriteria) {
        self.state.matches = filter::evaluate_indices(&criteria, self.catalog.books());
        self.state.criteria = criteria;
        self.state.paginator.reset();

        let fragment = self.window_fragment();
        debug!(rendered = fragment.len(), "Replacing visible preview units");
        self.list.replace_all(fragment);
        self.refresh_indicator();

        info!(
            matches = self.state.matches.len(),
            remaining = self.indicator.remaining,
            "Filter applied"
        );
    }

    /// Reveal the next page below the visible units.
    ///
    /// Returns `false` and changes nothing when every match is already
    /// visible.
    pub fn on_show_more_requested(&mut self) -> bool {
        if !self.state.paginator.advance(self.state.matches.len()) {
            return false;
        }

        let fragment = self.window_fragment();
        debug!(
            page = self.state.page_index(),
            rendered = fragment.len(),
            "Appending preview units"
        );
        self.list.append(fragment);
        self.refresh_indicator();
        true
    }

    /// Forward the book behind `preview_id` to the details display.
    ///
    /// Unknown ids are dropped without touching any state.
    pub fn on_unit_selected(&mut self, preview_id: &str) -> bool {
        match self.catalog.find(preview_id) {
            Some(book) => {
                debug!(book = %book.id, "Displaying selected book");
                self.details.display(book);
                true
            }
            None => {
                debug!(preview = %preview_id, "Ignoring selection of unknown book");
                false
            }
        }
    }

    /// Route every pending selection signal; returns how many found a book
    pub fn dispatch_selections(&mut self) -> usize {
        self.bus
            .drain()
            .into_iter()
            .filter(|signal| self.on_unit_selected(&signal.detail))
            .count()
    }

    /// Click the visible unit carrying `preview_id` and route its signal
    pub fn click(&mut self, preview_id: &str) -> bool {
        let clicked = self
            .list
            .find_unit(preview_id)
            .map(PreviewUnit::click)
            .unwrap_or(false);
        if clicked {
            self.dispatch_selections();
        }
        clicked
    }

    fn window_fragment(&self) -> Fragment {
        let books = self.catalog.books();
        self.state
            .paginator
            .window(&self.state.matches)
            .iter()
            .map(|&index| {
                let book = &books[index];
                PreviewUnit::for_book(
                    book,
                    self.catalog.author_name(&book.author),
                    self.bus.clone(),
                )
            })
            .collect()
    }

    fn refresh_indicator(&mut self) {
        self.indicator = RemainingIndicator::new(self.state.remaining());
        self.show_more.set_enabled(self.indicator.more_available);
        self.show_more.set_label(&self.indicator.label());
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn indicator(&self) -> RemainingIndicator {
        self.indicator
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// All books matching the current criteria
    pub fn matches(&self) -> Vec<&BookRecord> {
        let books = self.catalog.books();
        self.state.matches.iter().map(|&i| &books[i]).collect()
    }

    /// Books revealed so far, in display order
    pub fn visible_books(&self) -> Vec<&BookRecord> {
        let books = self.catalog.books();
        self.state
            .paginator
            .visible(&self.state.matches)
            .iter()
            .map(|&i| &books[i])
            .collect()
    }

    /// Bus the preview units signal on
    pub fn bus(&self) -> &SelectionBus {
        &self.bus
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn show_more(&self) -> &S {
        &self.show_more
    }

    pub fn details(&self) -> &D {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut D {
        &mut self.details
    }
}

/// Collects the controller's collaborators and checks none is missing
pub struct CatalogControllerBuilder<L, S, D> {
    catalog: Catalog,
    page_size: usize,
    bus: SelectionBus,
    list: Option<L>,
    show_more: Option<S>,
    details: Option<D>,
}

impl<L, S, D> CatalogControllerBuilder<L, S, D>
where
    L: ListContainer,
    S: ShowMoreControl,
    D: DetailsDisplay,
{
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Share an existing bus instead of creating a new one
    pub fn bus(mut self, bus: SelectionBus) -> Self {
        self.bus = bus;
        self
    }

    pub fn list(mut self, list: L) -> Self {
        self.list = Some(list);
        self
    }

    pub fn show_more(mut self, show_more: S) -> Self {
        self.show_more = Some(show_more);
        self
    }

    pub fn details(mut self, details: D) -> Self {
        self.details = Some(details);
        self
    }

    /// Build the controller and render the unfiltered first page
    pub fn build(self) -> Result<CatalogController<L, S, D>> {
        let page_size = NonZeroUsize::new(self.page_size).ok_or_else(|| {
            BookshelfError::InvalidConfig("page_size must be greater than zero".to_string())
        })?;
        let list = self.list.ok_or(BookshelfError::MissingElement {
            element: "list container",
        })?;
        let show_more = self.show_more.ok_or(BookshelfError::MissingElement {
            element: "show-more control",
        })?;
        let details = self.details.ok_or(BookshelfError::MissingElement {
            element: "details display",
        })?;

        let state = CatalogState::new(self.catalog.len(), page_size);
        let mut controller = CatalogController {
            indicator: RemainingIndicator::new(state.remaining()),
            catalog: self.catalog,
            state,
            bus: self.bus,
            list,
            show_more,
            details,
        };
        controller.on_filter_submitted(FilterCriteria::any());
        Ok(controller)
    }
}
