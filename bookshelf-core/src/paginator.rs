//! Fixed-size page windows over a list of matches

use std::num::NonZeroUsize;
use tracing::debug;

/// How the last window was reached; decides which slice `window` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    /// First page after a new filter: the window starts at the top
    Reset,
    /// Page revealed by "show more": the window is only the new slice
    Advance,
}

/// Tracks which page of matches is revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_index: usize,
    page_size: NonZeroUsize,
    last_move: PageMove,
}

impl Paginator {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_index: 1,
            page_size,
            last_move: PageMove::Reset,
        }
    }

    /// 1-based index of the last revealed page
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn last_move(&self) -> PageMove {
        self.last_move
    }

    /// Back to the first page
    pub fn reset(&mut self) {
        self.page_index = 1;
        self.last_move = PageMove::Reset;
    }

    /// Reveal the next page of `total` matches.
    ///
    /// Does nothing and returns `false` when everything is already revealed.
    pub fn advance(&mut self, total: usize) -> bool {
        if self.remaining_of(total) == 0 {
            debug!(page = self.page_index, total, "Ignoring advance with nothing remaining");
            return false;
        }
        self.page_index += 1;
        self.last_move = PageMove::Advance;
        debug!(page = self.page_index, total, "Advanced page");
        true
    }

    /// Number of matches revealed so far, at most `total`
    fn revealed_of(&self, total: usize) -> usize {
        self.page_size
            .get()
            .saturating_mul(self.page_index)
            .min(total)
    }

    /// Matches not yet revealed out of `total`
    pub fn remaining_of(&self, total: usize) -> usize {
        total.saturating_sub(self.page_size.get().saturating_mul(self.page_index))
    }

    pub fn remaining<T>(&self, matches: &[T]) -> usize {
        self.remaining_of(matches.len())
    }

    /// Everything revealed up to the current page
    pub fn visible<'a, T>(&self, matches: &'a [T]) -> &'a [T] {
        &matches[..self.revealed_of(matches.len())]
    }

    /// The slice to render for the latest move: the whole first page after
    /// `reset`, or only the newly revealed page after `advance`.
    pub fn window<'a, T>(&self, matches: &'a [T]) -> &'a [T] {
        let end = self.revealed_of(matches.len());
        let start = match self.last_move {
            PageMove::Reset => 0,
            PageMove::Advance => self
                .page_size
                .get()
                .saturating_mul(self.page_index - 1)
                .min(end),
        };
        &matches[start..end]
    }
}
