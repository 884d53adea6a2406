//! Contracts for the collaborators the controller drives
//!
//! The controller never draws anything itself. It hands fragments of
//! preview units to a [`ListContainer`], sets the state of a
//! [`ShowMoreControl`] and forwards selected books to a [`DetailsDisplay`].
//! In-memory implementations are provided for headless hosts and tests.

use crate::catalog::BookRecord;
use crate::preview::PreviewUnit;

/// Units built off-screen and mounted in one step
#[derive(Debug, Default)]
pub struct Fragment {
    units: Vec<PreviewUnit>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, unit: PreviewUnit) {
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn into_units(self) -> Vec<PreviewUnit> {
        self.units
    }
}

impl FromIterator<PreviewUnit> for Fragment {
    fn from_iter<I: IntoIterator<Item = PreviewUnit>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

/// Mount point for preview units
pub trait ListContainer {
    fn clear(&mut self);

    fn append(&mut self, fragment: Fragment);

    /// Mounted units, in display order
    fn units(&self) -> &[PreviewUnit];

    /// Swap the whole visible set in one step
    fn replace_all(&mut self, fragment: Fragment) {
        self.clear();
        self.append(fragment);
    }

    fn find_unit(&self, preview_id: &str) -> Option<&PreviewUnit> {
        self.units()
            .iter()
            .find(|unit| unit.preview_id() == preview_id)
    }
}

/// The control that requests the next page
pub trait ShowMoreControl {
    fn set_enabled(&mut self, enabled: bool);

    fn set_label(&mut self, label: &str);
}

/// Consumer of a selected book
pub trait DetailsDisplay {
    fn display(&mut self, book: &BookRecord);
}

/// List container backed by a vector
#[derive(Debug, Default)]
pub struct MemoryList {
    units: Vec<PreviewUnit>,
}

impl MemoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preview ids of the mounted units, in order
    pub fn preview_ids(&self) -> Vec<String> {
        self.units
            .iter()
            .map(|unit| unit.preview_id().to_string())
            .collect()
    }
}

impl ListContainer for MemoryList {
    fn clear(&mut self) {
        self.units.clear();
    }

    fn append(&mut self, fragment: Fragment) {
        self.units.extend(fragment.into_units());
    }

    fn units(&self) -> &[PreviewUnit] {
        &self.units
    }
}

/// Show-more control that just remembers its state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryShowMore {
    pub enabled: bool,
    pub label: String,
}

impl Default for MemoryShowMore {
    fn default() -> Self {
        Self {
            enabled: true,
            label: String::new(),
        }
    }
}

impl MemoryShowMore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShowMoreControl for MemoryShowMore {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }
}

/// Details display that records every book it was given
#[derive(Debug, Clone, Default)]
pub struct RecordedDetails {
    pub shown: Vec<BookRecord>,
}

impl RecordedDetails {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DetailsDisplay for RecordedDetails {
    fn display(&mut self, book: &BookRecord) {
        self.shown.push(book.clone());
    }
}
