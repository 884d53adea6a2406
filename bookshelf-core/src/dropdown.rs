//! Pick-list options for the genre and author filters

use serde::Serialize;
use std::collections::BTreeMap;

use crate::filter::ANY;

pub const ALL_GENRES_LABEL: &str = "All Genres";
pub const ALL_AUTHORS_LABEL: &str = "All Authors";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    /// Value submitted as filter criteria
    pub value: String,
    pub label: String,
}

/// Options for one pick-list: the `"any"` sentinel first, then one entry
/// per id in map order
pub fn populate_dropdown(options: &BTreeMap<String, String>, default_label: &str) -> Vec<DropdownOption> {
    std::iter::once(DropdownOption {
        value: ANY.to_string(),
        label: default_label.to_string(),
    })
    .chain(options.iter().map(|(id, name)| DropdownOption {
        value: id.clone(),
        label: name.clone(),
    }))
    .collect()
}
