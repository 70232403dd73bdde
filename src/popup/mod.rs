//! Popup document model.
//!
//! The popup body is a list of fragments, each addressed by a stable
//! container id. Re-rendering builds a complete new fragment and swaps it
//! for the old one in a single assignment, so no half-built fragment is
//! ever observable.

mod accumulator;
mod keyboard;
mod pagination;
mod search;
mod table;
mod title;

pub use accumulator::{AccumulatorPanel, SelectionAccumulator};
pub use keyboard::{handle_key, Focus, Key, KeyInput};
pub use pagination::{page_bounds, Pagination};
pub use search::{FieldError, FormData, InputKind, SearchForm, SearchInput, NULL_OPTION_LABEL};
pub use table::{Table, TableRow, SELECTION_HEADER};
pub use title::{resolve_title, CLASS_NAME_PLACEHOLDER, ITEM_DESIGNATOR_PLACEHOLDER};

use crate::helpurl::SelectionMode;

/// Stable identity of a popup fragment.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FragmentId {
    Search,
    Pagination,
    Table,
    Accumulator,
}

impl FragmentId {
    pub fn container_id(&self) -> &'static str {
        match self {
            FragmentId::Search => "popup-search",
            FragmentId::Pagination => "popup-pagination",
            FragmentId::Table => "popup-tablediv",
            FragmentId::Accumulator => "popup-control",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    Search(SearchForm),
    Pagination(Pagination),
    Table(Table),
    Accumulator(AccumulatorPanel),
}

impl Fragment {
    pub fn id(&self) -> FragmentId {
        match self {
            Fragment::Search(_) => FragmentId::Search,
            Fragment::Pagination(_) => FragmentId::Pagination,
            Fragment::Table(_) => FragmentId::Table,
            Fragment::Accumulator(_) => FragmentId::Accumulator,
        }
    }
}

/// Messages the popup sends to its widget.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopupEvent {
    Search(FormData),
    Reset,
    PrevPage(String),
    NextPage(String),
    Selection(String),
    Apply(String),
    Cancel,
}

/// Complete content of a popup window.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupDocument {
    pub title: String,
    pub stylesheet: String,
    pub selection_mode: SelectionMode,
    pub focus: Focus,
    fragments: Vec<Fragment>,
}

impl PopupDocument {
    pub fn new(title: String, stylesheet: String, selection_mode: SelectionMode) -> Self {
        PopupDocument {
            title,
            stylesheet,
            selection_mode,
            focus: Focus::None,
            fragments: Vec::new(),
        }
    }

    /// Append a fragment to the body.
    ///
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Swap the fragment with the same id in place. Returns false when the
    /// document has no such fragment.
    ///
    pub fn replace(&mut self, fragment: Fragment) -> bool {
        let id = fragment.id();
        let replaced = match self.fragments.iter_mut().find(|f| f.id() == id) {
            Some(slot) => {
                *slot = fragment;
                true
            }
            None => false,
        };
        self.normalize_focus();
        replaced
    }

    /// Swap the search fragment, inserting it first when absent.
    ///
    pub fn replace_search(&mut self, form: SearchForm) {
        if self.fragment(FragmentId::Search).is_some() {
            self.replace(Fragment::Search(form));
        } else {
            self.fragments.insert(0, Fragment::Search(form));
        }
    }

    pub fn remove(&mut self, id: FragmentId) {
        self.fragments.retain(|f| f.id() != id);
        self.normalize_focus();
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn fragment(&self, id: FragmentId) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.id() == id)
    }

    pub fn search(&self) -> Option<&SearchForm> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Search(form) => Some(form),
            _ => None,
        })
    }

    pub fn search_mut(&mut self) -> Option<&mut SearchForm> {
        self.fragments.iter_mut().find_map(|f| match f {
            Fragment::Search(form) => Some(form),
            _ => None,
        })
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Pagination(pagination) => Some(pagination),
            _ => None,
        })
    }

    pub fn table(&self) -> Option<&Table> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn accumulator(&self) -> Option<&AccumulatorPanel> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Accumulator(panel) => Some(panel),
            _ => None,
        })
    }

    /// Toggle `id` in the accumulator and re-derive the table checkboxes.
    /// Returns false when the popup has no accumulator.
    ///
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        let mut selection = None;
        for fragment in self.fragments.iter_mut() {
            if let Fragment::Accumulator(panel) = fragment {
                panel.selection.toggle(id);
                selection = Some(panel.selection.clone());
            }
        }
        let Some(selection) = selection else {
            return false;
        };
        for fragment in self.fragments.iter_mut() {
            if let Fragment::Table(table) = fragment {
                table.sync_checked(&selection);
            }
        }
        true
    }

    /// Return every focusable control in document order. Disabled page
    /// controls are skipped.
    ///
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = Vec::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Search(form) => {
                    order.extend((0..form.len()).map(Focus::SearchInput));
                    order.push(Focus::SearchButton);
                    order.push(Focus::ResetButton);
                }
                Fragment::Pagination(pagination) => {
                    if pagination.has_prev() {
                        order.push(Focus::Prev);
                    }
                    if pagination.has_next() {
                        order.push(Focus::Next);
                    }
                }
                Fragment::Table(table) => order.extend((0..table.len()).map(Focus::Row)),
                Fragment::Accumulator(_) => {
                    order.push(Focus::Apply);
                    order.push(Focus::Cancel);
                }
            }
        }
        order
    }

    /// Drop focus from a control that no longer exists.
    ///
    pub fn normalize_focus(&mut self) {
        if self.focus != Focus::None && !self.focus_order().contains(&self.focus) {
            self.focus = Focus::None;
        }
    }
}
