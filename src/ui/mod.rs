//! User interface module.
//!
//! This module renders the popup document with the `ratatui` library: the
//! search form, pagination, result table and selection controls, followed by
//! a status pane with the opener field and captured log lines.

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod widgets;

pub use render::render;

use roundup_classhelper::popup::PopupDocument;

/// Everything drawn in one frame.
///
pub struct Screen<'a> {
    pub document: Option<&'a PopupDocument>,
    /// `name = value` of the opener field, when there is one.
    pub owner_field: Option<String>,
    pub alerts: Vec<String>,
    pub log_lines: Vec<String>,
}
