//! Class helper popup for Roundup issue trackers.
//!
//! A class helper wraps a help link of a tracker form. Activating it opens a
//! popup listing records of a class from the tracker's REST interface, with
//! search, paging and row selection; the selection is written back into the
//! form field that owns the helper.
//!
//! - [`helpurl`]: wrapped link discovery and help url parsing
//! - [`rest`]: REST client and url derivation
//! - [`cache`]: translation and dropdown caches
//! - [`popup`]: popup document fragments and keyboard handling
//! - [`widget`]: the widget state machine and its host boundaries

pub mod cache;
pub mod config;
pub mod error;
pub mod helpurl;
pub mod logger;
pub mod popup;
pub mod rest;
pub mod search_spec;
pub mod widget;

mod utils;

pub use error::{ClassHelperError, ClassHelperResult};
pub use widget::ClassHelper;
