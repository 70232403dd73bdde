//! Label and option caches.
//!
//! - [`TranslationCache`]: write-once, shared by every widget on a page
//! - [`DropdownCache`]: per widget, refreshed when its search fields change

mod dropdowns;
mod translations;

pub use dropdowns::{options_from, DropdownCache, DropdownOptions};
pub use translations::{collect_keys, default_keywords, TranslationCache, READONLY_POPUP_TITLE};
