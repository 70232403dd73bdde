//! Display label translations shared by every class helper on a page.

use crate::error::{ClassHelperError, ClassHelperResult};
use crate::helpurl::WidgetMarkup;
use crate::rest::{urls, RestClient};
use crate::search_spec::SearchSpec;
use indexmap::IndexSet;
use log::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use tokio::sync::Mutex;

/// Title template of popups without an owner field.
pub const READONLY_POPUP_TITLE: &str = "Info on {className} - {itemDesignator} - Classhelper";

/// Return the labels of the popup's own controls.
///
pub fn default_keywords() -> Vec<String> {
    ["apply", "cancel", "next", "prev", "search", "reset", READONLY_POPUP_TITLE]
        .iter()
        .map(|key| key.to_string())
        .collect()
}

/// Return every key the given widgets will look up: search field names
/// without dropdown markers, title templates, listed properties, then the
/// keywords. Order of first appearance is kept.
///
pub fn collect_keys<'a>(
    widgets: impl IntoIterator<Item = &'a WidgetMarkup>,
    keywords: &[String],
) -> IndexSet<String> {
    let mut keys = IndexSet::new();
    for widget in widgets {
        if let Some(search_with) = &widget.search_with {
            for name in SearchSpec::parse(search_with).field_names() {
                keys.insert(name.to_string());
            }
        }
        if let Some(title) = widget.popup_title.as_ref().filter(|t| !t.is_empty()) {
            keys.insert(title.clone());
        }
        keys.extend(widget.listed_properties());
    }
    keys.extend(keywords.iter().cloned());
    keys
}

/// Write-once cache of translated labels.
///
/// Only the first call to [`TranslationCache::ensure`] performs a request;
/// concurrent callers wait for it and then return. Lookups of keys that were
/// never translated return the key itself, so rendering never waits on or
/// fails because of translations.
#[derive(Debug, Default)]
pub struct TranslationCache {
    attempted: Mutex<bool>,
    populated: AtomicBool,
    labels: RwLock<HashMap<String, String>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        TranslationCache::default()
    }

    /// Fetch the translations for `keys` unless a fetch was already made.
    ///
    pub async fn ensure(
        &self,
        client: &RestClient,
        document_url: &str,
        keys: &IndexSet<String>,
    ) -> ClassHelperResult<()> {
        let mut attempted = self.attempted.lock().await;
        if *attempted {
            return Ok(());
        }
        *attempted = true;

        let url = urls::translation_url(document_url, keys.iter().map(String::as_str))?;
        debug!("Fetching {} translations...", keys.len());
        let fetched = client.translations(url.as_str()).await.map_err(|e| {
            error!("Failed to fetch translations from {}: {}", e.url(), e);
            ClassHelperError::TranslationFetch(e)
        })?;

        if let Ok(mut labels) = self.labels.write() {
            labels.extend(fetched);
        }
        self.populated.store(true, Ordering::SeqCst);
        info!("Loaded translations.");
        Ok(())
    }

    /// Return the translated label for `key`, or `key` itself.
    ///
    pub fn label(&self, key: &str) -> String {
        self.labels
            .read()
            .ok()
            .and_then(|labels| labels.get(key).cloned())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn is_populated(&self) -> bool {
        self.populated.load(Ordering::SeqCst)
    }
}
