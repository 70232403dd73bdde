//! Enumerated values of dropdown search fields, per widget instance.

use crate::error::{ClassHelperError, ClassHelperResult};
use crate::rest::{urls, value_text, Record, RestClient};
use crate::search_spec::SearchSpec;
use indexmap::IndexMap;
use log::*;
use std::collections::HashMap;

/// Ordered `id -> label` options of one dropdown.
pub type DropdownOptions = IndexMap<String, String>;

/// Dropdown options keyed by field name.
///
/// Options are fetched at most once per search field attribute value. A
/// failed fetch still counts as an attempt: the cache stays empty until the
/// attribute changes.
#[derive(Debug, Default)]
pub struct DropdownCache {
    attempted_for: Option<String>,
    data: HashMap<String, DropdownOptions>,
}

impl DropdownCache {
    pub fn new() -> Self {
        DropdownCache::default()
    }

    /// Fetch the options of every dropdown entry of `search_with`, unless
    /// that attribute value was already attempted.
    ///
    pub async fn ensure(
        &mut self,
        client: &RestClient,
        base_url: &str,
        search_with: Option<&str>,
        alternative_paths: &HashMap<String, String>,
    ) -> ClassHelperResult<()> {
        let attribute = search_with.unwrap_or_default();
        if self.attempted_for.as_deref() == Some(attribute) {
            return Ok(());
        }
        self.attempted_for = Some(attribute.to_string());
        self.data.clear();

        let spec = SearchSpec::parse(attribute);
        let mut fetched = HashMap::new();
        for entry in spec.dropdowns() {
            let url = urls::dropdown_url(base_url, entry, alternative_paths)?;
            debug!("Fetching dropdown values for '{}'...", entry.field_name);
            let envelope = client.collection(url.as_str()).await.map_err(|e| {
                error!(
                    "Failed to fetch dropdown values for '{}' from {}: {}",
                    entry.field_name,
                    e.url(),
                    e
                );
                e
            })?;
            let options = options_from(url.as_str(), &envelope.data.collection)?;
            fetched.insert(entry.field_name.clone(), options);
        }
        self.data = fetched;
        Ok(())
    }

    /// Return the options of a dropdown field, if it has been fetched.
    ///
    pub fn options(&self, field: &str) -> Option<&DropdownOptions> {
        self.data.get(field)
    }

    /// Return true when options for this attribute value were requested.
    ///
    pub fn attempted_for(&self, search_with: Option<&str>) -> bool {
        self.attempted_for.as_deref() == Some(search_with.unwrap_or_default())
    }
}

/// Build the options of a verbose collection. The label is the first
/// property of the first record that is neither `id` nor `link`.
///
pub fn options_from(url: &str, collection: &[Record]) -> ClassHelperResult<DropdownOptions> {
    let Some(first) = collection.first() else {
        return Ok(DropdownOptions::new());
    };
    let label_key = first
        .keys()
        .find(|key| key.as_str() != "id" && key.as_str() != "link")
        .cloned()
        .ok_or_else(|| ClassHelperError::DropdownShape {
            url: url.to_string(),
        })?;

    Ok(collection
        .iter()
        .map(|record| {
            (
                record.get("id").map(value_text).unwrap_or_default(),
                record.get(&label_key).map(value_text).unwrap_or_default(),
            )
        })
        .collect())
}
