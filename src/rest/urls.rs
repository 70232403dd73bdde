//! Query url derivation.
//!
//! Every function here is pure: the same inputs always produce a
//! byte-identical url.

use crate::helpurl::{first_param, ConfigurationError, HelpUrlDescriptor};
use crate::popup::FormData;
use crate::search_spec::SearchEntry;
use std::collections::HashMap;
use url::Url;

/// Path of the data collections below the tracker base url.
pub const REST_DATA_PATH: &str = "rest/data";

/// Return the tracker base url for a document url: everything before the
/// last path separator, e.g. `http://host/demo/issue12` gives
/// `http://host/demo`.
///
pub fn tracker_base_url(document_url: &str) -> String {
    let end = document_url
        .find(|c: char| c == '?' || c == '#')
        .unwrap_or(document_url.len());
    let location = &document_url[..end];
    match location.rfind('/') {
        Some(index) => location[..index].to_string(),
        None => location.to_string(),
    }
}

/// Return the designator of the item being edited, the last path segment of
/// the document url (`issue12`, or empty on an index page).
///
pub fn item_designator(document_url: &str) -> String {
    match Url::parse(document_url) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.last().map(str::to_string))
            .unwrap_or_default(),
        Err(_) => document_url
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

fn parse_base(raw: &str) -> Result<Url, ConfigurationError> {
    Url::parse(raw).map_err(|e| ConfigurationError::InvalidBaseUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })
}

/// Build `{base}/rest/data/{class}` with the page, field and sort options of
/// the descriptor.
///
pub fn listing_url(base: &str, descriptor: &HelpUrlDescriptor) -> Result<Url, ConfigurationError> {
    let fields = descriptor
        .display_fields
        .as_ref()
        .filter(|fields| !fields.is_empty())
        .ok_or(ConfigurationError::MissingDisplayFields)?;

    let mut url = parse_base(&format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        REST_DATA_PATH,
        descriptor.target_class
    ))?;
    url.query_pairs_mut()
        .append_pair("@page_index", &descriptor.page_index.to_string())
        .append_pair("@page_size", &descriptor.page_size.to_string())
        .append_pair("@fields", &fields.join(","));
    if let Some(sort) = &descriptor.sort {
        url.query_pairs_mut().append_pair("@sort", &sort.join(","));
    }
    Ok(url)
}

/// Build the listing url and append every non-empty search form entry, in
/// form order. Repeated names are all appended.
///
pub fn search_url(
    base: &str,
    descriptor: &HelpUrlDescriptor,
    form: &FormData,
) -> Result<Url, ConfigurationError> {
    let mut url = listing_url(base, descriptor)?;
    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in form.iter() {
            if !value.is_empty() {
                pairs.append_pair(name, value);
            }
        }
    }
    Ok(url)
}

/// Build the verbose listing url enumerating the values of a dropdown field.
///
pub fn dropdown_url(
    base: &str,
    entry: &SearchEntry,
    alternative_paths: &HashMap<String, String>,
) -> Result<Url, ConfigurationError> {
    let path = match alternative_paths.get(&entry.field_name) {
        Some(path) => path.clone(),
        None => format!("/{}/{}", REST_DATA_PATH, entry.field_name),
    };
    let mut url = parse_base(&format!("{}{}", base.trim_end_matches('/'), path))?;
    url.query_pairs_mut().append_pair("@verbose", "2");
    if let Some(sort) = entry.sort_param() {
        url.query_pairs_mut().append_pair("@sort", &sort);
    }
    Ok(url)
}

/// Build `{origin}/{tracker}/?@template=translation&properties={keys}`.
///
pub fn translation_url<'a>(
    document_url: &str,
    keys: impl IntoIterator<Item = &'a str>,
) -> Result<Url, ConfigurationError> {
    let document = parse_base(document_url)?;
    let tracker = document
        .path_segments()
        .and_then(|mut segments| segments.next().map(str::to_string))
        .unwrap_or_default();
    let mut url = parse_base(&format!(
        "{}/{}/",
        document.origin().ascii_serialization(),
        tracker
    ))?;
    let properties: Vec<&str> = keys.into_iter().collect();
    url.query_pairs_mut()
        .append_pair("@template", "translation")
        .append_pair("properties", &properties.join(","));
    Ok(url)
}

/// Return the url of the popup stylesheet.
///
pub fn stylesheet_url(base: &str, stylesheet: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), stylesheet)
}

/// Read the `@page_index` query parameter of a page url.
///
pub fn page_index_of(uri: &str) -> Option<u32> {
    uri.split_once('?')
        .and_then(|(_, query)| first_param(query, "@page_index"))
        .and_then(|index| index.parse::<u32>().ok())
}
