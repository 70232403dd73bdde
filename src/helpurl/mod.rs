//! Wrapped help link discovery and parsing.
//!
//! A class helper wraps the tracker's classic help link. The link carries the
//! target class and listing options in its `helpurl`
//! (`user?@startwith=0&@pagesize=20&properties=id,username&form=itemSynopsis&property=nosy&type=checkbox`)
//! plus the popup geometry. This module turns that markup into an immutable
//! [`HelpUrlDescriptor`].

mod error;

pub use error::ConfigurationError;

use crate::utils::text_processing::parse_leading_int;
use url::form_urlencoded;

/// A link as found inside the widget markup.
///
/// Attributes are kept as raw strings so that validation happens in one
/// place, [`HelpUrlDescriptor::parse`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HelpLink {
    pub helpurl: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    /// The link's original click action, restored when the widget gives up.
    pub onclick: Option<String>,
}

/// Declarative configuration of one class helper instance on a page.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WidgetMarkup {
    pub links: Vec<HelpLink>,
    /// Value of the search field attribute, e.g. `title,status[],keyword[]+name`.
    pub search_with: Option<String>,
    /// Popup title template, may contain `{itemDesignator}` and `{className}`.
    pub popup_title: Option<String>,
}

impl WidgetMarkup {
    /// Return the single wrapped link, checking that it carries every
    /// attribute the widget relies on.
    ///
    pub fn find_help_link(&self) -> Result<&HelpLink, ConfigurationError> {
        if self.links.len() != 1 {
            return Err(ConfigurationError::NotSingleLink {
                count: self.links.len(),
            });
        }
        let link = &self.links[0];
        if is_blank(&link.helpurl) {
            return Err(ConfigurationError::MissingAttribute("data-helpurl"));
        }
        if is_blank(&link.width) {
            return Err(ConfigurationError::MissingAttribute("data-width"));
        }
        if is_blank(&link.height) {
            return Err(ConfigurationError::MissingAttribute("data-height"));
        }
        if is_blank(&link.onclick) {
            return Err(ConfigurationError::MissingAttribute("onclick"));
        }
        Ok(link)
    }

    /// Return the `properties` listed in the first link's help url, without
    /// validating the rest of the markup.
    ///
    pub fn listed_properties(&self) -> Vec<String> {
        self.links
            .first()
            .and_then(|link| link.helpurl.as_deref())
            .and_then(|helpurl| helpurl.split_once('?'))
            .and_then(|(_, query)| first_param(query, "properties"))
            .map(|properties| split_list(&properties))
            .unwrap_or_default()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::is_empty).unwrap_or(true)
}

/// How rows of the popup table can be selected.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SelectionMode {
    Checkbox,
    Radio,
    None,
}

impl SelectionMode {
    /// Selection needs an owner field to write back to; without one the
    /// popup is informational only.
    fn resolve(selection_type: Option<&str>, has_owner_field: bool) -> SelectionMode {
        if !has_owner_field {
            return SelectionMode::None;
        }
        match selection_type {
            Some("radio") => SelectionMode::Radio,
            _ => SelectionMode::Checkbox,
        }
    }
}

/// Parsed, validated configuration for one widget instance.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelpUrlDescriptor {
    pub target_class: String,
    pub popup_width: u32,
    pub popup_height: u32,
    pub owner_form: Option<String>,
    pub owner_field: Option<String>,
    pub selection_mode: SelectionMode,
    /// One-based page index, `@startwith + 1`.
    pub page_index: u32,
    pub page_size: u32,
    pub sort: Option<Vec<String>>,
    pub display_fields: Option<Vec<String>>,
}

impl HelpUrlDescriptor {
    /// Parse a wrapped link into a descriptor. No side effects.
    ///
    pub fn parse(link: &HelpLink) -> Result<HelpUrlDescriptor, ConfigurationError> {
        let popup_width = parse_dimension("width", link.width.as_deref())?;
        let popup_height = parse_dimension("height", link.height.as_deref())?;

        let helpurl = link.helpurl.as_deref().unwrap_or_default();
        let parts: Vec<&str> = helpurl.split('?').collect();
        if parts.len() != 2 {
            return Err(ConfigurationError::MalformedHelpUrl(helpurl.to_string()));
        }
        let target_class = parts[0].trim().to_string();
        if target_class.is_empty() {
            return Err(ConfigurationError::MissingTargetClass);
        }
        let query = parts[1];

        let owner_form = first_param(query, "form").filter(|v| !v.is_empty());
        let owner_field = first_param(query, "property").filter(|v| !v.is_empty());
        let selection_type = first_param(query, "type");

        let start_with = first_param(query, "@startwith").unwrap_or_default();
        let page_index = match parse_leading_int(&start_with) {
            Some(n) if n >= 0 && n < u32::MAX as i64 => n as u32 + 1,
            _ => return Err(ConfigurationError::InvalidPageIndex(start_with)),
        };

        let page_size_param = first_param(query, "@pagesize").unwrap_or_default();
        let page_size = match parse_leading_int(&page_size_param) {
            Some(n) if n >= 0 && n <= u32::MAX as i64 => n as u32,
            _ => return Err(ConfigurationError::InvalidPageSize(page_size_param)),
        };

        Ok(HelpUrlDescriptor {
            target_class,
            popup_width,
            popup_height,
            selection_mode: SelectionMode::resolve(
                selection_type.as_deref(),
                owner_field.is_some(),
            ),
            owner_form,
            owner_field,
            page_index,
            page_size,
            sort: first_param(query, "@sort")
                .map(|v| split_list(&v))
                .filter(|sort| !sort.is_empty()),
            display_fields: first_param(query, "properties").map(|v| split_list(&v)),
        })
    }

    /// Return the display fields, empty when the help url listed none.
    ///
    pub fn fields(&self) -> &[String] {
        self.display_fields.as_deref().unwrap_or(&[])
    }

    /// Return a copy pointing at the first page, used when a search starts
    /// over.
    ///
    pub fn first_page(&self) -> HelpUrlDescriptor {
        HelpUrlDescriptor {
            page_index: 1,
            ..self.clone()
        }
    }
}

fn parse_dimension(attribute: &'static str, value: Option<&str>) -> Result<u32, ConfigurationError> {
    let raw = value.unwrap_or_default();
    match parse_leading_int(raw) {
        Some(n) if n > 0 && n <= u32::MAX as i64 => Ok(n as u32),
        _ => Err(ConfigurationError::InvalidGeometry {
            attribute,
            value: raw.to_string(),
        }),
    }
}

/// Return the first value of `name` in an urlencoded query string.
///
pub(crate) fn first_param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Split a comma separated list, dropping empty segments.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|item| !item.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(helpurl: &str, width: &str, height: &str) -> HelpLink {
        HelpLink {
            helpurl: Some(helpurl.to_string()),
            width: Some(width.to_string()),
            height: Some(height.to_string()),
            onclick: Some("javascript:help_window('x', 400, 600)".to_string()),
        }
    }

    #[test]
    fn test_parse_well_formed_link() {
        let descriptor = HelpUrlDescriptor::parse(&link(
            "user?@startwith=0&@pagesize=20&properties=a,b",
            "400",
            "600",
        ))
        .unwrap();
        assert_eq!(descriptor.target_class, "user");
        assert_eq!(descriptor.popup_width, 400);
        assert_eq!(descriptor.popup_height, 600);
        assert_eq!(descriptor.page_index, 1);
        assert_eq!(descriptor.page_size, 20);
        assert_eq!(
            descriptor.display_fields,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(descriptor.sort, None);
        assert_eq!(descriptor.selection_mode, SelectionMode::None);
        assert_eq!(descriptor.owner_field, None);
    }

    #[test]
    fn test_parse_owner_field_and_sort() {
        let descriptor = HelpUrlDescriptor::parse(&link(
            "user?@startwith=2&@pagesize=10&@sort=username,id&properties=id,username&form=itemSynopsis&property=nosy&type=checkbox",
            "600",
            "400",
        ))
        .unwrap();
        assert_eq!(descriptor.page_index, 3);
        assert_eq!(descriptor.owner_form.as_deref(), Some("itemSynopsis"));
        assert_eq!(descriptor.owner_field.as_deref(), Some("nosy"));
        assert_eq!(descriptor.selection_mode, SelectionMode::Checkbox);
        assert_eq!(
            descriptor.sort,
            Some(vec!["username".to_string(), "id".to_string()])
        );
    }

    #[test]
    fn test_parse_radio_selection() {
        let descriptor = HelpUrlDescriptor::parse(&link(
            "status?@startwith=0&@pagesize=5&properties=id,name&form=f&property=status&type=radio",
            "300",
            "300",
        ))
        .unwrap();
        assert_eq!(descriptor.selection_mode, SelectionMode::Radio);
    }

    #[test]
    fn test_parse_rejects_non_numeric_width() {
        let result = HelpUrlDescriptor::parse(&link(
            "user?@startwith=0&@pagesize=20&properties=a",
            "wide",
            "600",
        ));
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidGeometry {
                attribute: "width",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_height() {
        let result = HelpUrlDescriptor::parse(&link(
            "user?@startwith=0&@pagesize=20&properties=a",
            "400",
            "tall",
        ));
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidGeometry {
                attribute: "height",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let result = HelpUrlDescriptor::parse(&link("user", "400", "600"));
        assert!(matches!(result, Err(ConfigurationError::MalformedHelpUrl(_))));

        let result = HelpUrlDescriptor::parse(&link("user?a=1?b=2", "400", "600"));
        assert!(matches!(result, Err(ConfigurationError::MalformedHelpUrl(_))));
    }

    #[test]
    fn test_parse_rejects_non_numeric_startwith() {
        let result = HelpUrlDescriptor::parse(&link(
            "user?@startwith=first&@pagesize=20&properties=a",
            "400",
            "600",
        ));
        assert!(matches!(result, Err(ConfigurationError::InvalidPageIndex(_))));
    }

    #[test]
    fn test_parse_rejects_missing_pagesize() {
        let result =
            HelpUrlDescriptor::parse(&link("user?@startwith=0&properties=a", "400", "600"));
        assert!(matches!(result, Err(ConfigurationError::InvalidPageSize(_))));
    }

    #[test]
    fn test_parse_absent_properties_is_not_empty_list() {
        let descriptor =
            HelpUrlDescriptor::parse(&link("user?@startwith=0&@pagesize=20", "400", "600"))
                .unwrap();
        assert_eq!(descriptor.display_fields, None);
        assert!(descriptor.fields().is_empty());
    }

    #[test]
    fn test_parse_drops_empty_list_items() {
        let descriptor = HelpUrlDescriptor::parse(&link(
            "user?@startwith=0&@pagesize=20&properties=a,,b&@sort=",
            "400",
            "600",
        ))
        .unwrap();
        assert_eq!(
            descriptor.display_fields,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(descriptor.sort, None);

        let descriptor = HelpUrlDescriptor::parse(&link(
            "user?@startwith=0&@pagesize=20&properties=",
            "400",
            "600",
        ))
        .unwrap();
        assert_eq!(descriptor.display_fields, Some(vec![]));
        assert!(descriptor.fields().is_empty());
    }

    #[test]
    fn test_first_page_resets_index_only() {
        let descriptor = HelpUrlDescriptor::parse(&link(
            "user?@startwith=4&@pagesize=20&properties=a",
            "400",
            "600",
        ))
        .unwrap();
        let first = descriptor.first_page();
        assert_eq!(first.page_index, 1);
        assert_eq!(first.page_size, descriptor.page_size);
        assert_eq!(descriptor.page_index, 5);
    }

    #[test]
    fn test_find_help_link_requires_single_link() {
        let markup = WidgetMarkup::default();
        assert_eq!(
            markup.find_help_link(),
            Err(ConfigurationError::NotSingleLink { count: 0 })
        );

        let l = link("user?@startwith=0&@pagesize=1", "1", "1");
        let markup = WidgetMarkup {
            links: vec![l.clone(), l],
            ..Default::default()
        };
        assert_eq!(
            markup.find_help_link(),
            Err(ConfigurationError::NotSingleLink { count: 2 })
        );
    }

    #[test]
    fn test_find_help_link_requires_onclick() {
        let mut l = link("user?@startwith=0&@pagesize=1", "1", "1");
        l.onclick = None;
        let markup = WidgetMarkup {
            links: vec![l],
            ..Default::default()
        };
        assert_eq!(
            markup.find_help_link(),
            Err(ConfigurationError::MissingAttribute("onclick"))
        );
    }

    #[test]
    fn test_listed_properties() {
        let markup = WidgetMarkup {
            links: vec![link(
                "issue?@startwith=0&@pagesize=5&properties=id,title",
                "1",
                "1",
            )],
            ..Default::default()
        };
        assert_eq!(
            markup.listed_properties(),
            vec!["id".to_string(), "title".to_string()]
        );
    }
}
