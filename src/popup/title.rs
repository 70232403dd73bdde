use crate::cache::{TranslationCache, READONLY_POPUP_TITLE};
use crate::helpurl::HelpUrlDescriptor;

pub const CLASS_NAME_PLACEHOLDER: &str = "{className}";
pub const ITEM_DESIGNATOR_PLACEHOLDER: &str = "{itemDesignator}";

/// Resolve the popup title: the translated explicit template, else
/// `{field} - {item} - Classhelper` for owner field popups, else the
/// read-only template.
///
pub fn resolve_title(
    template: Option<&str>,
    descriptor: &HelpUrlDescriptor,
    item_designator: &str,
    translations: &TranslationCache,
) -> String {
    if let Some(template) = template.filter(|t| !t.is_empty()) {
        return substitute(&translations.label(template), descriptor, item_designator);
    }
    match &descriptor.owner_field {
        Some(field) => format!("{} - {} - Classhelper", field, item_designator),
        None => substitute(&translations.label(READONLY_POPUP_TITLE), descriptor, item_designator),
    }
}

fn substitute(template: &str, descriptor: &HelpUrlDescriptor, item_designator: &str) -> String {
    template
        .replace(ITEM_DESIGNATOR_PLACEHOLDER, item_designator)
        .replace(CLASS_NAME_PLACEHOLDER, &descriptor.target_class)
}
