//! Search form fragment types.
//!
//! The search form renders one input per search spec entry: a free text
//! input, or a select when the field is a dropdown with cached options.

use crate::cache::{DropdownCache, TranslationCache};
use crate::search_spec::SearchSpec;

/// Label of the leading empty option of every select.
pub const NULL_OPTION_LABEL: &str = "---";

/// Ordered `name=value` entries of a submitted form. Names may repeat.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        FormData::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Return the first value submitted under `name`.
    ///
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Inline validation error attached to a search input.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub value: String,
}

impl FieldError {
    pub fn message(&self) -> String {
        format!("Invalid value: {}", self.value)
    }
}

/// Input widget of a search field.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text {
        value: String,
    },
    /// `(value, label)` options, the null option first.
    Select {
        options: Vec<(String, String)>,
        selected: usize,
    },
}

/// One labelled search input.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchInput {
    pub name: String,
    pub label: String,
    pub kind: InputKind,
    pub autofocus: bool,
    pub error: Option<FieldError>,
}

impl SearchInput {
    /// Return the value this input submits.
    ///
    pub fn value(&self) -> &str {
        match &self.kind {
            InputKind::Text { value } => value,
            InputKind::Select { options, selected } => options
                .get(*selected)
                .map(|(value, _)| value.as_str())
                .unwrap_or_default(),
        }
    }

    /// Return what the input shows: the typed text or the selected label.
    ///
    pub fn value_label(&self) -> &str {
        match &self.kind {
            InputKind::Text { value } => value,
            InputKind::Select { options, selected } => options
                .get(*selected)
                .map(|(_, label)| label.as_str())
                .unwrap_or_default(),
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self.kind, InputKind::Select { .. })
    }

    pub fn push_char(&mut self, c: char) {
        if let InputKind::Text { value } = &mut self.kind {
            value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let InputKind::Text { value } = &mut self.kind {
            value.pop();
        }
    }

    /// Move the selected option forward or backward, wrapping around.
    ///
    pub fn cycle(&mut self, forward: bool) {
        if let InputKind::Select { options, selected } = &mut self.kind {
            if options.is_empty() {
                return;
            }
            *selected = if forward {
                (*selected + 1) % options.len()
            } else {
                (*selected + options.len() - 1) % options.len()
            };
        }
    }

    fn clear(&mut self) {
        match &mut self.kind {
            InputKind::Text { value } => value.clear(),
            InputKind::Select { selected, .. } => *selected = 0,
        }
        self.error = None;
    }
}

/// Search form fragment.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchForm {
    pub inputs: Vec<SearchInput>,
    pub search_label: String,
    pub reset_label: String,
}

impl SearchForm {
    /// Build the form for a search spec. Values of `previous` are restored,
    /// so a re-rendered form keeps what the user submitted.
    ///
    pub fn build(
        spec: &SearchSpec,
        dropdowns: &DropdownCache,
        translations: &TranslationCache,
        previous: Option<&FormData>,
    ) -> SearchForm {
        let inputs = spec
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let name = entry.field_name.clone();
                let previous_value = previous.and_then(|form| form.get(&name)).unwrap_or_default();
                let kind = match dropdowns.options(&name) {
                    Some(options) => {
                        let mut choices = vec![(String::new(), NULL_OPTION_LABEL.to_string())];
                        choices.extend(options.iter().map(|(id, label)| (id.clone(), label.clone())));
                        let selected = choices
                            .iter()
                            .position(|(id, _)| !previous_value.is_empty() && id == previous_value)
                            .unwrap_or(0);
                        InputKind::Select {
                            options: choices,
                            selected,
                        }
                    }
                    None => InputKind::Text {
                        value: previous_value.to_string(),
                    },
                };
                SearchInput {
                    label: format!("{}:", translations.label(&name)),
                    name,
                    kind,
                    autofocus: index == 0,
                    error: None,
                }
            })
            .collect();

        SearchForm {
            inputs,
            search_label: translations.label("search"),
            reset_label: translations.label("reset"),
        }
    }

    /// Return the entries the form would submit, in input order.
    ///
    pub fn form_data(&self) -> FormData {
        let mut data = FormData::new();
        for input in &self.inputs {
            data.push(input.name.as_str(), input.value());
        }
        data
    }

    /// Clear every input and inline error.
    ///
    pub fn reset(&mut self) {
        self.inputs.iter_mut().for_each(SearchInput::clear);
    }

    /// Attach an inline error to the input named `field`. Returns false when
    /// the form has no such input.
    ///
    pub fn annotate(&mut self, field: &str, value: &str) -> bool {
        match self.inputs.iter_mut().find(|input| input.name == field) {
            Some(input) => {
                input.error = Some(FieldError {
                    value: value.to_string(),
                });
                true
            }
            None => false,
        }
    }

    pub fn clear_errors(&mut self) {
        self.inputs.iter_mut().for_each(|input| input.error = None);
    }

    /// Return true when submitting `data` would resend the value that the
    /// first annotated input was rejected for.
    ///
    pub fn blocked_by(&self, data: &FormData) -> bool {
        self.inputs
            .iter()
            .find_map(|input| input.error.as_ref().map(|error| (input, error)))
            .map(|(input, error)| data.get(&input.name) == Some(error.value.as_str()))
            .unwrap_or(false)
    }

    pub fn input(&self, index: usize) -> Option<&SearchInput> {
        self.inputs.get(index)
    }

    pub fn input_mut(&mut self, index: usize) -> Option<&mut SearchInput> {
        self.inputs.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
