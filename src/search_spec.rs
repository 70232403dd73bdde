//! Search field configuration.
//!
//! The search field attribute lists the fields shown in the popup's search
//! form, in display order: `title,status[],keyword[]+name`. A trailing `[]`
//! renders the field as a dropdown of every value the field can take, and an
//! optional `+field` or `-field` after it sorts that dropdown.

/// Sort direction of a dropdown's options.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One field of the search form.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchEntry {
    pub field_name: String,
    pub is_dropdown: bool,
    pub sort_field: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

impl SearchEntry {
    /// Return the `@sort` value for this entry's dropdown request.
    ///
    pub fn sort_param(&self) -> Option<String> {
        let field = self.sort_field.as_deref()?;
        Some(match self.sort_direction {
            Some(SortDirection::Asc) => format!("+{}", field),
            Some(SortDirection::Desc) => format!("-{}", field),
            None => field.to_string(),
        })
    }

    fn parse(param: &str) -> SearchEntry {
        let Some((name, rest)) = param.split_once("[]") else {
            return SearchEntry {
                field_name: param.to_string(),
                is_dropdown: false,
                sort_field: None,
                sort_direction: None,
            };
        };
        let (sort_direction, sort_field) = if let Some(field) = rest.strip_prefix('+') {
            (Some(SortDirection::Asc), field)
        } else if let Some(field) = rest.strip_prefix('-') {
            (Some(SortDirection::Desc), field)
        } else {
            (None, rest)
        };
        let sort_field = (!sort_field.is_empty()).then(|| sort_field.to_string());
        SearchEntry {
            field_name: name.to_string(),
            is_dropdown: true,
            sort_direction: sort_field.as_ref().and(sort_direction),
            sort_field,
        }
    }
}

/// Ordered list of search entries.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchSpec {
    entries: Vec<SearchEntry>,
}

impl SearchSpec {
    /// Parse an attribute value. Empty segments are skipped, so the parse
    /// never fails.
    ///
    pub fn parse(attribute: &str) -> SearchSpec {
        SearchSpec {
            entries: attribute
                .split(',')
                .map(str::trim)
                .filter(|param| !param.is_empty())
                .map(SearchEntry::parse)
                .collect(),
        }
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the entries rendered as dropdowns.
    ///
    pub fn dropdowns(&self) -> impl Iterator<Item = &SearchEntry> {
        self.entries.iter().filter(|entry| entry.is_dropdown)
    }

    /// Return the field names with dropdown markers stripped.
    ///
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.field_name.as_str())
    }
}
