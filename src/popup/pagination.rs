use crate::cache::TranslationCache;

/// Return the one-based `(start, end)` numbers of the rows shown on a page,
/// `(0, 0)` for an empty page.
///
pub fn page_bounds(page_index: u32, page_size: u32, total: usize) -> (u64, u64) {
    if total == 0 {
        return (0, 0);
    }
    let index = u64::from(page_index.max(1));
    let size = u64::from(page_size);
    let total = total as u64;
    let start = (index - 1) * size + 1;
    let end = if total < size {
        start + total - 1
    } else {
        index * size
    };
    (start, end)
}

/// Pagination fragment: previous and next controls around the row numbers.
///
/// The page urls are the ones the server linked, never recomputed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub page_index: u32,
    pub start: u64,
    pub end: u64,
    pub prev_label: String,
    pub next_label: String,
}

impl Pagination {
    pub fn new(
        prev_url: Option<String>,
        next_url: Option<String>,
        page_index: u32,
        page_size: u32,
        total: usize,
        translations: &TranslationCache,
    ) -> Pagination {
        let (start, end) = page_bounds(page_index, page_size, total);
        Pagination {
            prev_url,
            next_url,
            page_index,
            start,
            end,
            prev_label: translations.label("prev"),
            next_label: translations.label("next"),
        }
    }

    /// Return the `start - end` text between the controls.
    ///
    pub fn info(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }

    pub fn has_prev(&self) -> bool {
        self.prev_url.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next_url.is_some()
    }
}
