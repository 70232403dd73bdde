//! Result table fragment.

use super::accumulator::SelectionAccumulator;
use crate::cache::TranslationCache;
use crate::rest::{value_text, Record};

/// Header of the selection column.
pub const SELECTION_HEADER: &str = "X";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    /// Value of the first display field.
    pub id: String,
    pub cells: Vec<String>,
    pub checked: bool,
}

/// Rows of one page with translated headers.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub selectable: bool,
}

impl Table {
    pub fn build(
        fields: &[String],
        collection: &[Record],
        selection: Option<&SelectionAccumulator>,
        selectable: bool,
        translations: &TranslationCache,
    ) -> Table {
        let rows = collection
            .iter()
            .map(|record| {
                let cells: Vec<String> = fields
                    .iter()
                    .map(|field| record.get(field).map(value_text).unwrap_or_default())
                    .collect();
                let id = cells.first().cloned().unwrap_or_default();
                let checked = selectable && selection.map(|s| s.contains(&id)).unwrap_or(false);
                TableRow { id, cells, checked }
            })
            .collect();

        Table {
            headers: fields.iter().map(|field| translations.label(field)).collect(),
            rows,
            selectable,
        }
    }

    /// Return the header row, led by the selection column when rows are
    /// selectable.
    ///
    pub fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.headers.len() + 1);
        if self.selectable {
            header.push(SELECTION_HEADER.to_string());
        }
        header.extend(self.headers.iter().cloned());
        header
    }

    pub fn footer(&self) -> Vec<String> {
        self.header()
    }

    /// Re-derive every checkbox from the accumulator.
    ///
    pub fn sync_checked(&mut self, selection: &SelectionAccumulator) {
        let selectable = self.selectable;
        for row in &mut self.rows {
            row.checked = selectable && selection.contains(&row.id);
        }
    }

    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Record> {
        serde_json::from_value(json!([
            {"id": "3", "username": "admin", "realname": null},
            {"id": "7", "username": "anonymous", "realname": "Anon"},
            {"id": 9, "username": "demo"}
        ]))
        .unwrap()
    }

    fn fields() -> Vec<String> {
        vec!["id".to_string(), "username".to_string(), "realname".to_string()]
    }

    #[test]
    fn test_build_selectable() {
        let selection = SelectionAccumulator::seed("7,9", false);
        let table = Table::build(&fields(), &records(), Some(&selection), true, &TranslationCache::new());
        assert_eq!(table.header(), vec!["X", "id", "username", "realname"]);
        assert_eq!(table.footer(), table.header());
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0].cells, vec!["3", "admin", ""]);
        assert_eq!(table.rows[2].id, "9");
        assert_eq!(table.rows[2].cells[2], "");
        let checked: Vec<bool> = table.rows.iter().map(|r| r.checked).collect();
        assert_eq!(checked, vec![false, true, true]);
    }

    #[test]
    fn test_build_readonly() {
        let table = Table::build(&fields(), &records(), None, false, &TranslationCache::new());
        assert_eq!(table.header(), vec!["id", "username", "realname"]);
        assert!(table.rows.iter().all(|r| !r.checked));
    }

    #[test]
    fn test_sync_checked() {
        let mut selection = SelectionAccumulator::new(false);
        let mut table = Table::build(&fields(), &records(), Some(&selection), true, &TranslationCache::new());
        selection.toggle("3");
        table.sync_checked(&selection);
        assert!(table.row(0).map(|r| r.checked).unwrap_or(false));
        assert!(!table.rows[1].checked);
    }
}
