//! Running selection of the popup.

use crate::cache::TranslationCache;

/// Ordered set of selected row ids.
///
/// In single mode at most one id is kept: selecting another id replaces it
/// and selecting the kept id again clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionAccumulator {
    ids: Vec<String>,
    single: bool,
}

impl SelectionAccumulator {
    pub fn new(single: bool) -> Self {
        SelectionAccumulator {
            ids: Vec::new(),
            single,
        }
    }

    /// Seed from an owner field value such as `3,7`.
    ///
    pub fn seed(value: &str, single: bool) -> Self {
        let mut ids: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        if single {
            ids.truncate(1);
        }
        SelectionAccumulator { ids, single }
    }

    /// Add `id` if absent, remove it if present. Other ids keep their order.
    ///
    pub fn toggle(&mut self, id: &str) {
        match self.ids.iter().position(|kept| kept == id) {
            Some(index) => {
                self.ids.remove(index);
            }
            None if self.single => self.ids = vec![id.to_string()],
            None => self.ids.push(id.to_string()),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|kept| kept == id)
    }

    /// Return the comma-joined transport value.
    ///
    pub fn value(&self) -> String {
        self.ids.join(",")
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Accumulator fragment: the selection preview with apply and cancel.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccumulatorPanel {
    pub selection: SelectionAccumulator,
    pub apply_label: String,
    pub cancel_label: String,
}

impl AccumulatorPanel {
    pub fn new(selection: SelectionAccumulator, translations: &TranslationCache) -> Self {
        AccumulatorPanel {
            selection,
            apply_label: translations.label("apply"),
            cancel_label: translations.label("cancel"),
        }
    }

    pub fn preview(&self) -> String {
        self.selection.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;

    #[test]
    fn test_seed() {
        let selection = SelectionAccumulator::seed("3, 7,,", false);
        assert_eq!(selection.ids(), &["3".to_string(), "7".to_string()]);
        assert!(SelectionAccumulator::seed("", false).is_empty());
        assert_eq!(SelectionAccumulator::seed("3,7", true).value(), "3");
    }

    #[test]
    fn test_toggle_appends_and_removes() {
        let mut selection = SelectionAccumulator::seed("3,7,9", false);
        selection.toggle("7");
        assert_eq!(selection.value(), "3,9");
        selection.toggle("7");
        assert_eq!(selection.value(), "3,9,7");
        assert!(selection.contains("7"));
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let ids: Vec<String> = (0..5).map(|_| (1..10_000u32).fake::<u32>().to_string()).collect();
        let mut selection = SelectionAccumulator::seed(&ids.join(","), false);
        let before = selection.clone();
        let id = (10_000..20_000u32).fake::<u32>().to_string();
        selection.toggle(&id);
        selection.toggle(&id);
        assert_eq!(selection, before);
    }

    #[test]
    fn test_single_mode_replaces() {
        let mut selection = SelectionAccumulator::new(true);
        selection.toggle("3");
        selection.toggle("7");
        assert_eq!(selection.value(), "7");
        selection.toggle("7");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_panel_labels() {
        let panel = AccumulatorPanel::new(SelectionAccumulator::seed("1", false), &TranslationCache::new());
        assert_eq!(panel.apply_label, "apply");
        assert_eq!(panel.cancel_label, "cancel");
        assert_eq!(panel.preview(), "1");
    }
}
