//! Keyboard focus handling of the popup.
//!
//! Row navigation keys only act when the table is selectable. Focus cycling
//! with Tab, text entry and control activation work in every mode.

use super::{PopupDocument, PopupEvent};
use crate::helpurl::SelectionMode;

/// Keys the popup reacts to.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Tab,
    BackTab,
    Backspace,
    Esc,
    Char(char),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        KeyInput { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        KeyInput { key, shift: true }
    }
}

/// Focusable controls of the popup, in document order.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    None,
    SearchInput(usize),
    SearchButton,
    ResetButton,
    Prev,
    Next,
    Row(usize),
    Apply,
    Cancel,
}

/// Apply one key press to the document. Returns the event a control emits
/// when it is activated.
///
pub fn handle_key(doc: &mut PopupDocument, input: KeyInput) -> Option<PopupEvent> {
    if doc.selection_mode != SelectionMode::None {
        if let Some(event) = handle_selection_key(doc, input) {
            return event;
        }
    }

    let focus = doc.focus;
    match input.key {
        Key::Tab => {
            move_focus(doc, true);
            None
        }
        Key::BackTab => {
            move_focus(doc, false);
            None
        }
        Key::Esc => Some(PopupEvent::Cancel),
        Key::Enter => activate(doc, focus),
        Key::Space => match focus {
            Focus::SearchInput(index) => {
                edit_input(doc, index, |input| input.push_char(' '));
                None
            }
            _ => activate(doc, focus),
        },
        Key::Char(c) => {
            if let Focus::SearchInput(index) = focus {
                edit_input(doc, index, |input| input.push_char(c));
            }
            None
        }
        Key::Backspace => {
            if let Focus::SearchInput(index) = focus {
                edit_input(doc, index, |input| input.pop_char());
            }
            None
        }
        Key::Left | Key::Right => {
            if let Focus::SearchInput(index) = focus {
                let forward = input.key == Key::Right;
                edit_input(doc, index, |input| input.cycle(forward));
            }
            None
        }
        Key::Up | Key::Down => None,
    }
}

/// Row and pagination keys. Returns `Some` when the key was consumed.
fn handle_selection_key(doc: &mut PopupDocument, input: KeyInput) -> Option<Option<PopupEvent>> {
    let rows = doc.table().map(|table| table.len()).unwrap_or(0);
    let in_input = matches!(doc.focus, Focus::SearchInput(_));

    match (input.key, doc.focus) {
        (Key::Down, Focus::Row(index)) if rows > 0 => {
            doc.focus = Focus::Row((index + 1) % rows);
            Some(None)
        }
        (Key::Up, Focus::Row(index)) if rows > 0 => {
            doc.focus = Focus::Row((index + rows - 1) % rows);
            Some(None)
        }
        (Key::Down, _) if !in_input => {
            if rows > 0 {
                doc.focus = Focus::Row(0);
            }
            Some(None)
        }
        (Key::Up, _) if !in_input => {
            if rows > 0 {
                doc.focus = Focus::Row(rows - 1);
            }
            Some(None)
        }
        (Key::Char('>'), _) if !in_input => {
            if doc.pagination().map(|p| p.has_next()).unwrap_or(false) {
                doc.focus = Focus::Next;
            }
            Some(None)
        }
        (Key::Char('<'), _) if !in_input => {
            if doc.pagination().map(|p| p.has_prev()).unwrap_or(false) {
                doc.focus = Focus::Prev;
            }
            Some(None)
        }
        (Key::Enter, Focus::Row(index)) | (Key::Space, Focus::Row(index)) if !input.shift => {
            Some(doc.table().and_then(|t| t.row(index)).map(|row| PopupEvent::Selection(row.id.clone())))
        }
        (Key::Enter, _) if input.shift => {
            if doc.accumulator().is_some() {
                doc.focus = Focus::Apply;
            }
            Some(None)
        }
        _ => None,
    }
}

fn activate(doc: &PopupDocument, focus: Focus) -> Option<PopupEvent> {
    match focus {
        Focus::SearchInput(_) | Focus::SearchButton => {
            doc.search().map(|form| PopupEvent::Search(form.form_data()))
        }
        Focus::ResetButton => Some(PopupEvent::Reset),
        Focus::Prev => doc
            .pagination()
            .and_then(|p| p.prev_url.clone())
            .map(PopupEvent::PrevPage),
        Focus::Next => doc
            .pagination()
            .and_then(|p| p.next_url.clone())
            .map(PopupEvent::NextPage),
        Focus::Apply => doc.accumulator().map(|a| PopupEvent::Apply(a.preview())),
        Focus::Cancel => Some(PopupEvent::Cancel),
        Focus::Row(_) | Focus::None => None,
    }
}

fn edit_input(doc: &mut PopupDocument, index: usize, edit: impl FnOnce(&mut super::SearchInput)) {
    if let Some(input) = doc.search_mut().and_then(|form| form.input_mut(index)) {
        edit(input);
    }
}

fn move_focus(doc: &mut PopupDocument, forward: bool) {
    let order = doc.focus_order();
    if order.is_empty() {
        doc.focus = Focus::None;
        return;
    }
    let next = match order.iter().position(|f| *f == doc.focus) {
        Some(index) if forward => (index + 1) % order.len(),
        Some(index) => (index + order.len() - 1) % order.len(),
        None if forward => 0,
        None => order.len() - 1,
    };
    doc.focus = order[next];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DropdownCache, TranslationCache};
    use crate::popup::{AccumulatorPanel, Fragment, Pagination, SearchForm, SelectionAccumulator, Table};
    use crate::rest::Record;
    use crate::search_spec::SearchSpec;
    use serde_json::json;

    fn document(mode: SelectionMode) -> PopupDocument {
        let translations = TranslationCache::new();
        let records: Vec<Record> = serde_json::from_value(json!([
            {"id": "1", "name": "a"},
            {"id": "2", "name": "b"},
            {"id": "3", "name": "c"}
        ]))
        .unwrap();
        let fields = vec!["id".to_string(), "name".to_string()];
        let selectable = mode != SelectionMode::None;
        let mut doc = PopupDocument::new("t".to_string(), "s".to_string(), mode);
        doc.push(Fragment::Search(SearchForm::build(
            &SearchSpec::parse("name"),
            &DropdownCache::new(),
            &translations,
            None,
        )));
        doc.push(Fragment::Pagination(Pagination::new(
            None,
            Some("http://t/next".to_string()),
            1,
            3,
            3,
            &translations,
        )));
        doc.push(Fragment::Table(Table::build(&fields, &records, None, selectable, &translations)));
        if selectable {
            doc.push(Fragment::Accumulator(AccumulatorPanel::new(
                SelectionAccumulator::new(mode == SelectionMode::Radio),
                &translations,
            )));
        }
        doc
    }

    fn press(doc: &mut PopupDocument, key: Key) -> Option<PopupEvent> {
        handle_key(doc, KeyInput::new(key))
    }

    #[test]
    fn test_arrows_wrap_over_rows() {
        let mut doc = document(SelectionMode::Checkbox);
        press(&mut doc, Key::Down);
        assert_eq!(doc.focus, Focus::Row(0));
        press(&mut doc, Key::Up);
        assert_eq!(doc.focus, Focus::Row(2));
        press(&mut doc, Key::Down);
        assert_eq!(doc.focus, Focus::Row(0));
        press(&mut doc, Key::Down);
        assert_eq!(doc.focus, Focus::Row(1));
    }

    #[test]
    fn test_enter_and_space_select_row() {
        let mut doc = document(SelectionMode::Checkbox);
        doc.focus = Focus::Row(1);
        assert_eq!(press(&mut doc, Key::Enter), Some(PopupEvent::Selection("2".to_string())));
        assert_eq!(press(&mut doc, Key::Space), Some(PopupEvent::Selection("2".to_string())));
    }

    #[test]
    fn test_shift_enter_focuses_apply() {
        let mut doc = document(SelectionMode::Checkbox);
        doc.focus = Focus::Row(0);
        assert_eq!(handle_key(&mut doc, KeyInput::shifted(Key::Enter)), None);
        assert_eq!(doc.focus, Focus::Apply);
        assert_eq!(press(&mut doc, Key::Enter), Some(PopupEvent::Apply(String::new())));
    }

    #[test]
    fn test_pagination_shortcuts() {
        let mut doc = document(SelectionMode::Checkbox);
        doc.focus = Focus::Row(0);
        press(&mut doc, Key::Char('<'));
        // previous page is disabled
        assert_eq!(doc.focus, Focus::Row(0));
        press(&mut doc, Key::Char('>'));
        assert_eq!(doc.focus, Focus::Next);
        assert_eq!(
            press(&mut doc, Key::Enter),
            Some(PopupEvent::NextPage("http://t/next".to_string()))
        );
    }

    #[test]
    fn test_typing_in_search_input() {
        let mut doc = document(SelectionMode::Checkbox);
        doc.focus = Focus::SearchInput(0);
        press(&mut doc, Key::Char('>'));
        press(&mut doc, Key::Char('a'));
        press(&mut doc, Key::Down);
        assert_eq!(doc.focus, Focus::SearchInput(0));
        let event = press(&mut doc, Key::Enter);
        let mut expected = crate::popup::FormData::new();
        expected.push("name", ">a");
        assert_eq!(event, Some(PopupEvent::Search(expected)));
    }

    #[test]
    fn test_readonly_mode_ignores_row_keys() {
        let mut doc = document(SelectionMode::None);
        press(&mut doc, Key::Down);
        assert_eq!(doc.focus, Focus::None);
        doc.focus = Focus::Row(0);
        assert_eq!(press(&mut doc, Key::Enter), None);
        press(&mut doc, Key::Char('>'));
        assert_eq!(doc.focus, Focus::Row(0));
    }

    #[test]
    fn test_tab_cycles_focus_in_every_mode() {
        let mut doc = document(SelectionMode::None);
        let order = doc.focus_order();
        assert_eq!(order[0], Focus::SearchInput(0));
        for expected in order.iter() {
            press(&mut doc, Key::Tab);
            assert_eq!(doc.focus, *expected);
        }
        press(&mut doc, Key::Tab);
        assert_eq!(doc.focus, order[0]);
        press(&mut doc, Key::BackTab);
        assert_eq!(doc.focus, *order.last().unwrap());
    }

    #[test]
    fn test_buttons_emit_events() {
        let mut doc = document(SelectionMode::Checkbox);
        doc.focus = Focus::ResetButton;
        assert_eq!(press(&mut doc, Key::Space), Some(PopupEvent::Reset));
        doc.focus = Focus::Cancel;
        assert_eq!(press(&mut doc, Key::Enter), Some(PopupEvent::Cancel));
        doc.focus = Focus::None;
        assert_eq!(press(&mut doc, Key::Esc), Some(PopupEvent::Cancel));
    }
}
