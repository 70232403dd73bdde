use anyhow::{anyhow, Result};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use roundup_classhelper::popup::{Key, KeyInput};
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// What a key press asks the application to do.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
    Quit,
    Popup(KeyInput),
    FocusSearch,
    SubmitSearch,
    ResetSearch,
    Ignore,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            if let Ok(true) = event::poll(tick_rate) {
                if let Ok(CrosstermEvent::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press && tx_clone.send(Event::Input(key)).is_err() {
                        break;
                    }
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Block until the next terminal event.
    ///
    pub fn next(&self) -> Result<Event<KeyEvent>> {
        self.rx
            .recv()
            .map_err(|e| anyhow!("Terminal event channel closed: {}", e))
    }
}

/// Translate a key press. `in_text_input` is true while a search input has
/// focus, where printable keys are typed rather than interpreted.
///
pub fn action_for(key: KeyEvent, in_text_input: bool) -> Action {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('s') => Action::SubmitSearch,
            KeyCode::Char('r') => Action::ResetSearch,
            _ => Action::Ignore,
        };
    }

    let popup_key = match key.code {
        KeyCode::Char('/') if !in_text_input => return Action::FocusSearch,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Esc,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        _ => return Action::Ignore,
    };
    Action::Popup(KeyInput { key: popup_key, shift })
}
