mod accumulator;
mod pagination;
mod search;
mod status;
mod table;

use super::*;
use crate::ui::widgets::styling;
use accumulator::accumulator;
use pagination::pagination;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};
use roundup_classhelper::popup::Fragment;
use search::search;
use status::status;
use table::table;

/// Height of the status pane below the popup.
const STATUS_HEIGHT: u16 = 8;

/// Render the popup document followed by the status pane.
///
pub fn render(frame: &mut Frame, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(STATUS_HEIGHT)].as_ref())
        .split(frame.size());

    match screen.document {
        Some(document) => popup(frame, chunks[0], document),
        None => {
            let block = Block::default()
                .title("Classhelper")
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style());
            frame.render_widget(block, chunks[0]);
        }
    }
    status(frame, chunks[1], screen);
}

/// Lay fragments out in document order inside the titled popup block.
///
fn popup(frame: &mut Frame, size: Rect, document: &PopupDocument) {
    let block = Block::default()
        .title(document.title.as_str())
        .title_style(styling::active_block_title_style())
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style());
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let constraints: Vec<Constraint> = document
        .fragments()
        .iter()
        .map(|fragment| match fragment {
            Fragment::Search(form) => Constraint::Length(form.len() as u16 + 3),
            Fragment::Pagination(_) => Constraint::Length(1),
            Fragment::Table(_) => Constraint::Min(3),
            Fragment::Accumulator(_) => Constraint::Length(4),
        })
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (fragment, area) in document.fragments().iter().zip(chunks.iter()) {
        match fragment {
            Fragment::Search(form) => search(frame, *area, form, document.focus),
            Fragment::Pagination(info) => pagination(frame, *area, info, document.focus),
            Fragment::Table(rows) => table(frame, *area, rows, document.focus),
            Fragment::Accumulator(panel) => accumulator(frame, *area, panel, document.focus),
        }
    }
}
