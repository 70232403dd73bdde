use super::Frame;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table as TableWidget, TableState},
};
use roundup_classhelper::popup::{Focus, Table};

/// Render the result table with header and footer rows.
///
/// The focused row is scrolled into view.
pub fn table(frame: &mut Frame, size: Rect, table: &Table, focus: Focus) {
    let header = Row::new(table.header()).style(styling::header_style());
    let footer = Row::new(table.footer()).style(styling::header_style());

    let focused_row = match focus {
        Focus::Row(index) => Some(index),
        _ => None,
    };
    let rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut cells: Vec<Cell> = Vec::with_capacity(row.cells.len() + 1);
            if table.selectable {
                cells.push(Cell::from(if row.checked { "[x]" } else { "[ ]" }));
            }
            cells.extend(row.cells.iter().map(|cell| Cell::from(cell.as_str())));
            let style = if focused_row == Some(index) {
                styling::active_item_style()
            } else if row.checked {
                styling::checked_item_style()
            } else {
                styling::normal_text_style()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let columns = table.headers.len() + usize::from(table.selectable);
    let mut widths = Vec::with_capacity(columns);
    if table.selectable {
        widths.push(Constraint::Length(3));
    }
    let data_columns = table.headers.len().max(1) as u32;
    widths.extend(table.headers.iter().map(|_| Constraint::Ratio(1, data_columns)));

    let widget = TableWidget::new(rows, widths)
        .header(header)
        .footer(footer)
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(if focused_row.is_some() {
                    styling::active_block_border_style()
                } else {
                    styling::normal_block_border_style()
                }),
        )
        .column_spacing(1);

    let mut state = TableState::default();
    state.select(focused_row);
    frame.render_stateful_widget(widget, size, &mut state);
}
