use super::{Frame, Screen};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the opener field, pending alerts and the newest log lines.
///
pub fn status(frame: &mut Frame, size: Rect, screen: &Screen) {
    let mut items: Vec<ListItem> = Vec::new();
    if let Some(field) = &screen.owner_field {
        items.push(ListItem::new(Line::from(Span::styled(
            field.clone(),
            styling::header_style(),
        ))));
    }
    items.extend(screen.alerts.iter().map(|alert| {
        ListItem::new(Line::from(Span::styled(alert.clone(), styling::error_text_style())))
    }));

    // Newest lines last, cut to what fits.
    let room = (size.height as usize)
        .saturating_sub(2)
        .saturating_sub(items.len());
    let skip = screen.log_lines.len().saturating_sub(room);
    items.extend(screen.log_lines.iter().skip(skip).map(|line| {
        ListItem::new(Line::from(Span::styled(line.clone(), styling::normal_text_style())))
    }));

    let list = List::new(items).block(
        Block::default()
            .title("Log (Ctrl+S search, Ctrl+R reset, / focus search, Ctrl+C quit)")
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style()),
    );
    frame.render_widget(list, size);
}
