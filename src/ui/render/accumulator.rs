use super::Frame;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use roundup_classhelper::popup::{AccumulatorPanel, Focus};

/// Render the selection preview with the apply and cancel buttons.
///
pub fn accumulator(frame: &mut Frame, size: Rect, panel: &AccumulatorPanel, focus: Focus) {
    let lines = vec![
        Line::from(Span::styled(panel.preview(), styling::checked_item_style())),
        Line::from(vec![
            Span::styled(
                format!("[{}]", panel.apply_label),
                styling::control_style(focus == Focus::Apply),
            ),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", panel.cancel_label),
                styling::control_style(focus == Focus::Cancel),
            ),
        ]),
    ];
    let border_style = if matches!(focus, Focus::Apply | Focus::Cancel) {
        styling::active_block_border_style()
    } else {
        styling::normal_block_border_style()
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP).border_style(border_style));
    frame.render_widget(paragraph, size);
}
