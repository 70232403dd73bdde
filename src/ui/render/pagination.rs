use super::Frame;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use roundup_classhelper::popup::{Focus, Pagination};

/// Render `[prev] start - end [next]`, dimming links that lead nowhere.
///
pub fn pagination(frame: &mut Frame, size: Rect, info: &Pagination, focus: Focus) {
    let link_style = |enabled: bool, focused: bool| {
        if enabled {
            styling::control_style(focused)
        } else {
            styling::disabled_text_style()
        }
    };
    let line = Line::from(vec![
        Span::styled(
            format!("[{}]", info.prev_label),
            link_style(info.has_prev(), focus == Focus::Prev),
        ),
        Span::styled(format!(" {} ", info.info()), styling::normal_text_style()),
        Span::styled(
            format!("[{}]", info.next_label),
            link_style(info.has_next(), focus == Focus::Next),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), size);
}
