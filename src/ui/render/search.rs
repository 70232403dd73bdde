use super::Frame;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use roundup_classhelper::popup::{Focus, InputKind, SearchForm};

/// Render the search form: one line per input, then the buttons.
///
pub fn search(frame: &mut Frame, size: Rect, form: &SearchForm, focus: Focus) {
    let focused_here = matches!(
        focus,
        Focus::SearchInput(_) | Focus::SearchButton | Focus::ResetButton
    );
    let label_width = form
        .inputs
        .iter()
        .map(|input| input.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = form
        .inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let value = match &input.kind {
                InputKind::Text { value } => format!("{}_", value),
                InputKind::Select { .. } => format!("< {} >", input.value_label()),
            };
            let mut spans = vec![
                Span::styled(
                    format!("{:>width$} ", input.label, width = label_width),
                    styling::normal_text_style(),
                ),
                Span::styled(value, styling::control_style(focus == Focus::SearchInput(index))),
            ];
            if let Some(error) = &input.error {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(error.message(), styling::error_text_style()));
            }
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(vec![
        Span::styled(
            format!("[{}]", form.search_label),
            styling::control_style(focus == Focus::SearchButton),
        ),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", form.reset_label),
            styling::control_style(focus == Focus::ResetButton),
        ),
    ]));

    let border_style = if focused_here {
        styling::active_block_border_style()
    } else {
        styling::normal_block_border_style()
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, size);
}
