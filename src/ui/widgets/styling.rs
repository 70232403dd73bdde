use ratatui::style::{Color, Modifier, Style};

/// Return the border style for the block holding focus.
///
pub fn active_block_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for table headers and footers.
///
pub fn header_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

/// Return the style for the focused control or row.
///
pub fn active_item_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Return the style for selected rows.
///
pub fn checked_item_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Return the style for normal text.
///
pub fn normal_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Return the style for controls that cannot be activated.
///
pub fn disabled_text_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn error_text_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Return the style of a control depending on focus.
///
pub fn control_style(focused: bool) -> Style {
    if focused {
        active_item_style()
    } else {
        normal_text_style()
    }
}
