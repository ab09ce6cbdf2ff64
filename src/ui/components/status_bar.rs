use crate::app::SelectionMode;
use crate::ui::popup::{DIGIT_KEYS, PopupState};
use crate::ui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, state: &PopupState, theme: &Theme, area: Rect) {
    let count_text = if state.total_items > DIGIT_KEYS {
        format!("{} items, ↑↓ past {DIGIT_KEYS}", state.total_items)
    } else {
        format!("{} items", state.total_items)
    };

    let hint = if state.is_empty() {
        "any key closes"
    } else {
        "key/Enter pick  Esc close"
    };

    let left_content = format!(" {} | {}", state.mode, count_text);
    let padding = (area.width as usize).saturating_sub(left_content.width() + hint.width() + 1);

    let base_style = Style::default()
        .fg(theme.status_bar_fg)
        .bg(theme.status_bar_bg);

    let mode_style = if state.mode == SelectionMode::Delete {
        base_style.fg(theme.danger).add_modifier(Modifier::BOLD)
    } else {
        base_style.add_modifier(Modifier::BOLD)
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled(left_content, mode_style),
        Span::styled(" ".repeat(padding), base_style),
        Span::styled(format!("{hint} "), base_style),
    ]))
    .style(base_style);

    f.render_widget(status, area);
}
