use crate::ui::popup::{PopupState, RowTarget};
use crate::ui::theme::Theme;
use crate::utils::unicode::{fit_to_width, single_line};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, state: &PopupState, theme: &Theme, area: Rect) {
    if state.is_empty() {
        let empty = Paragraph::new("Stack is empty")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.timestamp));
        f.render_widget(empty, area);
        return;
    }

    let available_width = area.width as usize;
    let items: Vec<ListItem> = state
        .rows
        .iter()
        .map(|row| {
            let key = format!(" {} ", row.key.unwrap_or(' '));
            let time = if row.time.is_empty() {
                String::new()
            } else {
                format!(" {} ", row.time)
            };
            let label_width = available_width.saturating_sub(key.width() + time.width());
            let label = fit_to_width(&single_line(&row.label), label_width);
            let padding = " ".repeat(label_width.saturating_sub(label.width()));

            let label_style = match row.target {
                RowTarget::DeleteAll => Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD),
                RowTarget::Item(_) => Style::default().fg(theme.foreground),
            };

            ListItem::new(Line::from(vec![
                Span::styled(key, Style::default().fg(theme.key_hint)),
                Span::styled(label, label_style),
                Span::raw(padding),
                Span::styled(time, Style::default().fg(theme.timestamp)),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(theme.cursor)
            .add_modifier(Modifier::REVERSED),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}
