pub mod stack_list;
pub mod status_bar;

use super::popup::PopupState;
use crate::app::SelectionMode;
use super::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear},
    Frame,
};

const POPUP_WIDTH: u16 = 56;

pub fn render(f: &mut Frame, state: &PopupState, theme: &Theme) {
    // Rows, or the empty message, plus borders and the status line.
    let body_height = state.rows.len().max(1) as u16;
    let area = centered_rect(POPUP_WIDTH, body_height + 3, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title(state)))
        .style(Style::default().bg(theme.background).fg(theme.foreground));
    let inner = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Stack rows
            Constraint::Length(1), // Status bar
        ])
        .split(inner);

    stack_list::render(f, state, theme, chunks[0]);
    status_bar::render(f, state, theme, chunks[1]);
}

fn title(state: &PopupState) -> &'static str {
    match state.mode {
        SelectionMode::Restore => "Paste from stack",
        SelectionMode::Delete => "Delete from stack",
    }
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(r.height)),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(r.width)),
            Constraint::Fill(1),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(56, 10, area);
        assert_eq!(popup.width, 56);
        assert_eq!(popup.height, 10);
        assert_eq!(popup.x, 22);
        assert_eq!(popup.y, 15);

        let tiny = centered_rect(56, 10, Rect::new(0, 0, 20, 5));
        assert_eq!((tiny.width, tiny.height), (20, 5));
    }
}
