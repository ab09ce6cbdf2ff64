pub mod components;
pub mod popup;
pub mod theme;

use crate::app::{SelectionMode, SelectionResult, Selector};
use crate::stack::ContentSnapshot;
use anyhow::{bail, Context, Result};
use crossterm::{
    event::{
        self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use popup::PopupState;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, IsTerminal, Write};
use theme::Theme;
use tracing::debug;

struct TerminalGuard {
    keyboard_enhancement: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.keyboard_enhancement {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = stdout.flush();
    }
}

/// Selection popup drawn in the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalSelector {
    theme: Theme,
}

impl TerminalSelector {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Selector for TerminalSelector {
    fn present(
        &mut self,
        items: &[ContentSnapshot],
        mode: SelectionMode,
    ) -> Result<SelectionResult> {
        if !io::stdout().is_terminal() {
            bail!("The selection popup needs an interactive terminal; pass an index instead");
        }

        let mut state = PopupState::new(items, mode);
        let result = run_popup(&mut state, &self.theme)?;
        debug!(?result, "Selection popup closed");
        Ok(result)
    }
}

fn run_popup(state: &mut PopupState, theme: &Theme) -> Result<SelectionResult> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let supports_keyboard_enhancement = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok();

    let _guard = TerminalGuard {
        keyboard_enhancement: supports_keyboard_enhancement,
    };

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = loop {
        terminal.draw(|f| {
            components::render(f, state, theme);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(result) = state.handle_key(key) {
                break result;
            }
        }
    };

    terminal.show_cursor()?;
    Ok(result)
}
