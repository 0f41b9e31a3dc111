//! Priority selection overlay

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::DialogResult;
use crate::task::Priority;
use crate::tui::styles::Theme;

const DIALOG_WIDTH: u16 = 30;
// options (3) + hint (1) + borders (2) + margin (2) + spacer (1)
const DIALOG_HEIGHT: u16 = 9;

pub struct PriorityPicker {
    selected: usize,
}

impl PriorityPicker {
    pub fn new(current: Priority) -> Self {
        let selected = Priority::ALL
            .iter()
            .position(|p| *p == current)
            .unwrap_or(1);
        Self { selected }
    }

    pub fn selected(&self) -> Priority {
        Priority::ALL[self.selected]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<Priority> {
        match key.code {
            KeyCode::Esc => DialogResult::Cancel,
            KeyCode::Enter | KeyCode::Char(' ') => DialogResult::Submit(self.selected()),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                DialogResult::Continue
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < Priority::ALL.len() {
                    self.selected += 1;
                }
                DialogResult::Continue
            }
            KeyCode::Char(c) => match Priority::from_digit(c) {
                Some(priority) => DialogResult::Submit(priority),
                None => DialogResult::Continue,
            },
            _ => DialogResult::Continue,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, DIALOG_WIDTH, DIALOG_HEIGHT);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(" Priority ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // options
                Constraint::Length(1), // spacer
                Constraint::Length(1), // hint
            ])
            .split(inner);

        let lines: Vec<Line> = Priority::ALL
            .iter()
            .enumerate()
            .map(|(i, priority)| {
                let is_selected = i == self.selected;
                let prefix = if is_selected { "> " } else { "  " };
                let mut style = Style::default().fg(theme.priority_color(*priority));
                if is_selected {
                    style = style.bold();
                }
                Line::from(vec![
                    Span::styled(prefix, Style::default().fg(theme.accent)),
                    Span::styled(format!("{} ", priority.level()), Style::default().fg(theme.dimmed)),
                    Span::styled(priority.label(), style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.hint)),
            Span::raw(" select  "),
            Span::styled("Esc", Style::default().fg(theme.hint)),
            Span::raw(" cancel"),
        ]);
        frame.render_widget(Paragraph::new(hint), chunks[2]);
    }
}
