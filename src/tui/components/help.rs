//! Help overlay component

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::styles::Theme;

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 30;
#[cfg(test)]
const BORDER_HEIGHT: u16 = 2;
#[cfg(test)]
const BORDER_WIDTH: u16 = 2;
#[cfg(test)]
const KEY_COLUMN_WIDTH: usize = 12; // 2 spaces indent + 10 chars for key

fn shortcuts() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    vec![
        (
            "List",
            vec![
                ("j/↓", "Move down"),
                ("k/↑", "Move up"),
                ("g / G", "Go to top / bottom"),
                ("Enter", "Expand card for editing"),
                ("n", "New task"),
            ],
        ),
        (
            "Editing a card",
            vec![
                ("Tab", "Next field"),
                ("Shift+Tab", "Previous field"),
                ("Enter", "Pick date / priority, press"),
                ("↑ / ↓", "Edit previous / next card"),
                ("Ctrl+S", "Done (save changes)"),
                ("Ctrl+D", "Delete task"),
                ("Esc", "Collapse without saving"),
            ],
        ),
        (
            "Date picker",
            vec![
                ("h/l", "Previous / next day"),
                ("k/j", "Previous / next week"),
                ("[ / ]", "Previous / next month"),
                ("t", "Today"),
                ("Backspace", "Clear deadline"),
            ],
        ),
        (
            "Other",
            vec![
                ("Ctrl+N", "New task from anywhere"),
                ("?", "Toggle help"),
                ("q", "Quit"),
            ],
        ),
    ]
}

#[cfg(test)]
fn content_line_count() -> usize {
    let mut count = 0;
    for (_, keys) in shortcuts() {
        count += 1; // section header
        count += keys.len(); // shortcut lines
        count += 1; // empty line after section
    }
    count
}

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = crate::tui::dialogs::centered_rect(area, DIALOG_WIDTH, DIALOG_HEIGHT);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Keyboard Shortcuts ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let mut lines: Vec<Line> = Vec::new();

        for (section, keys) in shortcuts() {
            lines.push(Line::from(Span::styled(
                section,
                Style::default().fg(theme.accent).bold(),
            )));
            for (key, desc) in keys {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:10}", key), Style::default().fg(theme.hint)),
                    Span::styled(desc, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
