//! Modal calendar for picking a deadline

use chrono::{Datelike, Days, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::DialogResult;
use crate::task::format_date;
use crate::tui::styles::Theme;

const DIALOG_WIDTH: u16 = 30;
const DIALOG_HEIGHT: u16 = 14;
const WEEKDAYS: &str = "Mo Tu We Th Fr Sa Su";

pub struct DatePickerDialog {
    selected: NaiveDate,
    today: NaiveDate,
}

impl DatePickerDialog {
    pub fn new(initial: NaiveDate, today: NaiveDate) -> Self {
        Self {
            selected: initial,
            today,
        }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    fn shift_days(&mut self, delta: i64) {
        let moved = if delta >= 0 {
            self.selected.checked_add_days(Days::new(delta as u64))
        } else {
            self.selected.checked_sub_days(Days::new(delta.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.selected = date;
        }
    }

    /// Month arithmetic clamps the day to the target month's length.
    fn shift_months(&mut self, forward: bool) {
        let moved = if forward {
            self.selected.checked_add_months(Months::new(1))
        } else {
            self.selected.checked_sub_months(Months::new(1))
        };
        if let Some(date) = moved {
            self.selected = date;
        }
    }

    /// `Submit(None)` clears the deadline.
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<Option<NaiveDate>> {
        match key.code {
            KeyCode::Esc => DialogResult::Cancel,
            KeyCode::Enter => DialogResult::Submit(Some(self.selected)),
            KeyCode::Backspace | KeyCode::Delete => DialogResult::Submit(None),
            KeyCode::Left | KeyCode::Char('h') => {
                self.shift_days(-1);
                DialogResult::Continue
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.shift_days(1);
                DialogResult::Continue
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.shift_days(-7);
                DialogResult::Continue
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.shift_days(7);
                DialogResult::Continue
            }
            KeyCode::Char('[') | KeyCode::PageUp => {
                self.shift_months(false);
                DialogResult::Continue
            }
            KeyCode::Char(']') | KeyCode::PageDown => {
                self.shift_months(true);
                DialogResult::Continue
            }
            KeyCode::Char('t') => {
                self.selected = self.today;
                DialogResult::Continue
            }
            _ => DialogResult::Continue,
        }
    }

    /// Weeks of the selected month, Monday first. `None` pads the first and
    /// last week.
    fn month_grid(&self) -> Vec<[Option<u32>; 7]> {
        let year = self.selected.year();
        let month = self.selected.month();
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Vec::new();
        };
        let days_in_month = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(28);

        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut col = first.weekday().num_days_from_monday() as usize;
        for day in 1..=days_in_month {
            week[col] = Some(day);
            col += 1;
            if col == 7 {
                weeks.push(week);
                week = [None; 7];
                col = 0;
            }
        }
        if col > 0 {
            weeks.push(week);
        }
        weeks
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, DIALOG_WIDTH, DIALOG_HEIGHT);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(" Deadline ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let mut lines = vec![
            Line::from(Span::styled(
                self.selected.format("%B %Y").to_string(),
                Style::default().fg(theme.title).bold(),
            ))
            .alignment(Alignment::Center),
            Line::from(Span::styled(WEEKDAYS, Style::default().fg(theme.dimmed)))
                .alignment(Alignment::Center),
        ];

        let same_month = |d: NaiveDate| {
            d.year() == self.selected.year() && d.month() == self.selected.month()
        };
        for week in self.month_grid() {
            let mut spans = Vec::new();
            for (i, day) in week.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                match day {
                    Some(d) => {
                        let mut style = Style::default().fg(theme.text);
                        if same_month(self.today) && self.today.day() == *d {
                            style = style.fg(theme.accent).underlined();
                        }
                        if self.selected.day() == *d {
                            style = Style::default().fg(theme.background).bg(theme.accent).bold();
                        }
                        spans.push(Span::styled(format!("{:>2}", d), style));
                    }
                    None => spans.push(Span::raw("  ")),
                }
            }
            lines.push(Line::from(spans).alignment(Alignment::Center));
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(lines), chunks[0]);

        let selected = Line::from(Span::styled(
            format_date(Some(self.selected())),
            Style::default().fg(theme.accent).bold(),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(Paragraph::new(selected), chunks[1]);

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.hint)),
            Span::raw(" ok  "),
            Span::styled("⌫", Style::default().fg(theme.hint)),
            Span::raw(" clear  "),
            Span::styled("Esc", Style::default().fg(theme.hint)),
            Span::raw(" cancel"),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(Paragraph::new(hint), chunks[2]);
    }
}
