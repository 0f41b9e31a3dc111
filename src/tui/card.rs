//! Task card: one task as a collapsed summary row or an expanded edit form

use chrono::NaiveDate;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::time::Instant;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;
use unicode_width::UnicodeWidthStr;

use super::animation::{Transition, TransitionEvent, COLLAPSED_HEIGHT};
use super::components::render_text_field;
use super::styles::{priority_presentation, Theme};
use crate::task::{deadline_remaining, format_date, Priority, Task, TaskId};

/// Which card, if any, is expanded. Owned by the list screen and handed to
/// each card by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveCard(Option<TaskId>);

impl ActiveCard {
    pub fn get(&self) -> Option<&TaskId> {
        self.0.as_ref()
    }

    pub fn is(&self, id: &TaskId) -> bool {
        self.0.as_ref() == Some(id)
    }

    pub fn set(&mut self, id: Option<TaskId>) {
        self.0 = id;
    }

    /// Expand `id`, or collapse it if it is already the active card.
    pub fn toggle(&mut self, id: &TaskId) {
        if self.is(id) {
            self.0 = None;
        } else {
            self.0 = Some(id.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Label,
    Deadline,
    Priority,
    Done,
    Delete,
}

impl CardField {
    const ORDER: [CardField; 5] = [
        CardField::Label,
        CardField::Deadline,
        CardField::Priority,
        CardField::Done,
        CardField::Delete,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// What the list screen should do after a key reached the expanded card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    None,
    OpenDatePicker(Option<NaiveDate>),
    OpenPriorityPicker(Priority),
    Commit(Task),
    Delete(TaskId),
    Collapse,
    ActivatePrev,
    ActivateNext,
}

/// Edit buffers of the expanded card, seeded from the task when it expands.
pub struct CardEditor {
    task_id: TaskId,
    label: Input,
    priority: Priority,
    deadline: Option<NaiveDate>,
    focus: CardField,
    input_ready: bool,
    transition: Transition,
}

impl CardEditor {
    pub fn open(task: &Task, transition: Transition) -> Self {
        Self {
            task_id: task.id.clone(),
            label: Input::new(task.label.clone()),
            priority: task.priority,
            deadline: task.deadline,
            focus: CardField::Label,
            input_ready: false,
            transition,
        }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    pub fn label(&self) -> &str {
        self.label.value()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn focus(&self) -> CardField {
        self.focus
    }

    pub fn set_focus(&mut self, focus: CardField) {
        self.focus = focus;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_deadline(&mut self, deadline: Option<NaiveDate>) {
        self.deadline = deadline;
    }

    /// True once the expand transition has finished and the label field
    /// holds the focus.
    pub fn label_focused(&self) -> bool {
        self.input_ready && self.focus == CardField::Label
    }

    pub fn height(&self, now: Instant) -> u16 {
        self.transition.height(now)
    }

    pub fn is_expanded(&self) -> bool {
        self.transition.is_finished()
    }

    /// Step the expand transition. Returns true while a redraw is needed.
    pub fn advance(&mut self, now: Instant) -> bool {
        if let Some(event) = self.transition.advance(now) {
            self.on_transition_event(event);
            return true;
        }
        !self.transition.is_finished()
    }

    fn on_transition_event(&mut self, event: TransitionEvent) {
        match event {
            TransitionEvent::Finished => {
                self.input_ready = true;
                tracing::debug!(task = %self.task_id, "card expanded, label input focused");
            }
        }
    }

    /// The full replacement record built from the edit buffers.
    pub fn commit(&self) -> Task {
        Task {
            id: self.task_id.clone(),
            label: self.label.value().to_string(),
            priority: self.priority,
            deadline: self.deadline,
        }
    }

    fn press(&self, field: CardField) -> CardEvent {
        match field {
            CardField::Label => CardEvent::None,
            CardField::Deadline => CardEvent::OpenDatePicker(self.deadline),
            CardField::Priority => CardEvent::OpenPriorityPicker(self.priority),
            CardField::Done => CardEvent::Commit(self.commit()),
            CardField::Delete => CardEvent::Delete(self.task_id.clone()),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> CardEvent {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => return CardEvent::Commit(self.commit()),
            KeyCode::Char('d') if ctrl => return CardEvent::Delete(self.task_id.clone()),
            KeyCode::Esc => return CardEvent::Collapse,
            KeyCode::Up => return CardEvent::ActivatePrev,
            KeyCode::Down => return CardEvent::ActivateNext,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return CardEvent::None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return CardEvent::None;
            }
            _ => {}
        }

        match self.focus {
            CardField::Label => {
                if !self.input_ready {
                    return CardEvent::None;
                }
                if key.code == KeyCode::Enter {
                    self.focus = CardField::Deadline;
                } else {
                    self.label.handle_event(&Event::Key(key));
                }
                CardEvent::None
            }
            CardField::Priority => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.press(CardField::Priority),
                KeyCode::Char(c) => {
                    if let Some(priority) = Priority::from_digit(c) {
                        self.priority = priority;
                    }
                    CardEvent::None
                }
                _ => CardEvent::None,
            },
            field => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.press(field),
                _ => CardEvent::None,
            },
        }
    }

    /// Resolve a click inside the expanded card.
    pub fn handle_click(&mut self, hits: &CardHitAreas, column: u16, row: u16) -> CardEvent {
        let pos = Position::new(column, row);
        let hit = [
            (hits.label, CardField::Label),
            (hits.deadline, CardField::Deadline),
            (hits.priority, CardField::Priority),
            (hits.done, CardField::Done),
            (hits.delete, CardField::Delete),
        ]
        .into_iter()
        .find(|(rect, _)| rect.contains(pos));

        match hit {
            Some((_, field)) => {
                self.set_focus(field);
                self.press(field)
            }
            None => CardEvent::Collapse,
        }
    }
}

/// Clickable regions of an expanded card from the last render.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardHitAreas {
    pub label: Rect,
    pub deadline: Rect,
    pub priority: Rect,
    pub done: Rect,
    pub delete: Rect,
}

fn card_block(is_active: bool, is_cursor: bool, theme: &Theme) -> Block<'static> {
    let border_color = if is_active {
        theme.card_active
    } else if is_cursor {
        theme.accent
    } else {
        theme.border
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    if is_cursor && !is_active {
        block = block.style(Style::default().bg(theme.selection));
    }
    block
}

/// Summary row: checkbox, label, priority and time left.
pub fn render_collapsed(
    frame: &mut Frame,
    area: Rect,
    task: &Task,
    is_cursor: bool,
    today: NaiveDate,
    theme: &Theme,
) {
    let block = card_block(false, is_cursor, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let remaining = deadline_remaining(task.deadline, today);
    let right = format!("✎ {}", remaining);
    let right_width = right.width() as u16;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(right_width + 1)])
        .split(Rect { height: 1, ..inner });

    let label_style = if is_cursor {
        Style::default().fg(theme.text).bold()
    } else {
        Style::default().fg(theme.text)
    };
    let (priority_label, priority_color) = priority_presentation(task.priority.level(), theme);
    let left = Line::from(vec![
        Span::styled("▢ ", Style::default().fg(theme.dimmed)),
        Span::styled(task.label.clone(), label_style),
        Span::raw("  "),
        Span::styled(priority_label, Style::default().fg(priority_color).bold()),
    ]);
    frame.render_widget(Paragraph::new(left), chunks[0]);

    let overdue = task
        .deadline
        .map(|d| crate::task::days_until(d, today) < 0)
        .unwrap_or(false);
    let remaining_style = if overdue {
        Style::default().fg(theme.error)
    } else {
        Style::default().fg(theme.hint)
    };
    let right_line = Line::from(vec![
        Span::styled("✎ ", Style::default().fg(theme.dimmed)),
        Span::styled(remaining, remaining_style),
    ]);
    frame.render_widget(
        Paragraph::new(right_line).alignment(Alignment::Right),
        chunks[1],
    );
}

fn button(text: &str, focused: bool, color: Color, theme: &Theme) -> Paragraph<'static> {
    let style = if focused {
        Style::default().fg(theme.background).bg(color).bold()
    } else {
        Style::default().fg(color).bold()
    };
    Paragraph::new(Span::styled(format!("[ {} ]", text), style)).alignment(Alignment::Center)
}

/// Edit form. While the expand transition runs only the frame grows; the
/// form appears once the card reaches full height.
pub fn render_expanded(
    frame: &mut Frame,
    area: Rect,
    editor: &CardEditor,
    theme: &Theme,
) -> CardHitAreas {
    let block = card_block(true, false, theme).title(Span::styled(
        " Edit task ",
        Style::default().fg(theme.title).bold(),
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !editor.is_expanded() || area.height <= COLLAPSED_HEIGHT {
        let preview = Line::from(Span::styled(
            editor.label().to_string(),
            Style::default().fg(theme.dimmed),
        ));
        frame.render_widget(Paragraph::new(preview), Rect { height: 1, ..inner });
        return CardHitAreas::default();
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // label
            Constraint::Length(1), // spacer
            Constraint::Length(1), // deadline
            Constraint::Length(1), // priority
            Constraint::Length(1), // spacer
            Constraint::Length(1), // buttons
            Constraint::Min(0),
        ])
        .split(inner);

    render_text_field(
        frame,
        rows[0],
        "Label:",
        &editor.label,
        editor.label_focused(),
        Some("(empty)"),
        theme,
    );

    let field_style = |field: CardField| {
        if editor.focus == field {
            Style::default().fg(theme.accent).underlined()
        } else {
            Style::default().fg(theme.dimmed)
        }
    };

    let deadline_value = match editor.deadline {
        Some(_) => format_date(editor.deadline),
        None => "Pick a date".to_string(),
    };
    let deadline_line = Line::from(vec![
        Span::styled("Deadline  ", field_style(CardField::Deadline)),
        Span::styled(
            format!("[{}]", deadline_value),
            Style::default().fg(theme.text).bold(),
        ),
    ]);
    frame.render_widget(Paragraph::new(deadline_line), rows[2]);

    let priority_line = Line::from(vec![
        Span::styled("Priority  ", field_style(CardField::Priority)),
        Span::styled(
            format!("[{} ▾]", editor.priority().label()),
            Style::default()
                .fg(theme.priority_color(editor.priority()))
                .bold(),
        ),
    ]);
    frame.render_widget(Paragraph::new(priority_line), rows[3]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(rows[5]);

    frame.render_widget(
        button("Done", editor.focus == CardField::Done, theme.success, theme),
        buttons[1],
    );
    frame.render_widget(
        button("Delete", editor.focus == CardField::Delete, theme.error, theme)
            .alignment(Alignment::Right),
        buttons[2],
    );

    CardHitAreas {
        label: rows[0],
        deadline: rows[2],
        priority: rows[3],
        done: buttons[1],
        delete: buttons[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::animation::EXPAND_DURATION;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn sample_task() -> Task {
        Task::new(TaskId::from("42"), "Water plants")
            .with_priority(Priority::Low)
            .with_deadline(NaiveDate::from_ymd_opt(2026, 5, 1))
    }

    fn ready_editor() -> CardEditor {
        let now = Instant::now();
        let mut editor = CardEditor::open(&sample_task(), Transition::expand(now, false));
        editor.advance(now);
        editor
    }

    #[test]
    fn test_active_card_toggle() {
        let a = TaskId::from("a");
        let b = TaskId::from("b");
        let mut active = ActiveCard::default();

        active.toggle(&a);
        assert!(active.is(&a));

        active.toggle(&b);
        assert!(active.is(&b));
        assert!(!active.is(&a));

        active.toggle(&b);
        assert_eq!(active.get(), None);
    }

    #[test]
    fn test_editor_seeded_from_task() {
        let editor = ready_editor();
        assert_eq!(editor.label(), "Water plants");
        assert_eq!(editor.priority(), Priority::Low);
        assert_eq!(editor.deadline(), NaiveDate::from_ymd_opt(2026, 5, 1));
        assert_eq!(editor.focus(), CardField::Label);
    }

    #[test]
    fn test_label_not_focused_until_transition_finishes() {
        let start = Instant::now();
        let mut editor = CardEditor::open(&sample_task(), Transition::expand(start, true));
        assert!(!editor.label_focused());

        // Typing during the transition is dropped
        editor.handle_key(key(KeyCode::Char('x')));
        assert_eq!(editor.label(), "Water plants");

        editor.advance(start + EXPAND_DURATION / 3);
        assert!(!editor.label_focused());

        editor.advance(start + EXPAND_DURATION);
        assert!(editor.label_focused());
    }

    #[test]
    fn test_typing_edits_label() {
        let mut editor = ready_editor();
        editor.handle_key(key(KeyCode::Char('!')));
        assert_eq!(editor.label(), "Water plants!");
        editor.handle_key(key(KeyCode::Backspace));
        editor.handle_key(key(KeyCode::Backspace));
        assert_eq!(editor.label(), "Water plant");
    }

    #[test]
    fn test_tab_cycles_fields() {
        let mut editor = ready_editor();
        let mut seen = vec![editor.focus()];
        for _ in 0..5 {
            editor.handle_key(key(KeyCode::Tab));
            seen.push(editor.focus());
        }
        assert_eq!(
            seen,
            vec![
                CardField::Label,
                CardField::Deadline,
                CardField::Priority,
                CardField::Done,
                CardField::Delete,
                CardField::Label,
            ]
        );
        editor.handle_key(key(KeyCode::BackTab));
        assert_eq!(editor.focus(), CardField::Delete);
    }

    #[test]
    fn test_enter_on_label_moves_to_deadline() {
        let mut editor = ready_editor();
        assert_eq!(editor.handle_key(key(KeyCode::Enter)), CardEvent::None);
        assert_eq!(editor.focus(), CardField::Deadline);
    }

    #[test]
    fn test_enter_on_fields_opens_pickers() {
        let mut editor = ready_editor();
        editor.set_focus(CardField::Deadline);
        assert_eq!(
            editor.handle_key(key(KeyCode::Enter)),
            CardEvent::OpenDatePicker(NaiveDate::from_ymd_opt(2026, 5, 1))
        );
        editor.set_focus(CardField::Priority);
        assert_eq!(
            editor.handle_key(key(KeyCode::Enter)),
            CardEvent::OpenPriorityPicker(Priority::Low)
        );
    }

    #[test]
    fn test_digit_on_priority_field() {
        let mut editor = ready_editor();
        editor.set_focus(CardField::Priority);
        editor.handle_key(key(KeyCode::Char('3')));
        assert_eq!(editor.priority(), Priority::High);
        editor.handle_key(key(KeyCode::Char('9')));
        assert_eq!(editor.priority(), Priority::High);
        editor.handle_key(key(KeyCode::Char('1')));
        assert_eq!(editor.priority(), Priority::Low);
    }

    #[test]
    fn test_commit_builds_full_record() {
        let mut editor = ready_editor();
        editor.handle_key(key(KeyCode::Char('?')));
        editor.set_priority(Priority::High);
        editor.set_deadline(None);

        let task = editor.commit();
        assert_eq!(task.id, TaskId::from("42"));
        assert_eq!(task.label, "Water plants?");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.deadline, None);
    }

    #[test]
    fn test_done_and_delete_buttons() {
        let mut editor = ready_editor();
        editor.set_focus(CardField::Done);
        assert!(matches!(
            editor.handle_key(key(KeyCode::Enter)),
            CardEvent::Commit(_)
        ));
        editor.set_focus(CardField::Delete);
        assert_eq!(
            editor.handle_key(key(KeyCode::Enter)),
            CardEvent::Delete(TaskId::from("42"))
        );
    }

    #[test]
    fn test_shortcuts() {
        let mut editor = ready_editor();
        assert!(matches!(editor.handle_key(ctrl('s')), CardEvent::Commit(_)));
        assert!(matches!(editor.handle_key(ctrl('d')), CardEvent::Delete(_)));
        assert_eq!(editor.handle_key(key(KeyCode::Esc)), CardEvent::Collapse);
        assert_eq!(editor.handle_key(key(KeyCode::Up)), CardEvent::ActivatePrev);
        assert_eq!(editor.handle_key(key(KeyCode::Down)), CardEvent::ActivateNext);
    }

    #[test]
    fn test_click_resolution() {
        let mut editor = ready_editor();
        let hits = CardHitAreas {
            label: Rect::new(1, 1, 40, 1),
            deadline: Rect::new(1, 3, 40, 1),
            priority: Rect::new(1, 4, 40, 1),
            done: Rect::new(11, 6, 20, 1),
            delete: Rect::new(31, 6, 10, 1),
        };
        assert!(matches!(
            editor.handle_click(&hits, 15, 6),
            CardEvent::Commit(_)
        ));
        assert_eq!(
            editor.handle_click(&hits, 5, 4),
            CardEvent::OpenPriorityPicker(Priority::Low)
        );
        assert_eq!(editor.focus(), CardField::Priority);
        assert_eq!(editor.handle_click(&hits, 5, 8), CardEvent::Collapse);
    }
}
