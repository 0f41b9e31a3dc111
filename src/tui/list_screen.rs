//! List screen - the task cards, the new-task button and their overlays

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::time::{Duration, Instant};

use super::animation::{Transition, COLLAPSED_HEIGHT};
use super::app::Action;
use super::card::{self, ActiveCard, CardEditor, CardEvent, CardField, CardHitAreas};
use super::components::{HelpOverlay, ToastLevel, Toasts};
use super::dialogs::{DatePickerDialog, DialogResult, PriorityPicker};
use super::styles::Theme;
use crate::config::{Config, ToastPlacement};
use crate::task::{IdGenerator, Priority, Task, TaskId, TaskStore, UpdateOutcome};

const ADD_BUTTON_HEIGHT: u16 = 3;

/// Behaviour knobs taken from the config.
#[derive(Debug, Clone)]
pub struct ScreenSettings {
    pub new_task_label: String,
    pub animations: bool,
    pub toast_placement: ToastPlacement,
    pub toast_duration: Duration,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ScreenSettings {
    fn from(config: &Config) -> Self {
        Self {
            new_task_label: config.new_task_label.clone(),
            animations: config.animations,
            toast_placement: config.toast.placement,
            toast_duration: config.toast.duration(),
        }
    }
}

pub struct ListScreen {
    store: TaskStore,
    ids: IdGenerator,
    settings: ScreenSettings,

    // Selection
    active: ActiveCard,
    editor: Option<CardEditor>,
    collapsing: Vec<(TaskId, Transition)>,
    cursor: usize,
    scroll_offset: usize,

    // Overlays
    show_help: bool,
    date_picker: Option<DatePickerDialog>,
    priority_picker: Option<PriorityPicker>,
    toasts: Toasts,

    // Clock
    today: NaiveDate,
    now: Instant,

    // Hit testing from the last render
    card_areas: Vec<(TaskId, Rect)>,
    card_hits: CardHitAreas,
    add_button_area: Rect,
}

impl ListScreen {
    pub fn new(tasks: Vec<Task>, settings: ScreenSettings, today: NaiveDate, now: Instant) -> Self {
        let toasts = Toasts::new(settings.toast_placement, settings.toast_duration);
        // Seeded ids may come from an earlier generator or the demo set
        let ids = IdGenerator::seeded_from(&tasks);
        Self {
            store: TaskStore::new(tasks),
            ids,
            settings,
            active: ActiveCard::default(),
            editor: None,
            collapsing: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            show_help: false,
            date_picker: None,
            priority_picker: None,
            toasts,
            today,
            now,
            card_areas: Vec::new(),
            card_hits: CardHitAreas::default(),
            add_button_area: Rect::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn active(&self) -> &ActiveCard {
        &self.active
    }

    pub fn editor(&self) -> Option<&CardEditor> {
        self.editor.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn has_dialog(&self) -> bool {
        self.show_help || self.date_picker.is_some() || self.priority_picker.is_some()
    }

    /// Make `id` the one expanded card, collapsing whichever card was
    /// expanded before. `None` collapses everything.
    pub fn set_active(&mut self, id: Option<TaskId>) {
        if let Some(prev) = self.active.get().cloned() {
            if Some(&prev) != id.as_ref() {
                self.collapsing.retain(|(cid, _)| cid != &prev);
                self.collapsing
                    .push((prev, Transition::collapse(self.now, self.settings.animations)));
            }
        }

        self.date_picker = None;
        self.priority_picker = None;

        let task = id.as_ref().and_then(|id| self.store.get(id)).cloned();
        match task {
            Some(task) => {
                if !self.active.is(&task.id) {
                    self.collapsing.retain(|(cid, _)| cid != &task.id);
                    let transition = Transition::expand(self.now, self.settings.animations);
                    self.editor = Some(CardEditor::open(&task, transition));
                }
                if let Some(pos) = self.store.position(&task.id) {
                    self.cursor = pos;
                }
                self.active.set(Some(task.id));
            }
            None => {
                self.active.set(None);
                self.editor = None;
            }
        }
    }

    pub fn toggle(&mut self, id: &TaskId) {
        let mut next = self.active.clone();
        next.toggle(id);
        self.set_active(next.get().cloned());
    }

    /// Append a task with default values and expand it right away.
    pub fn add_task(&mut self) -> TaskId {
        let id = self.ids.next();
        let task = Task::new(id.clone(), self.settings.new_task_label.clone())
            .with_priority(Priority::Medium)
            .with_deadline(Some(self.today));
        self.store.add(task);
        self.set_active(Some(id.clone()));
        self.notify(ToastLevel::Info, "New task added");
        id
    }

    /// Write the edited record back and collapse the card.
    pub fn commit(&mut self, task: Task) -> UpdateOutcome {
        let outcome = self.store.update(task);
        self.set_active(None);
        match outcome {
            UpdateOutcome::Replaced => self.notify(ToastLevel::Success, "Task updated"),
            UpdateOutcome::NotFound => self.notify(ToastLevel::Error, "Task no longer exists"),
        }
        outcome
    }

    pub fn delete(&mut self, id: &TaskId) -> usize {
        let removed = self.store.delete(id);
        if self.active.is(id) {
            self.active.set(None);
            self.editor = None;
            self.date_picker = None;
            self.priority_picker = None;
        }
        self.collapsing.retain(|(cid, _)| cid != id);
        self.clamp_cursor();
        self.notify(ToastLevel::Error, "Task deleted");
        removed
    }

    fn notify(&mut self, level: ToastLevel, message: &str) {
        let placement = self.toasts.default_placement();
        self.toasts.show(level, message, placement, self.now);
    }

    fn clamp_cursor(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
        self.scroll_offset = self.scroll_offset.min(self.cursor);
    }

    /// Advance animations and toast timers. Returns true when a redraw is
    /// needed.
    pub fn tick(&mut self, now: Instant, today: NaiveDate) -> bool {
        let mut dirty = today != self.today;
        self.now = now;
        self.today = today;

        if let Some(editor) = &mut self.editor {
            dirty |= editor.advance(now);
        }

        let before = self.collapsing.len();
        for (_, transition) in &mut self.collapsing {
            transition.advance(now);
        }
        self.collapsing.retain(|(_, t)| !t.is_finished());
        dirty |= !self.collapsing.is_empty() || before != self.collapsing.len();

        dirty |= self.toasts.expire(now);
        dirty
    }

    fn move_cursor(&mut self, delta: i32) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.cursor + delta as usize).min(len - 1)
        };
    }

    fn activate_neighbor(&mut self, delta: i32) {
        let Some(current) = self.active.get().and_then(|id| self.store.position(id)) else {
            return;
        };
        let target = if delta < 0 {
            current.checked_sub(1)
        } else {
            Some(current + 1).filter(|i| *i < self.store.len())
        };
        if let Some(index) = target {
            let id = self.store.tasks()[index].id.clone();
            self.set_active(Some(id));
        }
    }

    fn apply_card_event(&mut self, event: CardEvent) {
        match event {
            CardEvent::None => {}
            CardEvent::OpenDatePicker(initial) => {
                self.date_picker =
                    Some(DatePickerDialog::new(initial.unwrap_or(self.today), self.today));
            }
            CardEvent::OpenPriorityPicker(current) => {
                self.priority_picker = Some(PriorityPicker::new(current));
            }
            CardEvent::Commit(task) => {
                self.commit(task);
            }
            CardEvent::Delete(id) => {
                self.delete(&id);
            }
            CardEvent::Collapse => self.set_active(None),
            CardEvent::ActivatePrev => self.activate_neighbor(-1),
            CardEvent::ActivateNext => self.activate_neighbor(1),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Handle dialog input first
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if let Some(picker) = &mut self.date_picker {
            match picker.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => self.date_picker = None,
                DialogResult::Submit(date) => {
                    self.date_picker = None;
                    if let Some(editor) = &mut self.editor {
                        editor.set_deadline(date);
                    }
                }
            }
            return None;
        }

        if let Some(picker) = &mut self.priority_picker {
            match picker.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => self.priority_picker = None,
                DialogResult::Submit(priority) => {
                    self.priority_picker = None;
                    if let Some(editor) = &mut self.editor {
                        editor.set_priority(priority);
                    }
                }
            }
            return None;
        }

        if key.code == KeyCode::Char('n') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.add_task();
            return None;
        }

        // Expanded card takes everything else
        if let Some(editor) = &mut self.editor {
            let event = editor.handle_key(key);
            self.apply_card_event(event);
            return None;
        }

        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('n') => {
                self.add_task();
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.store.len().saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(task) = self.store.tasks().get(self.cursor) {
                    let id = task.id.clone();
                    self.toggle(&id);
                }
            }
            _ => {}
        }

        None
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {}
            MouseEventKind::ScrollDown if self.editor.is_none() => {
                self.move_cursor(1);
                return None;
            }
            MouseEventKind::ScrollUp if self.editor.is_none() => {
                self.move_cursor(-1);
                return None;
            }
            _ => return None,
        }
        if self.has_dialog() {
            return None;
        }

        let pos = Position::new(mouse.column, mouse.row);
        if self.add_button_area.contains(pos) {
            self.add_task();
            return None;
        }

        let clicked = self
            .card_areas
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(id, _)| id.clone());
        let Some(id) = clicked else {
            return None;
        };

        if self.active.is(&id) {
            let hits = self.card_hits;
            if let Some(editor) = &mut self.editor {
                let event = editor.handle_click(&hits, mouse.column, mouse.row);
                self.apply_card_event(event);
            }
        } else {
            if let Some(pos) = self.store.position(&id) {
                self.cursor = pos;
            }
            self.toggle(&id);
        }
        None
    }

    fn card_height(&self, task: &Task) -> u16 {
        if let Some(editor) = self.editor.as_ref().filter(|e| e.task_id() == &task.id) {
            return editor.height(self.now);
        }
        self.collapsing
            .iter()
            .find(|(id, _)| id == &task.id)
            .map(|(_, t)| t.height(self.now))
            .unwrap_or(COLLAPSED_HEIGHT)
    }

    /// Keep the focused card (active, else cursor) inside the viewport.
    fn update_scroll(&mut self, heights: &[u16], viewport: u16) {
        if heights.is_empty() {
            self.scroll_offset = 0;
            return;
        }
        let focus = self
            .active
            .get()
            .and_then(|id| self.store.position(id))
            .unwrap_or(self.cursor)
            .min(heights.len() - 1);

        if focus < self.scroll_offset {
            self.scroll_offset = focus;
        }
        let span = |from: usize| -> u32 { heights[from..=focus].iter().map(|h| u32::from(*h)).sum() };
        while self.scroll_offset < focus && span(self.scroll_offset) > u32::from(viewport) {
            self.scroll_offset += 1;
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.background)),
            area,
        );

        // Layout: list + new-task button + status bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(ADD_BUTTON_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_list(frame, chunks[0], theme);
        self.render_add_button(frame, chunks[1], theme);
        self.render_status_bar(frame, chunks[2], theme);

        self.toasts.render(frame, chunks[0], theme);

        // Render dialogs on top
        if self.show_help {
            HelpOverlay::render(frame, area, theme);
        }
        if let Some(picker) = &self.date_picker {
            picker.render(frame, area, theme);
        }
        if let Some(picker) = &self.priority_picker {
            picker.render(frame, area, theme);
        }
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" To-do [{}] ", self.store.len()))
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.card_areas.clear();
        self.card_hits = CardHitAreas::default();

        if self.store.is_empty() {
            let empty_text = vec![
                Line::from(""),
                Line::from("Nothing to do").style(Style::default().fg(theme.dimmed)),
                Line::from(""),
                Line::from("Press 'n' to create a task").style(Style::default().fg(theme.hint)),
            ];
            let para = Paragraph::new(empty_text).alignment(Alignment::Center);
            frame.render_widget(para, inner);
            return;
        }

        let tasks = self.store.snapshot();
        let heights: Vec<u16> = tasks.iter().map(|t| self.card_height(t)).collect();
        self.update_scroll(&heights, inner.height);

        let mut y = inner.y;
        let bottom = inner.y + inner.height;
        for (index, task) in tasks.iter().enumerate().skip(self.scroll_offset) {
            if y >= bottom {
                break;
            }
            let height = heights[index].min(bottom - y);
            let card_area = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height,
            };
            y += height;

            match self.editor.as_ref().filter(|e| e.task_id() == &task.id) {
                Some(editor) => {
                    self.card_hits = card::render_expanded(frame, card_area, editor, theme);
                }
                None => {
                    let is_cursor = self.editor.is_none() && index == self.cursor;
                    card::render_collapsed(frame, card_area, task, is_cursor, self.today, theme);
                }
            }
            self.card_areas.push((task.id.clone(), card_area));
        }
    }

    fn render_add_button(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = 24.min(area.width);
        let button_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y,
            width,
            height: area.height,
        };
        self.add_button_area = button_area;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent));
        let para = Paragraph::new(Span::styled(
            "+ New task",
            Style::default().fg(theme.accent).bold(),
        ))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(para, button_area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let key_style = Style::default().fg(theme.accent).bold();
        let desc_style = Style::default().fg(theme.dimmed);
        let sep_style = Style::default().fg(theme.border);

        let hints: &[(&str, &str)] = match self.editor.as_ref().map(|e| e.focus()) {
            Some(CardField::Label) => &[
                ("Tab", " Next field "),
                ("Ctrl+S", " Done "),
                ("Ctrl+D", " Delete "),
                ("Esc", " Collapse"),
            ],
            Some(_) => &[
                ("Tab", " Next field "),
                ("Enter", " Press "),
                ("↑/↓", " Other card "),
                ("Esc", " Collapse"),
            ],
            None => &[
                ("j/k", " Navigate "),
                ("Enter", " Edit "),
                ("n", " New "),
                ("?", " Help "),
                ("q", " Quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("│", sep_style));
            }
            spans.push(Span::styled(format!(" {}", key), key_style));
            spans.push(Span::styled(*desc, desc_style));
        }

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.selection));
        frame.render_widget(status, area);
    }
}
