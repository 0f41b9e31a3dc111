//! Transient notifications
//!
//! Toasts are fire-and-forget: callers push a message and never hear back.
//! Each one dismisses itself after its display duration.

use ratatui::prelude::*;
use ratatui::widgets::*;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

use crate::config::ToastPlacement;
use crate::tui::styles::Theme;

const MAX_TOASTS: usize = 3;
const TOAST_HEIGHT: u16 = 3;
const MIN_TOAST_WIDTH: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Info => "ℹ",
            Self::Error => "✕",
        }
    }

    fn color(&self, theme: &Theme) -> Color {
        match self {
            Self::Success => theme.success,
            Self::Info => theme.info,
            Self::Error => theme.error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub placement: ToastPlacement,
    created_at: Instant,
    dismiss_after: Duration,
}

impl Toast {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.dismiss_after
    }
}

#[derive(Debug)]
pub struct Toasts {
    items: VecDeque<Toast>,
    default_placement: ToastPlacement,
    dismiss_after: Duration,
}

impl Toasts {
    pub fn new(default_placement: ToastPlacement, dismiss_after: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            default_placement,
            dismiss_after,
        }
    }

    pub fn default_placement(&self) -> ToastPlacement {
        self.default_placement
    }

    pub fn show(
        &mut self,
        level: ToastLevel,
        message: impl Into<String>,
        placement: ToastPlacement,
        now: Instant,
    ) {
        let message = message.into();
        tracing::info!(?level, %message, "toast");
        if self.items.len() == MAX_TOASTS {
            self.items.pop_front();
        }
        self.items.push_back(Toast {
            level,
            message,
            placement,
            created_at: now,
            dismiss_after: self.dismiss_after,
        });
    }

    /// Drop expired toasts. Returns true when anything was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|t| !t.is_expired(now));
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut top_y = area.y + 1;
        let mut bottom_y = area.y + area.height.saturating_sub(1);

        for toast in self.iter() {
            let text = format!(" {} {} ", toast.level.icon(), toast.message);
            let width = (text.width() as u16 + 2)
                .max(MIN_TOAST_WIDTH)
                .min(area.width);
            let x = area.x + (area.width.saturating_sub(width)) / 2;

            let y = match toast.placement {
                ToastPlacement::Top => {
                    let y = top_y;
                    top_y += TOAST_HEIGHT;
                    y
                }
                ToastPlacement::Bottom => {
                    bottom_y = bottom_y.saturating_sub(TOAST_HEIGHT);
                    bottom_y
                }
            };
            if y < area.y || y + TOAST_HEIGHT > area.y + area.height {
                continue;
            }

            let toast_area = Rect {
                x,
                y,
                width,
                height: TOAST_HEIGHT,
            };
            let color = toast.level.color(theme);

            frame.render_widget(Clear, toast_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme.background));
            let para = Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(color).bold(),
            )))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(para, toast_area);
        }
    }
}
