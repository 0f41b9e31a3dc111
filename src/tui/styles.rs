//! TUI theme and styling

use ratatui::style::Color;
use tracing::warn;

use crate::task::Priority;

pub const AVAILABLE_THEMES: &[&str] = &["phosphor", "paper"];

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub selection: Color,
    pub card_active: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Priorities
    pub priority_high: Color,
    pub priority_medium: Color,
    pub priority_low: Color,

    // Buttons and toasts
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::phosphor()
    }
}

impl Theme {
    pub fn phosphor() -> Self {
        Self {
            background: Color::Rgb(16, 20, 18),
            border: Color::Rgb(45, 70, 55),
            selection: Color::Rgb(30, 50, 40),
            card_active: Color::Rgb(57, 255, 20),

            title: Color::Rgb(57, 255, 20),
            text: Color::Rgb(180, 255, 180),
            dimmed: Color::Rgb(80, 120, 90),
            hint: Color::Rgb(100, 160, 120),

            priority_high: Color::Rgb(0, 200, 80),
            priority_medium: Color::Rgb(255, 165, 0),
            priority_low: Color::Rgb(255, 80, 70),

            accent: Color::Rgb(57, 255, 20),
            success: Color::Rgb(0, 200, 80),
            error: Color::Rgb(255, 80, 70),
            info: Color::Rgb(130, 170, 255),
        }
    }

    /// Light theme on the yellow backdrop of a paper notepad.
    pub fn paper() -> Self {
        Self {
            background: Color::Rgb(247, 204, 21),
            border: Color::Rgb(90, 80, 40),
            selection: Color::Rgb(255, 236, 150),
            card_active: Color::Rgb(246, 93, 121),

            title: Color::Rgb(20, 20, 20),
            text: Color::Rgb(21, 30, 38),
            dimmed: Color::Rgb(110, 100, 60),
            hint: Color::Rgb(80, 70, 40),

            priority_high: Color::Rgb(0, 128, 0),
            priority_medium: Color::Rgb(200, 110, 0),
            priority_low: Color::Rgb(200, 0, 0),

            accent: Color::Rgb(246, 93, 121),
            success: Color::Rgb(0, 128, 0),
            error: Color::Rgb(200, 0, 0),
            info: Color::Rgb(40, 80, 160),
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "phosphor" => Self::phosphor(),
            "paper" => Self::paper(),
            _ => {
                warn!("Unknown theme '{}', falling back to phosphor", name);
                Self::phosphor()
            }
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.priority_high,
            Priority::Medium => self.priority_medium,
            Priority::Low => self.priority_low,
        }
    }
}

/// Label and color for a raw numeric priority level.
///
/// Out-of-range levels get the low presentation.
pub fn priority_presentation(level: i64, theme: &Theme) -> (&'static str, Color) {
    let priority = Priority::from_level(level);
    (priority.label(), theme.priority_color(priority))
}
