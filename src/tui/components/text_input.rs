//! Single-line text field rendering

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tui_input::Input;
use unicode_width::UnicodeWidthChar;

use crate::tui::styles::Theme;

/// Renders a labelled text field.
///
/// When focused, an inverse-video cursor marks the insert position and the
/// value scrolls horizontally so the cursor stays in view. When not focused
/// the value (or placeholder if empty) is shown from the start.
pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &Input,
    is_focused: bool,
    placeholder: Option<&str>,
    theme: &Theme,
) {
    let label_style = if is_focused {
        Style::default().fg(theme.accent).underlined()
    } else {
        Style::default().fg(theme.dimmed)
    };
    let value_style = if is_focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let value = input.value();
    let mut spans = vec![Span::styled(label, label_style), Span::raw(" ")];
    let label_width = label.chars().count() as u16 + 1;
    let field_width = area.width.saturating_sub(label_width) as usize;

    if value.is_empty() && !is_focused {
        if let Some(placeholder_text) = placeholder {
            spans.push(Span::styled(placeholder_text, Style::default().fg(theme.dimmed)));
        }
    } else if is_focused {
        let chars: Vec<char> = value.chars().collect();
        let cursor_pos = input.cursor().min(chars.len());
        let start = scroll_start(&chars, cursor_pos, field_width);
        let cursor_style = Style::default().fg(theme.background).bg(theme.accent);

        let before: String = chars[start..cursor_pos].iter().collect();
        let cursor_char = chars
            .get(cursor_pos)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = chars.iter().skip(cursor_pos + 1).collect();

        if !before.is_empty() {
            spans.push(Span::styled(before, value_style));
        }
        spans.push(Span::styled(cursor_char, cursor_style));
        if !after.is_empty() {
            spans.push(Span::styled(after, value_style));
        }
    } else {
        spans.push(Span::styled(value, value_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// First char index to draw so the cursor cell fits within `width` columns.
fn scroll_start(chars: &[char], cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    // Reserve one column for the cursor cell itself.
    let mut used = 1;
    let mut start = cursor;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start -= 1;
    }
    start
}
