use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tasks::Task;

pub const BG_BASE: Color = Color::Rgb(14, 17, 23);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 34);
pub const BG_ACCENT: Color = Color::Rgb(32, 37, 47);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);

const TASK_ID_PREFIX: &str = "task-";

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

/// `task-12` → `12`, the form shown in the list and accepted by commands.
pub fn short_id(id: &str) -> &str {
    id.strip_prefix(TASK_ID_PREFIX).unwrap_or(id)
}

/// Accept either `12` or `task-12`.
pub fn normalize_task_id(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.is_empty() && raw.chars().all(|ch| ch.is_ascii_digit()) {
        format!("{TASK_ID_PREFIX}{raw}")
    } else {
        raw.to_string()
    }
}

pub fn checkbox(task: &Task) -> &'static str {
    if task.completed {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Space", "Start / pause the timer"),
        ("1 / 2 / 3", "Pomodoro / short break / long break"),
        ("c", "Change the active mode's minutes"),
        ("a", "Add a task"),
        ("e", "Rename selected task"),
        ("x / Enter", "Toggle selected task done"),
        ("d / Delete", "Delete selected task"),
        ("j / k or ↓ / ↑", "Move selection"),
        ("p", "Play / pause music"),
        ("n / b", "Next / previous track"),
        ("/", "Command palette"),
        ("?", "Toggle this help overlay"),
        ("any key", "Dismiss the time's-up alert"),
        ("q / Ctrl+C", "Quit"),
        ("Esc", "Cancel/close overlays"),
    ]
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}
