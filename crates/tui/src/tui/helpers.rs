use std::cmp::min;

use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const BG_BASE: Color = Color::Rgb(16, 14, 28);
pub const BG_PANEL: Color = Color::Rgb(26, 22, 42);
pub const BG_ACCENT: Color = Color::Rgb(40, 33, 60);
pub const FG_ACCENT: Color = Color::Rgb(186, 148, 255);

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

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}

pub fn format_time(value: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = (*value).into();
    local.format("%H:%M:%S").to_string()
}

pub fn format_coordinate(value: f64) -> String {
    format!("{:.6}", value)
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Tab / Shift+Tab", "Cycle through home and the panels"),
        ("1-5", "Jump straight to a panel"),
        ("Esc / 0", "Return to the landing view"),
        ("q / Ctrl+C", "Quit"),
        ("h", "Toggle this help overlay"),
        ("j / k or ↓ / ↑", "Move the landing selection"),
        ("Enter (home)", "Open the selected demo"),
        ("a (tasks)", "Add a randomized batch of tasks"),
        ("s (tasks)", "Start idle-time processing"),
        ("c (tasks)", "Clear the queue"),
        ("arrows (sketch)", "Move the cursor"),
        ("Space (sketch)", "Plot at the cursor"),
        ("c / + / - (sketch)", "Cycle color, grow or shrink the brush"),
        ("x (sketch)", "Clear the pad"),
        ("g (location)", "Request a single position fix"),
        ("w (location)", "Toggle watch mode"),
        ("p (location)", "Toggle simulated permission denial"),
        ("j / k (viewport)", "Scroll the element strip"),
        ("t (viewport)", "Cycle the visibility threshold"),
        ("f (network)", "Force a connection change"),
        ("x (location/network)", "Clear the history"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_keeps_within_bounds() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let rect = centered_rect(40, 10, area);
        assert!(rect.x >= area.x);
        assert!(rect.y >= area.y);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 10);
    }

    #[test]
    fn inset_rect_never_underflows() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 3,
            height: 2,
        };
        let rect = inset_rect(area, 5);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }

    #[test]
    fn coordinate_formatting_uses_six_decimals() {
        assert_eq!(format_coordinate(51.4769), "51.476900");
        assert_eq!(format_coordinate(-0.0005), "-0.000500");
    }
}
