//! Viewport panel: a scrollable column of blocks whose visibility ratio
//! against the viewing window is recomputed as the user scrolls.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::helpers::{accent_title, BG_PANEL};

use super::PanelFeedback;

const ELEMENT_COUNT: usize = 10;
const ELEMENT_ROWS: u16 = 4;
const THRESHOLDS: [f64; 5] = [0.1, 0.25, 0.5, 0.75, 1.0];
const ELEMENT_COLORS: [Color; 5] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
];

#[derive(Debug, Clone, Copy)]
struct Element {
    /// Fraction of the element's rows inside the viewing window, 0 to 1.
    ratio: f64,
}

impl Element {
    fn visible(&self, threshold: f64) -> bool {
        self.ratio >= threshold
    }
}

pub(crate) struct ViewportPanel {
    elements: [Element; ELEMENT_COUNT],
    scroll: u16,
    threshold_idx: usize,
}

impl ViewportPanel {
    pub(crate) fn new() -> Self {
        Self {
            elements: [Element { ratio: 0.0 }; ELEMENT_COUNT],
            scroll: 0,
            threshold_idx: 2,
        }
    }

    pub(crate) fn threshold(&self) -> f64 {
        THRESHOLDS[self.threshold_idx]
    }

    pub(crate) fn visible_count(&self) -> usize {
        let threshold = self.threshold();
        self.elements
            .iter()
            .filter(|element| element.visible(threshold))
            .count()
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Option<PanelFeedback> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let max_scroll = ELEMENT_ROWS * ELEMENT_COUNT as u16;
                self.scroll = (self.scroll + 1).min(max_scroll);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            KeyCode::Char('t') => {
                self.threshold_idx = (self.threshold_idx + 1) % THRESHOLDS.len();
                return PanelFeedback::info(format!(
                    "Visibility threshold: {:.0}%",
                    self.threshold() * 100.0
                ));
            }
            _ => {}
        }
        None
    }

    /// Row-overlap ratio of each element against a window of
    /// `window_rows` starting `scroll` rows into the column.
    fn recompute(&mut self, window_rows: u16) {
        let window_top = i32::from(self.scroll);
        let window_bottom = window_top + i32::from(window_rows);
        for (idx, element) in self.elements.iter_mut().enumerate() {
            let top = idx as i32 * i32::from(ELEMENT_ROWS);
            let bottom = top + i32::from(ELEMENT_ROWS);
            let overlap = bottom.min(window_bottom) - top.max(window_top);
            element.ratio = overlap.max(0) as f64 / f64::from(ELEMENT_ROWS);
        }
    }

    pub(crate) fn draw(&mut self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        // The list block keeps one row of border top and bottom.
        let window_rows = chunks[1].height.saturating_sub(2);
        self.recompute(window_rows);

        let header = Line::from(format!(
            "j/k scroll • t threshold ({:.0}%) • {} of {} visible",
            self.threshold() * 100.0,
            self.visible_count(),
            ELEMENT_COUNT,
        ));
        f.render_widget(Paragraph::new(header), chunks[0]);

        let threshold = self.threshold();
        let mut lines: Vec<Line> = Vec::new();
        for (idx, element) in self.elements.iter().enumerate() {
            let color = ELEMENT_COLORS[idx % ELEMENT_COLORS.len()];
            let style = if element.visible(threshold) {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let badge = if element.visible(threshold) {
                "▣ visible"
            } else {
                "□ hidden "
            };
            for row in 0..ELEMENT_ROWS {
                let text = if row == ELEMENT_ROWS / 2 {
                    format!("  Block {:2}   {}   {:3.0}% in view", idx + 1, badge, element.ratio * 100.0)
                } else {
                    format!("  {}", "█".repeat(12))
                };
                lines.push(Line::from(Span::styled(text, style)));
            }
        }

        let list = Paragraph::new(lines)
            .scroll((self.scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Scrolling Column"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            );
        f.render_widget(list, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(panel: &mut ViewportPanel, code: KeyCode) -> Option<PanelFeedback> {
        panel.on_key(KeyEvent::from(code))
    }

    #[test]
    fn window_at_top_sees_leading_elements_only() {
        let mut panel = ViewportPanel::new();
        panel.recompute(10);
        // Ten window rows cover blocks 1 and 2 fully and half of block 3.
        assert_eq!(panel.visible_count(), 3);
        assert!((panel.elements[2].ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(panel.elements[3].ratio, 0.0);
    }

    #[test]
    fn scrolling_moves_the_visible_window() {
        let mut panel = ViewportPanel::new();
        for _ in 0..8 {
            press(&mut panel, KeyCode::Char('j'));
        }
        panel.recompute(10);
        assert_eq!(panel.elements[0].ratio, 0.0);
        assert_eq!(panel.elements[1].ratio, 0.0);
        assert!((panel.elements[2].ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_cycles_through_the_ladder() {
        let mut panel = ViewportPanel::new();
        assert!((panel.threshold() - 0.5).abs() < f64::EPSILON);
        press(&mut panel, KeyCode::Char('t'));
        assert!((panel.threshold() - 0.75).abs() < f64::EPSILON);
        for _ in 0..THRESHOLDS.len() {
            press(&mut panel, KeyCode::Char('t'));
        }
        assert!((panel.threshold() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn stricter_threshold_hides_partial_elements() {
        let mut panel = ViewportPanel::new();
        panel.recompute(10);
        assert_eq!(panel.visible_count(), 3);
        // Move to 75%, then 100%: the half-visible block drops out.
        press(&mut panel, KeyCode::Char('t'));
        assert_eq!(panel.visible_count(), 2);
        press(&mut panel, KeyCode::Char('t'));
        assert_eq!(panel.visible_count(), 2);
    }

    #[test]
    fn scroll_does_not_underflow() {
        let mut panel = ViewportPanel::new();
        press(&mut panel, KeyCode::Char('k'));
        assert_eq!(panel.scroll, 0);
    }
}
