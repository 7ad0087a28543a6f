//! Sketch panel: cursor-driven plotting on a braille canvas.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::constants::STATUS_SKETCH_CLEARED;
use crate::tui::helpers::{accent_title, BG_PANEL};

use super::PanelFeedback;

const WIDTH: f64 = 100.0;
const HEIGHT: f64 = 50.0;
const PALETTE: [(Color, &str); 5] = [
    (Color::Cyan, "cyan"),
    (Color::Magenta, "magenta"),
    (Color::Yellow, "yellow"),
    (Color::Green, "green"),
    (Color::White, "white"),
];

pub(crate) struct SketchPanel {
    points: Vec<(f64, f64, usize)>,
    cursor: (f64, f64),
    color_idx: usize,
    brush: u8,
}

impl SketchPanel {
    pub(crate) fn new() -> Self {
        Self {
            points: Vec::new(),
            cursor: (WIDTH / 2.0, HEIGHT / 2.0),
            color_idx: 0,
            brush: 1,
        }
    }

    pub(crate) fn point_count(&self) -> usize {
        self.points.len()
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Option<PanelFeedback> {
        match key.code {
            KeyCode::Left => self.move_cursor(-1.0, 0.0),
            KeyCode::Right => self.move_cursor(1.0, 0.0),
            KeyCode::Up => self.move_cursor(0.0, 1.0),
            KeyCode::Down => self.move_cursor(0.0, -1.0),
            KeyCode::Char(' ') => {
                self.plot();
                return None;
            }
            KeyCode::Char('c') => {
                self.color_idx = (self.color_idx + 1) % PALETTE.len();
                return PanelFeedback::info(format!("Color: {}", PALETTE[self.color_idx].1));
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.brush = (self.brush + 1).min(5);
                return PanelFeedback::info(format!("Brush size: {}", self.brush));
            }
            KeyCode::Char('-') => {
                self.brush = self.brush.saturating_sub(1).max(1);
                return PanelFeedback::info(format!("Brush size: {}", self.brush));
            }
            KeyCode::Char('x') => {
                self.points.clear();
                return PanelFeedback::info(STATUS_SKETCH_CLEARED);
            }
            _ => {}
        }
        None
    }

    fn move_cursor(&mut self, dx: f64, dy: f64) {
        self.cursor.0 = (self.cursor.0 + dx).clamp(0.0, WIDTH);
        self.cursor.1 = (self.cursor.1 + dy).clamp(0.0, HEIGHT);
    }

    /// Stamp a brush-sized square of points at the cursor.
    fn plot(&mut self) {
        let radius = f64::from(self.brush - 1) / 2.0;
        let mut dx = -radius;
        while dx <= radius {
            let mut dy = -radius;
            while dy <= radius {
                self.points.push((
                    (self.cursor.0 + dx).clamp(0.0, WIDTH),
                    (self.cursor.1 + dy).clamp(0.0, HEIGHT),
                    self.color_idx,
                ));
                dy += 1.0;
            }
            dx += 1.0;
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        let toolbar = Line::from(vec![
            Span::raw("arrows move • Space plot • c color • +/- brush • x clear   "),
            Span::styled("●", Style::default().fg(PALETTE[self.color_idx].0)),
            Span::raw(format!(" {} size {}", PALETTE[self.color_idx].1, self.brush)),
        ]);
        f.render_widget(Paragraph::new(toolbar), chunks[0]);

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Sketch Pad"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, WIDTH])
            .y_bounds([0.0, HEIGHT])
            .paint(|ctx| {
                for (idx, (color, _)) in PALETTE.iter().enumerate() {
                    let coords: Vec<(f64, f64)> = self
                        .points
                        .iter()
                        .filter(|(_, _, c)| *c == idx)
                        .map(|(x, y, _)| (*x, *y))
                        .collect();
                    if !coords.is_empty() {
                        ctx.draw(&Points {
                            coords: &coords,
                            color: *color,
                        });
                    }
                }
                // Cursor crosshair on top of the drawing.
                ctx.draw(&Points {
                    coords: &[self.cursor],
                    color: Color::Red,
                });
            });
        f.render_widget(canvas, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(panel: &mut SketchPanel, code: KeyCode) -> Option<PanelFeedback> {
        panel.on_key(KeyEvent::from(code))
    }

    #[test]
    fn plotting_adds_brush_sized_stamps() {
        let mut panel = SketchPanel::new();
        press(&mut panel, KeyCode::Char(' '));
        assert_eq!(panel.point_count(), 1);

        press(&mut panel, KeyCode::Char('+'));
        press(&mut panel, KeyCode::Char(' '));
        assert!(panel.point_count() > 1);
    }

    #[test]
    fn cursor_stays_within_bounds() {
        let mut panel = SketchPanel::new();
        for _ in 0..500 {
            press(&mut panel, KeyCode::Left);
        }
        assert_eq!(panel.cursor.0, 0.0);
        for _ in 0..500 {
            press(&mut panel, KeyCode::Up);
        }
        assert_eq!(panel.cursor.1, HEIGHT);
    }

    #[test]
    fn clear_discards_all_points() {
        let mut panel = SketchPanel::new();
        press(&mut panel, KeyCode::Char(' '));
        press(&mut panel, KeyCode::Char('x'));
        assert_eq!(panel.point_count(), 0);
    }

    #[test]
    fn brush_size_is_clamped() {
        let mut panel = SketchPanel::new();
        for _ in 0..10 {
            press(&mut panel, KeyCode::Char('+'));
        }
        assert_eq!(panel.brush, 5);
        for _ in 0..10 {
            press(&mut panel, KeyCode::Char('-'));
        }
        assert_eq!(panel.brush, 1);
    }
}
