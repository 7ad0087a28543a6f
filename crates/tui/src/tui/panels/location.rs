//! Location panel: one-shot fixes and continuous watch from the
//! simulated position receiver.

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent};
use demodeck_core::sensors::{GeoFix, GeoSimulator};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::tui::constants::{STATUS_WATCH_STARTED, STATUS_WATCH_STOPPED};
use crate::tui::helpers::{accent_title, format_coordinate, format_time, BG_PANEL};

use super::PanelFeedback;

const HISTORY_CAP: usize = 10;
// A watch fix lands every 20 ticks of the 100ms tick loop.
const WATCH_INTERVAL_TICKS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FixKind {
    Single,
    Watch,
}

#[derive(Debug, Clone, Copy)]
struct HistoryEntry {
    fix: GeoFix,
    kind: FixKind,
}

pub(crate) struct LocationPanel {
    receiver: GeoSimulator,
    current: Option<GeoFix>,
    last_error: Option<String>,
    history: VecDeque<HistoryEntry>,
    watching: bool,
    ticks_since_fix: u32,
}

impl LocationPanel {
    pub(crate) fn new(seed: Option<u64>) -> Self {
        Self {
            receiver: GeoSimulator::new(seed),
            current: None,
            last_error: None,
            history: VecDeque::new(),
            watching: false,
            ticks_since_fix: 0,
        }
    }

    pub(crate) fn watching(&self) -> bool {
        self.watching
    }

    pub(crate) fn history_len(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn on_tick(&mut self) {
        if !self.watching {
            return;
        }
        self.ticks_since_fix += 1;
        if self.ticks_since_fix >= WATCH_INTERVAL_TICKS {
            self.ticks_since_fix = 0;
            self.take_fix(FixKind::Watch);
        }
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Option<PanelFeedback> {
        match key.code {
            KeyCode::Char('g') => {
                self.take_fix(FixKind::Single);
                match &self.last_error {
                    Some(message) => PanelFeedback::error(message.clone()),
                    None => PanelFeedback::info("Got a position fix"),
                }
            }
            KeyCode::Char('w') => {
                if self.watching {
                    self.watching = false;
                    PanelFeedback::info(STATUS_WATCH_STOPPED)
                } else {
                    self.watching = true;
                    self.ticks_since_fix = WATCH_INTERVAL_TICKS;
                    PanelFeedback::info(STATUS_WATCH_STARTED)
                }
            }
            KeyCode::Char('p') => {
                self.receiver.toggle_denied();
                if self.receiver.denied() {
                    PanelFeedback::info("Location access revoked")
                } else {
                    PanelFeedback::info("Location access granted")
                }
            }
            KeyCode::Char('x') => {
                self.history.clear();
                PanelFeedback::info("Cleared position history")
            }
            _ => None,
        }
    }

    fn take_fix(&mut self, kind: FixKind) {
        match self.receiver.sample() {
            Ok(fix) => {
                self.current = Some(fix);
                self.last_error = None;
                self.history.push_front(HistoryEntry { fix, kind });
                self.history.truncate(HISTORY_CAP);
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                // A denial ends the watch, like a revoked grant would.
                self.watching = false;
            }
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(3)])
            .split(area);

        self.draw_current(f, chunks[0]);
        self.draw_history(f, chunks[1]);
    }

    fn draw_current(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        if let Some(error) = &self.last_error {
            lines.push(Line::from(Span::styled(
                format!("⚠ {error}"),
                Style::default().fg(Color::Red),
            )));
        }
        match &self.current {
            Some(fix) => {
                lines.push(Line::from(vec![
                    Span::raw("Latitude:  "),
                    Span::styled(
                        format_coordinate(fix.latitude),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.push(Line::from(vec![
                    Span::raw("Longitude: "),
                    Span::styled(
                        format_coordinate(fix.longitude),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.push(Line::from(format!(
                    "Accuracy:  ±{:.0} m at {}",
                    fix.accuracy_m,
                    format_time(&fix.timestamp)
                )));
            }
            None => lines.push(Line::from(Span::styled(
                "No fix yet. Press 'g' for a single fix or 'w' to watch.",
                Style::default().fg(Color::DarkGray),
            ))),
        }
        let watch_state = if self.watching {
            Span::styled("● watching", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ not watching", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(vec![
            watch_state,
            Span::raw("   g fix • w watch • p permission • x clear"),
        ]));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Current Position"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_history(&self, f: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .history
            .iter()
            .map(|entry| {
                let badge = match entry.kind {
                    FixKind::Single => Span::styled("one-shot", Style::default().fg(Color::Cyan)),
                    FixKind::Watch => Span::styled("watch   ", Style::default().fg(Color::Green)),
                };
                ListItem::new(Line::from(vec![
                    badge,
                    Span::raw(format!(
                        "  {}  {}, {}",
                        format_time(&entry.fix.timestamp),
                        format_coordinate(entry.fix.latitude),
                        format_coordinate(entry.fix.longitude),
                    )),
                ]))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&format!(
                "History ({}/{})",
                self.history.len(),
                HISTORY_CAP
            )))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        if items.is_empty() {
            f.render_widget(
                Paragraph::new(Span::styled(
                    "No fixes recorded yet.",
                    Style::default().fg(Color::DarkGray),
                ))
                .block(block),
                area,
            );
        } else {
            f.render_widget(List::new(items).block(block), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(panel: &mut LocationPanel, code: KeyCode) -> Option<PanelFeedback> {
        panel.on_key(KeyEvent::from(code))
    }

    #[test]
    fn single_fix_lands_in_history() {
        let mut panel = LocationPanel::new(Some(7));
        press(&mut panel, KeyCode::Char('g'));
        assert_eq!(panel.history_len(), 1);
        assert!(panel.current.is_some());
    }

    #[test]
    fn watch_samples_on_an_interval() {
        let mut panel = LocationPanel::new(Some(7));
        press(&mut panel, KeyCode::Char('w'));
        assert!(panel.watching());

        // The first fix arrives on the very next tick.
        panel.on_tick();
        assert_eq!(panel.history_len(), 1);

        for _ in 0..WATCH_INTERVAL_TICKS {
            panel.on_tick();
        }
        assert_eq!(panel.history_len(), 2);
    }

    #[test]
    fn denial_surfaces_the_receiver_message_and_stops_the_watch() {
        let mut panel = LocationPanel::new(Some(7));
        press(&mut panel, KeyCode::Char('w'));
        press(&mut panel, KeyCode::Char('p'));
        let feedback = press(&mut panel, KeyCode::Char('g'));
        assert_eq!(
            feedback,
            PanelFeedback::error("User denied the request for location access")
        );
        assert!(!panel.watching());
    }

    #[test]
    fn history_is_capped() {
        let mut panel = LocationPanel::new(Some(7));
        for _ in 0..(HISTORY_CAP + 5) {
            press(&mut panel, KeyCode::Char('g'));
        }
        assert_eq!(panel.history_len(), HISTORY_CAP);
    }

    #[test]
    fn clear_empties_history_but_keeps_current() {
        let mut panel = LocationPanel::new(Some(7));
        press(&mut panel, KeyCode::Char('g'));
        press(&mut panel, KeyCode::Char('x'));
        assert_eq!(panel.history_len(), 0);
        assert!(panel.current.is_some());
    }
}
