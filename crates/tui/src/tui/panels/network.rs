//! Network panel: connection quality readings and the content mode
//! derived from them.

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent};
use demodeck_core::sensors::{ContentMode, EffectiveType, LinkReading, LinkSimulator};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::tui::helpers::{accent_title, format_time, BG_PANEL};

use super::PanelFeedback;

const HISTORY_CAP: usize = 10;
// A fresh reading lands every 30 ticks of the 100ms tick loop.
const SAMPLE_INTERVAL_TICKS: u32 = 30;

pub(crate) struct NetworkPanel {
    link: LinkSimulator,
    current: Option<LinkReading>,
    history: VecDeque<LinkReading>,
    ticks_since_sample: u32,
}

impl NetworkPanel {
    pub(crate) fn new(seed: Option<u64>) -> Self {
        let mut link = LinkSimulator::new(seed);
        let current = link.sample();
        Self {
            link,
            current: Some(current),
            history: VecDeque::new(),
            ticks_since_sample: 0,
        }
    }

    pub(crate) fn history_len(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn on_tick(&mut self) {
        self.ticks_since_sample += 1;
        if self.ticks_since_sample >= SAMPLE_INTERVAL_TICKS {
            self.ticks_since_sample = 0;
            let reading = self.link.sample();
            self.record(reading);
        }
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Option<PanelFeedback> {
        match key.code {
            KeyCode::Char('f') => {
                let reading = self.link.shift();
                let label = reading.effective_type.as_str();
                self.record(reading);
                PanelFeedback::info(format!("Connection shifted to {label}"))
            }
            KeyCode::Char('x') => {
                self.history.clear();
                PanelFeedback::info("Cleared connection history")
            }
            _ => None,
        }
    }

    /// Only tier changes enter the history; steady readings just refresh
    /// the current view.
    fn record(&mut self, reading: LinkReading) {
        let changed = self
            .current
            .map(|previous| previous.effective_type != reading.effective_type)
            .unwrap_or(true);
        if changed {
            self.history.push_front(reading);
            self.history.truncate(HISTORY_CAP);
        }
        self.current = Some(reading);
    }

    pub(crate) fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(3)])
            .split(area);

        self.draw_current(f, chunks[0]);
        self.draw_history(f, chunks[1]);
    }

    fn tier_color(effective: EffectiveType) -> Color {
        match effective {
            EffectiveType::Slow2g => Color::Red,
            EffectiveType::TwoG => Color::LightRed,
            EffectiveType::ThreeG => Color::Yellow,
            EffectiveType::FourG => Color::Green,
        }
    }

    fn draw_current(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        match &self.current {
            Some(reading) => {
                let mode = ContentMode::from(reading.effective_type);
                lines.push(Line::from(vec![
                    Span::raw("Effective type: "),
                    Span::styled(
                        reading.effective_type.as_str(),
                        Style::default()
                            .fg(Self::tier_color(reading.effective_type))
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.push(Line::from(format!(
                    "Downlink:       {:.2} Mbps",
                    reading.downlink_mbps
                )));
                lines.push(Line::from(format!("RTT:            {} ms", reading.rtt_ms)));
                lines.push(Line::from(format!(
                    "Save-data:      {}",
                    if reading.save_data { "on" } else { "off" }
                )));
                lines.push(Line::from(vec![
                    Span::raw("Content mode:   "),
                    Span::styled(mode.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                ]));
            }
            None => lines.push(Line::from("No reading yet.")),
        }
        lines.push(Line::from(Span::styled(
            "f force shift • x clear history",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Connection"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_history(&self, f: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .history
            .iter()
            .map(|reading| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}  ", format_time(&reading.timestamp))),
                    Span::styled(
                        format!("{:8}", reading.effective_type.as_str()),
                        Style::default().fg(Self::tier_color(reading.effective_type)),
                    ),
                    Span::raw(format!(
                        "{:.2} Mbps, {} ms",
                        reading.downlink_mbps, reading.rtt_ms
                    )),
                ]))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&format!(
                "Tier Changes ({}/{})",
                self.history.len(),
                HISTORY_CAP
            )))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        if items.is_empty() {
            f.render_widget(
                Paragraph::new(Span::styled(
                    "No tier changes observed yet.",
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

    fn press(panel: &mut NetworkPanel, code: KeyCode) -> Option<PanelFeedback> {
        panel.on_key(KeyEvent::from(code))
    }

    #[test]
    fn new_panel_has_a_reading_and_no_history() {
        let panel = NetworkPanel::new(Some(9));
        assert!(panel.current.is_some());
        assert_eq!(panel.history_len(), 0);
    }

    #[test]
    fn forced_shift_records_a_tier_change() {
        let mut panel = NetworkPanel::new(Some(9));
        let before = panel.current.map(|r| r.effective_type);
        press(&mut panel, KeyCode::Char('f'));
        let after = panel.current.map(|r| r.effective_type);
        assert_ne!(before, after);
        assert_eq!(panel.history_len(), 1);
    }

    #[test]
    fn steady_readings_do_not_grow_history() {
        let mut panel = NetworkPanel::new(Some(9));
        let reading = panel.current.unwrap();
        panel.record(reading);
        assert_eq!(panel.history_len(), 0);
    }

    #[test]
    fn history_is_capped() {
        let mut panel = NetworkPanel::new(Some(9));
        for _ in 0..(HISTORY_CAP + 5) {
            press(&mut panel, KeyCode::Char('f'));
        }
        assert_eq!(panel.history_len(), HISTORY_CAP);
    }

    #[test]
    fn clear_empties_history_only() {
        let mut panel = NetworkPanel::new(Some(9));
        press(&mut panel, KeyCode::Char('f'));
        press(&mut panel, KeyCode::Char('x'));
        assert_eq!(panel.history_len(), 0);
        assert!(panel.current.is_some());
    }
}
