//! Background Tasks panel: a producer/scheduler view over the idle queue.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::queue::{IdleQueue, WorkStatus};
use crate::sched::HostScheduler;
use crate::tui::constants::{
    STATUS_ALREADY_RUNNING, STATUS_NOTHING_QUEUED, STATUS_PROCESSING_STARTED,
    STATUS_QUEUE_CLEARED,
};
use crate::tui::helpers::{accent_title, BG_PANEL};

use super::PanelFeedback;

pub(crate) struct TasksPanel {
    queue: IdleQueue<HostScheduler>,
}

impl TasksPanel {
    pub(crate) fn new(seed: Option<u64>) -> Self {
        Self {
            queue: IdleQueue::new(HostScheduler::default(), seed),
        }
    }

    pub(crate) fn on_tick(&mut self) {
        self.queue.pump();
    }

    pub(crate) fn item_count(&self) -> usize {
        self.queue.items().len()
    }

    pub(crate) fn completed(&self) -> u64 {
        self.queue.counters().completed
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Option<PanelFeedback> {
        match key.code {
            KeyCode::Char('a') => {
                let count = self.queue.enqueue_batch();
                PanelFeedback::info(format!("Enqueued {} background tasks", count))
            }
            KeyCode::Char('s') => {
                if self.queue.start_processing() {
                    PanelFeedback::info(STATUS_PROCESSING_STARTED)
                } else if self.queue.is_running() {
                    PanelFeedback::info(STATUS_ALREADY_RUNNING)
                } else {
                    PanelFeedback::info(STATUS_NOTHING_QUEUED)
                }
            }
            KeyCode::Char('c') => {
                self.queue.clear();
                PanelFeedback::info(STATUS_QUEUE_CLEARED)
            }
            _ => None,
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(area);

        self.draw_controls(f, chunks[0]);
        self.draw_progress(f, chunks[1]);
        self.draw_items(f, chunks[2]);
    }

    fn draw_controls(&self, f: &mut Frame<'_>, area: Rect) {
        let state = if self.queue.is_running() {
            Span::styled(
                "⏳ processing",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else if self.queue.queued() > 0 {
            Span::styled("⏸ idle — press 's' to start", Style::default().fg(Color::Cyan))
        } else {
            Span::styled("○ empty", Style::default().fg(Color::DarkGray))
        };

        let line = Line::from(vec![
            Span::raw("a add batch  •  s start  •  c clear    "),
            state,
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Idle Task Queue"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), inner);
    }

    fn draw_progress(&self, f: &mut Frame<'_>, area: Rect) {
        let counters = self.queue.counters();
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Progress"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .gauge_style(Style::default().fg(Color::Green).bg(BG_PANEL))
            .percent(self.queue.progress_percent())
            .label(format!(
                "{} / {} completed",
                counters.completed, counters.enqueued
            ));
        f.render_widget(gauge, area);
    }

    fn draw_items(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Tasks"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));

        if self.queue.items().is_empty() {
            let inner = block.inner(area);
            f.render_widget(block, area);
            let empty = Paragraph::new(
                "No tasks in queue. Press 'a' to create some background tasks.",
            )
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .alignment(ratatui::layout::Alignment::Center);
            f.render_widget(empty, inner);
            return;
        }

        let items: Vec<ListItem> = self
            .queue
            .items()
            .iter()
            .map(|item| {
                let (badge, style) = match item.status {
                    WorkStatus::Completed => ("✓ Done", Style::default().fg(Color::Green)),
                    WorkStatus::Processing => ("⏳ Processing", Style::default().fg(Color::Yellow)),
                    WorkStatus::Queued => ("⏸ Queued", Style::default().fg(Color::Gray)),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<14}", badge), style.add_modifier(Modifier::BOLD)),
                    Span::raw(item.label.clone()),
                ]))
            })
            .collect();

        f.render_widget(List::new(items).block(block), area);
    }
}
