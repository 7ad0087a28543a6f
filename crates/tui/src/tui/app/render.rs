use std::cmp::min;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use demodeck_core::registry::{descriptor, DemoId, DEMOS};
use demodeck_core::shell::ActivePanel;

use crate::tui::constants::APP_VERSION;
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, inset_rect, BG_ACCENT, BG_BASE, BG_PANEL,
    FG_ACCENT,
};

use super::{demo_index, App, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_tabs(f, chunks[1]);
        self.draw_body(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        if self.input_mode == InputMode::Help {
            self.draw_help_overlay(f, size);
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let current = match self.shell.active() {
            ActivePanel::Home => "Pick a demo to explore",
            ActivePanel::Demo(id) => descriptor(id).description,
        };
        let mut left_spans = vec![
            Span::styled(
                format!(" demodeck v{} 🧪 ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("— {}", current)),
        ];
        if let Some(seed) = self.config.seed() {
            left_spans.push(Span::raw("  "));
            left_spans.push(Span::styled(
                format!("🎲 seed {}", seed),
                Style::default().fg(Color::DarkGray),
            ));
        }

        f.render_widget(
            Paragraph::new(Line::from(left_spans)).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let right_line = Line::from(vec![
            Span::styled("⌨️ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "press h for help",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let right_para = Paragraph::new(right_line)
            .alignment(ratatui::layout::Alignment::Right)
            .style(Style::default().bg(BG_BASE));
        f.render_widget(right_para, cols[1]);
    }

    fn draw_tabs(&self, f: &mut Frame<'_>, area: Rect) {
        let mut titles: Vec<Line> = vec![Line::from("🏠 Home")];
        titles.extend(
            DEMOS
                .iter()
                .map(|demo| Line::from(format!("{} {}", demo.icon, demo.name))),
        );
        let selected = match self.shell.active() {
            ActivePanel::Home => 0,
            ActivePanel::Demo(id) => demo_index(id) + 1,
        };
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Demos"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn draw_body(&mut self, f: &mut Frame<'_>, area: Rect) {
        match self.shell.active() {
            ActivePanel::Home => self.draw_home(f, area),
            ActivePanel::Demo(id) => match id {
                DemoId::BackgroundTasks => self.tasks.draw(f, area),
                DemoId::Sketch => self.sketch.draw(f, area),
                DemoId::Location => self.location.draw(f, area),
                DemoId::Viewport => self.viewport.draw(f, area),
                DemoId::Network => self.network.draw(f, area),
            },
        }
    }

    fn draw_home(&self, f: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = DEMOS
            .iter()
            .map(|demo| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::raw(format!("{}  ", demo.icon)),
                        Span::styled(
                            demo.name,
                            Style::default()
                                .fg(FG_ACCENT)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("    {}", demo.description),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::default(),
                ])
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.home_selected));

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Web API Gallery"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(Style::default().bg(BG_ACCENT))
            .highlight_symbol("▶ ");

        let mut state_area = area;
        if area.width > 90 {
            state_area = centered_rect(90, area.height, area);
        }
        f.render_stateful_widget(list, state_area, &mut state);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => match self.shell.active() {
                ActivePanel::Home => {
                    "nav: j/k move | Enter open | 1-5 jump | Tab cycle | h help ❔ | q quit"
                }
                ActivePanel::Demo(id) => match id {
                    DemoId::BackgroundTasks => {
                        "a add tasks ✚ | s start ▶ | c clear 🗑️ | Esc home | Tab cycle | h help | q quit"
                    }
                    DemoId::Sketch => {
                        "arrows move | Space plot ✏️ | c color | +/- brush | x clear | Esc home | q quit"
                    }
                    DemoId::Location => {
                        "g fix 📍 | w watch | p permission | x clear | Esc home | Tab cycle | q quit"
                    }
                    DemoId::Viewport => {
                        "j/k scroll | t threshold 👁️ | Esc home | Tab cycle | h help | q quit"
                    }
                    DemoId::Network => {
                        "f force shift 📶 | x clear | Esc home | Tab cycle | h help | q quit"
                    }
                },
            },
            InputMode::Help => "Enter/Esc to close ❔",
        };

        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 100);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2)).max(10);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⌨️ Keyboard Reference"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(combo, Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::raw(desc),
                ])
            })
            .collect();

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let content = inset_rect(inner, 1);
        f.render_widget(Clear, inner);
        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            content,
        );
    }
}
