use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};

use demodeck_core::registry::{DemoId, DEMOS};
use demodeck_core::shell::{ActivePanel, Shell};

use crate::config::AppConfig;
use crate::telemetry::{Event, Handle};

use super::panels::{
    LocationPanel, NetworkPanel, PanelFeedback, SketchPanel, TasksPanel, ViewportPanel,
};

mod input;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App {
    config: AppConfig,
    shell: Shell,
    tasks: TasksPanel,
    sketch: SketchPanel,
    location: LocationPanel,
    viewport: ViewportPanel,
    network: NetworkPanel,
    input_mode: InputMode,
    status: Option<StatusMessage>,
    home_selected: usize,
    completed_seen: u64,
    telemetry: Handle,
    should_quit: bool,
}

fn demo_index(id: DemoId) -> usize {
    DEMOS
        .iter()
        .position(|descriptor| descriptor.id == id)
        .unwrap_or(0)
}

impl App {
    pub(crate) fn new(config: AppConfig) -> Self {
        let seed = config.seed();
        let telemetry = Handle::new();
        telemetry.record(Event::AppStarted);

        let shell = Shell::with_start(config.start_panel());
        let mut app = Self {
            config,
            shell,
            tasks: TasksPanel::new(seed),
            sketch: SketchPanel::new(),
            location: LocationPanel::new(seed),
            viewport: ViewportPanel::new(),
            network: NetworkPanel::new(seed),
            input_mode: InputMode::Normal,
            status: None,
            home_selected: 0,
            completed_seen: 0,
            telemetry,
            should_quit: false,
        };

        if let ActivePanel::Demo(id) = app.shell.active() {
            app.home_selected = demo_index(id);
            app.telemetry
                .record(Event::PanelOpened(id.as_str().to_string()));
        }

        app
    }

    pub(crate) fn active(&self) -> ActivePanel {
        self.shell.active()
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > Duration::from_secs(5) {
                self.status = None;
            }
        }

        // Only the panel on screen advances; the others stay frozen
        // until reopened.
        match self.shell.active() {
            ActivePanel::Demo(DemoId::BackgroundTasks) => {
                self.tasks.on_tick();
                let completed = self.tasks.completed();
                if completed > self.completed_seen {
                    self.telemetry
                        .record(Event::TaskCompleted { total: completed });
                }
                self.completed_seen = completed;
            }
            ActivePanel::Demo(DemoId::Location) => self.location.on_tick(),
            ActivePanel::Demo(DemoId::Network) => self.network.on_tick(),
            _ => {}
        }
    }

    fn open_demo(&mut self, id: DemoId) {
        self.shell.select(id);
        self.home_selected = demo_index(id);
        self.telemetry
            .record(Event::PanelOpened(id.as_str().to_string()));
    }

    fn go_home(&mut self) {
        if self.shell.active().demo().is_some() {
            self.telemetry.record(Event::WentHome);
        }
        self.shell.go_home();
    }

    fn next_panel(&mut self) {
        self.shell.next();
        self.note_panel_change();
    }

    fn prev_panel(&mut self) {
        self.shell.prev();
        self.note_panel_change();
    }

    fn note_panel_change(&mut self) {
        match self.shell.active() {
            ActivePanel::Home => self.telemetry.record(Event::WentHome),
            ActivePanel::Demo(id) => {
                self.home_selected = demo_index(id);
                self.telemetry
                    .record(Event::PanelOpened(id.as_str().to_string()));
            }
        }
    }

    fn apply_feedback(&mut self, panel: DemoId, feedback: PanelFeedback) {
        match feedback {
            PanelFeedback::Info(text) => self.set_status_info(text),
            PanelFeedback::Error(text) => {
                self.telemetry.record(Event::CapabilityFailed {
                    panel: panel.as_str().to_string(),
                    error: text.clone(),
                });
                self.set_status_error(text);
            }
        }
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}
