use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use demodeck_core::registry::{DemoId, DEMOS};
use demodeck_core::shell::ActivePanel;

use crate::telemetry::Event;
use crate::tui::constants::{
    STATUS_HELP, STATUS_PROCESSING_STARTED, STATUS_QUEUE_CLEARED, STATUS_WENT_HOME,
};

use super::{App, InputMode, PanelFeedback};

/// Keys handled before the active panel sees the event.
#[derive(Debug, Clone, Copy)]
enum GlobalAction {
    Quit,
    ShowHelp,
    GoHome,
    NextPanel,
    PrevPanel,
    OpenDemo(DemoId),
}

impl GlobalAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Self::ShowHelp),
            KeyCode::Esc | KeyCode::Char('0') => Some(Self::GoHome),
            KeyCode::Tab => Some(Self::NextPanel),
            KeyCode::BackTab => Some(Self::PrevPanel),
            KeyCode::Char(digit @ '1'..='5') => {
                let index = digit as usize - '1' as usize;
                Some(Self::OpenDemo(DEMOS[index].id))
            }
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Help => self.handle_help_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = GlobalAction::from_event(&key) {
            self.execute_global_action(action);
            return;
        }

        match self.shell.active() {
            ActivePanel::Home => self.handle_home_keys(key),
            ActivePanel::Demo(id) => self.forward_to_panel(id, key),
        }
    }

    fn execute_global_action(&mut self, action: GlobalAction) {
        match action {
            GlobalAction::Quit => self.should_quit = true,
            GlobalAction::ShowHelp => {
                self.input_mode = InputMode::Help;
                self.set_status_info(STATUS_HELP);
            }
            GlobalAction::GoHome => {
                self.go_home();
                self.set_status_info(STATUS_WENT_HOME);
            }
            GlobalAction::NextPanel => self.next_panel(),
            GlobalAction::PrevPanel => self.prev_panel(),
            GlobalAction::OpenDemo(id) => self.open_demo(id),
        }
    }

    fn handle_home_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.home_selected = (self.home_selected + 1).min(DEMOS.len() - 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.home_selected = self.home_selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                self.open_demo(DEMOS[self.home_selected].id);
            }
            _ => {}
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('h')) {
            self.input_mode = InputMode::Normal;
            self.status = None;
        }
    }

    fn forward_to_panel(&mut self, id: DemoId, key: KeyEvent) {
        let feedback = match id {
            DemoId::BackgroundTasks => {
                let before = self.tasks.item_count();
                let feedback = self.tasks.on_key(key);
                let enqueued = self.tasks.item_count().saturating_sub(before);
                if enqueued > 0 {
                    self.telemetry.record(Event::BatchEnqueued(enqueued));
                }
                if let Some(PanelFeedback::Info(text)) = &feedback {
                    if text == STATUS_PROCESSING_STARTED {
                        self.telemetry.record(Event::ProcessingStarted);
                    } else if text == STATUS_QUEUE_CLEARED {
                        self.telemetry.record(Event::QueueCleared);
                    }
                }
                feedback
            }
            DemoId::Sketch => self.sketch.on_key(key),
            DemoId::Location => self.location.on_key(key),
            DemoId::Viewport => self.viewport.on_key(key),
            DemoId::Network => self.network.on_key(key),
        };

        if let Some(feedback) = feedback {
            self.apply_feedback(id, feedback);
        }
    }
}
