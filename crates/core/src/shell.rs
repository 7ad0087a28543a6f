use crate::registry::{DemoId, DEMOS};

/// The single piece of navigation state: which view the shell renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    Home,
    Demo(DemoId),
}

impl ActivePanel {
    pub fn demo(&self) -> Option<DemoId> {
        match self {
            ActivePanel::Home => None,
            ActivePanel::Demo(id) => Some(*id),
        }
    }
}

/// Owns which panel is mounted. Selection is a pure state transition; the
/// surface re-renders synchronously after each call.
#[derive(Debug, Clone, Default)]
pub struct Shell {
    active: ActivePanel,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(panel: Option<DemoId>) -> Self {
        Self {
            active: match panel {
                Some(id) => ActivePanel::Demo(id),
                None => ActivePanel::Home,
            },
        }
    }

    pub fn active(&self) -> ActivePanel {
        self.active
    }

    pub fn select(&mut self, id: DemoId) {
        self.active = ActivePanel::Demo(id);
    }

    /// Resolve a textual identifier. `"home"` returns to the landing view;
    /// identifiers outside the registry are ignored.
    pub fn select_str(&mut self, identifier: &str) {
        if identifier.eq_ignore_ascii_case("home") {
            self.go_home();
        } else if let Ok(id) = identifier.parse::<DemoId>() {
            self.select(id);
        }
    }

    pub fn go_home(&mut self) {
        self.active = ActivePanel::Home;
    }

    /// Cycle forward through Home followed by the registry order.
    pub fn next(&mut self) {
        self.active = match self.active {
            ActivePanel::Home => ActivePanel::Demo(DEMOS[0].id),
            ActivePanel::Demo(id) => {
                let idx = DEMOS.iter().position(|d| d.id == id).unwrap_or(0);
                if idx + 1 < DEMOS.len() {
                    ActivePanel::Demo(DEMOS[idx + 1].id)
                } else {
                    ActivePanel::Home
                }
            }
        };
    }

    /// Cycle backward; the inverse of [`Shell::next`].
    pub fn prev(&mut self) {
        self.active = match self.active {
            ActivePanel::Home => ActivePanel::Demo(DEMOS[DEMOS.len() - 1].id),
            ActivePanel::Demo(id) => {
                let idx = DEMOS.iter().position(|d| d.id == id).unwrap_or(0);
                if idx == 0 {
                    ActivePanel::Home
                } else {
                    ActivePanel::Demo(DEMOS[idx - 1].id)
                }
            }
        };
    }
}
