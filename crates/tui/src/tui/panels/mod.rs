pub(crate) mod location;
pub(crate) mod network;
pub(crate) mod sketch;
pub(crate) mod tasks;
pub(crate) mod viewport;

pub(crate) use location::LocationPanel;
pub(crate) use network::NetworkPanel;
pub(crate) use sketch::SketchPanel;
pub(crate) use tasks::TasksPanel;
pub(crate) use viewport::ViewportPanel;

/// Message a panel hands back after a key press, surfaced on the status
/// line by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PanelFeedback {
    Info(String),
    Error(String),
}

impl PanelFeedback {
    pub(crate) fn info<T: Into<String>>(text: T) -> Option<Self> {
        Some(PanelFeedback::Info(text.into()))
    }

    pub(crate) fn error<T: Into<String>>(text: T) -> Option<Self> {
        Some(PanelFeedback::Error(text.into()))
    }
}
