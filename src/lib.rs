pub use demodeck_tui::cli;
pub use demodeck_tui::commands;
pub use demodeck_tui::config;
pub use demodeck_tui::telemetry;
pub use demodeck_tui::tui;
pub use demodeck_tui::AppConfig;

pub use demodeck_core as core;
pub use demodeck_core::queue;
pub use demodeck_core::registry;
pub use demodeck_core::sched;
pub use demodeck_core::sensors;
pub use demodeck_core::shell;
