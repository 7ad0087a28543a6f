pub mod cli;
pub mod commands;
pub mod config;
pub mod telemetry;
pub mod tui;

pub use demodeck_core as core;
pub use demodeck_core::queue;
pub use demodeck_core::registry;
pub use demodeck_core::sched;
pub use demodeck_core::sensors;
pub use demodeck_core::shell;

pub use demodeck_core::AppConfig;
