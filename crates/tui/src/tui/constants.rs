use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(100);

pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
pub(crate) const STATUS_WENT_HOME: &str = "Back on the landing view";
pub(crate) const STATUS_QUEUE_CLEARED: &str = "Cleared the task queue";
pub(crate) const STATUS_ALREADY_RUNNING: &str = "Already processing";
pub(crate) const STATUS_NOTHING_QUEUED: &str = "Nothing queued — add tasks first";
pub(crate) const STATUS_PROCESSING_STARTED: &str = "Processing during idle slices…";
pub(crate) const STATUS_WATCH_STARTED: &str = "Watching position — fixes arrive continuously";
pub(crate) const STATUS_WATCH_STOPPED: &str = "Stopped watching position";
pub(crate) const STATUS_SKETCH_CLEARED: &str = "Cleared the sketch pad";
