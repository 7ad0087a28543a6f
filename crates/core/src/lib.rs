pub mod config;
pub mod queue;
pub mod registry;
pub mod sched;
pub mod sensors;
pub mod shell;

pub use config::AppConfig;
pub use queue::{IdleQueue, QueueCounters, WorkItem, WorkStatus};
pub use registry::{descriptor, DemoDescriptor, DemoId, DEMOS};
pub use sched::{Deadline, HostScheduler, IdleScheduler, ManualScheduler, TimerId, Wakeup};
pub use sensors::{CapabilityError, GeoSimulator, LinkSimulator};
pub use shell::{ActivePanel, Shell};
