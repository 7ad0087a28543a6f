//! Collects lightweight usage telemetry so panel tweaks can be validated during prototyping.

use parking_lot::Mutex;

#[derive(Debug, Clone)]
pub enum Event {
    AppStarted,
    PanelOpened(String),
    WentHome,
    BatchEnqueued(usize),
    ProcessingStarted,
    TaskCompleted { total: u64 },
    QueueCleared,
    CapabilityFailed { panel: String, error: String },
}

pub struct Handle {
    #[cfg(feature = "telemetry")]
    events: Mutex<Vec<Event>>,
}

impl Handle {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "telemetry")]
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn record(&self, event: Event) {
        #[cfg(feature = "telemetry")]
        {
            match &event {
                Event::AppStarted => tracing::debug!("telemetry app started"),
                Event::PanelOpened(panel) => {
                    tracing::debug!(panel = panel.as_str(), "telemetry panel opened")
                }
                Event::WentHome => tracing::debug!("telemetry returned home"),
                Event::BatchEnqueued(count) => {
                    tracing::debug!(count, "telemetry batch enqueued")
                }
                Event::ProcessingStarted => tracing::debug!("telemetry processing started"),
                Event::TaskCompleted { total } => {
                    tracing::debug!(total, "telemetry task completed")
                }
                Event::QueueCleared => tracing::debug!("telemetry queue cleared"),
                Event::CapabilityFailed { panel, error } => {
                    tracing::debug!(panel = panel.as_str(), error = %error, "telemetry capability failed")
                }
            }
            self.events.lock().push(event);
        }
        #[cfg(not(feature = "telemetry"))]
        {
            let _ = event;
        }
    }

    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        cfg!(feature = "telemetry")
    }

    #[cfg(test)]
    pub(crate) fn events_len(&self) -> usize {
        #[cfg(feature = "telemetry")]
        {
            self.events.lock().len()
        }
        #[cfg(not(feature = "telemetry"))]
        {
            0
        }
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_event_counts_when_enabled() {
        let handle = Handle::new();
        handle.record(Event::BatchEnqueued(4));
        if handle.is_enabled() {
            assert_eq!(handle.events_len(), 1);
        } else {
            assert_eq!(handle.events_len(), 0);
        }
    }
}
