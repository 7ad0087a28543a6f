//! Scheduling primitives consumed by the idle task queue.
//!
//! The queue never talks to the clock directly: it requests future idle
//! slices and one-shot timers through [`IdleScheduler`] and reacts to the
//! wakeups the host delivers on [`IdleScheduler::poll`]. All wakeups are
//! serialized onto the single thread that polls, so the queue needs no
//! locking.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Handle for a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Budget descriptor handed to the queue when an idle slice is granted.
///
/// `did_timeout` mirrors the forced-run flag of the underlying primitive:
/// the grant happened because the requested maximum wait elapsed, not
/// because idle time was actually available.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    budget: Duration,
    did_timeout: bool,
}

impl Deadline {
    pub fn new(budget: Duration, did_timeout: bool) -> Self {
        Self {
            budget,
            did_timeout,
        }
    }

    pub fn time_remaining(&self) -> Duration {
        self.budget
    }

    pub fn did_timeout(&self) -> bool {
        self.did_timeout
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Wakeup {
    /// An idle slice was granted.
    Slice(Deadline),
    /// A one-shot timer elapsed.
    Timer(TimerId),
}

pub trait IdleScheduler {
    /// Ask for a future slice of idle time. The grant is forced once
    /// `max_wait` has elapsed without one.
    fn request_slice(&mut self, max_wait: Duration);

    /// Arm a one-shot timer.
    fn after(&mut self, delay: Duration) -> TimerId;

    /// Collect wakeups that have come due since the last poll.
    fn poll(&mut self) -> Vec<Wakeup>;
}

/// Wall-clock scheduler driven by the surface tick loop.
///
/// Ticks fire when the event loop is otherwise idle, so the next poll after
/// a request is treated as an idle slice with a fixed budget.
#[derive(Debug)]
pub struct HostScheduler {
    slice_budget: Duration,
    pending_slice: Option<SliceRequest>,
    timers: Vec<ArmedTimer>,
    next_timer: u64,
}

#[derive(Debug, Clone, Copy)]
struct SliceRequest {
    requested_at: Instant,
    max_wait: Duration,
}

#[derive(Debug, Clone, Copy)]
struct ArmedTimer {
    id: TimerId,
    due: Instant,
}

impl HostScheduler {
    pub const DEFAULT_SLICE_BUDGET: Duration = Duration::from_millis(50);

    pub fn new(slice_budget: Duration) -> Self {
        Self {
            slice_budget,
            pending_slice: None,
            timers: Vec::new(),
            next_timer: 0,
        }
    }
}

impl Default for HostScheduler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SLICE_BUDGET)
    }
}

impl IdleScheduler for HostScheduler {
    fn request_slice(&mut self, max_wait: Duration) {
        // At most one outstanding request; a re-request resets the wait.
        self.pending_slice = Some(SliceRequest {
            requested_at: Instant::now(),
            max_wait,
        });
    }

    fn after(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push(ArmedTimer {
            id,
            due: Instant::now() + delay,
        });
        id
    }

    fn poll(&mut self) -> Vec<Wakeup> {
        let now = Instant::now();
        let mut wakeups = Vec::new();

        let mut due: Vec<ArmedTimer> = Vec::new();
        self.timers.retain(|timer| {
            if timer.due <= now {
                due.push(*timer);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|timer| timer.due);
        wakeups.extend(due.into_iter().map(|timer| Wakeup::Timer(timer.id)));

        if let Some(request) = self.pending_slice.take() {
            let waited = now.saturating_duration_since(request.requested_at);
            wakeups.push(Wakeup::Slice(Deadline::new(
                self.slice_budget,
                waited >= request.max_wait,
            )));
        }

        wakeups
    }
}

/// Deterministic scheduler for tests and headless simulation. Nothing comes
/// due on its own; slices are granted and timers fired explicitly.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending_slices: usize,
    armed: VecDeque<TimerId>,
    ready: VecDeque<Wakeup>,
    next_timer: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant one requested slice with the given budget.
    pub fn grant_slice(&mut self, budget: Duration) -> bool {
        self.grant(budget, false)
    }

    /// Grant one requested slice as a forced run (maximum wait exceeded).
    pub fn grant_forced(&mut self, budget: Duration) -> bool {
        self.grant(budget, true)
    }

    fn grant(&mut self, budget: Duration, did_timeout: bool) -> bool {
        if self.pending_slices == 0 {
            return false;
        }
        self.pending_slices -= 1;
        self.ready
            .push_back(Wakeup::Slice(Deadline::new(budget, did_timeout)));
        true
    }

    /// Fire the oldest armed timer.
    pub fn fire_next_timer(&mut self) -> bool {
        match self.armed.pop_front() {
            Some(id) => {
                self.ready.push_back(Wakeup::Timer(id));
                true
            }
            None => false,
        }
    }

    /// Fire every armed timer in arming order, returning how many fired.
    pub fn fire_all_timers(&mut self) -> usize {
        let mut fired = 0;
        while self.fire_next_timer() {
            fired += 1;
        }
        fired
    }

    pub fn pending_slices(&self) -> usize {
        self.pending_slices
    }

    pub fn armed_timers(&self) -> usize {
        self.armed.len()
    }
}

impl IdleScheduler for ManualScheduler {
    fn request_slice(&mut self, _max_wait: Duration) {
        self.pending_slices += 1;
    }

    fn after(&mut self, _delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.armed.push_back(id);
        id
    }

    fn poll(&mut self) -> Vec<Wakeup> {
        self.ready.drain(..).collect()
    }
}
