//! The idle task queue behind the Background Tasks panel.
//!
//! A producer appends batches of simulated work items, a scheduler claims
//! idle time slices to move items into `Processing`, and a one-shot timer
//! per item finalizes it after a randomized simulated duration. Items are
//! claimed in strict FIFO insertion order and never revisited once
//! `Completed`.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::sched::{Deadline, IdleScheduler, TimerId, Wakeup};

pub const BATCH_MIN: usize = 3;
pub const BATCH_MAX: usize = 7;
pub const WORK_MIN: Duration = Duration::from_millis(500);
pub const WORK_MAX: Duration = Duration::from_millis(1500);
/// Bound on how long a slice request may sit ungranted before it is forced.
pub const MAX_SLICE_WAIT: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    Queued,
    Processing,
    Completed,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::Queued => "queued",
            WorkStatus::Processing => "processing",
            WorkStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkItem {
    /// Monotonic and unique for the queue's lifetime; never reused, even
    /// across [`IdleQueue::clear`].
    pub id: u64,
    pub label: String,
    pub status: WorkStatus,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct QueueCounters {
    pub enqueued: u64,
    pub completed: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingCompletion {
    timer: TimerId,
    item: u64,
    generation: u32,
}

#[derive(Debug)]
pub struct IdleQueue<S: IdleScheduler> {
    scheduler: S,
    rng: StdRng,
    items: Vec<WorkItem>,
    counters: QueueCounters,
    pending: Vec<PendingCompletion>,
    next_id: u64,
    generation: u32,
    running: bool,
}

impl<S: IdleScheduler> IdleQueue<S> {
    pub fn new(scheduler: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            scheduler,
            rng,
            items: Vec::new(),
            counters: QueueCounters::default(),
            pending: Vec::new(),
            next_id: 0,
            generation: 0,
            running: false,
        }
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn counters(&self) -> QueueCounters {
        self.counters
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn queued(&self) -> usize {
        self.count_with(WorkStatus::Queued)
    }

    pub fn processing(&self) -> usize {
        self.count_with(WorkStatus::Processing)
    }

    /// Completion ratio in percent, 0 when nothing was ever enqueued.
    pub fn progress_percent(&self) -> u16 {
        if self.counters.enqueued == 0 {
            0
        } else {
            ((self.counters.completed * 100) / self.counters.enqueued) as u16
        }
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Append a randomized batch (3–7) of queued items, returning its size.
    pub fn enqueue_batch(&mut self) -> usize {
        let count = self.rng.gen_range(BATCH_MIN..=BATCH_MAX);
        for _ in 0..count {
            let id = self.next_id;
            self.next_id += 1;
            self.items.push(WorkItem {
                id,
                label: format!("Task {}", id),
                status: WorkStatus::Queued,
            });
        }
        self.counters.enqueued += count as u64;
        count
    }

    /// Begin claiming idle slices. No-op while already running or when
    /// nothing is queued; returns whether processing started.
    pub fn start_processing(&mut self) -> bool {
        if self.running || self.queued() == 0 {
            return false;
        }
        self.running = true;
        self.scheduler.request_slice(MAX_SLICE_WAIT);
        true
    }

    /// Discard all items and reset both counters. In-flight completion
    /// timers cannot be retracted; dropping their pending entries makes
    /// them no-ops when they fire, and the generation bump guards any
    /// wakeup already in transit.
    pub fn clear(&mut self) {
        self.items.clear();
        self.pending.clear();
        self.counters = QueueCounters::default();
        self.running = false;
        self.generation += 1;
    }

    /// Drain scheduler wakeups and apply them. Called from the host's tick.
    pub fn pump(&mut self) {
        for wakeup in self.scheduler.poll() {
            match wakeup {
                Wakeup::Slice(deadline) => self.on_slice(deadline),
                Wakeup::Timer(timer) => self.on_completion(timer),
            }
        }
    }

    fn on_slice(&mut self, deadline: Deadline) {
        if !self.running {
            // The queue was cleared between the request and the grant.
            return;
        }

        let mut remaining = deadline.time_remaining();
        while (remaining > Duration::ZERO || deadline.did_timeout()) && self.claim_next(&mut remaining) {}

        if self.queued() > 0 {
            self.scheduler.request_slice(MAX_SLICE_WAIT);
        } else {
            self.running = false;
        }
    }

    /// Claim the first queued item, charging its simulated duration against
    /// the slice budget. Returns false once no queued item remains.
    fn claim_next(&mut self, remaining: &mut Duration) -> bool {
        let Some(idx) = self
            .items
            .iter()
            .position(|item| item.status == WorkStatus::Queued)
        else {
            return false;
        };

        let duration = self.random_work_duration();
        self.items[idx].status = WorkStatus::Processing;
        let timer = self.scheduler.after(duration);
        self.pending.push(PendingCompletion {
            timer,
            item: self.items[idx].id,
            generation: self.generation,
        });
        *remaining = remaining.saturating_sub(duration);
        true
    }

    fn on_completion(&mut self, timer: TimerId) {
        let Some(idx) = self.pending.iter().position(|p| p.timer == timer) else {
            return;
        };
        let pending = self.pending.swap_remove(idx);
        if pending.generation != self.generation {
            // Scheduled before a clear; must not touch the reset queue.
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == pending.item) {
            if item.status == WorkStatus::Processing {
                item.status = WorkStatus::Completed;
                self.counters.completed += 1;
            }
        }
    }

    fn random_work_duration(&mut self) -> Duration {
        let span = (WORK_MAX - WORK_MIN).as_millis() as u64;
        WORK_MIN + Duration::from_millis(self.rng.gen_range(0..=span))
    }

    fn count_with(&self, status: WorkStatus) -> usize {
        self.items
            .iter()
            .filter(|item| item.status == status)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::ManualScheduler;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Budget small enough that exactly one claim fits per slice.
    const NARROW: Duration = Duration::from_millis(1);
    const WIDE: Duration = Duration::from_secs(10);

    fn queue(seed: u64) -> IdleQueue<ManualScheduler> {
        IdleQueue::new(ManualScheduler::new(), Some(seed))
    }

    fn drain(queue: &mut IdleQueue<ManualScheduler>) {
        while queue.is_running() || queue.scheduler_mut().armed_timers() > 0 {
            queue.scheduler_mut().grant_forced(Duration::ZERO);
            queue.pump();
            queue.scheduler_mut().fire_all_timers();
            queue.pump();
        }
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(42)]
    #[case(1234)]
    fn batches_stay_within_bounds_and_count_toward_enqueued(#[case] seed: u64) {
        let mut queue = queue(seed);
        let mut total = 0;
        for _ in 0..4 {
            let batch = queue.enqueue_batch();
            assert!((BATCH_MIN..=BATCH_MAX).contains(&batch));
            total += batch;
        }
        assert_eq!(queue.counters().enqueued, total as u64);
        assert_eq!(queue.items().len(), total);
        assert!(queue
            .items()
            .iter()
            .all(|item| item.status == WorkStatus::Queued));
    }

    #[test]
    fn item_ids_are_unique_and_never_reused_across_clear() {
        let mut queue = queue(1);
        queue.enqueue_batch();
        let max_before = queue.items().iter().map(|i| i.id).max().unwrap();

        queue.clear();
        queue.enqueue_batch();
        let min_after = queue.items().iter().map(|i| i.id).min().unwrap();
        assert!(min_after > max_before);

        let mut ids: Vec<u64> = queue.items().iter().map(|i| i.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), queue.items().len());
    }

    #[test]
    fn start_processing_requires_queued_items() {
        let mut queue = queue(2);
        assert!(!queue.start_processing());
        assert_eq!(queue.scheduler_mut().pending_slices(), 0);

        queue.enqueue_batch();
        assert!(queue.start_processing());
        assert!(queue.is_running());
        assert_eq!(queue.scheduler_mut().pending_slices(), 1);
    }

    #[test]
    fn start_processing_is_idempotent_while_running() {
        let mut queue = queue(3);
        queue.enqueue_batch();
        assert!(queue.start_processing());
        assert!(!queue.start_processing());
        // No duplicate slice request for the same queued items.
        assert_eq!(queue.scheduler_mut().pending_slices(), 1);
    }

    #[test]
    fn narrow_slices_claim_one_item_in_fifo_order() {
        let mut queue = queue(4);
        let batch = queue.enqueue_batch();
        let order: Vec<u64> = queue.items().iter().map(|i| i.id).collect();
        queue.start_processing();

        for step in 0..batch {
            assert!(queue.scheduler_mut().grant_slice(NARROW));
            queue.pump();

            // The first `step + 1` items by insertion order are claimed,
            // the rest still queued: no overtaking.
            for (idx, item) in queue.items().iter().enumerate() {
                assert_eq!(item.id, order[idx]);
                if idx <= step {
                    assert_eq!(item.status, WorkStatus::Processing);
                } else {
                    assert_eq!(item.status, WorkStatus::Queued);
                }
            }
        }
        assert!(!queue.is_running());
    }

    #[test]
    fn wide_slice_claims_as_many_items_as_fit_the_budget() {
        let mut queue = queue(5);
        queue.enqueue_batch();
        queue.start_processing();

        queue.scheduler_mut().grant_slice(WIDE);
        queue.pump();

        // Every claim costs at most WORK_MAX, so a 10s budget covers a
        // whole batch of at most 7 items.
        assert_eq!(queue.queued(), 0);
        assert_eq!(queue.processing(), queue.items().len());
    }

    #[test]
    fn forced_slice_claims_everything_regardless_of_budget() {
        let mut queue = queue(6);
        queue.enqueue_batch();
        queue.start_processing();

        queue.scheduler_mut().grant_forced(Duration::ZERO);
        queue.pump();

        assert_eq!(queue.queued(), 0);
        assert!(!queue.is_running());
    }

    #[test]
    fn completions_move_processing_items_to_completed() {
        let mut queue = queue(7);
        let batch = queue.enqueue_batch();
        queue.start_processing();
        queue.scheduler_mut().grant_forced(Duration::ZERO);
        queue.pump();

        assert_eq!(queue.counters().completed, 0);
        queue.scheduler_mut().fire_all_timers();
        queue.pump();

        assert_eq!(queue.counters().completed, batch as u64);
        assert!(queue
            .items()
            .iter()
            .all(|item| item.status == WorkStatus::Completed));
    }

    #[test]
    fn full_drain_completes_every_item_without_skips() {
        let mut queue = queue(8);
        let mut expected = 0u64;
        for _ in 0..3 {
            expected += queue.enqueue_batch() as u64;
        }
        queue.start_processing();
        drain(&mut queue);

        let counters = queue.counters();
        assert_eq!(counters.enqueued, expected);
        assert_eq!(counters.completed, expected);
        assert_eq!(queue.progress_percent(), 100);
        assert!(!queue.is_running());
    }

    #[test]
    fn completed_never_exceeds_enqueued_mid_flight() {
        let mut queue = queue(9);
        queue.enqueue_batch();
        queue.start_processing();

        for _ in 0..16 {
            queue.scheduler_mut().grant_forced(Duration::ZERO);
            queue.pump();
            queue.scheduler_mut().fire_next_timer();
            queue.pump();
            let counters = queue.counters();
            assert!(counters.completed <= counters.enqueued);
        }
    }

    #[test]
    fn clear_resets_items_and_counters() {
        let mut queue = queue(10);
        queue.enqueue_batch();
        queue.start_processing();
        queue.scheduler_mut().grant_slice(NARROW);
        queue.pump();

        queue.clear();
        assert!(queue.items().is_empty());
        assert_eq!(queue.counters(), QueueCounters::default());
        assert!(!queue.is_running());
        assert_eq!(queue.progress_percent(), 0);
    }

    #[test]
    fn stale_completion_after_clear_does_not_touch_the_new_generation() {
        let mut queue = queue(11);
        queue.enqueue_batch();
        queue.start_processing();
        queue.scheduler_mut().grant_slice(NARROW);
        queue.pump();
        assert_eq!(queue.processing(), 1);

        // One completion timer is in flight when the queue is cleared.
        queue.clear();
        queue.enqueue_batch();

        queue.scheduler_mut().fire_all_timers();
        queue.pump();

        assert_eq!(queue.counters().completed, 0);
        assert!(queue
            .items()
            .iter()
            .all(|item| item.status == WorkStatus::Queued));
    }

    #[test]
    fn clear_drops_pending_completions_immediately() {
        let mut queue = queue(13);
        queue.enqueue_batch();
        queue.start_processing();
        queue.scheduler_mut().grant_slice(NARROW);
        queue.pump();
        assert_eq!(queue.pending.len(), 1);

        // The entry must not linger until its timer happens to fire.
        queue.clear();
        assert!(queue.pending.is_empty());

        queue.scheduler_mut().fire_all_timers();
        queue.pump();
        assert_eq!(queue.counters().completed, 0);
    }

    #[test]
    fn slice_granted_after_clear_is_ignored() {
        let mut queue = queue(12);
        queue.enqueue_batch();
        queue.start_processing();
        queue.clear();
        queue.enqueue_batch();

        // The pre-clear request is still pending; granting it must not
        // claim items of the new generation.
        queue.scheduler_mut().grant_forced(Duration::ZERO);
        queue.pump();
        assert_eq!(queue.processing(), 0);
    }

    #[test]
    fn seeded_queues_are_deterministic() {
        let mut a = queue(99);
        let mut b = queue(99);
        assert_eq!(a.enqueue_batch(), b.enqueue_batch());
        assert_eq!(a.enqueue_batch(), b.enqueue_batch());
    }
}
