use std::collections::VecDeque;
use std::time::Instant;

struct Task<T> {
    due: Instant,
    epoch: u64,
    payload: T,
}

/// Deferred-task queue for the simulated reply delay.
///
/// Tasks carry the epoch they were scheduled under. `cancel_all` bumps the
/// epoch without touching the queue; stale tasks are discarded the next time
/// they would fire, so a task scheduled against a transcript that has since
/// been reset can never deliver into the new one.
pub struct Scheduler<T> {
    epoch: u64,
    tasks: VecDeque<Task<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            epoch: 0,
            tasks: VecDeque::new(),
        }
    }

    pub fn schedule(&mut self, due: Instant, payload: T) {
        self.tasks.push_back(Task {
            due,
            epoch: self.epoch,
            payload,
        });
    }

    /// Invalidate every outstanding task.
    pub fn cancel_all(&mut self) {
        self.epoch += 1;
    }

    /// Number of live (non-stale) tasks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| t.epoch == self.epoch).count()
    }

    /// Pop the next live task whose due time has passed, earliest due first
    /// (ties resolved by scheduling order). Stale tasks encountered along
    /// the way are dropped silently.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        self.tasks.retain(|t| t.epoch == self.epoch);

        let mut earliest: Option<(usize, Instant)> = None;
        for (idx, task) in self.tasks.iter().enumerate() {
            match earliest {
                Some((_, due)) if task.due >= due => {}
                _ => earliest = Some((idx, task.due)),
            }
        }

        match earliest {
            Some((idx, due)) if due <= now => self.tasks.remove(idx).map(|t| t.payload),
            _ => None,
        }
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn not_due_before_delay() {
        let mut sched = Scheduler::new();
        let t0 = Instant::now();
        sched.schedule(t0 + Duration::from_millis(100), "a");
        assert!(sched.pop_due(t0).is_none());
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn pops_in_submission_order_for_equal_delays() {
        let mut sched = Scheduler::new();
        let t0 = Instant::now();
        let due = t0 + Duration::from_millis(100);
        sched.schedule(due, "first");
        sched.schedule(due, "second");

        let later = t0 + Duration::from_millis(200);
        assert_eq!(sched.pop_due(later), Some("first"));
        assert_eq!(sched.pop_due(later), Some("second"));
        assert_eq!(sched.pop_due(later), None);
    }

    #[test]
    fn pops_earliest_due_first_for_mixed_delays() {
        let mut sched = Scheduler::new();
        let t0 = Instant::now();
        sched.schedule(t0 + Duration::from_millis(300), "slow");
        sched.schedule(t0 + Duration::from_millis(100), "fast");

        let later = t0 + Duration::from_millis(400);
        assert_eq!(sched.pop_due(later), Some("fast"));
        assert_eq!(sched.pop_due(later), Some("slow"));
    }

    #[test]
    fn cancel_all_discards_outstanding_tasks() {
        let mut sched = Scheduler::new();
        let t0 = Instant::now();
        sched.schedule(t0 + Duration::from_millis(100), "stale");
        sched.cancel_all();
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.pop_due(t0 + Duration::from_secs(10)), None);
    }

    #[test]
    fn tasks_scheduled_after_cancel_still_fire() {
        let mut sched = Scheduler::new();
        let t0 = Instant::now();
        sched.schedule(t0 + Duration::from_millis(100), "stale");
        sched.cancel_all();
        sched.schedule(t0 + Duration::from_millis(100), "live");

        let later = t0 + Duration::from_millis(200);
        assert_eq!(sched.pop_due(later), Some("live"));
        assert_eq!(sched.pop_due(later), None);
    }
}
