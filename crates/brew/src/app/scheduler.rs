use std::fmt::Debug;
use std::time::Duration;

use tracing::debug;

#[derive(Debug, Clone)]
struct Deferred<A> {
    due: Duration,
    seq: u64,
    generation: u64,
    action: A,
}

/// Actions carry the generation current when scheduled. Starting a new
/// generation orphans everything pending: those actions are dropped, not fired.
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    now: Duration,
    generation: u64,
    next_seq: u64,
    pending: Vec<Deferred<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            generation: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<A: Debug> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn start_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn schedule(&mut self, delay: Duration, action: A) {
        let due = self.now.saturating_add(delay);
        debug!(
            action = ?action,
            delay_ms = delay.as_millis() as u64,
            generation = self.generation,
            "deferred_action_scheduled"
        );
        self.pending.push(Deferred {
            due,
            seq: self.next_seq,
            generation: self.generation,
            action,
        });
        self.next_seq = self.next_seq.wrapping_add(1);
    }

    pub fn deadline_after(&self, dt: Duration) -> Duration {
        self.now.saturating_add(dt)
    }

    pub fn pop_due(&mut self, deadline: Duration) -> Option<A> {
        loop {
            let index = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.due <= deadline)
                .min_by_key(|(_, entry)| (entry.due, entry.seq))
                .map(|(index, _)| index)?;
            let entry = self.pending.swap_remove(index);
            if entry.generation != self.generation {
                debug!(
                    action = ?entry.action,
                    scheduled_generation = entry.generation,
                    current_generation = self.generation,
                    "deferred_action_dropped_stale"
                );
                continue;
            }
            self.now = self.now.max(entry.due);
            return Some(entry.action);
        }
    }

    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}
