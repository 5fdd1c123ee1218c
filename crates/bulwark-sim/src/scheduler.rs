//! Delayed-call queue driven by the host clock.
//!
//! Entries are kept sorted by fire time; equal times fire in insertion order.
//! Every entry carries the epoch it was scheduled in. `cancel_all` bumps the
//! epoch, and entries from an older epoch are discarded instead of fired.

/// Deferred work the session performs when its time comes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Announcement over: start walking the wave's spawn entries.
    BeginSpawning,
    /// Release one enemy from the spawn directive under the cursor.
    SpawnFromEntry,
    /// A delay-only entry has elapsed: move the cursor on.
    AdvanceEntry,
    /// Inter-wave pause over: grant the bonus and announce the next wave.
    StartNextWave,
    /// Remove a transient notice.
    ExpireNotice { id: u32 },
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    fire_at_ms: f64,
    epoch: u64,
    action: ScheduledAction,
}

/// A due action popped from the queue, with its nominal fire time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DueAction {
    pub fire_at_ms: f64,
    pub action: ScheduledAction,
}

#[derive(Debug, Clone, Default)]
pub struct DelayedCalls {
    pending: Vec<Pending>,
    epoch: u64,
}

impl DelayedCalls {
    pub fn new(epoch: u64) -> Self {
        Self {
            pending: Vec::new(),
            epoch,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Schedule `action` to fire at `now_ms + delay_ms`.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, action: ScheduledAction) {
        let fire_at_ms = now_ms + delay_ms.max(0.0);
        let index = self.pending.partition_point(|p| p.fire_at_ms <= fire_at_ms);
        self.pending.insert(
            index,
            Pending {
                fire_at_ms,
                epoch: self.epoch,
                action,
            },
        );
    }

    /// Pop the earliest action due at `now_ms`, skipping cancelled entries.
    ///
    /// Call in a loop: handlers may schedule follow-ups that are already due.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<DueAction> {
        while let Some(first) = self.pending.first() {
            if first.fire_at_ms > now_ms {
                return None;
            }
            let entry = self.pending.remove(0);
            if entry.epoch == self.epoch {
                return Some(DueAction {
                    fire_at_ms: entry.fire_at_ms,
                    action: entry.action,
                });
            }
        }
        None
    }

    /// Invalidate everything scheduled so far. Stale entries are dropped
    /// lazily as they come due.
    pub fn cancel_all(&mut self) {
        self.epoch += 1;
    }

    /// Number of live (non-cancelled) entries.
    pub fn len(&self) -> usize {
        self.pending.iter().filter(|p| p.epoch == self.epoch).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fire time of the earliest live entry.
    pub fn next_due_ms(&self) -> Option<f64> {
        self.pending
            .iter()
            .find(|p| p.epoch == self.epoch)
            .map(|p| p.fire_at_ms)
    }
}
