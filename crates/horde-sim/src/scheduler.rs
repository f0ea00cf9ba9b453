//! Tick scheduler for delayed actions.
//!
//! Every wait in the simulation (attack wind-up, cooldown, detonation fuse,
//! spawn cadence, inter-wave countdown) is a scheduled action keyed to the
//! simulation tick. The tick only advances while the session is running, so
//! pausing freezes every timer in place.
//!
//! Actions due on the same tick fire in the order they were scheduled.
//! A cancelled action is removed immediately and can never fire, even when
//! its due tick has already been reached.

use std::collections::{BTreeMap, HashMap};

use hecs::Entity;

use horde_core::types::TimerHandle;

/// Work the engine performs when a timer expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Attack wind-up finished; resolve the hit.
    AttackStrike(Entity),
    /// Attack cooldown finished; agent may swing again.
    AttackRecovered(Entity),
    /// Exploder fuse burned down.
    Detonate(Entity),
    /// Next step of the wave spawn sequence.
    SpawnNext,
    /// Inter-wave countdown finished.
    AdvanceWave,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    /// Keyed by (due tick, handle) so equal due ticks fire in FIFO order.
    queue: BTreeMap<(u64, u64), ScheduledAction>,
    due_by_handle: HashMap<TimerHandle, u64>,
    next_handle: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire `delay_ticks` after `now`.
    pub fn schedule(&mut self, now: u64, delay_ticks: u64, action: ScheduledAction) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let due = now.saturating_add(delay_ticks);
        self.queue.insert((due, handle.0), action);
        self.due_by_handle.insert(handle, due);
        handle
    }

    /// Cancel a pending action. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.due_by_handle.remove(&handle) {
            Some(due) => self.queue.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }

    /// Remove and return the earliest action due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(TimerHandle, ScheduledAction)> {
        let (&(due, id), _) = self.queue.first_key_value()?;
        if due > now {
            return None;
        }
        let action = self.queue.remove(&(due, id))?;
        let handle = TimerHandle(id);
        self.due_by_handle.remove(&handle);
        Some((handle, action))
    }

    #[cfg(test)]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.due_by_handle.contains_key(&handle)
    }

    /// Ticks left before `handle` fires, if it is still pending.
    pub fn remaining_ticks(&self, handle: TimerHandle, now: u64) -> Option<u64> {
        self.due_by_handle
            .get(&handle)
            .map(|due| due.saturating_sub(now))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_when_due() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(10, 5, ScheduledAction::AdvanceWave);
        assert_eq!(scheduler.pop_due(14), None);
        assert_eq!(scheduler.remaining_ticks(handle, 12), Some(3));
        assert_eq!(
            scheduler.pop_due(15),
            Some((handle, ScheduledAction::AdvanceWave))
        );
        assert!(scheduler.is_empty());
        assert!(!scheduler.is_pending(handle));
    }

    #[test]
    fn same_tick_actions_fire_in_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0, 3, ScheduledAction::SpawnNext);
        scheduler.schedule(1, 2, ScheduledAction::AdvanceWave);
        scheduler.schedule(0, 1, ScheduledAction::SpawnNext);

        let order: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(3))
            .map(|(_, action)| action)
            .collect();
        assert_eq!(
            order,
            vec![
                ScheduledAction::SpawnNext,
                ScheduledAction::SpawnNext,
                ScheduledAction::AdvanceWave,
            ]
        );
    }

    #[test]
    fn cancelled_action_never_fires_even_when_overdue() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(0, 2, ScheduledAction::AdvanceWave);
        assert!(scheduler.cancel(handle));
        assert_eq!(scheduler.pop_due(100), None);
        assert!(!scheduler.cancel(handle), "second cancel is a no-op");
    }

    #[test]
    fn cancel_after_fire_reports_false() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(0, 0, ScheduledAction::SpawnNext);
        assert!(scheduler.pop_due(0).is_some());
        assert!(!scheduler.cancel(handle));
    }
}
