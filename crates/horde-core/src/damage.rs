//! Damage Sink capability shared by agents and the protagonist.

use crate::components::Health;

/// Result of a single `take_damage` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Sink was already dead; nothing changed.
    Ignored,
    /// Health dropped but the sink survives.
    Wounded,
    /// This call brought health to zero. Returned at most once per sink.
    Killed,
}

/// Anything that can receive damage and report death.
pub trait DamageSink {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome;
    fn is_dead(&self) -> bool;
    /// Remaining health as a fraction of max, in [0, 1].
    fn health_fraction(&self) -> f64;
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    /// Health as reported externally (never negative).
    pub fn reported(&self) -> i32 {
        self.current.max(0)
    }

    /// Restore health up to max. No effect on the dead.
    pub fn heal(&mut self, amount: u32) {
        if self.dead {
            return;
        }
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.current = self.current.saturating_add(amount).min(self.max);
    }
}

impl DamageSink for Health {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.current = self.current.saturating_sub(amount).max(0);
        if self.current <= 0 {
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn health_fraction(&self) -> f64 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.reported() as f64 / self.max as f64).clamp(0.0, 1.0)
    }
}
