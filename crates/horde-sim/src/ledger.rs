//! Score ledger and lifecycle notification bus.
//!
//! Every score change goes through `ScoreLedger::add_score`, which republishes
//! the new total. Subscribers are invoked synchronously, in subscription
//! order.

use horde_core::events::{EventKind, GameEvent};

use crate::session::GameSession;

/// Callback invoked for each delivered notification.
pub type Subscriber = Box<dyn FnMut(&GameEvent) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    /// `None` hears every kind.
    kind: Option<EventKind>,
    handler: Subscriber,
}

#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn subscribe(&mut self, handler: Subscriber) -> SubscriptionId {
        self.add(None, handler)
    }

    pub fn subscribe_kind(&mut self, kind: EventKind, handler: Subscriber) -> SubscriptionId {
        self.add(Some(kind), handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn publish(&mut self, event: &GameEvent) {
        let kind = event.kind();
        for subscription in self.subscriptions.iter_mut() {
            if subscription.kind.map_or(true, |k| k == kind) {
                (subscription.handler)(event);
            }
        }
    }

    fn add(&mut self, kind: Option<EventKind>, handler: Subscriber) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, handler });
        id
    }
}

/// Applies score deltas to the session and publishes lifecycle events.
#[derive(Default)]
pub struct ScoreLedger {
    bus: EventBus,
    /// Events published since the last snapshot.
    pending: Vec<GameEvent>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Add points to the session total and publish the new total.
    pub fn add_score(&mut self, session: &mut GameSession, points: u64) {
        let total_score = session.add_points(points);
        self.publish(GameEvent::ScoreChanged { total_score });
    }

    pub fn publish(&mut self, event: GameEvent) {
        self.bus.publish(&event);
        self.pending.push(event);
    }

    /// Take the events published since the last call.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }
}
