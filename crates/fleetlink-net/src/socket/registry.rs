//! Subscriber registry: `(event, optional drone id)` -> ordered callbacks.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use fleetlink_core::SocketEvent;
use serde_json::Value;

/// A unique identifier for one subscription.
///
/// Returned by `EventBusSocket::subscribe` and friends; pass it to
/// `unsubscribe` to remove that registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked with the envelope payload.
pub(crate) type Callback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Composite key identifying one logical event channel.
///
/// `drone_id: None` is the fleet-wide channel; a fleet-wide subscription
/// never matches a drone-scoped envelope, and vice versa.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ChannelKey {
    event: SocketEvent,
    drone_id: Option<String>,
}

/// Why a lookup produced no callbacks. The two cases carry distinct
/// diagnostics, so they are kept apart rather than collapsed into one miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LookupMiss {
    /// No subscriber has ever registered for this event.
    UnknownEvent,
    /// The event is known, but nothing is registered for this scope.
    UnregisteredScope,
}

/// The registry of subscriptions.
///
/// Lives for the lifetime of the socket component, across any number of
/// connection cycles. Insertion order within a channel defines invocation
/// order. Invariant: no channel entry holds an empty callback list; pruning
/// happens in [`unsubscribe`](Self::unsubscribe) and nowhere else.
pub(crate) struct SubscriberRegistry {
    channels: HashMap<ChannelKey, Vec<(SubscriptionId, Callback)>>,
    /// Events that have had at least one subscriber. Never shrinks: an
    /// event stays known after its last channel is pruned, so a later miss
    /// on it reports an unregistered scope, not an unknown event.
    known_events: HashSet<SocketEvent>,
    next_id: u64,
}

impl SubscriberRegistry {
    pub(crate) fn new() -> Self {
        Self {
            channels: HashMap::new(),
            known_events: HashSet::new(),
            next_id: 0,
        }
    }

    /// Register a callback, creating the channel entry lazily.
    pub(crate) fn subscribe(
        &mut self,
        event: SocketEvent,
        drone_id: Option<String>,
        callback: Callback,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        self.known_events.insert(event);
        self.channels
            .entry(ChannelKey { event, drone_id })
            .or_default()
            .push((id, callback));
        id
    }

    /// Remove a registration. Returns whether a removal occurred.
    ///
    /// This is the single place the emptiness invariant is enforced: a
    /// channel whose last callback is removed is dropped entirely.
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(key) = self
            .channels
            .iter()
            .find(|(_, callbacks)| callbacks.iter().any(|(sub_id, _)| *sub_id == id))
            .map(|(key, _)| key.clone())
        else {
            return false;
        };

        if let Some(callbacks) = self.channels.get_mut(&key) {
            callbacks.retain(|(sub_id, _)| *sub_id != id);
            if callbacks.is_empty() {
                self.channels.remove(&key);
            }
        }
        true
    }

    /// Collect the callbacks for an exact `(event, scope)` pair, in
    /// registration order.
    ///
    /// Returns clones of the callback handles so the caller can release the
    /// registry lock before invoking them; every subscriber still sees the
    /// registry state as of this instant.
    pub(crate) fn snapshot(
        &self,
        event: SocketEvent,
        drone_id: Option<&str>,
    ) -> Result<Vec<Callback>, LookupMiss> {
        if !self.known_events.contains(&event) {
            return Err(LookupMiss::UnknownEvent);
        }

        let key = ChannelKey {
            event,
            drone_id: drone_id.map(str::to_string),
        };
        match self.channels.get(&key) {
            Some(callbacks) => Ok(callbacks.iter().map(|(_, cb)| cb.clone()).collect()),
            None => Err(LookupMiss::UnregisteredScope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    fn recording(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> Callback {
        let log = log.clone();
        let tag = tag.to_string();
        Arc::new(move |data: &Value| log.lock().push(format!("{tag}:{data}")))
    }

    #[test]
    fn dispatches_in_registration_order() {
        let mut registry = SubscriberRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        registry.subscribe(SocketEvent::Log, None, recording(&log, "first"));
        registry.subscribe(SocketEvent::Log, None, recording(&log, "second"));
        registry.subscribe(SocketEvent::Log, None, recording(&log, "third"));

        let callbacks = registry.snapshot(SocketEvent::Log, None).unwrap();
        for callback in &callbacks {
            callback(&json!("x"));
        }

        assert_eq!(
            *log.lock(),
            vec!["first:\"x\"", "second:\"x\"", "third:\"x\""]
        );
    }

    #[test]
    fn scopes_do_not_overlap() {
        let mut registry = SubscriberRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        registry.subscribe(
            SocketEvent::BatteryLevel,
            Some("drone-7".to_string()),
            recording(&log, "scoped"),
        );
        registry.subscribe(SocketEvent::BatteryLevel, None, recording(&log, "fleet"));

        // A drone-7 envelope reaches only the drone-7 subscriber.
        let callbacks = registry
            .snapshot(SocketEvent::BatteryLevel, Some("drone-7"))
            .unwrap();
        assert_eq!(callbacks.len(), 1);
        for callback in &callbacks {
            callback(&json!({ "level": 42 }));
        }
        assert_eq!(*log.lock(), vec!["scoped:{\"level\":42}"]);

        // An unknown drone's scope is a miss even though the event is known.
        assert_eq!(
            registry
                .snapshot(SocketEvent::BatteryLevel, Some("drone-9"))
                .err(),
            Some(LookupMiss::UnregisteredScope)
        );
    }

    #[test]
    fn unknown_event_and_unregistered_scope_are_distinct() {
        let mut registry = SubscriberRegistry::new();
        registry.subscribe(
            SocketEvent::Velocity,
            Some("drone-1".to_string()),
            Arc::new(|_: &Value| {}),
        );

        assert_eq!(
            registry.snapshot(SocketEvent::MapPoints, None).err(),
            Some(LookupMiss::UnknownEvent)
        );
        assert_eq!(
            registry.snapshot(SocketEvent::Velocity, None).err(),
            Some(LookupMiss::UnregisteredScope)
        );
    }

    #[test]
    fn unsubscribe_removes_exactly_one_registration() {
        let mut registry = SubscriberRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = registry.subscribe(SocketEvent::Log, None, recording(&log, "first"));
        registry.subscribe(SocketEvent::Log, None, recording(&log, "second"));

        assert!(registry.unsubscribe(first));
        // A second removal of the same id reports that nothing happened.
        assert!(!registry.unsubscribe(first));

        let callbacks = registry.snapshot(SocketEvent::Log, None).unwrap();
        for callback in &callbacks {
            callback(&json!(1));
        }
        assert_eq!(*log.lock(), vec!["second:1"]);
    }

    #[test]
    fn removing_the_last_callback_prunes_the_channel() {
        let mut registry = SubscriberRegistry::new();

        let id = registry.subscribe(
            SocketEvent::BatteryLevel,
            Some("drone-7".to_string()),
            Arc::new(|_: &Value| {}),
        );
        assert!(registry.unsubscribe(id));

        // The channel is gone, but the event stays known: the miss is an
        // unregistered scope, not an unknown event.
        assert_eq!(
            registry
                .snapshot(SocketEvent::BatteryLevel, Some("drone-7"))
                .err(),
            Some(LookupMiss::UnregisteredScope)
        );
        assert!(registry.channels.is_empty());
    }

    #[test]
    fn resubscribing_after_prune_works() {
        let mut registry = SubscriberRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let id = registry.subscribe(SocketEvent::ClearMap, None, recording(&log, "old"));
        registry.unsubscribe(id);
        registry.subscribe(SocketEvent::ClearMap, None, recording(&log, "new"));

        let callbacks = registry.snapshot(SocketEvent::ClearMap, None).unwrap();
        for callback in &callbacks {
            callback(&Value::Null);
        }
        assert_eq!(*log.lock(), vec!["new:null"]);
    }

    #[test]
    fn ids_stay_unique_across_channels() {
        let mut registry = SubscriberRegistry::new();
        let a = registry.subscribe(SocketEvent::Log, None, Arc::new(|_: &Value| {}));
        let b = registry.subscribe(
            SocketEvent::Velocity,
            Some("drone-2".to_string()),
            Arc::new(|_: &Value| {}),
        );

        assert_ne!(a, b);
        assert!(registry.unsubscribe(b));
        assert!(registry.unsubscribe(a));
    }
}
