//! Per-user pub/sub rooms

use std::collections::HashMap;
use std::sync::RwLock;

use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::events::Envelope;

/// Capability for pushing events to a user's live connections.
///
/// Injected into anything that emits realtime events so those call sites can
/// be exercised in tests with a recording fake instead of a socket layer.
pub trait RealtimePublisher: Send + Sync {
    /// Best-effort delivery: a user with no live connections is not an error
    fn publish(&self, user_id: Uuid, event: Envelope);
}

const ROOM_CAPACITY: usize = 64;

/// Room registry for all connected users.
///
/// Each room is a broadcast channel; one user may hold several receivers
/// (several open tabs). A room with no remaining receivers is pruned on the
/// next publish addressed to it.
#[derive(Default)]
pub struct Hub {
    rooms: RwLock<HashMap<Uuid, broadcast::Sender<Envelope>>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join a user's room, creating it on first subscribe
    pub fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<Envelope> {
        let mut rooms = self.rooms.write().unwrap_or_else(|p| p.into_inner());
        rooms
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .subscribe()
    }

    /// Number of live connections in a user's room
    pub fn connection_count(&self, user_id: Uuid) -> usize {
        let rooms = self.rooms.read().unwrap_or_else(|p| p.into_inner());
        rooms.get(&user_id).map_or(0, |tx| tx.receiver_count())
    }
}

impl RealtimePublisher for Hub {
    fn publish(&self, user_id: Uuid, event: Envelope) {
        let delivered = {
            let rooms = self.rooms.read().unwrap_or_else(|p| p.into_inner());
            match rooms.get(&user_id) {
                Some(tx) => tx.send(event).is_ok(),
                None => return,
            }
        };

        if !delivered {
            debug!(%user_id, "pruning empty realtime room");
            let mut rooms = self.rooms.write().unwrap_or_else(|p| p.into_inner());
            if let Some(tx) = rooms.get(&user_id) {
                if tx.receiver_count() == 0 {
                    rooms.remove(&user_id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(points: i64) -> Envelope {
        Envelope::StatsUpdate {
            points,
            level: 1,
            leveled_up: false,
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let hub = Hub::new();
        let user = Uuid::new_v4();
        let mut rx = hub.subscribe(user);

        hub.publish(user, stats(15));

        let event = rx.recv().await.unwrap();
        match event {
            Envelope::StatsUpdate { points, .. } => assert_eq!(points, 15),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_without_room_is_noop() {
        let hub = Hub::new();
        // No subscriber ever joined; must not panic or block
        hub.publish(Uuid::new_v4(), stats(1));
    }

    #[tokio::test]
    async fn test_rooms_are_per_user() {
        let hub = Hub::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let mut alice_rx = hub.subscribe(alice);
        let mut bob_rx = hub.subscribe(bob);

        hub.publish(alice, stats(100));

        assert_eq!(
            match alice_rx.recv().await.unwrap() {
                Envelope::StatsUpdate { points, .. } => points,
                other => panic!("unexpected event: {:?}", other),
            },
            100
        );
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_multiple_connections_all_receive() {
        let hub = Hub::new();
        let user = Uuid::new_v4();
        let mut rx1 = hub.subscribe(user);
        let mut rx2 = hub.subscribe(user);

        hub.publish(user, stats(7));

        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_room_pruned_after_last_disconnect() {
        let hub = Hub::new();
        let user = Uuid::new_v4();
        let rx = hub.subscribe(user);
        assert_eq!(hub.connection_count(user), 1);

        drop(rx);
        // First publish after disconnect finds no receivers and prunes
        hub.publish(user, stats(1));
        assert_eq!(hub.connection_count(user), 0);
    }
}
