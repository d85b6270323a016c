use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

/// Broadcast state for one match room. Frames are already-serialized JSON
/// strings; the relay never re-parses what it fans out.
pub struct RoomState {
    pub broadcast: broadcast::Sender<String>,
}

impl RoomState {
    pub fn new() -> Self {
        let (broadcast, _) = broadcast::channel(256);
        Self { broadcast }
    }
}

impl Default for RoomState {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of live rooms keyed by match id. Rooms are created on first
/// join and pruned once the last subscriber is gone.
#[derive(Clone)]
pub struct ChatRelay {
    rooms: Arc<RwLock<HashMap<Uuid, Arc<RoomState>>>>,
}

impl ChatRelay {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn join(&self, match_id: Uuid) -> broadcast::Receiver<String> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .entry(match_id)
            .or_insert_with(|| Arc::new(RoomState::new()))
            .clone();
        room.broadcast.subscribe()
    }

    /// Fans a frame out to every subscriber of the room. Returns how many
    /// subscribers received it; 0 when the room does not exist or is empty.
    pub async fn publish(&self, match_id: Uuid, frame: String) -> usize {
        let rooms = self.rooms.read().await;
        match rooms.get(&match_id) {
            Some(room) => room.broadcast.send(frame).unwrap_or(0),
            None => 0,
        }
    }

    /// Drops the room if nobody is subscribed anymore. Called when a
    /// connection leaves a room or disconnects.
    pub async fn prune(&self, match_id: Uuid) {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get(&match_id) {
            if room.broadcast.receiver_count() == 0 {
                rooms.remove(&match_id);
            }
        }
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl Default for ChatRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChatRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRelay").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn joined_subscriber_receives_published_frame() {
        let relay = ChatRelay::new();
        let match_id = Uuid::new_v4();

        let mut rx = relay.join(match_id).await;
        let delivered = relay.publish(match_id, "{\"event\":\"message\"}".to_string()).await;

        assert_eq!(delivered, 1);
        assert_eq!(rx.recv().await.unwrap(), "{\"event\":\"message\"}");
    }

    #[tokio::test]
    async fn publish_to_unknown_room_reaches_nobody() {
        let relay = ChatRelay::new();
        let delivered = relay.publish(Uuid::new_v4(), "x".to_string()).await;
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn all_room_subscribers_receive_the_frame() {
        let relay = ChatRelay::new();
        let match_id = Uuid::new_v4();

        let mut rx_a = relay.join(match_id).await;
        let mut rx_b = relay.join(match_id).await;

        let delivered = relay.publish(match_id, "hello".to_string()).await;
        assert_eq!(delivered, 2);
        assert_eq!(rx_a.recv().await.unwrap(), "hello");
        assert_eq!(rx_b.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn empty_rooms_are_pruned() {
        let relay = ChatRelay::new();
        let match_id = Uuid::new_v4();

        let rx = relay.join(match_id).await;
        assert_eq!(relay.room_count().await, 1);

        // Still subscribed: prune must keep the room.
        relay.prune(match_id).await;
        assert_eq!(relay.room_count().await, 1);

        drop(rx);
        relay.prune(match_id).await;
        assert_eq!(relay.room_count().await, 0);
    }

    #[tokio::test]
    async fn skipped_publish_delivers_nothing() {
        // The message path publishes only after a successful insert; when
        // persistence fails the frame is never handed to the relay, so
        // subscribers must see nothing.
        let relay = ChatRelay::new();
        let match_id = Uuid::new_v4();

        let mut rx = relay.join(match_id).await;
        assert!(rx.try_recv().is_err());

        // The room stays usable for the next successful message.
        relay.publish(match_id, "persisted".to_string()).await;
        assert_eq!(rx.recv().await.unwrap(), "persisted");
    }

    #[tokio::test]
    async fn prune_after_awaited_abort_removes_room() {
        let relay = ChatRelay::new();
        let match_id = Uuid::new_v4();

        let mut rx = relay.join(match_id).await;
        let forward_task = tokio::spawn(async move { while rx.recv().await.is_ok() {} });
        assert_eq!(relay.room_count().await, 1);

        forward_task.abort();
        let _ = forward_task.await;
        relay.prune(match_id).await;
        assert_eq!(relay.room_count().await, 0);
    }

    #[tokio::test]
    async fn rooms_are_isolated_per_match() {
        let relay = ChatRelay::new();
        let match_a = Uuid::new_v4();
        let match_b = Uuid::new_v4();

        let mut rx_a = relay.join(match_a).await;
        let _rx_b = relay.join(match_b).await;

        relay.publish(match_a, "for-a".to_string()).await;

        assert_eq!(rx_a.recv().await.unwrap(), "for-a");
        // match_b's receiver got nothing pending.
        let mut rx_b = relay.join(match_b).await;
        assert!(rx_b.try_recv().is_err());
    }
}
