//! In-memory room registry for language-partitioned broadcast.
//!
//! Rooms are keyed by (plane, language), so text and audio subscribers for
//! the same language never share a room.
//!
//! # Architecture
//!
//! ```text
//! Room: text/de        Room: audio/de       Room: text/fr
//! ├── conn-a           ├── conn-a'          └── conn-d
//! ├── conn-b           └── conn-c'
//! └── conn-c
//! ```
//!
//! A broadcast to `text/de` reaches a, b and c only.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::ConnectionId;
use crate::domain::relay::RoomKey;
use crate::ports::{RoomRegistry, RoomStats, Subscriber};

type Members = HashMap<ConnectionId, Arc<dyn Subscriber>>;

/// Room membership behind a single lock.
///
/// # Thread Safety
///
/// One `RwLock` guards the whole map. It is only held for in-memory work;
/// snapshots are cloned out before any send.
pub struct InMemoryRoomRegistry {
    rooms: RwLock<HashMap<RoomKey, Members>>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Total members across all rooms.
    pub async fn total_subscriber_count(&self) -> usize {
        self.rooms.read().await.values().map(HashMap::len).sum()
    }

    /// Keys of all non-empty rooms (for monitoring/debugging).
    pub async fn active_rooms(&self) -> Vec<RoomKey> {
        self.rooms.read().await.keys().cloned().collect()
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn add(&self, room: &RoomKey, subscriber: Arc<dyn Subscriber>) {
        let connection_id = subscriber.connection_id();
        let mut rooms = self.rooms.write().await;
        let members = rooms.entry(room.clone()).or_default();
        members.insert(connection_id, subscriber);

        tracing::debug!(
            room = %room,
            connection_id = %connection_id,
            members = members.len(),
            "Subscriber joined room"
        );
    }

    async fn remove(&self, room: &RoomKey, connection_id: &ConnectionId) -> bool {
        let mut rooms = self.rooms.write().await;
        let Some(members) = rooms.get_mut(room) else {
            return false;
        };

        let removed = members.remove(connection_id).is_some();
        let remaining = members.len();
        // Empty rooms are dropped; absent means zero subscribers
        if remaining == 0 {
            rooms.remove(room);
        }

        if removed {
            tracing::debug!(
                room = %room,
                connection_id = %connection_id,
                members = remaining,
                "Subscriber left room"
            );
        }
        removed
    }

    async fn snapshot(&self, room: &RoomKey) -> Vec<Arc<dyn Subscriber>> {
        self.rooms
            .read()
            .await
            .get(room)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default()
    }

    async fn subscriber_count(&self, room: &RoomKey) -> usize {
        self.rooms
            .read()
            .await
            .get(room)
            .map(HashMap::len)
            .unwrap_or(0)
    }

    async fn room_stats(&self) -> Vec<RoomStats> {
        let rooms = self.rooms.read().await;
        let mut stats: Vec<RoomStats> = rooms
            .iter()
            .map(|(key, members)| RoomStats {
                plane: key.plane,
                language: key.language.clone(),
                subscribers: members.len(),
            })
            .collect();
        stats.sort_by(|a, b| (a.plane, &a.language).cmp(&(b.plane, &b.language)));
        stats
    }
}
