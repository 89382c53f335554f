//! RoomRegistry port - authoritative store of room membership.
//!
//! Tracks which subscriber connections belong to each (plane, language)
//! room. The broadcaster reads snapshots from it and prunes dead members;
//! subscriber endpoints add and remove themselves.
//!
//! ## Lifecycle of a membership
//!
//! 1. Audience peer completes the upgrade on `/ws/text/de`
//! 2. Endpoint calls `add(text/de, conn)`
//! 3. Broadcasts to `text/de` snapshot the room and send to `conn`
//! 4. Peer disconnects (endpoint calls `remove`) or a send fails
//!    (broadcaster calls `remove`); whichever comes second is a no-op

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::ConnectionId;
use crate::domain::relay::{LanguageKey, Plane, RoomKey};

use super::Subscriber;

/// Membership count for one non-empty room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomStats {
    pub plane: Plane,
    pub language: LanguageKey,
    pub subscribers: usize,
}

/// Port for room membership.
///
/// Implementations must:
/// - Treat repeated `add` of the same connection as set-union
/// - Treat `remove` of an absent member or room as a no-op
/// - Return snapshots that do not alias the live membership
/// - Never let a reader observe a half-applied mutation
///
/// # Example
///
/// ```ignore
/// registry.add(&RoomKey::text("de"), subscriber.clone()).await;
/// let members = registry.snapshot(&RoomKey::text("de")).await;
/// registry.remove(&RoomKey::text("de"), &subscriber.connection_id()).await;
/// ```
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Insert a subscriber into a room, creating the room if absent.
    async fn add(&self, room: &RoomKey, subscriber: Arc<dyn Subscriber>);

    /// Remove a connection from a room.
    ///
    /// Returns `true` if it was a member. Never fails.
    async fn remove(&self, room: &RoomKey, connection_id: &ConnectionId) -> bool;

    /// Owned copy of the room's members at call time.
    ///
    /// Empty if the room does not exist. Delivery order is unspecified.
    async fn snapshot(&self, room: &RoomKey) -> Vec<Arc<dyn Subscriber>>;

    /// Number of members in a room (0 if it does not exist).
    async fn subscriber_count(&self, room: &RoomKey) -> usize;

    /// Counts for every non-empty room, for monitoring.
    async fn room_stats(&self) -> Vec<RoomStats>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn RoomRegistry) {}

    #[test]
    fn room_stats_serializes_with_lowercase_plane() {
        let stats = RoomStats {
            plane: Plane::Audio,
            language: LanguageKey::from("fr"),
            subscribers: 3,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["plane"], "audio");
        assert_eq!(json["language"], "fr");
        assert_eq!(json["subscribers"], 3);
    }
}
