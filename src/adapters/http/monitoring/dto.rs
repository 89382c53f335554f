//! Response DTOs for monitoring endpoints.

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::ports::RoomStats;

/// Liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            timestamp: Timestamp::now(),
        }
    }
}

/// Occupancy of every non-empty room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub rooms: Vec<RoomStats>,
    pub total_subscribers: usize,
}

impl From<Vec<RoomStats>> for RoomsResponse {
    fn from(rooms: Vec<RoomStats>) -> Self {
        let total_subscribers = rooms.iter().map(|r| r.subscribers).sum();
        Self {
            rooms,
            total_subscribers,
        }
    }
}
