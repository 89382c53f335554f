//! BroadcastHandler - Fans one payload out to every member of a room.
//!
//! # Flow
//!
//! 1. Snapshot the room (registry lock held only for the copy)
//! 2. Send to every member concurrently, collecting explicit outcomes
//! 3. Remove every member whose send failed
//!
//! Zero members is a normal state and returns an empty report. Failures
//! never reach the caller; a broken subscriber is simply evicted.

use std::sync::Arc;

use futures::future::join_all;

use crate::domain::foundation::ConnectionId;
use crate::domain::relay::{LanguageKey, Payload, RoomKey};
use crate::ports::{RoomRegistry, SendError, Subscriber};

/// Outcome of one broadcast, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Members in the snapshot.
    pub attempted: usize,
    /// Members that accepted the payload.
    pub delivered: usize,
    /// Members removed because their send failed.
    pub evicted: Vec<ConnectionId>,
}

/// Handler that delivers payloads to rooms and prunes dead subscribers.
pub struct BroadcastHandler {
    registry: Arc<dyn RoomRegistry>,
}

impl BroadcastHandler {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver `payload` to the room for (`payload.plane()`, `language`).
    pub async fn broadcast(&self, language: &LanguageKey, payload: &Payload) -> BroadcastReport {
        let room = RoomKey::new(payload.plane(), language.clone());
        self.broadcast_to_room(&room, payload).await
    }

    async fn broadcast_to_room(&self, room: &RoomKey, payload: &Payload) -> BroadcastReport {
        let members = self.registry.snapshot(room).await;
        if members.is_empty() {
            tracing::trace!(room = %room, "No subscribers, dropping payload");
            return BroadcastReport::default();
        }

        let outcomes = join_all(members.iter().map(|member| deliver(member, payload))).await;

        let attempted = outcomes.len();
        let dead: Vec<(ConnectionId, SendError)> = outcomes
            .into_iter()
            .filter_map(|(id, outcome)| outcome.err().map(|e| (id, e)))
            .collect();

        let mut evicted = Vec::with_capacity(dead.len());
        for (connection_id, error) in dead {
            tracing::debug!(
                room = %room,
                connection_id = %connection_id,
                error = %error,
                "Evicting subscriber after failed send"
            );
            self.registry.remove(room, &connection_id).await;
            evicted.push(connection_id);
        }

        let report = BroadcastReport {
            attempted,
            delivered: attempted - evicted.len(),
            evicted,
        };

        tracing::trace!(
            room = %room,
            bytes = payload.wire_len(),
            delivered = report.delivered,
            evicted = report.evicted.len(),
            "Broadcast complete"
        );

        report
    }
}

async fn deliver(
    member: &Arc<dyn Subscriber>,
    payload: &Payload,
) -> (ConnectionId, Result<(), SendError>) {
    (member.connection_id(), member.send(payload).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::InMemoryRoomRegistry;
    use crate::domain::relay::{AudioFrame, Plane, StructuredMessage};
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::Mutex;

    // ───────────────────────────────────────────────────────────────
    // Mock subscribers
    // ───────────────────────────────────────────────────────────────

    struct RecordingSubscriber {
        id: ConnectionId,
        received: Mutex<Vec<Payload>>,
        fail_with: Option<SendError>,
    }

    impl RecordingSubscriber {
        fn healthy() -> Arc<Self> {
            Arc::new(Self {
                id: ConnectionId::new(),
                received: Mutex::new(Vec::new()),
                fail_with: None,
            })
        }

        fn broken(error: SendError) -> Arc<Self> {
            Arc::new(Self {
                id: ConnectionId::new(),
                received: Mutex::new(Vec::new()),
                fail_with: Some(error),
            })
        }

        fn received(&self) -> Vec<Payload> {
            self.received.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Subscriber for RecordingSubscriber {
        fn connection_id(&self) -> ConnectionId {
            self.id
        }

        async fn send(&self, payload: &Payload) -> Result<(), SendError> {
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }
            self.received.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    /// Adds a late joiner to the same room while its own send is in flight.
    struct JoiningSubscriber {
        id: ConnectionId,
        registry: Arc<InMemoryRoomRegistry>,
        room: RoomKey,
        late_joiner: Arc<RecordingSubscriber>,
    }

    #[async_trait]
    impl Subscriber for JoiningSubscriber {
        fn connection_id(&self) -> ConnectionId {
            self.id
        }

        async fn send(&self, _payload: &Payload) -> Result<(), SendError> {
            self.registry
                .add(&self.room, self.late_joiner.clone())
                .await;
            Ok(())
        }
    }

    fn segment(text: &str, lang: &str) -> Payload {
        let raw = serde_json::json!({
            "segment": text,
            "source": "Hello",
            "lang": lang,
            "ts": 100.0,
        })
        .to_string();
        StructuredMessage::parse(raw).unwrap().into()
    }

    fn setup() -> (Arc<InMemoryRoomRegistry>, BroadcastHandler) {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let handler = BroadcastHandler::new(registry.clone());
        (registry, handler)
    }

    // ───────────────────────────────────────────────────────────────
    // Delivery
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn all_members_receive_payload() {
        let (registry, handler) = setup();
        let a = RecordingSubscriber::healthy();
        let b = RecordingSubscriber::healthy();
        registry.add(&RoomKey::text("de"), a.clone()).await;
        registry.add(&RoomKey::text("de"), b.clone()).await;

        let payload = segment("Hallo", "de");
        let report = handler.broadcast(&"de".into(), &payload).await;

        assert_eq!(report.attempted, 2);
        assert_eq!(report.delivered, 2);
        assert!(report.evicted.is_empty());
        assert_eq!(a.received(), vec![payload.clone()]);
        assert_eq!(b.received(), vec![payload]);
    }

    #[tokio::test]
    async fn zero_subscriber_broadcast_is_noop() {
        let (registry, handler) = setup();

        let report = handler.broadcast(&"de".into(), &segment("Hallo", "de")).await;

        assert_eq!(report, BroadcastReport::default());
        assert!(registry.active_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn languages_are_isolated() {
        let (registry, handler) = setup();
        let german = RecordingSubscriber::healthy();
        let french = RecordingSubscriber::healthy();
        registry.add(&RoomKey::text("de"), german.clone()).await;
        registry.add(&RoomKey::text("fr"), french.clone()).await;

        handler.broadcast(&"de".into(), &segment("Hallo", "de")).await;

        assert_eq!(german.received().len(), 1);
        assert!(french.received().is_empty());
    }

    #[tokio::test]
    async fn planes_are_isolated() {
        let (registry, handler) = setup();
        let reader = RecordingSubscriber::healthy();
        let listener = RecordingSubscriber::healthy();
        registry.add(&RoomKey::text("de"), reader.clone()).await;
        registry.add(&RoomKey::audio("de"), listener.clone()).await;

        handler.broadcast(&"de".into(), &segment("Hallo", "de")).await;
        let frame: Payload = AudioFrame::from(vec![1, 2, 3]).into();
        handler.broadcast(&"de".into(), &frame).await;

        assert_eq!(reader.received(), vec![segment("Hallo", "de")]);
        assert_eq!(listener.received(), vec![frame]);
        assert!(reader.received().iter().all(|p| p.plane() == Plane::Text));
    }

    #[tokio::test]
    async fn audio_frame_is_delivered_unmodified() {
        let (registry, handler) = setup();
        let listener = RecordingSubscriber::healthy();
        registry.add(&RoomKey::audio("fr"), listener.clone()).await;

        let frame: Payload = AudioFrame::from(vec![0x01, 0x02, 0x03]).into();
        handler.broadcast(&"fr".into(), &frame).await;

        match &listener.received()[0] {
            Payload::Audio(received) => assert_eq!(received.as_bytes(), &[0x01, 0x02, 0x03]),
            other => panic!("expected audio payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn per_subscriber_order_follows_broadcast_order() {
        let (registry, handler) = setup();
        let sub = RecordingSubscriber::healthy();
        registry.add(&RoomKey::text("de"), sub.clone()).await;

        for text in ["eins", "zwei", "drei"] {
            handler.broadcast(&"de".into(), &segment(text, "de")).await;
        }

        let segments: Vec<String> = sub
            .received()
            .iter()
            .map(|p| match p {
                Payload::Text(msg) => msg.value()["segment"].as_str().unwrap().to_string(),
                Payload::Audio(_) => unreachable!(),
            })
            .collect();
        assert_eq!(segments, vec!["eins", "zwei", "drei"]);
    }

    // ───────────────────────────────────────────────────────────────
    // Eviction
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn failed_member_is_evicted_and_others_still_receive() {
        let (registry, handler) = setup();
        let room = RoomKey::text("de");
        let a = RecordingSubscriber::healthy();
        let b = RecordingSubscriber::broken(SendError::Closed);
        let c = RecordingSubscriber::healthy();
        registry.add(&room, a.clone()).await;
        registry.add(&room, b.clone()).await;
        registry.add(&room, c.clone()).await;

        let report = handler.broadcast(&"de".into(), &segment("Hallo", "de")).await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.evicted, vec![b.id]);
        assert_eq!(a.received().len(), 1);
        assert_eq!(c.received().len(), 1);

        let remaining: Vec<_> = registry
            .snapshot(&room)
            .await
            .iter()
            .map(|m| m.connection_id())
            .collect();
        assert_eq!(remaining.len(), 2);
        assert!(!remaining.contains(&b.id));
    }

    #[tokio::test]
    async fn every_failure_kind_evicts() {
        let (registry, handler) = setup();
        let room = RoomKey::audio("es");
        let timed_out = RecordingSubscriber::broken(SendError::TimedOut(10));
        let transport = RecordingSubscriber::broken(SendError::Transport("reset".into()));
        registry.add(&room, timed_out.clone()).await;
        registry.add(&room, transport.clone()).await;

        let report = handler
            .broadcast(&"es".into(), &AudioFrame::from(vec![9]).into())
            .await;

        assert_eq!(report.evicted.len(), 2);
        assert_eq!(report.delivered, 0);
        assert_eq!(registry.subscriber_count(&room).await, 0);
    }

    #[tokio::test]
    async fn evicted_member_gets_no_further_payloads() {
        let (registry, handler) = setup();
        let room = RoomKey::text("de");
        let dead = RecordingSubscriber::broken(SendError::Closed);
        registry.add(&room, dead.clone()).await;

        let first = handler.broadcast(&"de".into(), &segment("a", "de")).await;
        let second = handler.broadcast(&"de".into(), &segment("b", "de")).await;

        assert_eq!(first.evicted, vec![dead.id]);
        assert_eq!(second, BroadcastReport::default());
    }

    // ───────────────────────────────────────────────────────────────
    // Snapshot isolation
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn member_added_during_broadcast_misses_in_flight_payload() {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let handler = BroadcastHandler::new(registry.clone());
        let room = RoomKey::text("de");
        let late_joiner = RecordingSubscriber::healthy();
        let joining = Arc::new(JoiningSubscriber {
            id: ConnectionId::new(),
            registry: registry.clone(),
            room: room.clone(),
            late_joiner: late_joiner.clone(),
        });
        registry.add(&room, joining).await;

        let report = handler.broadcast(&"de".into(), &segment("first", "de")).await;

        assert_eq!(report.attempted, 1);
        assert!(late_joiner.received().is_empty());
        assert_eq!(registry.subscriber_count(&room).await, 2);

        handler.broadcast(&"de".into(), &segment("second", "de")).await;
        assert_eq!(late_joiner.received(), vec![segment("second", "de")]);
    }

    // ───────────────────────────────────────────────────────────────
    // Properties
    // ───────────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn broadcast_never_crosses_languages(
            target in "[a-z]{2}",
            other in "[a-z]{2}",
        ) {
            prop_assume!(target != other);

            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            rt.block_on(async {
                let (registry, handler) = setup();
                let inside = RecordingSubscriber::healthy();
                let outside = RecordingSubscriber::healthy();
                registry.add(&RoomKey::text(target.as_str()), inside.clone()).await;
                registry.add(&RoomKey::text(other.as_str()), outside.clone()).await;

                let report = handler
                    .broadcast(&LanguageKey::new(target.clone()), &segment("x", &target))
                    .await;

                assert_eq!(report.delivered, 1);
                assert_eq!(inside.received().len(), 1);
                assert!(outside.received().is_empty());
            });
        }
    }
}
