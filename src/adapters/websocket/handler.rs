//! WebSocket upgrade handlers for audience (subscriber) connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Upgrade to WebSocket
//! 2. Join the (plane, language) room
//! 3. Wait until the peer leaves, a send fails, or the server shuts down
//! 4. Leave the room, exactly once

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{Stream, StreamExt};
use tokio::sync::watch;

use crate::application::BroadcastHandler;
use crate::config::RelayConfig;
use crate::domain::relay::{Plane, RoomKey};
use crate::ports::{RoomRegistry, Subscriber};

use super::event_bridge::{ingest_audio, ingest_text};
use super::subscriber::WebSocketSubscriber;

/// State required for WebSocket handling.
///
/// Built once by the composition root and shared by every endpoint.
#[derive(Clone)]
pub struct RelayState {
    /// Room membership.
    pub registry: Arc<dyn RoomRegistry>,
    /// Fan-out over `registry`.
    pub broadcaster: Arc<BroadcastHandler>,
    /// Per-subscriber send bound.
    pub send_timeout: Duration,
    /// Largest message accepted from a subscriber.
    pub max_message_bytes: usize,
    /// Largest unit accepted from a producer.
    pub max_ingest_message_bytes: usize,
    /// Flips to `true` when the server is shutting down.
    pub shutdown: watch::Receiver<bool>,
}

impl RelayState {
    /// Create relay state around a registry.
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        config: &RelayConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let broadcaster = Arc::new(BroadcastHandler::new(registry.clone()));
        Self {
            registry,
            broadcaster,
            send_timeout: config.send_timeout(),
            max_message_bytes: config.max_message_bytes,
            max_ingest_message_bytes: config.max_ingest_message_bytes,
            shutdown,
        }
    }
}

/// Why a subscriber endpoint stopped waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Close frame or end of stream from the peer.
    PeerClosed,
    /// Read error on the socket.
    TransportError,
    /// A broadcast send failed and the registry dropped the connection.
    Evicted,
    /// Server shutdown.
    Shutdown,
}

/// Subscribe to translated text segments.
///
/// Route: `GET /ws/text/:lang`
pub async fn subscribe_text(
    ws: WebSocketUpgrade,
    Path(lang): Path<String>,
    State(state): State<RelayState>,
) -> Response {
    subscribe(ws, RoomKey::text(lang), state)
}

/// Subscribe to translated audio.
///
/// Route: `GET /ws/audio/:lang`
pub async fn subscribe_audio(
    ws: WebSocketUpgrade,
    Path(lang): Path<String>,
    State(state): State<RelayState>,
) -> Response {
    subscribe(ws, RoomKey::audio(lang), state)
}

fn subscribe(ws: WebSocketUpgrade, room: RoomKey, state: RelayState) -> Response {
    ws.max_message_size(state.max_message_bytes)
        .on_upgrade(move |socket| handle_subscriber_socket(socket, room, state))
}

/// Handle an established audience connection.
///
/// Runs for the lifetime of the connection. Inbound frames are read only to
/// notice the disconnect; their content is ignored.
async fn handle_subscriber_socket(socket: WebSocket, room: RoomKey, state: RelayState) {
    let (sink, stream) = socket.split();
    let subscriber = Arc::new(WebSocketSubscriber::new(sink, state.send_timeout));
    let connection_id = subscriber.connection_id();

    state.registry.add(&room, subscriber.clone()).await;
    tracing::info!(room = %room, connection_id = %connection_id, "Subscriber connected");

    let release = wait_for_release(stream, &subscriber, state.shutdown.clone()).await;

    state.registry.remove(&room, &connection_id).await;
    if release == Release::Shutdown {
        subscriber.close().await;
    }

    tracing::info!(
        room = %room,
        connection_id = %connection_id,
        reason = ?release,
        connected_ms = subscriber.connected_at().elapsed_ms(),
        "Subscriber disconnected"
    );
}

/// Block until the subscriber connection should be released.
pub async fn wait_for_release<St, E, S>(
    mut stream: St,
    subscriber: &WebSocketSubscriber<S>,
    mut shutdown: watch::Receiver<bool>,
) -> Release
where
    St: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
    S: futures::Sink<Message> + Unpin + Send,
    S::Error: Display,
{
    let disconnect = async {
        while let Some(frame) = stream.next().await {
            match frame {
                Ok(Message::Close(_)) => return Release::PeerClosed,
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!(
                        connection_id = %subscriber.connection_id(),
                        "Receive error: {}",
                        e
                    );
                    return Release::TransportError;
                }
            }
        }
        Release::PeerClosed
    };

    tokio::select! {
        release = disconnect => release,
        _ = subscriber.evicted() => Release::Evicted,
        _ = shutdown_requested(&mut shutdown) => Release::Shutdown,
    }
}

/// Resolves once the shutdown flag is set. Never resolves if the sender
/// is dropped without setting it.
pub async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Create axum router for the relay's WebSocket endpoints.
///
/// # Routes
///
/// - `GET /ws/text/:lang` - Audience text subscription
/// - `GET /ws/audio/:lang` - Audience audio subscription
/// - `GET /ws/pipeline/text/:lang` - Producer text ingest
/// - `GET /ws/pipeline/audio/:lang` - Producer audio ingest
pub fn relay_router() -> Router<RelayState> {
    Router::new()
        .route("/ws/text/:lang", get(subscribe_text))
        .route("/ws/audio/:lang", get(subscribe_audio))
        .route("/ws/pipeline/text/:lang", get(ingest_text))
        .route("/ws/pipeline/audio/:lang", get(ingest_audio))
}

/// Subscriber route for a plane, for clients and tests.
pub fn subscribe_path(plane: Plane, lang: &str) -> String {
    format!("/ws/{}/{}", plane, lang)
}

/// Ingest route for a plane, for producers and tests.
pub fn ingest_path(plane: Plane, lang: &str) -> String {
    format!("/ws/pipeline/{}/{}", plane, lang)
}
