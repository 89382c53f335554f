//! Ingest bridge connecting producer sockets to room broadcasts.
//!
//! The translation pipeline opens one connection per (plane, language) and
//! streams units into it. Each unit is decoded for the plane and handed to
//! the broadcaster for that language's room.
//!
//! # Unit Flow
//!
//! ```text
//! Producer frame
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  decode_ingest     │──── rejected ──► warn, wait for next unit
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  BroadcastHandler  │
//! │  (plane, language) │
//! └────────────────────┘
//! ```
//!
//! Producers are never registered in any room. A producer disconnect ends
//! the endpoint without touching the registry.

use std::fmt::Display;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use futures::{Stream, StreamExt};
use tokio::sync::watch;

use crate::application::BroadcastHandler;
use crate::domain::relay::{LanguageKey, Payload, Plane};

use super::handler::{shutdown_requested, RelayState};
use super::messages::{decode_ingest, IngestUnit};

/// Counters for one producer connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Units broadcast to the room.
    pub forwarded: u64,
    /// Units skipped as undecodable or of the wrong kind.
    pub rejected: u64,
}

/// Receive translated text segments from the pipeline.
///
/// Route: `GET /ws/pipeline/text/:lang`
pub async fn ingest_text(
    ws: WebSocketUpgrade,
    Path(lang): Path<String>,
    State(state): State<RelayState>,
) -> Response {
    ingest(ws, Plane::Text, LanguageKey::new(lang), state)
}

/// Receive translated audio from the pipeline.
///
/// Route: `GET /ws/pipeline/audio/:lang`
pub async fn ingest_audio(
    ws: WebSocketUpgrade,
    Path(lang): Path<String>,
    State(state): State<RelayState>,
) -> Response {
    ingest(ws, Plane::Audio, LanguageKey::new(lang), state)
}

fn ingest(ws: WebSocketUpgrade, plane: Plane, language: LanguageKey, state: RelayState) -> Response {
    ws.max_message_size(state.max_ingest_message_bytes)
        .on_upgrade(move |socket| handle_ingest_socket(socket, plane, language, state))
}

async fn handle_ingest_socket(
    socket: WebSocket,
    plane: Plane,
    language: LanguageKey,
    state: RelayState,
) {
    tracing::info!(plane = %plane, language = %language, "Producer connected");

    let summary = run_ingest(
        socket,
        plane,
        &language,
        &state.broadcaster,
        state.shutdown.clone(),
    )
    .await;

    tracing::info!(
        plane = %plane,
        language = %language,
        forwarded = summary.forwarded,
        rejected = summary.rejected,
        "Producer disconnected"
    );
}

/// Pump producer frames into the broadcaster until the producer leaves.
///
/// Bad units are logged and skipped; only close, end of stream, a read
/// error or server shutdown end the loop.
pub async fn run_ingest<St, E>(
    mut stream: St,
    plane: Plane,
    language: &LanguageKey,
    broadcaster: &BroadcastHandler,
    mut shutdown: watch::Receiver<bool>,
) -> IngestSummary
where
    St: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let mut summary = IngestSummary::default();

    loop {
        let frame = tokio::select! {
            frame = stream.next() => frame,
            _ = shutdown_requested(&mut shutdown) => {
                tracing::debug!(plane = %plane, language = %language, "Ingest stopped for shutdown");
                break;
            }
        };

        let message = match frame {
            None => break,
            Some(Ok(message)) => message,
            Some(Err(e)) => {
                tracing::warn!(plane = %plane, language = %language, "Producer read error: {}", e);
                break;
            }
        };

        match decode_ingest(plane, message) {
            IngestUnit::Payload(payload) => {
                warn_on_language_mismatch(&payload, language);
                broadcaster.broadcast(language, &payload).await;
                summary.forwarded += 1;
            }
            IngestUnit::Control => {}
            IngestUnit::Closed => break,
            IngestUnit::Rejected(reason) => {
                tracing::warn!(
                    plane = %plane,
                    language = %language,
                    "Skipping producer unit: {}",
                    reason
                );
                summary.rejected += 1;
            }
        }
    }

    summary
}

fn warn_on_language_mismatch(payload: &Payload, language: &LanguageKey) {
    if let Payload::Text(msg) = payload {
        if let Some(declared) = msg.declared_language() {
            if declared != language.as_str() {
                tracing::debug!(
                    language = %language,
                    declared = declared,
                    "Segment lang differs from ingest route; routing by route"
                );
            }
        }
    }
}
