//! WebSocket-backed subscriber.
//!
//! Wraps the write half of an audience socket. Each send is bounded by the
//! configured timeout; the first failure marks the connection dead and
//! wakes the endpoint waiting on [`WebSocketSubscriber::evicted`].

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitSink;
use futures::{Sink, SinkExt};
use tokio::sync::{Mutex, Notify};

use crate::domain::foundation::{ConnectionId, Timestamp};
use crate::domain::relay::Payload;
use crate::ports::{SendError, Subscriber};

use super::messages::to_ws_message;

/// An audience connection that payloads are pushed to.
pub struct WebSocketSubscriber<S = SplitSink<WebSocket, Message>> {
    id: ConnectionId,
    sink: Mutex<S>,
    send_timeout: Duration,
    dead: AtomicBool,
    evicted: Notify,
    connected_at: Timestamp,
}

impl<S> WebSocketSubscriber<S>
where
    S: Sink<Message> + Unpin + Send,
    S::Error: Display,
{
    pub fn new(sink: S, send_timeout: Duration) -> Self {
        Self {
            id: ConnectionId::new(),
            sink: Mutex::new(sink),
            send_timeout,
            dead: AtomicBool::new(false),
            evicted: Notify::new(),
            connected_at: Timestamp::now(),
        }
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    /// Whether a send has failed on this connection.
    pub fn is_dead(&self) -> bool {
        self.dead.load(Ordering::Acquire)
    }

    /// Resolves once a send has failed. Returns immediately if one already has.
    pub async fn evicted(&self) {
        if self.is_dead() {
            return;
        }
        self.evicted.notified().await;
    }

    /// Best-effort close frame. Errors are ignored; the peer may be gone.
    pub async fn close(&self) {
        let mut sink = self.sink.lock().await;
        let _ = tokio::time::timeout(self.send_timeout, sink.send(Message::Close(None))).await;
    }

    fn mark_dead(&self) {
        if !self.dead.swap(true, Ordering::AcqRel) {
            self.evicted.notify_one();
        }
    }
}

#[async_trait]
impl<S> Subscriber for WebSocketSubscriber<S>
where
    S: Sink<Message> + Unpin + Send,
    S::Error: Display,
{
    fn connection_id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, payload: &Payload) -> Result<(), SendError> {
        if self.is_dead() {
            return Err(SendError::Closed);
        }

        let message = to_ws_message(payload);
        let outcome = tokio::time::timeout(self.send_timeout, async {
            let mut sink = self.sink.lock().await;
            sink.send(message).await
        })
        .await;

        let result = match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(SendError::Transport(e.to_string())),
            Err(_) => Err(SendError::TimedOut(self.send_timeout.as_millis() as u64)),
        };

        if result.is_err() {
            self.mark_dead();
        }
        result
    }
}
