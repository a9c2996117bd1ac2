//! Live change propagation to browsers.
//!
//! A bus subscriber forwards every namespace change into a broadcast channel;
//! each `/ws` connection drains its own receiver and writes one JSON frame per
//! change. Browsers re-fetch the namespace on receipt, so frames carry only the
//! namespace name.

use crate::bus::{EventBus, EventKind};
use crate::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

pub const LIVE_CHANNEL_CAPACITY: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LiveFrame {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub namespace: String,
}

/// Wire namespace changes on `bus` into a new broadcast channel.
pub fn bridge(bus: &EventBus, capacity: usize) -> broadcast::Sender<LiveFrame> {
    let (tx, _) = broadcast::channel(capacity);
    let sender = tx.clone();
    bus.subscribe(EventKind::NamespaceChanged, move |event| {
        if let Some(namespace) = event.namespace() {
            // No receivers is fine: nobody is watching.
            sender
                .send(LiveFrame {
                    kind: EventKind::NamespaceChanged.name(),
                    namespace: namespace.to_string(),
                })
                .ok();
        }
    })
    .detach();
    tx
}

// ============================================================================
// WebSocket Handler
// ============================================================================

/// GET /ws - stream change frames (public).
pub async fn ws_handler(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    let rx = state.live_tx.subscribe();
    ws.on_upgrade(move |socket| handle_ws(socket, rx))
}

async fn handle_ws(socket: WebSocket, mut rx: broadcast::Receiver<LiveFrame>) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let mut forward_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(frame) => {
                    let json = match serde_json::to_string(&frame) {
                        Ok(j) => j,
                        Err(_) => continue,
                    };
                    if ws_tx.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                // Missed frames are harmless: the next one triggers a full re-read.
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "live client lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Incoming messages are ignored; reading detects the close.
    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
            _ = &mut forward_task => break,
        }
    }

    forward_task.abort();
}
