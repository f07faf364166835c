use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    token: Option<String>,
}

/// WebSocket upgrade handler for the admin live feed.
///
/// Browsers cannot set headers on a websocket handshake, so the session
/// token travels as a query parameter instead of `Authorization`.
pub async fn feed_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<FeedQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let authorized = params
        .token
        .as_deref()
        .and_then(|token| Uuid::parse_str(token.trim()).ok())
        .map(|token| state.sessions.is_valid(&token))
        .unwrap_or(false);

    if !authorized {
        tracing::warn!("rejected admin feed connection with invalid token");
        return axum::http::StatusCode::UNAUTHORIZED.into_response();
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual admin feed connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before the initial snapshot so no commit can fall between
    // the two.
    let mut rx = state.feed.subscribe();

    // Initial snapshot so the dashboard renders without waiting for a change.
    let initial = match state.orders.list() {
        Ok(orders) => orders,
        Err(err) => {
            tracing::error!("failed to read orders for feed: {}", err);
            return;
        }
    };
    match serde_json::to_string(&initial) {
        Ok(json) => {
            if sender.send(Message::Text(json)).await.is_err() {
                tracing::info!("admin feed client disconnected before first snapshot");
                return;
            }
        }
        Err(err) => {
            tracing::error!("failed to serialize snapshot: {}", err);
            return;
        }
    }

    // Drain incoming frames so close handshakes and pings are honored.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Close(_) => {
                    tracing::info!("admin feed client closed connection");
                    break;
                }
                Message::Ping(_) => {
                    tracing::trace!("received ping");
                    // Axum handles pong automatically
                }
                _ => {}
            }
        }
    });

    let heartbeat = state.config.feed_heartbeat();
    let mut send_task = tokio::spawn(async move {
        let mut heartbeat_interval = tokio::time::interval(heartbeat);

        loop {
            tokio::select! {
                // Send heartbeat ping
                _ = heartbeat_interval.tick() => {
                    if sender.send(Message::Ping(Vec::new())).await.is_err() {
                        tracing::info!("admin feed client disconnected during heartbeat");
                        break;
                    }
                }
                // Forward order-list snapshots
                result = rx.recv() => {
                    match result {
                        Ok(snapshot) => {
                            let json = match serde_json::to_string(&snapshot) {
                                Ok(j) => j,
                                Err(e) => {
                                    tracing::error!("failed to serialize snapshot: {}", e);
                                    continue;
                                }
                            };

                            if sender.send(Message::Text(json)).await.is_err() {
                                tracing::info!("admin feed client disconnected");
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            // Every message is a full snapshot, so skipped
                            // intermediates are already stale.
                            tracing::warn!("feed client lagged behind by {} snapshots", n);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("order feed channel closed");
                            break;
                        }
                    }
                }
            }
        }
    });

    // Whichever side finishes first tears the other down, releasing the
    // heartbeat timer with it.
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    tracing::info!("admin feed connection closed");
}
