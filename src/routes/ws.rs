// WebSocket handler: periodic stats snapshots

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use std::sync::Arc;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::monitor::PerformanceMonitor;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub(super) async fn ws_performance(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let monitor = state.monitor.clone();
    let interval_ms = state.config.publishing.stats_frequency_ms;
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = stream_stats(socket, monitor, interval_ms).await {
            tracing::info!("Performance stream error: {}", e);
        }
    })
}

async fn stream_stats(
    mut socket: WebSocket,
    monitor: Arc<PerformanceMonitor>,
    interval_ms: u64,
) -> anyhow::Result<()> {
    tracing::info!("Client connected to performance stream");
    let mut tick = tokio::time::interval(Duration::from_millis(interval_ms));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // interval() fires immediately; skip the first ping so the first frame is a snapshot.
    ping_interval.tick().await;
    loop {
        tokio::select! {
            _ = tick.tick() => {
                let json = serde_json::to_string(&monitor.get_stats())?;
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }
    tracing::info!("Client disconnected from performance stream");
    Ok(())
}
