//! HTTP + WebSocket API for Liaison
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get session status
//! - POST /session/{id}/utterance - Feed a finalized utterance
//! - POST /session/{id}/cancel - Forced close (peer departure / cancel)
//! - DELETE /session/{id} - Close and evict the session
//! - GET /session/{id}/profile - Grouped profile snapshot
//! - WS /ws/{id} - Live chip + lifecycle messages
//! - GET /health - Health check
//!
//! The per-session broadcast channel is the Event Sink: delivery is
//! fire-and-forget, failures are logged and dropped, and the registry stays
//! the source of truth regardless of delivery.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::core::{LifecycleMonitor, SessionEngine};
use crate::types::{ClientMessage, EngineEvent, ProfileSnapshot, Role};
use crate::GRACE_DELAY_MS;

/// Session state
pub struct Session {
    pub id: String,
    pub engine: SessionEngine,
    pub started_at: DateTime<Utc>,
    pub event_tx: broadcast::Sender<ClientMessage>,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    /// Grace delay applied to every session created on this server
    pub grace: Duration,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_grace(Duration::from_millis(GRACE_DELAY_MS))
    }

    /// State with a custom grace delay; tests use this to keep the
    /// sign-off → close window short
    pub fn with_grace(grace: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            grace,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub state: String,
    pub chip_count: usize,
    pub started_at: DateTime<Utc>,
}

/// Feed utterance request
#[derive(Debug, Deserialize)]
pub struct UtteranceRequest {
    pub speaker: Role,
    pub text: String,
}

/// Feed utterance response
#[derive(Debug, Serialize)]
pub struct UtteranceResponse {
    pub state: String,
    pub chip_count: usize,
    pub chips_created: usize,
    pub chips_updated: usize,
    pub ending: bool,
}

/// Forced-close request; transport-level departures report themselves here
#[derive(Debug, Default, Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: Option<CancelReason>,
}

/// Why the session is being force-closed
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    PeerDeparture,
    Cancel,
}

/// Cancel response
#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub state: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router() -> Router {
    create_router_with_state(Arc::new(AppState::new()))
}

/// Router over caller-owned state; tests hold the `Arc` to subscribe to
/// session channels and shorten the grace delay
pub fn create_router_with_state(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(delete_session))
        .route("/session/:id/utterance", post(add_utterance))
        .route("/session/:id/cancel", post(cancel_session))
        .route("/session/:id/profile", get(get_profile))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(State(state): State<Arc<AppState>>) -> Json<NewSessionResponse> {
    let session_id = generate_session_id();
    let (tx, _) = broadcast::channel(100);

    let session = Session {
        id: session_id.clone(),
        engine: SessionEngine::with_lifecycle(LifecycleMonitor::with_grace(state.grace)),
        started_at: Utc::now(),
        event_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    info!(session_id = %session_id, "session created");

    Json(NewSessionResponse {
        websocket_url: format!("/ws/{}", session_id),
        session_id,
    })
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(SessionStatusResponse {
        session_id: id,
        state: session.engine.state().to_string(),
        chip_count: session.engine.chips().len(),
        started_at: session.started_at,
    }))
}

/// Feed one finalized utterance to a session
async fn add_utterance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UtteranceRequest>,
) -> Result<Json<UtteranceResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let events = session.engine.on_utterance(req.speaker, &req.text);

    let mut chips_created = 0;
    let mut chips_updated = 0;
    let mut ending = false;

    for event in &events {
        match event {
            EngineEvent::Chip(chip_event) => {
                match chip_event.kind {
                    crate::types::ChipEventKind::Created => chips_created += 1,
                    crate::types::ChipEventKind::Updated => chips_updated += 1,
                }
                deliver(session, ClientMessage::chip(chip_event));
            }
            EngineEvent::Ending => {
                ending = true;
                spawn_grace_timer(state.clone(), id.clone(), session.engine.grace());
            }
            EngineEvent::Closed => {
                // Close is driven by the timer or cancel path, never by an
                // utterance directly.
            }
        }
    }

    Ok(Json(UtteranceResponse {
        state: session.engine.state().to_string(),
        chip_count: session.engine.chips().len(),
        chips_created,
        chips_updated,
        ending,
    }))
}

/// Forced close: peer departure or explicit cancel
async fn cancel_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    req: Option<Json<CancelRequest>>,
) -> Result<Json<CancelResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let reason = req.and_then(|Json(r)| r.reason);
    let closed = match reason {
        Some(CancelReason::PeerDeparture) => session.engine.on_peer_departure(),
        _ => session.engine.on_force_cancel(),
    };
    if let Some(EngineEvent::Closed) = closed {
        let msg = ClientMessage::session_closing(id.clone());
        deliver(session, msg);
    }

    Ok(Json(CancelResponse {
        state: session.engine.state().to_string(),
    }))
}

/// Close and evict a session. CLOSED sessions stay queryable until this is
/// called; long-running servers evict once the profile has been read.
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut sessions = state.sessions.write().await;
    let Some(mut session) = sessions.remove(&id) else {
        return StatusCode::NOT_FOUND;
    };

    // Close first so live subscribers hear the notification before the
    // channel drops.
    if let Some(EngineEvent::Closed) = session.engine.on_force_cancel() {
        let msg = ClientMessage::session_closing(id);
        deliver(&session, msg);
    }
    info!(session_id = %session.id, "session evicted");
    StatusCode::NO_CONTENT
}

/// Get grouped profile snapshot
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProfileSnapshot>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(session.engine.snapshot()))
}

/// Schedule the grace-delay close. The timer task is independent; a forced
/// close that lands first makes `grace_elapsed` a no-op.
fn spawn_grace_timer(state: Arc<AppState>, session_id: String, grace: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;

        let mut sessions = state.sessions.write().await;
        let Some(session) = sessions.get_mut(&session_id) else {
            return;
        };
        if let Some(EngineEvent::Closed) = session.engine.grace_elapsed() {
            info!(session_id = %session_id, "grace delay elapsed, session closed");
            let msg = ClientMessage::session_closing(session_id.clone());
            deliver(session, msg);
        }
    });
}

/// Fire-and-forget delivery to the client. Failure is logged and dropped;
/// the registry remains the source of truth either way.
fn deliver(session: &Session, msg: ClientMessage) {
    if let Err(err) = session.event_tx.send(msg) {
        debug!(session_id = %session.id, %err, "no live subscribers, event dropped");
    }
}

/// WebSocket handler for live client messages
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.event_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Forward broadcast messages to one WebSocket client
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<ClientMessage>) {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            msg = rx.recv() => {
                let Ok(msg) = msg else { break };
                let json = serde_json::to_string(&msg).unwrap_or_default();
                if sink.send(Message::Text(json)).await.is_err() {
                    warn!("websocket send failed, dropping client");
                    break;
                }
            }
            incoming = stream.next() => {
                // Client messages are not part of the protocol; a close or
                // error tears the forwarder down.
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("session_{:x}", nanos as u64)
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "liaison API running");
    println!("Liaison API running on {}", addr);
    println!("  POST /session/new            - Create session");
    println!("  GET  /session/:id            - Get status");
    println!("  POST /session/:id/utterance  - Feed utterance");
    println!("  POST /session/:id/cancel     - Forced close");
    println!("  DEL  /session/:id            - Close and evict");
    println!("  GET  /session/:id/profile    - Profile snapshot");
    println!("  WS   /ws/:id                 - Live updates");
    println!("  GET  /health                 - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
