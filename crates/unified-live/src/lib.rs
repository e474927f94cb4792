//! Unified Live - push-channel connectivity indicator
//!
//! Each dashboard page section that advertises liveness owns one
//! [`LiveStatus`]: a handle over a single WebSocket opened against the
//! backend's push endpoint for that section. The indicator tracks
//! connectivity only — the `"ping"` probe on open is the whole protocol;
//! payloads are not consumed.
//!
//! # State machine
//!
//! ```text
//! Connecting ──open──► Connected ──close/error──► Disconnected
//!      │                                               ▲
//!      └───────────────connect failed──────────────────┘
//! ```
//!
//! `Disconnected` is terminal: there is no automatic reconnect, so a lost
//! channel shows "Offline" until the owner opens a new indicator.
//!
//! Dropping (or explicitly closing) the handle releases the channel
//! unconditionally, whatever state it is in, and the socket is closed
//! exactly once.

use futures::{SinkExt, StreamExt};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::debug;

/// Connectivity of one push channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Channel requested, handshake not finished
    Connecting,
    /// Channel open
    Connected,
    /// Channel closed, errored, or never opened
    Disconnected,
}

impl ConnectionState {
    /// Badge text shown next to the page section
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connected => "Live",
            Self::Connecting | Self::Disconnected => "Offline",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Handle owning one push channel and its connectivity state
#[derive(Debug)]
pub struct LiveStatus {
    state: watch::Receiver<ConnectionState>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl LiveStatus {
    /// Open a push channel at `url` and start tracking it.
    ///
    /// Returns immediately in the `Connecting` state; the handshake and
    /// the `"ping"` probe happen on a background task.
    pub fn connect(url: impl Into<String>) -> Self {
        let url = url.into();
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run_channel(url, state_tx, shutdown_rx));
        Self {
            state: state_rx,
            shutdown: Some(shutdown_tx),
            task,
        }
    }

    /// Current connectivity
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Badge text for the current state
    pub fn label(&self) -> &'static str {
        self.state().label()
    }

    /// Subscribe to state transitions
    pub fn watch(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Close the channel and wait for the release to finish.
    ///
    /// Valid in any state; the socket is closed exactly once.
    pub async fn close(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.task).await;
    }
}

impl Drop for LiveStatus {
    fn drop(&mut self) {
        // Unmount releases the channel regardless of state.
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn run_channel(
    url: String,
    state: watch::Sender<ConnectionState>,
    mut shutdown: oneshot::Receiver<()>,
) {
    // The handshake races against an early release so a dropped handle
    // never leaks a half-open socket.
    let mut stream = tokio::select! {
        connected = connect_async(url.as_str()) => match connected {
            Ok((stream, _response)) => stream,
            Err(err) => {
                debug!("push channel {url} failed to open: {err}");
                let _ = state.send(ConnectionState::Disconnected);
                return;
            }
        },
        _ = &mut shutdown => return,
    };

    let _ = state.send(ConnectionState::Connected);
    debug!("push channel {url} open");

    // Liveness probe, sent exactly once, immediately on open.
    if stream.send(Message::Text("ping".to_string())).await.is_err() {
        let _ = state.send(ConnectionState::Disconnected);
        return;
    }

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => {
                    debug!("push channel {url} closed");
                    let _ = state.send(ConnectionState::Disconnected);
                    return;
                }
                // Connectivity signaling only; payloads are not consumed.
                Some(Ok(_)) => {}
            },
            _ = &mut shutdown => {
                let _ = stream.close(None).await;
                let _ = state.send(ConnectionState::Disconnected);
                return;
            }
        }
    }
}
