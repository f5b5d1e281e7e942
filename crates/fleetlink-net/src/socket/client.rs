//! The event-bus socket client.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use fleetlink_core::{Envelope, SocketEvent};
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{Notify, mpsc};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::config::SocketConfig;
use super::registry::{LookupMiss, SubscriberRegistry, SubscriptionId};
use super::state::{Backoff, ConnectionState};
use crate::error::SocketError;

/// Type alias for a connected WebSocket stream.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Command sent to the connection task.
enum Command {
    Send(String),
    Close,
}

/// State shared between the client handle and its connection task.
struct Shared {
    state: Mutex<ConnectionState>,
    registry: Mutex<SubscriberRegistry>,
    watchers: Mutex<Vec<Arc<dyn Fn(bool) + Send + Sync>>>,
    command_tx: Mutex<Option<mpsc::UnboundedSender<Command>>>,
    is_running: AtomicBool,
    /// Woken by `close()` to cancel a pending reconnect sleep.
    shutdown: Notify,
}

impl Shared {
    fn new() -> Self {
        Self {
            state: Mutex::new(ConnectionState::Closed),
            registry: Mutex::new(SubscriberRegistry::new()),
            watchers: Mutex::new(Vec::new()),
            command_tx: Mutex::new(None),
            is_running: AtomicBool::new(false),
            shutdown: Notify::new(),
        }
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.lock() = state;
    }

    /// Invoke every connection watcher, synchronously with the transition.
    ///
    /// Watchers are snapshotted so a watcher may query or mutate the client
    /// without re-entering the lock.
    fn notify_watchers(&self, connected: bool) {
        let watchers = self.watchers.lock().clone();
        for watcher in &watchers {
            watcher(connected);
        }
    }
}

/// A resilient event-bus client over one WebSocket connection.
///
/// The client multiplexes inbound and outbound envelopes across logical
/// channels keyed by `(event, optional drone id)`. It supports:
///
/// - Unconditional reconnection with doubling backoff (no attempt limit)
/// - Subscriptions made before, during, or between connections; the
///   registry outlives every individual connection
/// - Fire-and-forget publishing: an envelope sent while disconnected is
///   dropped, never queued, and no error reaches the caller
/// - Synchronous, registration-ordered callback dispatch
///
/// Failures are reported via `tracing` and the connection-state flag; no
/// operation on this type returns an error. The only terminal state is an
/// explicit [`close`](Self::close).
///
/// # Example
///
/// ```ignore
/// let socket = EventBusSocket::new(SocketConfig::new("localhost", 5678));
///
/// socket.subscribe(SocketEvent::MissionState, |data| {
///     println!("mission state: {data}");
/// });
/// socket.subscribe_drone(SocketEvent::BatteryLevel, "drone-7", |data| {
///     println!("drone-7 battery: {data}");
/// });
///
/// socket.connect();
/// socket.publish_drone(SocketEvent::SetLed, "drone-7", serde_json::json!(true));
/// ```
pub struct EventBusSocket {
    config: SocketConfig,
    shared: Arc<Shared>,
}

impl EventBusSocket {
    /// Create a new client. No connection is attempted until
    /// [`connect`](Self::connect).
    pub fn new(config: SocketConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Shared::new()),
        }
    }

    /// Start the connection task.
    ///
    /// Must be called within a Tokio runtime. If the client is already
    /// running, this is a no-op. A socket that was terminally closed stays
    /// closed until `connect` is called again.
    pub fn connect(&self) {
        if self.shared.is_running.swap(true, Ordering::SeqCst) {
            return; // Already running
        }

        let config = self.config.clone();
        let shared = self.shared.clone();
        tokio::spawn(run(config, shared));
    }

    /// Get the current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.shared.state.lock()
    }

    /// Check if the client currently holds an open connection.
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// Get the URL this client is configured to connect to.
    pub fn url(&self) -> String {
        self.config.url()
    }

    /// Register a watcher invoked with `true`/`false` on every connection
    /// transition, synchronously with the transition itself.
    pub fn on_connection_change<F>(&self, watcher: F)
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.shared.watchers.lock().push(Arc::new(watcher));
    }

    /// Subscribe to a fleet-wide event (one not tied to a specific drone).
    pub fn subscribe<F>(&self, event: SocketEvent, callback: F) -> SubscriptionId
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.shared
            .registry
            .lock()
            .subscribe(event, None, Arc::new(callback))
    }

    /// Subscribe to an event scoped to a specific drone.
    pub fn subscribe_drone<F>(
        &self,
        event: SocketEvent,
        drone_id: impl Into<String>,
        callback: F,
    ) -> SubscriptionId
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.shared
            .registry
            .lock()
            .subscribe(event, Some(drone_id.into()), Arc::new(callback))
    }

    /// Remove a subscription. Returns whether a removal occurred.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.registry.lock().unsubscribe(id)
    }

    /// Publish a fleet-wide event.
    ///
    /// Fire-and-forget: if the connection is not currently open the
    /// envelope is dropped (logged at debug level), not queued.
    pub fn publish(&self, event: SocketEvent, data: Value) {
        self.send_envelope(event, None, data);
    }

    /// Publish an event scoped to a specific drone. Same fire-and-forget
    /// semantics as [`publish`](Self::publish).
    pub fn publish_drone(&self, event: SocketEvent, drone_id: impl Into<String>, data: Value) {
        self.send_envelope(event, Some(drone_id.into()), data);
    }

    /// Terminally close the client.
    ///
    /// Cancels any pending reconnect and prevents further automatic
    /// reconnection; a close frame is sent if a connection is open.
    pub fn close(&self) {
        self.shared.is_running.store(false, Ordering::SeqCst);
        self.shared.shutdown.notify_waiters();
        if let Some(tx) = self.shared.command_tx.lock().as_ref() {
            let _ = tx.send(Command::Close);
        }
    }

    fn send_envelope(&self, event: SocketEvent, drone_id: Option<String>, data: Value) {
        let envelope = Envelope::new(event, drone_id, data);

        let guard = self.shared.command_tx.lock();
        let Some(tx) = guard.as_ref() else {
            tracing::debug!(
                target: "fleetlink_net::socket",
                event = %envelope.event,
                "not connected, dropping outbound envelope"
            );
            return;
        };

        match envelope.to_json() {
            Ok(frame) => {
                if tx.send(Command::Send(frame)).is_err() {
                    tracing::debug!(
                        target: "fleetlink_net::socket",
                        event = %envelope.event,
                        "connection task gone, dropping outbound envelope"
                    );
                }
            }
            Err(err) => {
                tracing::warn!(
                    target: "fleetlink_net::socket",
                    event = %envelope.event,
                    error = %SocketError::MalformedFrame(err),
                    "failed to serialize outbound envelope"
                );
            }
        }
    }
}

impl Drop for EventBusSocket {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for EventBusSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBusSocket")
            .field("url", &self.config.url())
            .field("state", &self.state())
            .finish()
    }
}

/// Supervisor loop: connect, drive the connection, back off, repeat.
async fn run(config: SocketConfig, shared: Arc<Shared>) {
    let url = config.url();
    let mut backoff = Backoff::new(config.backoff.clone());

    loop {
        shared.set_state(ConnectionState::Connecting);

        match tokio_tungstenite::connect_async(url.as_str()).await {
            Ok((stream, _response)) => {
                if !shared.is_running.load(Ordering::SeqCst) {
                    // close() raced the handshake; do not go live.
                    shared.set_state(ConnectionState::Closed);
                    return;
                }

                tracing::info!(target: "fleetlink_net::socket", url = %url, "connection established");
                backoff.reset();

                let (tx, rx) = mpsc::unbounded_channel();
                *shared.command_tx.lock() = Some(tx);
                shared.set_state(ConnectionState::Open);
                shared.notify_watchers(true);

                let closed_by_caller = drive_connection(stream, rx, &shared).await;

                *shared.command_tx.lock() = None;
                shared.set_state(ConnectionState::Closed);
                shared.notify_watchers(false);

                if closed_by_caller {
                    shared.is_running.store(false, Ordering::SeqCst);
                    return;
                }
            }
            Err(err) => {
                tracing::warn!(
                    target: "fleetlink_net::socket",
                    url = %url,
                    error = %SocketError::from(err),
                    "connection attempt failed"
                );
                shared.set_state(ConnectionState::Closed);
            }
        }

        if !shared.is_running.load(Ordering::SeqCst) {
            return;
        }

        let delay = backoff.delay();
        tracing::info!(
            target: "fleetlink_net::socket",
            url = %url,
            delay_ms = delay.as_millis() as u64,
            "connection closed, retrying after backoff"
        );
        backoff.advance();

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shared.shutdown.notified() => return,
        }
        if !shared.is_running.load(Ordering::SeqCst) {
            return;
        }
    }
}

/// Pump one live connection. Returns `true` if the caller closed the
/// client (terminal), `false` on any unexpected closure or error.
async fn drive_connection(
    stream: WsStream,
    mut rx: mpsc::UnboundedReceiver<Command>,
    shared: &Arc<Shared>,
) -> bool {
    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Send(frame)) => {
                    if let Err(err) = write.send(Message::Text(frame.into())).await {
                        tracing::warn!(
                            target: "fleetlink_net::socket",
                            error = %SocketError::from(err),
                            "send failed, closing connection"
                        );
                        return false;
                    }
                }
                Some(Command::Close) | None => {
                    let _ = write.send(Message::Close(None)).await;
                    return true;
                }
            },

            message = read.next() => match message {
                Some(Ok(Message::Text(frame))) => {
                    dispatch_frame(shared, frame.as_str());
                }
                Some(Ok(Message::Close(_))) => {
                    tracing::info!(target: "fleetlink_net::socket", "server closed the connection");
                    return false;
                }
                Some(Ok(_)) => {
                    // Ping/pong are answered by tungstenite; binary frames
                    // are not part of the protocol.
                }
                Some(Err(err)) => {
                    tracing::error!(
                        target: "fleetlink_net::socket",
                        error = %SocketError::from(err),
                        "WebSocket error, closing socket"
                    );
                    return false;
                }
                None => {
                    tracing::info!(target: "fleetlink_net::socket", "connection stream ended");
                    return false;
                }
            },
        }
    }
}

/// Decode one inbound frame and invoke the matching subscribers.
///
/// Every failure mode drops the frame and logs; nothing here can take the
/// connection down.
fn dispatch_frame(shared: &Shared, frame: &str) {
    let envelope = match Envelope::from_json(frame) {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::warn!(
                target: "fleetlink_net::socket",
                error = %SocketError::MalformedFrame(err),
                "dropping malformed frame"
            );
            return;
        }
    };

    let Some(event) = envelope.kind() else {
        tracing::warn!(
            target: "fleetlink_net::socket",
            event = %envelope.event,
            "unknown socket event received"
        );
        return;
    };

    let lookup = shared
        .registry
        .lock()
        .snapshot(event, envelope.drone_id.as_deref());
    let callbacks = match lookup {
        Ok(callbacks) => callbacks,
        Err(LookupMiss::UnknownEvent) => {
            tracing::warn!(
                target: "fleetlink_net::socket",
                event = %event,
                "unknown socket event received"
            );
            return;
        }
        Err(LookupMiss::UnregisteredScope) => {
            tracing::warn!(
                target: "fleetlink_net::socket",
                event = %event,
                drone_id = ?envelope.drone_id,
                "unregistered drone ID for socket event"
            );
            return;
        }
    };

    for callback in &callbacks {
        callback(&envelope.data);
    }
}
