//! Gateway - TCP listener and the reactor loop.
//!
//! The Gateway binds the listening socket and then runs as a single task that
//! exclusively owns the [`Matrix`]. It waits on three sources: the shutdown
//! token, the listener, and the event queue fed by connection readers. Every
//! event is handled to completion, after which the resulting [`Outbox`] is
//! flushed into the per-connection send queues.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use futures_util::FutureExt;
use futures_util::SinkExt;
use ircserv_proto::{LineCodec, Message};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::codec::FramedWrite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::connection::{CloseReason, ConnectionEvent, ConnectionHandle};
use crate::config::Config;
use crate::handlers::{Outbox, Registry, close_session};
use crate::state::{Matrix, Uid};

/// Capacity of the reader-to-reactor event queue.
const EVENT_QUEUE_LEN: usize = 1024;

/// How long shutdown waits for send queues to drain.
const SHUTDOWN_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// The listening socket plus all server state.
pub struct Gateway {
    listener: TcpListener,
    matrix: Matrix,
    registry: Registry,
    connections: HashMap<Uid, ConnectionHandle>,
    outbox: Outbox,
    events_tx: mpsc::Sender<ConnectionEvent>,
    events_rx: mpsc::Receiver<ConnectionEvent>,
}

impl Gateway {
    /// Bind the listener and build the initial server state.
    pub async fn bind(config: &Config) -> anyhow::Result<Self> {
        let addr = config.listen.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!(%addr, "Listener bound");

        let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_LEN);

        Ok(Self {
            listener,
            matrix: Matrix::new(config),
            registry: Registry::new(config.limits.max_targets),
            connections: HashMap::new(),
            outbox: Outbox::new(),
            events_tx,
            events_rx,
        })
    }

    /// The bound address; useful when binding port 0.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the reactor until `shutdown` is cancelled, then close every
    /// connection.
    #[instrument(skip_all, name = "reactor")]
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(server = %self.matrix.server_info.name, "Reactor started");

        loop {
            tokio::select! {
                biased;

                () = shutdown.cancelled() => break,

                accepted = self.listener.accept() => {
                    self.on_accept(accepted);
                    self.drain_backlog();
                }

                Some(event) = self.events_rx.recv() => self.on_event(event),
            }

            self.flush();
        }

        self.shutdown().await;
    }

    /// Accept whatever else is already pending without waiting.
    fn drain_backlog(&mut self) {
        while let Some(accepted) = self.listener.accept().now_or_never() {
            let failed = accepted.is_err();
            self.on_accept(accepted);
            if failed {
                break;
            }
        }
    }

    fn on_accept(&mut self, accepted: io::Result<(TcpStream, SocketAddr)>) {
        let (stream, addr) = match accepted {
            Ok(pair) => pair,
            Err(err) => {
                warn!(error = %err, "Failed to accept connection");
                return;
            }
        };

        if self.connections.len() >= self.matrix.limits.max_connections {
            warn!(%addr, limit = self.matrix.limits.max_connections, "Connection limit reached, rejecting");
            tokio::spawn(reject(stream));
            return;
        }

        let uid = self.matrix.sessions.create(addr);
        let handle = ConnectionHandle::spawn(uid, stream, addr, &self.matrix.limits, self.events_tx.clone());
        self.connections.insert(uid, handle);
        info!(%uid, %addr, "Connection accepted");
    }

    fn on_event(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Line { uid, line } => {
                // Lines still in flight from a connection that was just closed.
                if !self.connections.contains_key(&uid) {
                    return;
                }
                self.registry.handle_line(&mut self.matrix, uid, &line, &mut self.outbox);
            }
            ConnectionEvent::Closed { uid, reason } => {
                self.drop_session(uid, reason);
            }
        }
    }

    fn drop_session(&mut self, uid: Uid, reason: CloseReason) {
        close_session(&mut self.matrix, uid, reason.message(), reason.farewell(), &mut self.outbox);
    }

    /// Move queued lines into the send queues and close marked connections.
    ///
    /// A connection whose queue is full is torn down, which can queue QUIT
    /// lines for others, so this repeats until nothing is left.
    fn flush(&mut self) {
        while !self.outbox.is_empty() {
            let messages = std::mem::take(&mut self.outbox.messages);
            let disconnects = std::mem::take(&mut self.outbox.disconnects);
            let mut failed: Vec<(Uid, CloseReason)> = Vec::new();

            for (uid, line) in messages {
                let Some(conn) = self.connections.get(&uid) else {
                    continue;
                };
                if failed.iter().any(|(f, _)| *f == uid) {
                    continue;
                }
                if let Err(reason) = conn.send(line) {
                    failed.push((uid, reason));
                }
            }

            for uid in disconnects {
                if let Some(conn) = self.connections.remove(&uid) {
                    debug!(%uid, addr = %conn.addr(), "Closing connection");
                    // The writer finishes on its own once the queue drains.
                    drop(conn.close());
                }
            }

            for (uid, reason) in failed {
                warn!(%uid, reason = reason.message(), "Dropping connection");
                self.drop_session(uid, reason);
            }
        }
    }

    async fn shutdown(mut self) {
        info!(
            connections = self.connections.len(),
            sessions = self.matrix.sessions.len(),
            channels = self.matrix.channels.len(),
            "Shutting down"
        );

        let notice: Arc<str> =
            Message::command("ERROR", vec![], Some("Server shutting down".to_string()))
                .to_string()
                .into();

        let writers: Vec<_> = self
            .connections
            .drain()
            .map(|(_, conn)| {
                let _ = conn.send(Arc::clone(&notice));
                conn.close()
            })
            .collect();

        let flushed = futures_util::future::join_all(writers);
        if tokio::time::timeout(SHUTDOWN_FLUSH_TIMEOUT, flushed).await.is_err() {
            warn!("Timed out flushing connections");
        }
        info!("Shutdown complete");
    }
}

/// Tell a client the server is full and close the socket.
async fn reject(stream: TcpStream) {
    let mut framed = FramedWrite::new(stream, LineCodec::new());
    let notice = Message::command("ERROR", vec![], Some("Server is full".to_string())).to_string();
    if let Err(err) = framed.send(notice).await {
        debug!(error = %err, "Failed to send rejection");
    }
    let _ = SinkExt::<String>::close(&mut framed).await;
}
