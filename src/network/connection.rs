//! Connection - socket I/O for a single client.
//!
//! Each accepted socket is split into two tasks:
//!
//! ```text
//!   socket ──▶ reader task ──ConnectionEvent──▶ reactor
//!                                                  │
//!   socket ◀── writer task ◀──── send queue ◀──────┘
//! ```
//!
//! Neither task touches server state. The reader frames lines and forwards
//! them; the writer drains a bounded queue of serialized lines.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use ircserv_proto::{LineCodec, ProtocolError};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{Instrument, debug, debug_span, trace};

use crate::config::LimitsConfig;
use crate::state::Uid;

/// Why a connection is being torn down from the transport side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// EOF, or a read or write failure.
    PeerClosed,
    /// The client sent a line over the configured length.
    LineTooLong,
    /// The client stopped draining its send queue.
    SendQExceeded,
}

impl CloseReason {
    /// QUIT reason shown to channel peers.
    pub fn message(self) -> &'static str {
        match self {
            Self::PeerClosed => "Connection closed",
            Self::LineTooLong => "Line too long",
            Self::SendQExceeded => "SendQ exceeded",
        }
    }

    /// Whether the client can still be told why it is being dropped.
    pub fn farewell(self) -> bool {
        matches!(self, Self::LineTooLong)
    }
}

/// Events sent from reader tasks to the reactor.
#[derive(Debug)]
pub enum ConnectionEvent {
    /// One complete line, terminator stripped.
    Line { uid: Uid, line: String },
    /// The reader stopped; no further lines follow for this uid.
    Closed { uid: Uid, reason: CloseReason },
}

/// The reactor's handle on one connection's tasks.
pub struct ConnectionHandle {
    addr: SocketAddr,
    outbound: mpsc::Sender<Arc<str>>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl ConnectionHandle {
    /// Split the socket and start its reader and writer tasks.
    pub fn spawn(
        uid: Uid,
        stream: TcpStream,
        addr: SocketAddr,
        limits: &LimitsConfig,
        events: mpsc::Sender<ConnectionEvent>,
    ) -> Self {
        let (read_half, write_half) = stream.into_split();
        let (outbound, queue) = mpsc::channel(limits.sendq_lines);

        let span = debug_span!("connection", %uid, %addr);
        let reader = tokio::spawn(
            read_loop(uid, read_half, limits.max_line_len, events).instrument(span.clone()),
        );
        let writer = tokio::spawn(write_loop(write_half, queue).instrument(span));

        Self {
            addr,
            outbound,
            reader,
            writer,
        }
    }

    /// Peer address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Queue a line without waiting.
    ///
    /// Fails when the queue is full or the writer has already stopped.
    pub fn send(&self, line: Arc<str>) -> Result<(), CloseReason> {
        self.outbound.try_send(line).map_err(|err| match err {
            TrySendError::Full(_) => CloseReason::SendQExceeded,
            TrySendError::Closed(_) => CloseReason::PeerClosed,
        })
    }

    /// Stop reading and let the writer flush what is queued, then close.
    ///
    /// Returns the writer task so the caller may wait for the flush.
    pub fn close(self) -> JoinHandle<()> {
        self.reader.abort();
        // Dropping the sender ends the writer's queue.
        drop(self.outbound);
        self.writer
    }
}

async fn read_loop(
    uid: Uid,
    read_half: OwnedReadHalf,
    max_line_len: usize,
    events: mpsc::Sender<ConnectionEvent>,
) {
    let mut framed = FramedRead::new(read_half, LineCodec::with_max_len(max_line_len));

    let reason = loop {
        match framed.next().await {
            Some(Ok(line)) => {
                trace!(%line, "received");
                if events.send(ConnectionEvent::Line { uid, line }).await.is_err() {
                    // Reactor is gone.
                    return;
                }
            }
            Some(Err(ProtocolError::LineTooLong { actual, limit })) => {
                debug!(actual, limit, "line too long");
                break CloseReason::LineTooLong;
            }
            Some(Err(err)) => {
                debug!(error = %err, "read failed");
                break CloseReason::PeerClosed;
            }
            None => break CloseReason::PeerClosed,
        }
    };

    let _ = events.send(ConnectionEvent::Closed { uid, reason }).await;
}

async fn write_loop(write_half: OwnedWriteHalf, mut queue: mpsc::Receiver<Arc<str>>) {
    let mut framed = FramedWrite::new(write_half, LineCodec::new());

    while let Some(line) = queue.recv().await {
        if let Err(err) = framed.feed(line).await {
            debug!(error = %err, "write failed");
            return;
        }
        // Batch whatever is already queued into one flush.
        while let Ok(line) = queue.try_recv() {
            if let Err(err) = framed.feed(line).await {
                debug!(error = %err, "write failed");
                return;
            }
        }
        if let Err(err) = SinkExt::<Arc<str>>::flush(&mut framed).await {
            debug!(error = %err, "flush failed");
            return;
        }
    }

    // Queue closed: flush and shut the socket down.
    if let Err(err) = SinkExt::<Arc<str>>::close(&mut framed).await {
        debug!(error = %err, "close failed");
    }
}
