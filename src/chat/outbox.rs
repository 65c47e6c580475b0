//! Per-session outbound queue.
//!
//! Every write to a client, whether it comes from the client's own session
//! loop or from another session broadcasting into a shared room, goes
//! through that client's [`Outbox`]. A single writer task drains the queue,
//! so lines are never interleaved on the wire.

use std::fmt;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Unique identity of one connection.
///
/// Used as the room membership key. A fresh random value is drawn for every
/// connection, so an identity is never reused while its connection is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// An item queued for a client's writer task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// A line of text; the writer appends the terminator.
    Line(String),
    /// Flush what is queued before this and close the transport.
    Close,
}

/// Cloneable handle for queueing output to one client.
#[derive(Debug, Clone)]
pub struct Outbox {
    id: ClientId,
    tx: mpsc::UnboundedSender<Outbound>,
}

impl Outbox {
    /// Create an outbox and the receiving end its writer task drains.
    pub fn channel(id: ClientId) -> (Self, OutboxReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { id, tx }, OutboxReceiver { id, rx })
    }

    /// Identity of the client this outbox writes to.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Queue a line for delivery.
    ///
    /// Returns false if the client's writer has already shut down. The
    /// failure is logged and otherwise ignored.
    pub fn deliver(&self, text: impl Into<String>) -> bool {
        match self.tx.send(Outbound::Line(text.into())) {
            Ok(()) => true,
            Err(_) => {
                debug!("Dropping message for closed client {}", self.id);
                false
            }
        }
    }

    /// Ask the writer to flush and close the transport.
    pub fn close(&self) {
        let _ = self.tx.send(Outbound::Close);
    }

    /// Check whether the writer side is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving end of an [`Outbox`].
#[derive(Debug)]
pub struct OutboxReceiver {
    id: ClientId,
    rx: mpsc::UnboundedReceiver<Outbound>,
}

impl OutboxReceiver {
    /// Receive the next queued item without waiting.
    pub fn try_recv(&mut self) -> Option<Outbound> {
        self.rx.try_recv().ok()
    }

    /// Drain the queue into `writer` until closed.
    ///
    /// Each line gets a trailing `\n`. A failed write is logged once; later
    /// lines are discarded so that senders are never blocked or failed by a
    /// dead client.
    pub async fn run_writer<W>(mut self, mut writer: W)
    where
        W: AsyncWrite + Unpin,
    {
        let mut broken = false;

        while let Some(item) = self.rx.recv().await {
            match item {
                Outbound::Line(mut text) => {
                    if broken {
                        continue;
                    }
                    text.push('\n');
                    let result = match writer.write_all(text.as_bytes()).await {
                        Ok(()) => writer.flush().await,
                        Err(e) => Err(e),
                    };
                    if let Err(e) = result {
                        warn!("Unable to send message to client {}: {}", self.id, e);
                        broken = true;
                    }
                }
                Outbound::Close => break,
            }
        }

        if let Err(e) = writer.shutdown().await {
            debug!("Shutdown of client {} transport failed: {}", self.id, e);
        }
        debug!("Writer for client {} finished", self.id);
    }
}
