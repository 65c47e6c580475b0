//! Per-connection session loop.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tracing::{info, warn};

use super::input::LineReader;
use crate::chat::{ChatSession, ClientId, Flow, Outbox, RoomRegistry};

/// Run one client's session over `stream` until `/quit` or disconnect.
///
/// Output goes through a dedicated writer task so that other sessions can
/// broadcast to this client while this loop is blocked on input.
pub async fn handle_connection<S>(
    stream: S,
    peer_addr: SocketAddr,
    registry: Arc<RoomRegistry>,
    max_line_length: usize,
) where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (read_half, write_half) = tokio::io::split(stream);

    let (outbox, outbox_rx) = Outbox::channel(ClientId::new());
    let writer = tokio::spawn(outbox_rx.run_writer(write_half));

    let mut session = ChatSession::new(peer_addr, outbox, registry);
    let id = session.id();
    info!("Client {} connected from {}", id, peer_addr);

    session.greet();

    let mut reader = LineReader::new(BufReader::new(read_half), max_line_length);
    loop {
        match reader.read_line().await {
            Ok(Some(line)) => {
                if session.handle_line(&line).await == Flow::Disconnect {
                    break;
                }
            }
            Ok(None) => {
                info!("Client {} ({}) closed the connection", id, peer_addr);
                session.disconnect().await;
                break;
            }
            Err(e) => {
                warn!("Unable to read input from client {}: {}", id, e);
                session.disconnect().await;
                break;
            }
        }
    }

    if let Err(e) = writer.await {
        warn!("Writer task for client {} failed: {}", id, e);
    }
}
