//! Test helpers for E2E tests.
//!
//! Provides TestServer, TestClient, and helper functions for E2E testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use telnetchat::config::{ChatConfig, ServerConfig};
use telnetchat::{RoomRegistry, TelnetServer};

/// Default timeout for test operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a client waits before concluding nothing more is coming.
pub const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Number of lines in the greeting (welcome line plus help text).
pub const GREETING_LINES: usize = 5;

/// A chat server running on an OS-assigned local port.
pub struct TestServer {
    addr: SocketAddr,
    registry: Arc<RoomRegistry>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with default settings.
    pub async fn start() -> Self {
        Self::start_with(10, ChatConfig::default()).await
    }

    /// Start a server with a connection cap and chat settings.
    pub async fn start_with(max_connections: usize, chat: ChatConfig) -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_connections,
        };
        let server = TelnetServer::bind(&config).await.unwrap();
        let addr = server.local_addr().unwrap();
        let registry = Arc::new(RoomRegistry::new());

        let handle = {
            let registry = registry.clone();
            tokio::spawn(async move {
                let _ = server.serve(registry, chat).await;
            })
        };

        Self {
            addr,
            registry,
            handle,
        }
    }

    /// Address clients connect to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The registry shared by this server's sessions.
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Connect a client and consume the greeting.
    pub async fn connect(&self) -> TestClient {
        let mut client = TestClient::connect(self.addr).await.unwrap();
        client.skip_greeting().await;
        client
    }

    /// Wait until `room` has exactly `count` members.
    pub async fn wait_for_members(&self, room: &str, count: usize) {
        let wait = async {
            loop {
                if let Some(room) = self.registry.get(room).await {
                    if room.member_count().await == count {
                        return;
                    }
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };
        timeout(DEFAULT_TIMEOUT, wait)
            .await
            .unwrap_or_else(|_| panic!("room {room} never reached {count} members"));
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Line-oriented test client.
pub struct TestClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    /// Connect to the server at the given address.
    pub async fn connect(addr: SocketAddr) -> Result<Self, std::io::Error> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, writer) = stream.into_split();
        Ok(Self {
            lines: BufReader::new(read_half).lines(),
            writer,
        })
    }

    /// Send a line (with LF) to the server.
    pub async fn send_line(&mut self, line: &str) -> Result<(), std::io::Error> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// Send raw bytes to the server.
    pub async fn send_raw(&mut self, data: &[u8]) -> Result<(), std::io::Error> {
        self.writer.write_all(data).await?;
        self.writer.flush().await
    }

    /// Close the sending side of the connection.
    pub async fn shutdown(&mut self) -> Result<(), std::io::Error> {
        self.writer.shutdown().await
    }

    /// Receive one line, or None on EOF or timeout.
    pub async fn recv_line_timeout(&mut self, duration: Duration) -> Option<String> {
        match timeout(duration, self.lines.next_line()).await {
            Ok(Ok(line)) => line,
            Ok(Err(_)) | Err(_) => None,
        }
    }

    /// Receive one line, panicking on EOF or timeout.
    pub async fn recv_line(&mut self) -> String {
        self.recv_line_timeout(DEFAULT_TIMEOUT)
            .await
            .expect("expected a line from the server")
    }

    /// Receive `count` lines.
    pub async fn recv_lines(&mut self, count: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(count);
        for _ in 0..count {
            lines.push(self.recv_line().await);
        }
        lines
    }

    /// Receive one line and compare it with `expected`.
    pub async fn expect_line(&mut self, expected: &str) {
        assert_eq!(self.recv_line().await, expected);
    }

    /// Assert the server sends nothing for a short while.
    pub async fn expect_silence(&mut self) {
        if let Some(line) = self.recv_line_timeout(QUIET_PERIOD).await {
            panic!("unexpected line from server: {line:?}");
        }
    }

    /// Read until the server closes the connection.
    pub async fn expect_eof(&mut self) {
        match timeout(DEFAULT_TIMEOUT, self.lines.next_line()).await {
            Ok(Ok(None)) | Ok(Err(_)) => {}
            Ok(Ok(Some(line))) => panic!("expected EOF, got line {line:?}"),
            Err(_) => panic!("server did not close the connection"),
        }
    }

    /// Consume the welcome line and the help text.
    pub async fn skip_greeting(&mut self) {
        let greeting = self.recv_lines(GREETING_LINES).await;
        assert_eq!(greeting[0], "Welcome to TelnetChat!");
    }

    /// Send `/nick`, consuming the acknowledgement.
    pub async fn nick(&mut self, name: &str) {
        self.send_line(&format!("/nick {name}")).await.unwrap();
        self.expect_line(&format!("all right, I will call you {name}"))
            .await;
    }

    /// Send `/join`, consuming the welcome.
    pub async fn join(&mut self, room: &str) {
        self.send_line(&format!("/join {room}")).await.unwrap();
        self.expect_line(&format!("welcome to {room}")).await;
    }
}
