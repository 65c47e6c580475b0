//! Chat session state for TelnetChat.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{debug, info};

use super::command::{parse_input, ChatCommand, CommandError, HELP_TEXT, WELCOME_TEXT};
use super::outbox::{ClientId, Outbox};
use super::registry::RoomRegistry;
use super::room::ChatRoom;

/// Display name used until the client picks one with `/nick`.
pub const DEFAULT_NAME: &str = "anonymous";

/// Reply sent to a client that leaves with `/quit`.
pub const GOODBYE_TEXT: &str = "Sad to see you go =(";

/// Session state representing the current phase of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, no line processed yet.
    Connected,
    /// At least one line processed.
    Active,
    /// Left via `/quit` or lost the transport. Terminal.
    Disconnected,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Connected
    }
}

/// What the session loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop reading and release the transport.
    Disconnect,
}

/// Server-side state of one connected client.
pub struct ChatSession {
    /// Unique connection identity, also the room membership key.
    id: ClientId,
    /// Remote peer address, for logging.
    peer_addr: SocketAddr,
    /// Display name.
    name: String,
    /// Room this session is currently a member of.
    room: Option<Arc<ChatRoom>>,
    /// Outbound queue to this client.
    outbox: Outbox,
    /// Shared room registry.
    registry: Arc<RoomRegistry>,
    state: SessionState,
}

impl ChatSession {
    /// Create a session writing through `outbox`.
    pub fn new(peer_addr: SocketAddr, outbox: Outbox, registry: Arc<RoomRegistry>) -> Self {
        let id = outbox.id();
        debug!("Created new session {} for {}", id, peer_addr);

        Self {
            id,
            peer_addr,
            name: DEFAULT_NAME.to_string(),
            room: None,
            outbox,
            registry,
            state: SessionState::default(),
        }
    }

    /// Get the client identity.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Get the peer address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Get the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the current room, if any.
    pub fn current_room(&self) -> Option<&Arc<ChatRoom>> {
        self.room.as_ref()
    }

    /// Get the name of the current room, if any.
    pub fn room_name(&self) -> Option<&str> {
        self.room.as_deref().map(ChatRoom::name)
    }

    /// Queue a line for this client.
    pub fn deliver(&self, text: impl Into<String>) -> bool {
        self.outbox.deliver(text)
    }

    /// Send the greeting and the command help.
    pub fn greet(&self) {
        self.deliver(WELCOME_TEXT);
        self.deliver(HELP_TEXT);
    }

    /// Replace the display name. Room membership is unaffected.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!("Session {} renamed {} -> {}", self.id, self.name, name);
        self.name = name;
    }

    /// Leave the current room and join `room_name`, creating it if needed.
    ///
    /// The other members are told that this session joined. Joining the
    /// room the session is already in announces again but keeps a single
    /// membership entry.
    pub async fn join_room(&mut self, room_name: &str) -> Arc<ChatRoom> {
        self.leave_current_room().await;

        let room = self.registry.get_or_create(room_name).await;
        room.join(self.outbox.clone()).await;
        room.broadcast(self.id, &format!("> {} joined the room", self.name))
            .await;

        self.room = Some(room.clone());
        room
    }

    /// Broadcast `message` to the other members of the current room.
    ///
    /// Returns the number of members it was queued for.
    pub async fn say(&self, message: &str) -> Result<usize, CommandError> {
        let room = self.room.as_ref().ok_or(CommandError::NotInRoom)?;
        Ok(room
            .broadcast(self.id, &format!("> {} says: {}", self.name, message))
            .await)
    }

    /// Leave the current room, say goodbye and close the transport.
    pub async fn quit(&mut self) {
        info!("Client {} ({}) left", self.id, self.peer_addr);
        self.leave_current_room().await;
        self.deliver(GOODBYE_TEXT);
        self.outbox.close();
        self.state = SessionState::Disconnected;
    }

    /// Tear down after the transport was lost.
    pub async fn disconnect(&mut self) {
        self.leave_current_room().await;
        self.outbox.close();
        self.state = SessionState::Disconnected;
    }

    /// Leave the current room without notifying its members.
    async fn leave_current_room(&mut self) {
        if let Some(room) = self.room.take() {
            room.leave(self.id).await;
        }
    }

    /// Execute a parsed command, delivering its reply to this client.
    pub async fn execute(&mut self, command: ChatCommand) -> Result<Flow, CommandError> {
        debug!("Session {} executing /{}", self.id, command.name());
        match command {
            ChatCommand::Nick(name) => {
                self.deliver(format!("all right, I will call you {name}"));
                self.set_name(name);
            }
            ChatCommand::Join(room_name) => {
                self.join_room(&room_name).await;
                self.deliver(format!("welcome to {room_name}"));
            }
            ChatCommand::Say(message) => {
                self.say(&message).await?;
            }
            ChatCommand::Quit => {
                self.quit().await;
                return Ok(Flow::Disconnect);
            }
        }
        Ok(Flow::Continue)
    }

    /// Interpret and execute one input line.
    ///
    /// Malformed or impossible commands are answered with guidance text and
    /// leave the session unchanged.
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        if self.state == SessionState::Connected {
            self.state = SessionState::Active;
        }

        let result = match parse_input(line) {
            Ok(command) => self.execute(command).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(flow) => flow,
            Err(e) => {
                debug!("Session {} command rejected: {:?}", self.id, e);
                self.deliver(e.to_string());
                Flow::Continue
            }
        }
    }
}
