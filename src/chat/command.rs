//! Chat command parser for TelnetChat.
//!
//! Every input line is a command. A line that cannot be executed yields a
//! [`CommandError`] whose display text is the exact reply sent back to the
//! client.

use thiserror::Error;

/// Help text sent on connect and in reply to unknown commands.
pub const HELP_TEXT: &str = "/nick <name>: get a name, or stay anonymous
/join <room>: join a room, if room doesn't exist the new room will be created
/say <msg>:   send message to everyone in a room
/quit:        disconnects from the chat server";

/// Greeting sent before the help text when a client connects.
pub const WELCOME_TEXT: &str = "Welcome to TelnetChat!";

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Change the display name.
    Nick(String),
    /// Leave the current room and join (or create) another.
    Join(String),
    /// Broadcast a message to the current room.
    Say(String),
    /// Disconnect from the server.
    Quit,
}

impl ChatCommand {
    /// Get the command name.
    pub fn name(&self) -> &'static str {
        match self {
            ChatCommand::Nick(_) => "nick",
            ChatCommand::Join(_) => "join",
            ChatCommand::Say(_) => "say",
            ChatCommand::Quit => "quit",
        }
    }
}

impl std::fmt::Display for ChatCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatCommand::Nick(name) => write!(f, "/nick {name}"),
            ChatCommand::Join(room) => write!(f, "/join {room}"),
            ChatCommand::Say(msg) => write!(f, "/say {msg}"),
            ChatCommand::Quit => write!(f, "/quit"),
        }
    }
}

/// A command that could not be executed.
///
/// These never end a session; the display text is sent to the sender only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// `/nick` without a name.
    #[error("usage: /nick <name>")]
    NickUsage,
    /// `/join` without a room.
    #[error("usage: /join <room>")]
    JoinUsage,
    /// `/say` without a message.
    #[error("usage: /say <msg>")]
    SayUsage,
    /// `/say` before joining any room.
    #[error("join a room first to send a message")]
    NotInRoom,
    /// Unrecognized first token.
    #[error("{}", HELP_TEXT)]
    Unknown(String),
}

/// Parse one input line into a command.
///
/// The line is split on whitespace; everything after the command token is
/// re-joined with single spaces. Matching is case-sensitive and exact.
pub fn parse_input(line: &str) -> Result<ChatCommand, CommandError> {
    let mut tokens = line.split_whitespace();
    let command = tokens.next().unwrap_or_default();
    let args = tokens.collect::<Vec<_>>().join(" ");

    match command {
        "/nick" if args.is_empty() => Err(CommandError::NickUsage),
        "/nick" => Ok(ChatCommand::Nick(args)),
        "/join" if args.is_empty() => Err(CommandError::JoinUsage),
        "/join" => Ok(ChatCommand::Join(args)),
        "/say" if args.is_empty() => Err(CommandError::SayUsage),
        "/say" => Ok(ChatCommand::Say(args)),
        "/quit" => Ok(ChatCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
