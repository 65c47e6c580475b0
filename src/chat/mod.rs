//! Chat module for TelnetChat.
//!
//! This module provides the multi-room chat core:
//! - Command parsing (/nick, /join, /say, /quit)
//! - Per-session outbound queues
//! - Rooms with sender-excluding broadcast
//! - The shared room registry
//! - Session state and command execution

mod command;
mod outbox;
mod registry;
mod room;
mod session;

pub use command::{parse_input, ChatCommand, CommandError, HELP_TEXT, WELCOME_TEXT};
pub use outbox::{ClientId, Outbound, Outbox, OutboxReceiver};
pub use registry::{RoomInfo, RoomRegistry};
pub use room::ChatRoom;
pub use session::{ChatSession, Flow, SessionState, DEFAULT_NAME, GOODBYE_TEXT};
