//! TelnetChat - a multi-room chat relay
//!
//! Clients connect over Telnet, pick a name, join named rooms and exchange
//! lines with the other members of their room.

pub mod chat;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use chat::{ChatRoom, ChatSession, ClientId, RoomRegistry};
pub use config::Config;
pub use error::{ChatError, Result};
pub use server::{handle_connection, TelnetServer};
