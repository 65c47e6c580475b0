//! Telnet server module.
//!
//! This module provides the TCP listener, line input and the per-connection
//! session loop.

mod handler;
pub mod input;
mod listener;

pub use handler::handle_connection;
pub use input::LineReader;
pub use listener::{ConnectionPermit, TelnetServer};
