//! Chat room implementation for TelnetChat.
//!
//! A room is a named broadcast group. Members are keyed by [`ClientId`] and
//! reached through their [`Outbox`], so delivering to one member never
//! waits on another member's socket.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use super::outbox::{ClientId, Outbox};

/// A chat room with broadcast messaging.
#[derive(Debug)]
pub struct ChatRoom {
    /// Room name, unique within a registry.
    name: String,
    /// Members indexed by client identity.
    members: RwLock<HashMap<ClientId, Outbox>>,
}

impl ChatRoom {
    /// Create a new empty chat room.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: RwLock::new(HashMap::new()),
        }
    }

    /// Get the room name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of members.
    pub async fn member_count(&self) -> usize {
        self.members.read().await.len()
    }

    /// Snapshot of the member identities.
    pub async fn member_ids(&self) -> Vec<ClientId> {
        self.members.read().await.keys().copied().collect()
    }

    /// Check if a client is a member of the room.
    pub async fn contains(&self, id: ClientId) -> bool {
        self.members.read().await.contains_key(&id)
    }

    /// Add a member.
    ///
    /// Returns true if the client was added, false if it was already a
    /// member (its outbox is replaced either way).
    pub async fn join(&self, outbox: Outbox) -> bool {
        let id = outbox.id();
        let added = self.members.write().await.insert(id, outbox).is_none();
        debug!("Client {} joined room {} (new: {})", id, self.name, added);
        added
    }

    /// Remove a member.
    ///
    /// Returns true if the client was removed, false if it was not a member.
    pub async fn leave(&self, id: ClientId) -> bool {
        let removed = self.members.write().await.remove(&id).is_some();
        if removed {
            debug!("Client {} left room {}", id, self.name);
        }
        removed
    }

    /// Deliver `text` to every member except `from`.
    ///
    /// Returns the number of members the text was queued for.
    pub async fn broadcast(&self, from: ClientId, text: &str) -> usize {
        let members = self.members.read().await;
        members
            .iter()
            .filter(|(id, _)| **id != from)
            .filter(|(_, outbox)| outbox.deliver(text))
            .count()
    }
}
