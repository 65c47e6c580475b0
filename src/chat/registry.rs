//! Chat room registry for TelnetChat.
//!
//! The registry is the single authority on which rooms exist. It is created
//! once at server start and shared by every session through an `Arc`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::room::ChatRoom;

/// Registry of chat rooms, keyed by name.
///
/// Rooms are created on first use and never removed.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, Arc<ChatRoom>>>,
}

impl RoomRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the room called `name`, creating it if it does not exist.
    ///
    /// Concurrent callers asking for the same name always receive the same
    /// room.
    pub async fn get_or_create(&self, name: &str) -> Arc<ChatRoom> {
        if let Some(room) = self.rooms.read().await.get(name) {
            return room.clone();
        }

        let mut rooms = self.rooms.write().await;
        rooms
            .entry(name.to_string())
            .or_insert_with(|| {
                info!("Created room {}", name);
                Arc::new(ChatRoom::new(name))
            })
            .clone()
    }

    /// Get a room by name.
    pub async fn get(&self, name: &str) -> Option<Arc<ChatRoom>> {
        self.rooms.read().await.get(name).cloned()
    }

    /// Get the number of rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// List all rooms, sorted by name.
    pub async fn list_rooms(&self) -> Vec<RoomInfo> {
        let rooms: Vec<Arc<ChatRoom>> = self.rooms.read().await.values().cloned().collect();

        let mut result = Vec::with_capacity(rooms.len());
        for room in rooms {
            result.push(RoomInfo {
                name: room.name().to_string(),
                member_count: room.member_count().await,
            });
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        result
    }
}

/// Information about a chat room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    /// Room name.
    pub name: String,
    /// Number of members.
    pub member_count: usize,
}
