//! Types for Let's Chat API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for connecting to a Let's Chat server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://chat.example.com")
    pub url: String,
    /// API token (if already provisioned)
    pub token: Option<String>,
    /// Per-request timeout; 30 seconds if unset
    pub timeout: Option<Duration>,
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            timeout: None,
        }
    }

    /// Create a config with an existing API token.
    pub fn with_token(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: Some(token.into()),
            timeout: None,
        }
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The authenticated context returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// API token authorizing subsequent requests
    pub token: String,
    /// The account the token belongs to
    pub user: User,
}

// =============================================================================
// Room Types
// =============================================================================

/// A chat room as returned by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    /// URL-safe short name
    pub slug: String,
    pub name: String,
    /// Room topic; absent on rooms created without one
    pub description: Option<String>,
    pub created: String,
    pub last_active: String,
    /// Owner user id
    pub owner: String,
    /// Ids of users currently in the room
    #[serde(default)]
    pub participants: Vec<String>,
}

/// Request body for creating a room.
#[derive(Debug, Clone, Serialize)]
pub struct NewRoom {
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// Partial update for an existing room. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Message Types
// =============================================================================

/// A chat message as returned by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    /// Room id the message was posted to
    pub room: String,
    /// Author user id
    pub owner: String,
    pub text: String,
    pub posted: String,
}

/// Request body for posting a message.
#[derive(Debug, Serialize)]
pub struct NewMessage {
    pub text: String,
    pub room: String,
}

/// Filters passed through to the server when listing messages.
///
/// Nothing is enforced client-side; the server applies the bounds and
/// defaults (500 messages, newest first) for any field left unset.
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    /// Only messages with an id greater than (newer than) this one
    pub since_id: Option<String>,
    /// Only messages posted after this instant
    pub from: Option<DateTime<Utc>>,
    /// Only messages posted at or before this instant
    pub to: Option<DateTime<Utc>>,
    /// Number of messages to discard
    pub skip: Option<u32>,
    /// Number of messages to return (server caps at 5000)
    pub take: Option<u32>,
    /// Set false for chronological order
    pub reverse: Option<bool>,
}

impl MessageQuery {
    /// Shorthand for the common bot loop: everything newer than `id`.
    pub fn since(id: impl Into<String>) -> Self {
        Self {
            since_id: Some(id.into()),
            ..Self::default()
        }
    }
}

// =============================================================================
// User Types
// =============================================================================

/// An account as returned by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    /// Ids of rooms the user has joined
    #[serde(default)]
    pub rooms: Vec<String>,
}

// =============================================================================
// File Types
// =============================================================================

/// Attachment metadata as returned by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Size in bytes
    pub size: u64,
    /// Room id the file was uploaded to
    pub room: String,
    /// Uploader user id
    pub owner: String,
    pub uploaded: String,
}
