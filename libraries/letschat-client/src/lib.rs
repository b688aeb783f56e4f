//! Let's Chat API Client
//!
//! HTTP client library for the Let's Chat server REST API. Useful for
//! writing clients, bots, or microservice integrations.
//!
//! # Features
//!
//! - **Authentication**: exchange credentials for an API token, account lookup
//! - **Rooms**: list, look up, create, update and delete rooms
//! - **Messages**: filtered history queries and posting
//! - **Files**: attachment listing, upload and download
//! - **Users**: user listing and lookup
//!
//! # Example
//!
//! ```ignore
//! use letschat_client::{LetsChatClient, MessageQuery, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client
//!     let config = ServerConfig::new("https://chat.example.com");
//!     let client = LetsChatClient::new(config)?;
//!
//!     // Login
//!     let session = client.authenticate("user", "password").await?;
//!     println!("logged in as {}", session.user.username);
//!
//!     // Post a message and read it back
//!     let messages = client.messages().await?;
//!     let posted = messages.client().post_message("general", "hello").await?;
//!     let history = messages
//!         .client()
//!         .list_messages("general", &MessageQuery::since(posted.id))
//!         .await?;
//!     println!("{} newer messages", history.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod files;
mod messages;
mod rooms;
mod types;
mod users;

// Re-export main types
pub use client::{FilesHandle, LetsChatClient, MessagesHandle, RoomsHandle, UsersHandle};
pub use error::{ChatClientError, Result};
pub use types::{
    FileInfo, Message, MessageQuery, NewRoom, Room, RoomUpdate, ServerConfig, Session, User,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use files::FilesClient;
pub use messages::MessagesClient;
pub use rooms::RoomsClient;
pub use users::UsersClient;
