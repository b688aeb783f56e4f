//! Main Let's Chat client.

use crate::auth::AuthClient;
use crate::error::{ChatClientError, Result};
use crate::files::FilesClient;
use crate::messages::MessagesClient;
use crate::rooms::RoomsClient;
use crate::types::{ServerConfig, Session, User};
use crate::users::UsersClient;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Main client for interacting with a Let's Chat server.
///
/// The client holds the base URL and API token and hands out per-domain
/// sub-clients for rooms, messages, files and users. It never caches
/// server-side state; every read is a fresh request, and each call is a
/// single round trip with no hidden retries.
///
/// # Example
///
/// ```ignore
/// use letschat_client::{LetsChatClient, ServerConfig};
///
/// // Create client
/// let config = ServerConfig::new("https://chat.example.com");
/// let client = LetsChatClient::new(config)?;
///
/// // Login
/// let session = client.authenticate("user", "password").await?;
/// println!("logged in as {}", session.user.username);
///
/// // List rooms
/// let rooms = client.rooms().await?;
/// for room in rooms.client().list_rooms(None, None).await? {
///     println!("#{}: {}", room.slug, room.name);
/// }
/// ```
#[derive(Debug)]
pub struct LetsChatClient {
    http: Client,
    config: Arc<RwLock<ServerConfig>>,
}

impl LetsChatClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ChatClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Normalize away trailing slashes before paths are appended
        let url = config.url.trim_end_matches('/').to_string();

        let parsed = Url::parse(&url)
            .map_err(|e| ChatClientError::InvalidUrl(format!("{}: {}", url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ChatClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let timeout = config.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(format!(
                "letschat-client/{}",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| ChatClientError::Transfer(e.to_string()))?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ServerConfig { url, ..config })),
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client holds an API token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.token.is_some()
    }

    /// Get the current token.
    pub async fn token(&self) -> Option<String> {
        self.config.read().await.token.clone()
    }

    /// Set the token directly (e.g., from stored credentials).
    pub async fn set_token(&self, token: String) {
        let mut config = self.config.write().await;
        config.token = Some(token);
    }

    /// Clear the stored token (logout).
    pub async fn logout(&self) {
        let mut config = self.config.write().await;
        config.token = None;
        info!("logged out");
    }

    /// Exchange username and password for an API token.
    ///
    /// On success, the token is stored for subsequent requests.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let url = self.url().await;

        let auth_client = AuthClient::new(&self.http, &url);
        let session = auth_client.login(username, password).await?;

        let mut config = self.config.write().await;
        config.token = Some(session.token.clone());

        Ok(session)
    }

    /// Get the account the current token belongs to.
    pub async fn account(&self) -> Result<User> {
        let (url, token) = self.authed().await?;
        AuthClient::new(&self.http, &url).account(&token).await
    }

    /// Check whether the current token is still accepted by the server.
    pub async fn verify_token(&self) -> Result<bool> {
        let config = self.config.read().await;
        let token = match &config.token {
            Some(t) => t.clone(),
            None => return Ok(false),
        };
        let url = config.url.clone();
        drop(config);

        AuthClient::new(&self.http, &url).validate_token(&token).await
    }

    /// Get a rooms handle for room operations.
    ///
    /// Returns an error if not authenticated.
    pub async fn rooms(&self) -> Result<RoomsHandle> {
        let (url, token) = self.authed().await?;
        Ok(RoomsHandle {
            http: self.http.clone(),
            url,
            token,
        })
    }

    /// Get a messages handle for message operations.
    ///
    /// Returns an error if not authenticated.
    pub async fn messages(&self) -> Result<MessagesHandle> {
        let (url, token) = self.authed().await?;
        Ok(MessagesHandle {
            http: self.http.clone(),
            url,
            token,
        })
    }

    /// Get a files handle for attachment operations.
    ///
    /// Returns an error if not authenticated.
    pub async fn files(&self) -> Result<FilesHandle> {
        let (url, token) = self.authed().await?;
        Ok(FilesHandle {
            http: self.http.clone(),
            url,
            token,
        })
    }

    /// Get a users handle for user queries.
    ///
    /// Returns an error if not authenticated.
    pub async fn users(&self) -> Result<UsersHandle> {
        let (url, token) = self.authed().await?;
        Ok(UsersHandle {
            http: self.http.clone(),
            url,
            token,
        })
    }

    async fn authed(&self) -> Result<(String, String)> {
        let config = self.config.read().await;
        let token = config
            .token
            .clone()
            .ok_or(ChatClientError::AuthRequired)?;
        Ok((config.url.clone(), token))
    }
}

/// Handle for room operations.
///
/// This is returned by `LetsChatClient::rooms()` and carries an
/// authenticated snapshot of the connection state.
#[derive(Debug)]
pub struct RoomsHandle {
    http: Client,
    url: String,
    token: String,
}

impl RoomsHandle {
    /// Get the rooms client.
    pub fn client(&self) -> RoomsClient<'_> {
        RoomsClient::new(&self.http, &self.url, &self.token)
    }
}

// Note: no Deref to the borrowed sub-client; use .client() to get one with
// proper lifetime bounds.

/// Handle for message operations.
pub struct MessagesHandle {
    http: Client,
    url: String,
    token: String,
}

impl MessagesHandle {
    /// Get the messages client.
    pub fn client(&self) -> MessagesClient<'_> {
        MessagesClient::new(&self.http, &self.url, &self.token)
    }
}

/// Handle for attachment operations.
pub struct FilesHandle {
    http: Client,
    url: String,
    token: String,
}

impl FilesHandle {
    /// Get the files client.
    pub fn client(&self) -> FilesClient<'_> {
        FilesClient::new(&self.http, &self.url, &self.token)
    }
}

/// Handle for user queries.
pub struct UsersHandle {
    http: Client,
    url: String,
    token: String,
}

impl UsersHandle {
    /// Get the users client.
    pub fn client(&self) -> UsersClient<'_> {
        UsersClient::new(&self.http, &self.url, &self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(LetsChatClient::new(ServerConfig::new("https://example.com")).is_ok());
        assert!(LetsChatClient::new(ServerConfig::new("http://localhost:5000")).is_ok());

        // Invalid URLs
        assert!(LetsChatClient::new(ServerConfig::new("")).is_err());
        assert!(LetsChatClient::new(ServerConfig::new("not-a-url")).is_err());
        assert!(LetsChatClient::new(ServerConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client =
            LetsChatClient::new(ServerConfig::new("https://example.com/")).expect("valid url");

        // URL should have trailing slash removed
        let url = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(client.url());
        assert_eq!(url, "https://example.com");
    }
}
