//! Authentication against a Let's Chat server.
//!
//! Every other endpoint authorizes with HTTP Basic using the API token as
//! the username; the server ignores the password. This module handles the
//! credential exchange that produces such a token, plus account lookup.

use crate::error::{self, ChatClientError, Result};
use crate::types::{LoginRequest, Session, User};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Authentication client for a Let's Chat server.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Exchange username and password for an API token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let url = format!("{}/account/login", self.base_url);
        debug!(url = %url, username = %username, "attempting login");

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let session: Session = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse login response: {}", e))
            })?;

            info!(
                username = %session.user.username,
                user_id = %session.user.id,
                "login successful"
            );

            Ok(session)
        } else if status.as_u16() == 401 {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "login rejected");
            Err(ChatClientError::Auth(
                "invalid username or password".to_string(),
            ))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Get the account the token belongs to.
    pub async fn account(&self, token: &str) -> Result<User> {
        let url = format!("{}/account", self.base_url);
        debug!(url = %url, "fetching account");

        let response = self
            .http
            .get(&url)
            .basic_auth(token, None::<&str>)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let user: User = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse account response: {}", e))
            })?;

            Ok(user)
        } else if status.as_u16() == 401 {
            Err(ChatClientError::Auth("token expired or invalid".to_string()))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Check whether a token is still accepted by the server.
    pub async fn validate_token(&self, token: &str) -> Result<bool> {
        match self.account(token).await {
            Ok(_) => Ok(true),
            Err(ChatClientError::Auth(_) | ChatClientError::AuthRequired) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
