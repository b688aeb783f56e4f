//! User queries for a Let's Chat server.

use crate::error::{self, ChatClientError, Result};
use crate::types::User;
use reqwest::Client;
use tracing::debug;

/// Users client for a Let's Chat server.
pub struct UsersClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// List accounts known to the server, optionally windowed by `skip`/`take`.
    pub async fn list_users(&self, skip: Option<u32>, take: Option<u32>) -> Result<Vec<User>> {
        let mut url = format!("{}/users", self.base_url);

        let mut params = Vec::new();
        if let Some(skip) = skip {
            params.push(format!("skip={}", skip));
        }
        if let Some(take) = take {
            params.push(format!("take={}", take));
        }
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }

        debug!(url = %url, "listing users");

        let response = self
            .http
            .get(&url)
            .basic_auth(self.token, None::<&str>)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let users: Vec<User> = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse user list: {}", e))
            })?;

            debug!(users = users.len(), "fetched user list");
            Ok(users)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Get a single account by id.
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        debug!(url = %url, user = %user_id, "fetching user");

        let response = self
            .http
            .get(&url)
            .basic_auth(self.token, None::<&str>)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let user: User = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse user response: {}", e))
            })?;

            Ok(user)
        } else if status.as_u16() == 404 {
            Err(ChatClientError::NotFound(format!("user {}", user_id)))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }
}
