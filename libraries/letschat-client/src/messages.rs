//! Message operations for a Let's Chat server.

use crate::error::{self, ChatClientError, Result};
use crate::types::{Message, MessageQuery, NewMessage};
use chrono::SecondsFormat;
use reqwest::Client;
use tracing::debug;

/// Messages client for a Let's Chat server.
pub struct MessagesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> MessagesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// List messages in a room, in server-defined order.
    ///
    /// All filtering happens server-side; the query is passed through
    /// verbatim.
    pub async fn list_messages(
        &self,
        room_id: &str,
        query: &MessageQuery,
    ) -> Result<Vec<Message>> {
        let mut params = vec![format!("room={}", room_id)];
        if let Some(id) = &query.since_id {
            params.push(format!("since_id={}", id));
        }
        if let Some(from) = &query.from {
            params.push(format!(
                "from={}",
                from.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
        if let Some(to) = &query.to {
            params.push(format!(
                "to={}",
                to.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
        if let Some(skip) = query.skip {
            params.push(format!("skip={}", skip));
        }
        if let Some(take) = query.take {
            params.push(format!("take={}", take));
        }
        if let Some(reverse) = query.reverse {
            params.push(format!("reverse={}", reverse));
        }

        let url = format!("{}/messages?{}", self.base_url, params.join("&"));
        debug!(url = %url, room = %room_id, "listing messages");

        let response = self
            .http
            .get(&url)
            .basic_auth(self.token, None::<&str>)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let messages: Vec<Message> = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse message list: {}", e))
            })?;

            debug!(room = %room_id, messages = messages.len(), "fetched messages");
            Ok(messages)
        } else if status.as_u16() == 404 {
            Err(ChatClientError::NotFound(format!("room {}", room_id)))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Post a message to a room.
    ///
    /// Empty or over-long text is rejected by the server, not here; the
    /// rejection surfaces as a `Validation` error.
    pub async fn post_message(&self, room_id: &str, text: &str) -> Result<Message> {
        let url = format!("{}/messages", self.base_url);
        debug!(url = %url, room = %room_id, chars = text.len(), "posting message");

        let request = NewMessage {
            text: text.to_string(),
            room: room_id.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .basic_auth(self.token, None::<&str>)
            .json(&request)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let message: Message = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse message response: {}", e))
            })?;

            debug!(room = %room_id, message = %message.id, "message posted");
            Ok(message)
        } else if status.as_u16() == 404 {
            Err(ChatClientError::NotFound(format!("room {}", room_id)))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }
}
