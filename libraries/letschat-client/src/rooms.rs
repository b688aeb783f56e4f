//! Room operations for a Let's Chat server.

use crate::error::{self, ChatClientError, Result};
use crate::types::{NewRoom, Room, RoomUpdate, User};
use reqwest::Client;
use tracing::debug;

/// Rooms client for a Let's Chat server.
pub struct RoomsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> RoomsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// List rooms, optionally windowed by `skip`/`take`.
    pub async fn list_rooms(&self, skip: Option<u32>, take: Option<u32>) -> Result<Vec<Room>> {
        let mut url = format!("{}/rooms", self.base_url);

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

        debug!(url = %url, "listing rooms");

        let response = self
            .http
            .get(&url)
            .basic_auth(self.token, None::<&str>)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let rooms: Vec<Room> = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse room list: {}", e))
            })?;

            debug!(rooms = rooms.len(), "fetched room list");
            Ok(rooms)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Get a single room by id or slug.
    pub async fn get_room(&self, room_id: &str) -> Result<Room> {
        let url = format!("{}/rooms/{}", self.base_url, room_id);
        debug!(url = %url, room = %room_id, "fetching room");

        let response = self
            .http
            .get(&url)
            .basic_auth(self.token, None::<&str>)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let room: Room = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse room response: {}", e))
            })?;

            Ok(room)
        } else if status.as_u16() == 404 {
            Err(ChatClientError::NotFound(format!("room {}", room_id)))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Create a room.
    pub async fn create_room(&self, room: &NewRoom) -> Result<Room> {
        let url = format!("{}/rooms", self.base_url);
        debug!(url = %url, slug = %room.slug, "creating room");

        let response = self
            .http
            .post(&url)
            .basic_auth(self.token, None::<&str>)
            .json(room)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let created: Room = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse room response: {}", e))
            })?;

            debug!(room = %created.id, slug = %created.slug, "room created");
            Ok(created)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Update a room's name and/or description.
    pub async fn update_room(&self, room_id: &str, update: &RoomUpdate) -> Result<()> {
        let url = format!("{}/rooms/{}", self.base_url, room_id);
        debug!(url = %url, room = %room_id, "updating room");

        let response = self
            .http
            .put(&url)
            .basic_auth(self.token, None::<&str>)
            .json(update)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 404 {
            Err(ChatClientError::NotFound(format!("room {}", room_id)))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Delete a room.
    pub async fn delete_room(&self, room_id: &str) -> Result<()> {
        let url = format!("{}/rooms/{}", self.base_url, room_id);
        debug!(url = %url, room = %room_id, "deleting room");

        let response = self
            .http
            .delete(&url)
            .basic_auth(self.token, None::<&str>)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            debug!(room = %room_id, "room deleted");
            Ok(())
        } else if status.as_u16() == 404 {
            // Already deleted, that's fine
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// List the users currently in a room.
    pub async fn room_users(&self, room_id: &str) -> Result<Vec<User>> {
        let url = format!("{}/rooms/{}/users", self.base_url, room_id);
        debug!(url = %url, room = %room_id, "listing room users");

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

            debug!(room = %room_id, users = users.len(), "fetched room users");
            Ok(users)
        } else if status.as_u16() == 404 {
            Err(ChatClientError::NotFound(format!("room {}", room_id)))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }
}
