//! Attachment upload and download for a Let's Chat server.

use crate::error::{self, ChatClientError, Result};
use crate::types::FileInfo;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Files client for a Let's Chat server.
pub struct FilesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> FilesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// List attachments in a room, optionally windowed by `skip`/`take`.
    pub async fn list_files(
        &self,
        room_id: &str,
        skip: Option<u32>,
        take: Option<u32>,
    ) -> Result<Vec<FileInfo>> {
        let mut params = vec![format!("room={}", room_id)];
        if let Some(skip) = skip {
            params.push(format!("skip={}", skip));
        }
        if let Some(take) = take {
            params.push(format!("take={}", take));
        }

        let url = format!("{}/files?{}", self.base_url, params.join("&"));
        debug!(url = %url, room = %room_id, "listing files");

        let response = self
            .http
            .get(&url)
            .basic_auth(self.token, None::<&str>)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let files: Vec<FileInfo> = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse file list: {}", e))
            })?;

            debug!(room = %room_id, files = files.len(), "fetched file list");
            Ok(files)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Upload an attachment to a room.
    ///
    /// The content type sent to the server is guessed from the filename
    /// extension.
    pub async fn upload_file(
        &self,
        room_id: &str,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<FileInfo> {
        let size = bytes.len();
        debug!(room = %room_id, file = %filename, size, "uploading file");

        let file_part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type_for_name(filename))
            .map_err(error::transport)?;

        let form = Form::new()
            .text("room", room_id.to_string())
            .part("file", file_part);

        let url = format!("{}/files", self.base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(self.token, None::<&str>)
            .multipart(form)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let file: FileInfo = response.json().await.map_err(|e| {
                ChatClientError::Protocol(format!("failed to parse upload response: {}", e))
            })?;

            info!(
                file_id = %file.id,
                file = %filename,
                size,
                "file uploaded"
            );

            Ok(file)
        } else if status.as_u16() == 413 {
            Err(ChatClientError::Validation("file too large".to_string()))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Download an attachment into memory.
    pub async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/files/{}", self.base_url, file_id);
        debug!(url = %url, file_id = %file_id, "downloading file");

        let response = self
            .http
            .get(&url)
            .basic_auth(self.token, None::<&str>)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await.map_err(error::transport)?;
            debug!(file_id = %file_id, size = bytes.len(), "file downloaded");
            Ok(bytes.to_vec())
        } else if status.as_u16() == 404 {
            Err(ChatClientError::NotFound(format!("file {}", file_id)))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(error::status(status, error_text))
        }
    }

    /// Download an attachment straight to disk, streaming the body.
    ///
    /// Returns the number of bytes written.
    pub async fn download_file_to(&self, file_id: &str, dest_path: &Path) -> Result<u64> {
        let url = format!("{}/files/{}", self.base_url, file_id);
        debug!(url = %url, file_id = %file_id, dest = %dest_path.display(), "downloading file");

        let response = self
            .http
            .get(&url)
            .basic_auth(self.token, None::<&str>)
            .send()
            .await
            .map_err(error::transport)?;

        let status = response.status();

        if !status.is_success() {
            if status.as_u16() == 404 {
                return Err(ChatClientError::NotFound(format!("file {}", file_id)));
            }
            let error_text = response.text().await.unwrap_or_default();
            return Err(error::status(status, error_text));
        }

        if let Some(parent) = dest_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ChatClientError::Transfer(e.to_string()))?;
            }
        }

        let mut file = File::create(dest_path)
            .await
            .map_err(|e| ChatClientError::Transfer(e.to_string()))?;
        let mut written: u64 = 0;

        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(error::transport)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| ChatClientError::Transfer(e.to_string()))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| ChatClientError::Transfer(e.to_string()))?;

        info!(
            file_id = %file_id,
            dest = %dest_path.display(),
            size = written,
            "file downloaded"
        );

        Ok(written)
    }
}

/// Guess a MIME type from an attachment filename.
fn mime_type_for_name(name: &str) -> &'static str {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") | Some("log") => "text/plain",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type_for_name("shot.png"), "image/png");
        assert_eq!(mime_type_for_name("photo.jpg"), "image/jpeg");
        assert_eq!(mime_type_for_name("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_type_for_name("notes.txt"), "text/plain");
        assert_eq!(mime_type_for_name("report.pdf"), "application/pdf");
        assert_eq!(mime_type_for_name("blob.unknown"), "application/octet-stream");
        assert_eq!(mime_type_for_name("no_extension"), "application/octet-stream");
    }
}
