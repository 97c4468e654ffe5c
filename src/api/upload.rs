//! File uploads to a friend

use std::io::Write;
use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use super::client::BotClient;
use super::error::ApiError;
use crate::models::FileUploadTarget;

/// Upload the file at `file_path` to `friend_id` as multipart part `file`.
///
/// The file is read in full before the request is built, so a missing or
/// unreadable file fails with [`ApiError::FileAccess`] without touching the
/// network, and the handle is already closed when the request goes out.
/// The status code is written to `out` whatever the outcome; only HTTP 200
/// counts as success.
pub async fn send_file_to_friend(
    client: &BotClient,
    friend_id: &str,
    file_path: &Path,
    out: &mut impl Write,
) -> Result<bool, ApiError> {
    if friend_id.is_empty() {
        return Err(ApiError::EmptyField("friend_id"));
    }
    if file_path.as_os_str().is_empty() {
        return Err(ApiError::EmptyField("file_path"));
    }

    let target = FileUploadTarget::new(friend_id, file_path);
    let url = client.endpoints().upload(&target.recipient_id)?;
    let contents = tokio::fs::read(&target.file_path)
        .await
        .map_err(|source| ApiError::FileAccess {
            path: target.file_path.clone(),
            source,
        })?;

    tracing::debug!(
        "Uploading {} ({} bytes) to {}",
        target.file_path.display(),
        contents.len(),
        target.recipient_id
    );

    let part = Part::bytes(contents).file_name(target.file_name());
    let form = Form::new().part("file", part);

    let status = client.post_multipart(&url, form).await?;
    tracing::info!(
        "Upload to {} returned HTTP {}",
        target.recipient_id,
        status.as_u16()
    );
    // A closed stdout is not an upload failure
    let _ = writeln!(out, "{}", status.as_u16());

    Ok(status == StatusCode::OK)
}
