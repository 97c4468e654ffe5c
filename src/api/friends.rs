//! Friend requests

use reqwest::StatusCode;

use super::client::BotClient;
use super::error::ApiError;
use crate::models::FriendRequestPayload;

/// Send a friend request to `username`/`discriminator`.
///
/// Returns `Ok(true)` only for HTTP 200. Every call is a fresh request;
/// nothing is deduplicated or retried.
pub async fn send_friend_request(
    client: &BotClient,
    username: &str,
    discriminator: &str,
) -> Result<bool, ApiError> {
    if username.is_empty() {
        return Err(ApiError::EmptyField("username"));
    }
    if discriminator.is_empty() {
        return Err(ApiError::EmptyField("discriminator"));
    }

    let payload = FriendRequestPayload::new(username, discriminator);
    let url = client.endpoints().friend_request();

    let status = client.post_json(url, &payload).await?;
    tracing::info!(
        "Friend request to {}#{} returned HTTP {}",
        username,
        discriminator,
        status.as_u16()
    );

    Ok(status == StatusCode::OK)
}
