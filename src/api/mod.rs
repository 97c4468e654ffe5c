//! Bot API client module
//!
//! The functions here are the CLI-facing layer: every error is turned into a
//! reported failure and a one-line outcome is written to `out` (stdout in
//! the binary).

pub mod client;
pub mod error;
pub mod friends;
pub mod upload;

use std::io::Write;
use std::path::Path;

use self::client::BotClient;
use crate::config::Targets;

pub use self::error::ApiError;

const FRIEND_REQUEST_SENT: &str = "Friend request sent!";
const FRIEND_REQUEST_FAILED: &str = "Failed to send friend request.";
const FILE_SENT: &str = "File sent successfully!";
const FILE_FAILED: &str = "Failed to send file.";

fn outcome_line(
    result: &Result<bool, ApiError>,
    ok: &'static str,
    failed: &'static str,
) -> &'static str {
    match result {
        Ok(true) => ok,
        _ => failed,
    }
}

fn report(
    out: &mut impl Write,
    result: Result<bool, ApiError>,
    what: &str,
    ok: &'static str,
    failed: &'static str,
) -> bool {
    if let Err(ref e) = result {
        tracing::error!("{} failed: {}", what, e);
    }
    let _ = writeln!(out, "{}", outcome_line(&result, ok, failed));
    matches!(result, Ok(true))
}

/// Send one friend request and print the outcome.
pub async fn friend_request(
    out: &mut impl Write,
    client: &BotClient,
    username: &str,
    discriminator: &str,
) -> bool {
    let result = friends::send_friend_request(client, username, discriminator).await;
    report(
        out,
        result,
        "Friend request",
        FRIEND_REQUEST_SENT,
        FRIEND_REQUEST_FAILED,
    )
}

/// Upload one file and print the status code and the outcome.
pub async fn send_file(
    out: &mut impl Write,
    client: &BotClient,
    friend_id: &str,
    file_path: &Path,
) -> bool {
    let result = upload::send_file_to_friend(client, friend_id, file_path, &mut *out).await;
    report(out, result, "File upload", FILE_SENT, FILE_FAILED)
}

/// Friend request, then upload. The upload runs even if the request failed.
/// Returns true only if both succeeded.
pub async fn run(out: &mut impl Write, client: &BotClient, targets: &Targets) -> bool {
    let requested = friend_request(
        &mut *out,
        client,
        &targets.username,
        &targets.discriminator,
    )
    .await;
    let uploaded = send_file(&mut *out, client, &targets.friend_id, &targets.file_path).await;
    requested && uploaded
}
