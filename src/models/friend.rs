//! Friend request models

use serde::Serialize;

/// JSON body of a friend request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendRequestPayload {
    pub username: String,
    pub discriminator: String,
}

impl FriendRequestPayload {
    pub fn new(username: &str, discriminator: &str) -> Self {
        Self {
            username: username.to_string(),
            discriminator: discriminator.to_string(),
        }
    }
}
