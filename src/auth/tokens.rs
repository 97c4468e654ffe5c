//! Bot token handling

use std::fmt;

use reqwest::header::HeaderValue;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("no bot token configured")]
    Empty,
    #[error("bot token contains characters not allowed in an HTTP header")]
    InvalidHeader,
}

/// Bot credential, supplied once at startup and never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken {
    raw: String,
    header: HeaderValue,
}

impl BotToken {
    /// Wrap a raw token. Surrounding whitespace (a trailing newline from an
    /// env var or pasted file) is trimmed; the rest must form a valid
    /// `Authorization` header value.
    pub fn new(token: impl Into<String>) -> Result<Self, TokenError> {
        let raw = token.into().trim().to_string();
        if raw.is_empty() {
            return Err(TokenError::Empty);
        }

        let mut header = HeaderValue::from_str(&format!("Bot {}", raw))
            .map_err(|_| TokenError::InvalidHeader)?;
        header.set_sensitive(true);

        Ok(Self { raw, header })
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> HeaderValue {
        self.header.clone()
    }

    /// Short form for display: first four characters, rest hidden.
    pub fn masked(&self) -> String {
        let head: String = self.raw.chars().take(4).collect();
        format!("{}****", head)
    }
}

// Keep the secret out of debug logs
impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BotToken").field(&"<redacted>").finish()
    }
}
