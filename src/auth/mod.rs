//! Bot authentication
//!
//! Requests authenticate as a bot account with a static token sent as
//! `Authorization: Bot <token>`. There is no login flow and no refresh.

pub mod tokens;

pub use tokens::{BotToken, TokenError};
