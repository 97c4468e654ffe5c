//! Data models for bot API requests

mod friend;
mod upload;

pub use friend::*;
pub use upload::*;
