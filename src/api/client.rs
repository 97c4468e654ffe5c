//! Authenticated HTTP client for the bot API
//!
//! Wraps reqwest::Client with the `Bot <token>` authorization header and the
//! two configured endpoints. Every call is attempted once; the caller decides
//! what a status code means.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::Form;
use reqwest::StatusCode;
use serde::Serialize;
use url::Url;

use super::error::ApiError;
use crate::auth::BotToken;

/// Placeholder replaced by the recipient id in the upload URL template.
pub const FRIEND_ID_PLACEHOLDER: &str = "{friend_id}";

/// Friend-request URL plus the upload URL template.
#[derive(Debug, Clone)]
pub struct Endpoints {
    friend_request: Url,
    upload_template: String,
}

impl Endpoints {
    pub fn new(friend_request: &str, upload_template: &str) -> Result<Self, ApiError> {
        let friend_request = Url::parse(friend_request).map_err(|source| ApiError::InvalidUrl {
            url: friend_request.to_string(),
            source,
        })?;

        Ok(Self {
            friend_request,
            upload_template: upload_template.to_string(),
        })
    }

    pub fn friend_request(&self) -> &Url {
        &self.friend_request
    }

    /// Upload URL for one recipient. The id must be a single path segment
    /// of unreserved characters so it cannot change the target path, query
    /// or fragment.
    pub fn upload(&self, friend_id: &str) -> Result<Url, ApiError> {
        if !is_path_segment(friend_id) {
            return Err(ApiError::InvalidField {
                field: "friend_id",
                value: friend_id.to_string(),
            });
        }
        let raw = self.upload_template.replace(FRIEND_ID_PLACEHOLDER, friend_id);
        Url::parse(&raw).map_err(|source| ApiError::InvalidUrl { url: raw, source })
    }
}

fn is_path_segment(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}

/// Client for the bot API. Holds the credential for the whole run.
pub struct BotClient {
    http: reqwest::Client,
    token: BotToken,
    endpoints: Endpoints,
}

impl BotClient {
    /// Build the client. `timeout` of `None` keeps reqwest's default (no timeout).
    pub fn new(
        token: BotToken,
        endpoints: Endpoints,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        // A redirect is reported as a non-200 outcome, never followed
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Client)?;

        Ok(Self {
            http,
            token,
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// POST a JSON body (`Content-Type: application/json`).
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: &T,
    ) -> Result<StatusCode, ApiError> {
        tracing::debug!("POST {} (json)", url);

        let resp = self
            .http
            .post(url.clone())
            .header(AUTHORIZATION, self.token.authorization())
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok(resp.status())
    }

    /// POST a multipart form. reqwest sets the content type and boundary.
    pub async fn post_multipart(&self, url: &Url, form: Form) -> Result<StatusCode, ApiError> {
        tracing::debug!("POST {} (multipart)", url);

        let resp = self
            .http
            .post(url.clone())
            .header(AUTHORIZATION, self.token.authorization())
            .multipart(form)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok(resp.status())
    }
}
