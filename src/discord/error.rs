// src/discord/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by [`DiscordClient`](super::DiscordClient).
///
/// Nothing is retried locally; the caller decides whether to skip, abort or
/// retry the event that triggered the call.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body could not be encoded as JSON.
    #[error("failed to encode {what} request: {source}")]
    Request {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be sent or the response could not be read,
    /// including the request timeout.
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// Discord answered with a status the operation does not accept. `body`
    /// is the raw response text.
    #[error("discord API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// The response body was not valid JSON or did not have the expected shape.
    #[error("failed to parse {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The tag catalog update succeeded but the new tag is missing from it.
    #[error("tag {0:?} created but not found in response")]
    TagNotFound(String),
}

impl Error {
    /// HTTP status for [`Error::Api`], `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
