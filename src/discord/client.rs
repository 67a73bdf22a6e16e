// src/discord/client.rs
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use super::error::{Error, Result};
use super::model::{
    find_tag_id, ArchiveThreadRequest, CreateThreadRequest, ForumChannel, ForumTag, Thread,
    ThreadMessage, UpdateTagsRequest,
};

pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Upper bound on every single request, connect through body read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const OK: u16 = 200;
const CREATED: u16 = 201;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// Status code and raw body of a completed round trip.
struct RawResponse {
    status: u16,
    body: String,
}

impl RawResponse {
    /// Keep the body if the status is one the operation accepts.
    fn expect(self, accepted: &[u16]) -> Result<String> {
        if accepted.contains(&self.status) {
            Ok(self.body)
        } else {
            Err(Error::Api {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Blocking client for a single Discord forum channel.
///
/// Holds no mutable state besides the agent's connection pool, so one
/// instance can be shared across threads. No call is retried.
#[derive(Clone)]
pub struct DiscordClient {
    token: String,
    forum_channel_id: String,
    api_base: String,
    agent: ureq::Agent,
}

impl fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordClient")
            .field("forum_channel_id", &self.forum_channel_id)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl DiscordClient {
    pub fn new(token: impl Into<String>, forum_channel_id: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build();
        Self {
            token: token.into(),
            forum_channel_id: forum_channel_id.into(),
            api_base: DISCORD_API_BASE.to_string(),
            agent: ureq::Agent::new_with_config(config),
        }
    }

    /// Point the client at a different API root (a proxy or a test server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn forum_channel_id(&self) -> &str {
        &self.forum_channel_id
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn forum_url(&self) -> String {
        self.api_url(&format!("/channels/{}", self.forum_channel_id))
    }

    // --- Transport ---

    /// Send one authenticated request. `body` is ignored for GET.
    fn send(&self, method: Method, url: &str, body: Option<Vec<u8>>) -> Result<RawResponse> {
        let auth = format!("Bot {}", self.token);
        let sent = match method {
            Method::Get => self.agent.get(url).header("Authorization", &auth).call(),
            Method::Post | Method::Patch => {
                let request = if method == Method::Post {
                    self.agent.post(url)
                } else {
                    self.agent.patch(url)
                };
                let request = request.header("Authorization", &auth);
                match body {
                    Some(payload) => request
                        .header("Content-Type", "application/json")
                        .send(&payload[..]),
                    None => request.send_empty(),
                }
            }
        };

        let transport = |source: ureq::Error| Error::Transport {
            method: method.as_str(),
            url: url.to_string(),
            source,
        };
        let mut response = sent.map_err(transport)?;
        let status = response.status().as_u16();
        // Error bodies are diagnostics; invalid UTF-8 must not hide the status.
        let bytes = response.body_mut().read_to_vec().map_err(transport)?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug!(method = method.as_str(), url, status, "discord request");
        Ok(RawResponse { status, body })
    }

    fn send_json<T: Serialize>(
        &self,
        method: Method,
        url: &str,
        what: &'static str,
        body: &T,
    ) -> Result<RawResponse> {
        let payload =
            serde_json::to_vec(body).map_err(|source| Error::Request { what, source })?;
        self.send(method, url, Some(payload))
    }

    fn decode<T: DeserializeOwned>(what: &'static str, body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|source| Error::Decode { what, source })
    }

    // --- Tags ---

    /// Fetch the forum channel and its tag catalog.
    pub fn fetch_forum_channel(&self) -> Result<ForumChannel> {
        let body = self.send(Method::Get, &self.forum_url(), None)?.expect(&[OK])?;
        Self::decode("channel", &body)
    }

    /// Replace the forum's whole tag catalog with `tags`.
    fn update_forum_tags(&self, tags: &[ForumTag]) -> Result<ForumChannel> {
        let request = UpdateTagsRequest {
            available_tags: tags,
        };
        let body = self
            .send_json(Method::Patch, &self.forum_url(), "channel tags", &request)?
            .expect(&[OK])?;
        Self::decode("updated channel", &body)
    }

    /// Resolve `repo_name` to a forum tag id, creating the tag if it is missing.
    ///
    /// The fetch and the update are two separate requests against the same
    /// channel resource. Two concurrent first-time calls for one repository
    /// can both append the tag, leaving a duplicate or losing one of the
    /// additions. Callers that need exactly one tag per repository must
    /// serialize calls per repository; later calls reuse whichever tag
    /// survived.
    pub fn get_or_create_repo_tag(&self, repo_name: &str) -> Result<String> {
        let channel = self.fetch_forum_channel()?;
        if let Some(id) = find_tag_id(&channel.available_tags, repo_name) {
            return Ok(id.to_string());
        }

        let mut tags = channel.available_tags;
        tags.push(ForumTag::new(repo_name));
        let updated = self.update_forum_tags(&tags)?;

        match find_tag_id(&updated.available_tags, repo_name) {
            Some(id) => {
                info!(repo = repo_name, tag_id = id, "created forum tag");
                Ok(id.to_string())
            }
            None => Err(Error::TagNotFound(repo_name.to_string())),
        }
    }

    // --- Threads ---

    /// Open a new forum thread and return its id.
    pub fn create_thread(
        &self,
        title: &str,
        message: &ThreadMessage,
        tag_ids: &[String],
    ) -> Result<String> {
        let url = self.api_url(&format!("/channels/{}/threads", self.forum_channel_id));
        let request = CreateThreadRequest {
            name: title,
            message,
            applied_tags: tag_ids,
        };
        let body = self
            .send_json(Method::Post, &url, "thread", &request)?
            .expect(&[CREATED])?;
        let thread: Thread = Self::decode("thread", &body)?;
        info!(thread_id = %thread.id, title, "created forum thread");
        Ok(thread.id)
    }

    /// Post a follow-up message to an existing thread.
    pub fn post_message(&self, thread_id: &str, message: &ThreadMessage) -> Result<()> {
        let url = self.api_url(&format!("/channels/{thread_id}/messages"));
        // Discord answers 200 or 201 depending on the message shape.
        self.send_json(Method::Post, &url, "message", message)?
            .expect(&[OK, CREATED])?;
        Ok(())
    }

    /// Archive a thread. There is no way back through this client.
    pub fn archive_thread(&self, thread_id: &str) -> Result<()> {
        let url = self.api_url(&format!("/channels/{thread_id}"));
        let request = ArchiveThreadRequest { archived: true };
        self.send_json(Method::Patch, &url, "archive", &request)?
            .expect(&[OK])?;
        info!(thread_id, "archived forum thread");
        Ok(())
    }
}
