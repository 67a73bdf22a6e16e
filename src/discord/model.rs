// src/discord/model.rs
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

fn no_tags(tags: &&[String]) -> bool {
    tags.is_empty()
}

/// A tag in a forum channel's tag catalog.
///
/// `id` is assigned by Discord and is `None` only for a tag that is about to
/// be created. Attributes this crate does not model (emoji, moderated flag)
/// are kept in `extra` so that writing the catalog back does not strip them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ForumTag {
    /// A tag that does not exist yet; Discord assigns the id on update.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// The subset of a forum channel resource needed for tag reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForumChannel {
    #[serde(default)]
    pub available_tags: Vec<ForumTag>,
}

/// Exact, case-sensitive lookup of a tag id by name. Tags without an id are skipped.
pub fn find_tag_id<'a>(tags: &'a [ForumTag], name: &str) -> Option<&'a str> {
    tags.iter()
        .filter(|tag| tag.name == name)
        .find_map(|tag| tag.id.as_deref())
}

/// A forum thread as returned on creation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Thread {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Message body shared by thread creation and follow-up posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreadMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl ThreadMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embeds: Vec::new(),
        }
    }

    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.as_deref().map_or(true, str::is_empty) && self.embeds.is_empty()
    }
}

/// Discord rich embed. Every field is optional and omitted from the wire when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// RGB packed into an integer, e.g. `0x2ea043`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    /// ISO-8601 timestamp shown in the embed footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at.to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }

    pub fn footer(mut self, text: impl Into<String>, icon_url: Option<String>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url,
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

// --- Request bodies ---

#[derive(Debug, Serialize)]
pub(crate) struct CreateThreadRequest<'a> {
    pub name: &'a str,
    pub message: &'a ThreadMessage,
    #[serde(skip_serializing_if = "no_tags")]
    pub applied_tags: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateTagsRequest<'a> {
    pub available_tags: &'a [ForumTag],
}

#[derive(Debug, Serialize)]
pub(crate) struct ArchiveThreadRequest {
    pub archived: bool,
}
