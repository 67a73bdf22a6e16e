//! Discord side of the bridge: a blocking REST client scoped to one forum
//! channel, plus the JSON shapes it sends and receives.

pub mod client;
pub mod error;
pub mod model;

pub use client::{DiscordClient, DISCORD_API_BASE, REQUEST_TIMEOUT};
pub use error::{Error, Result};
pub use model::{
    find_tag_id, Embed, EmbedField, EmbedFooter, ForumChannel, ForumTag, Thread, ThreadMessage,
};
