// src/bin/gh_discord_bridge.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use gh_discord_bridge::config;
use gh_discord_bridge::discord::{DiscordClient, ThreadMessage};
use gh_discord_bridge::logger;

#[derive(Parser)]
#[command(
    name = "gh-discord-bridge",
    about = "Post GitHub activity to a Discord forum channel"
)]
struct Cli {
    /// Path to bridge.toml (default: <config dir>/gh-discord-bridge/bridge.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MessageArgs {
    /// Plain-text message content
    #[arg(long)]
    content: Option<String>,
    /// JSON file holding a full message object (content and embeds)
    #[arg(long)]
    message: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the forum tag id for a repository, creating the tag if needed
    Tag {
        /// Repository name used as the tag name
        repo: String,
    },
    /// Open a new forum thread and print its id
    CreateThread {
        /// Thread title
        #[arg(long)]
        title: String,
        #[command(flatten)]
        body: MessageArgs,
        /// Repository whose tag is applied (created if missing)
        #[arg(long)]
        repo: Option<String>,
        /// Extra tag ids to apply
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Post a follow-up message to an existing thread
    Post {
        thread_id: String,
        #[command(flatten)]
        body: MessageArgs,
    },
    /// Archive a thread
    Archive { thread_id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli.config.or_else(config::default_config_path);
    let cfg = config::resolve(path.as_deref())?;
    logger::init(&cfg.environment);

    match cli.command {
        Commands::Tag { repo } => cmd_tag(&cfg.client()?, &repo),
        Commands::CreateThread {
            title,
            body,
            repo,
            tags,
        } => {
            let message = build_message(&body)?;
            cmd_create_thread(&cfg.client()?, &title, &message, repo.as_deref(), tags)
        }
        Commands::Post { thread_id, body } => {
            let message = build_message(&body)?;
            cfg.client()?
                .post_message(&thread_id, &message)
                .with_context(|| format!("Failed to post to thread {thread_id}"))?;
            println!("Posted to thread {thread_id}");
            Ok(())
        }
        Commands::Archive { thread_id } => {
            cfg.client()?
                .archive_thread(&thread_id)
                .with_context(|| format!("Failed to archive thread {thread_id}"))?;
            println!("Archived thread {thread_id}");
            Ok(())
        }
    }
}

fn build_message(args: &MessageArgs) -> Result<ThreadMessage> {
    let mut message = match &args.message {
        Some(path) => read_message_file(path)?,
        None => ThreadMessage::default(),
    };
    if let Some(content) = &args.content {
        message.content = Some(content.clone());
    }
    if message.is_empty() {
        anyhow::bail!("Message is empty: pass --content or --message <file>");
    }
    Ok(message)
}

fn read_message_file(path: &Path) -> Result<ThreadMessage> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read message file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse message file {}", path.display()))
}

fn cmd_tag(client: &DiscordClient, repo: &str) -> Result<()> {
    let tag_id = client
        .get_or_create_repo_tag(repo)
        .with_context(|| format!("Failed to resolve forum tag for {repo}"))?;
    println!("{tag_id}");
    Ok(())
}

fn cmd_create_thread(
    client: &DiscordClient,
    title: &str,
    message: &ThreadMessage,
    repo: Option<&str>,
    mut tags: Vec<String>,
) -> Result<()> {
    if let Some(repo) = repo {
        let tag_id = client
            .get_or_create_repo_tag(repo)
            .with_context(|| format!("Failed to resolve forum tag for {repo}"))?;
        if !tags.contains(&tag_id) {
            tags.insert(0, tag_id);
        }
    }
    let thread_id = client
        .create_thread(title, message, &tags)
        .context("Failed to create forum thread")?;
    println!("{thread_id}");
    Ok(())
}
