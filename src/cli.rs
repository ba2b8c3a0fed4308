//! CLI definitions for replyforge.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Replyforge CLI.
#[derive(Parser)]
#[command(name = "replyforge")]
#[command(about = "Draft and insert replies on a live messaging page")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Browser debugging endpoint, overriding the configured one
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List open conversation surfaces on the page
    Conversations,

    /// Draft a reply for a conversation
    Draft {
        /// What the reply should say
        intent: Option<String>,

        /// Use a stored template (by id or name) as the intent
        #[arg(long, conflicts_with = "intent")]
        template: Option<String>,

        /// Conversation id from `conversations` (default: the active surface)
        #[arg(long)]
        conversation: Option<String>,

        /// Tone name (professional, casual, brief, enthusiastic, match-conversation)
        #[arg(long)]
        tone: Option<String>,

        /// Free-text tone instruction, overriding --tone
        #[arg(long)]
        custom_tone: Option<String>,

        /// Provider to generate with (anthropic, openai)
        #[arg(long)]
        provider: Option<String>,

        /// Cap on generated tokens
        #[arg(long)]
        max_tokens: Option<u32>,

        /// Place the draft into the compose field after generating
        #[arg(long)]
        insert: bool,
    },

    /// Summarize a conversation
    Summarize {
        /// Conversation id from `conversations` (default: the active surface)
        #[arg(long)]
        conversation: Option<String>,

        /// Provider to generate with (anthropic, openai)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Manage stored reply templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum TemplateAction {
    /// List stored templates
    List,

    /// Store a new template
    Add {
        /// Template name
        name: String,

        /// Intent text the template expands to
        content: String,
    },

    /// Remove a template by id or name
    Remove {
        key: String,
    },
}
