//! OpenAI text-generation backend for replyforge.

mod api;
mod provider;

pub use provider::OpenAiProvider;
