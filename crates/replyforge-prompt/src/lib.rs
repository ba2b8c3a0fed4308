//! Prompt builders for replyforge.
//!
//! Pure, stateless transforms from a [`ConversationSnapshot`] plus caller
//! intent into instruction text for a generation call. Builders never fail:
//! a degraded prompt with placeholder text beats blocking the user action.
//!
//! [`ConversationSnapshot`]: replyforge_protocols::ConversationSnapshot

mod builder;
mod transcript;

pub use builder::{build_response_prompt, build_summary_prompt};
pub use transcript::render_transcript;
