//! Tone selection for generated replies.

use serde::{Deserialize, Serialize};

/// Caller-selected instruction modifier shaping the style of a reply.
///
/// A closed set; `Custom` carries free text supplied by the caller.
/// Callers must validate that custom text is non-empty before building a
/// prompt with it - the prompt builder itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "kebab-case")]
pub enum Tone {
    Professional,
    Casual,
    Brief,
    Enthusiastic,
    MatchConversation,
    Custom(String),
}

impl Tone {
    /// Parse a tone name. Unknown names fall back to `Professional`;
    /// `"custom"` cannot carry text through a bare name and also falls back.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "professional" => Self::Professional,
            "casual" => Self::Casual,
            "brief" => Self::Brief,
            "enthusiastic" => Self::Enthusiastic,
            "match-conversation" | "match_conversation" => Self::MatchConversation,
            _ => Self::Professional,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Brief => "brief",
            Self::Enthusiastic => "enthusiastic",
            Self::MatchConversation => "match-conversation",
            Self::Custom(_) => "custom",
        }
    }

    /// The instruction text appended to response prompts. Fixed table for
    /// the closed variants; `Custom` substitutes the caller text verbatim.
    pub fn instruction(&self) -> &str {
        match self {
            Self::Professional => {
                "Write in a professional, courteous tone suitable for a workplace conversation."
            }
            Self::Casual => "Write in a relaxed, friendly, conversational tone.",
            Self::Brief => "Keep the reply short and to the point, at most two sentences.",
            Self::Enthusiastic => "Write with genuine warmth and enthusiasm.",
            Self::MatchConversation => {
                "Match the tone and level of formality of the conversation shown above."
            }
            Self::Custom(text) => text,
        }
    }
}

impl Default for Tone {
    fn default() -> Self {
        Self::Professional
    }
}

#[cfg(test)]
#[path = "tone_tests.rs"]
mod tests;
