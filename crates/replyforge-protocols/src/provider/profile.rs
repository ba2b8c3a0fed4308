//! Provider kinds and their capability profiles.
//!
//! Provider selection is a closed enum with an associated profile record
//! rather than a string-keyed table, so adding a backend forces every
//! `match` over [`ProviderKind`] to be revisited at compile time.

use serde::{Deserialize, Serialize};

/// Which text-generation backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
}

/// How a provider authenticates its HTTP requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// API key in a named header, optionally with a version header.
    ApiKeyHeader {
        header: &'static str,
        version_header: Option<(&'static str, &'static str)>,
    },

    /// `Authorization: Bearer <key>`.
    Bearer,
}

/// Static capability record for one provider kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderProfile {
    pub endpoint: &'static str,
    pub default_model: &'static str,
    pub auth: AuthScheme,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }

    pub fn profile(&self) -> ProviderProfile {
        match self {
            Self::Anthropic => ProviderProfile {
                endpoint: "https://api.anthropic.com/v1/messages",
                default_model: "claude-3-5-sonnet-20241022",
                auth: AuthScheme::ApiKeyHeader {
                    header: "x-api-key",
                    version_header: Some(("anthropic-version", "2023-06-01")),
                },
            },
            Self::OpenAi => ProviderProfile {
                endpoint: "https://api.openai.com/v1/chat/completions",
                default_model: "gpt-4o-mini",
                auth: AuthScheme::Bearer,
            },
        }
    }
}
