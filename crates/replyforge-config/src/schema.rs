//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use replyforge_protocols::{ProviderKind, Tone};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub preferences: Preferences,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub templates: Vec<Template>,
}

/// User preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Tone name applied when the caller picks none. Unknown names fall
    /// back to `professional`.
    #[serde(default = "default_tone")]
    pub default_tone: String,

    #[serde(default = "default_provider")]
    pub preferred_provider: ProviderKind,

    /// How many recent messages a snapshot keeps.
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,

    /// Bound on DOM readiness waits during extraction and insertion.
    #[serde(default = "default_extraction_timeout_ms")]
    pub extraction_timeout_ms: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_tone: default_tone(),
            preferred_provider: default_provider(),
            recent_window: default_recent_window(),
            extraction_timeout_ms: default_extraction_timeout_ms(),
        }
    }
}

impl Preferences {
    pub fn tone(&self) -> Tone {
        Tone::from_name(&self.default_tone)
    }
}

fn default_tone() -> String {
    "professional".to_string()
}

fn default_provider() -> ProviderKind {
    ProviderKind::Anthropic
}

fn default_recent_window() -> usize {
    replyforge_protocols::snapshot::DEFAULT_RECENT_WINDOW
}

fn default_extraction_timeout_ms() -> u64 {
    3000
}

/// Browser debugging endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// URL fragment used to pick the messaging tab among open pages.
    #[serde(default = "default_page_url_hint")]
    pub page_url_hint: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_url_hint: default_page_url_hint(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_page_url_hint() -> String {
    "/messaging/".to_string()
}

/// Per-provider credentials and overrides. One table per provider kind so
/// adding a backend extends the schema instead of a string-keyed map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub anthropic: ProviderSettings,

    #[serde(default)]
    pub openai: ProviderSettings,
}

impl ProvidersConfig {
    pub fn settings_for(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::OpenAi => &self.openai,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// A stored reply template; `content` is raw intent text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl Config {
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Look a template up by id, falling back to an exact name match.
    pub fn template(&self, key: &str) -> Result<&Template, ConfigError> {
        self.templates
            .iter()
            .find(|t| t.id == key)
            .or_else(|| self.templates.iter().find(|t| t.name == key))
            .ok_or_else(|| ConfigError::TemplateNotFound(key.to_string()))
    }

    pub fn add_template(&mut self, name: impl Into<String>, content: impl Into<String>) -> &Template {
        self.templates.push(Template {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            content: content.into(),
        });
        self.templates.last().expect("just pushed")
    }

    /// Remove a template by id or name. Returns whether one was removed.
    pub fn remove_template(&mut self, key: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != key && t.name != key);
        self.templates.len() < before
    }
}
