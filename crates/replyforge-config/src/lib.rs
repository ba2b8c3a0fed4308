//! Configuration and template storage for replyforge.
//!
//! One TOML file under the user config directory holds preferences,
//! browser endpoint settings, provider credentials and reply templates.
//! Template `content` is consumed verbatim as intent text by the prompt
//! builder; no validation is applied to it here.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::{ConfigLoader, ConfigStore};
pub use schema::{
    BrowserConfig, Config, Preferences, ProviderSettings, ProvidersConfig, Template,
};
