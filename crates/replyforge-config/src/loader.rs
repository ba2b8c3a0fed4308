//! Configuration loading and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// Loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g. `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

/// Read/write handle on the user's config file.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the user config directory.
    pub fn default_location() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(dir.join("replyforge").join("config.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        ConfigLoader::load(&self.path)
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            self.load()
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replyforge_protocols::ProviderKind;
    use tempfile::tempdir;

    #[test]
    fn test_load_empty_config_gets_defaults() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.preferences.default_tone, "professional");
        assert_eq!(config.browser.endpoint, "http://localhost:9222");
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [preferences]
            default_tone = "casual"
            preferred_provider = "openai"

            [browser]
            endpoint = "http://localhost:9333"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.preferences.default_tone, "casual");
        assert_eq!(config.preferences.preferred_provider, ProviderKind::OpenAi);
        assert_eq!(config.browser.endpoint, "http://localhost:9333");
    }

    #[test]
    fn test_load_with_providers_and_templates() {
        let content = r#"
            [providers.anthropic]
            api_key = "sk-test"

            [[templates]]
            id = "t1"
            name = "intro"
            content = "Introduce myself briefly"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.providers.anthropic.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.template("intro").unwrap().id, "t1");
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: unique test-only variable, set and removed within the test
        unsafe {
            std::env::set_var("REPLYFORGE_TEST_KEY", "expanded-key");
        }
        let content = "[providers.openai]\napi_key = \"${REPLYFORGE_TEST_KEY}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.providers.openai.api_key.as_deref(), Some("expanded-key"));
        unsafe {
            std::env::remove_var("REPLYFORGE_TEST_KEY");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "[providers.openai]\napi_key = \"${REPLYFORGE_UNSET_VAR_98765}\"";
        assert!(ConfigLoader::load_str(content).is_err());
    }

    #[test]
    fn test_expand_path() {
        let expanded = ConfigLoader::expand_path("~/replyforge");
        assert!(!expanded.starts_with('~'));
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested").join("config.toml"));

        let mut config = store.load_or_default().unwrap();
        config.add_template("thanks", "Say thanks and confirm receipt");
        config.preferences.default_tone = "brief".to_string();
        store.save(&config).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.preferences.default_tone, "brief");
        assert_eq!(reloaded.templates().len(), 1);
        assert_eq!(reloaded.template("thanks").unwrap().content, "Say thanks and confirm receipt");
    }

    #[test]
    fn test_load_missing_file_errors_but_default_does_not() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("absent.toml"));
        assert!(store.load().is_err());
        assert!(store.load_or_default().is_ok());
    }
}
