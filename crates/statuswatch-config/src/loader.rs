//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file.
    ///
    /// Files with a `.json` extension are parsed as JSON, everything else as TOML.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::load_json_str(&content)
        } else {
            Self::load_str(&content)
        }
    }

    /// Load TOML configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load JSON configuration from a string.
    pub fn load_json_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = serde_json::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.statuswatch`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.check_interval, 60_000);
        assert!(config.webhooks.is_empty());
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            service_name = "Backend"
            health_url = "http://localhost:8080/health"
            check_interval = 5000
            webhooks = ["https://discord.com/api/webhooks/123/token"]
            channels = ["987654321"]
            bot_token = "abc"

            [logging]
            level = "debug"
            file = false
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.service_name, "Backend");
        assert_eq!(config.health_url, "http://localhost:8080/health");
        assert_eq!(config.check_interval, 5000);
        assert_eq!(config.webhooks.len(), 1);
        assert_eq!(config.channels, vec!["987654321".to_string()]);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file);
    }

    #[test]
    fn test_load_toml_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "check_interval = 1500").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.check_interval, 1500);
    }

    #[test]
    fn test_load_legacy_json_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"checkInterval": 10000, "webhooks": [], "channels": ["1"], "botToken": "t"}}"#
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.check_interval, 10_000);
        assert_eq!(config.bot_token(), Some("t"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("webhooks = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let result = ConfigLoader::load_json_str("{\"checkInterval\": }");
        assert!(matches!(result, Err(ConfigError::JsonParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("STATUSWATCH_TEST_TOKEN", "bot-secret");
        }
        let config = ConfigLoader::load_str("bot_token = \"${STATUSWATCH_TEST_TOKEN}\"").unwrap();
        assert_eq!(config.bot_token(), Some("bot-secret"));
        unsafe {
            std::env::remove_var("STATUSWATCH_TEST_TOKEN");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "bot_token = \"${NONEXISTENT_STATUSWATCH_VAR_12345}\"";
        let result = ConfigLoader::load_str(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(ref v)) if v == "NONEXISTENT_STATUSWATCH_VAR_12345"));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/logs");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/logs"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/var/log/statuswatch";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }
}
