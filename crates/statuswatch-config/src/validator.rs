//! Configuration validation.

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Interval below which polling is considered aggressive.
const MIN_RECOMMENDED_INTERVAL_MS: u64 = 1000;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_probe(config, &mut result);
        Self::validate_webhooks(config, &mut result)?;
        Self::validate_channels(config, &mut result);

        if !config.has_targets() {
            result.add_warning(ValidationWarning::new(
                "webhooks",
                "No webhooks or channels configured, transitions will only be logged",
            ));
        }

        Ok(result)
    }

    fn validate_probe(config: &Config, result: &mut ValidationResult) {
        if config.check_interval == 0 {
            result.add_error(ValidationError::new(
                "check_interval",
                "check_interval must be greater than 0",
            ));
        } else if config.check_interval < MIN_RECOMMENDED_INTERVAL_MS {
            result.add_warning(ValidationWarning::new(
                "check_interval",
                format!(
                    "check_interval is very low ({}ms), the health endpoint will be polled aggressively",
                    config.check_interval
                ),
            ));
        }

        if !is_http_url(&config.health_url) {
            result.add_error(ValidationError::new(
                "health_url",
                "health_url must be an http:// or https:// URL",
            ));
        }
    }

    fn validate_webhooks(config: &Config, result: &mut ValidationResult) -> Result<(), ConfigError> {
        let webhook_id = Regex::new(r"/webhooks/\d+/")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for (i, webhook) in config.webhooks.iter().enumerate() {
            let path = format!("webhooks[{}]", i);
            if !is_http_url(webhook) {
                result.add_error(ValidationError::new(
                    path,
                    "webhook must be an http:// or https:// URL",
                ));
            } else if !webhook_id.is_match(webhook) {
                result.add_warning(ValidationWarning::new(
                    path,
                    "webhook URL has no /webhooks/<id>/ segment, failures will be logged without an id",
                ));
            }
        }

        Ok(())
    }

    fn validate_channels(config: &Config, result: &mut ValidationResult) {
        if !config.channels.is_empty() && config.bot_token().is_none() {
            result.add_error(ValidationError::new(
                "bot_token",
                "bot_token is required when channels are configured",
            ));
        }

        for (i, channel) in config.channels.iter().enumerate() {
            if channel.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("channels[{}]", i),
                    "channel id cannot be empty",
                ));
            }
        }

        if !config.channels.is_empty() && !is_http_url(&config.discord_api_base) {
            result.add_error(ValidationError::new(
                "discord_api_base",
                "discord_api_base must be an http:// or https:// URL",
            ));
        }
    }
}

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
