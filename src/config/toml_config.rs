use crate::core::transport::DEFAULT_TIMEOUT_SECONDS;
use crate::core::ConfigProvider;
use crate::utils::error::{ConsoleError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub registry: RegistryConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl ConsoleConfig {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            registry: RegistryConfig {
                base_url: base_url.into(),
            },
            http: HttpConfig { timeout_seconds },
        }
    }

    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConsoleError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConsoleError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ConsoleConfig {
    fn validate(&self) -> Result<()> {
        validate_url("registry.base_url", &self.registry.base_url)?;
        validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)?;
        Ok(())
    }
}

impl ConfigProvider for ConsoleConfig {
    fn registry_url(&self) -> &str {
        &self.registry.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.http.timeout_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_config_parsing() {
        let toml_content = r#"
[registry]
base_url = "http://localhost:8080/"

[http]
timeout_seconds = 3
"#;
        let config = ConsoleConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.registry_url(), "http://localhost:8080/");
        assert_eq!(config.timeout_seconds(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_defaults_when_http_section_missing() {
        let config = ConsoleConfig::from_toml_str("[registry]\nbase_url = \"http://catalogue:8080\"\n").unwrap();
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CATALOGUE_ADMIN_TEST_REGISTRY", "http://registry.test:8080");
        let config = ConsoleConfig::from_toml_str(
            "[registry]\nbase_url = \"${CATALOGUE_ADMIN_TEST_REGISTRY}\"\n",
        )
        .unwrap();
        assert_eq!(config.registry_url(), "http://registry.test:8080");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = ConsoleConfig::new("http://localhost:8080", 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_registry_section_is_config_error() {
        let err = ConsoleConfig::from_toml_str("[http]\ntimeout_seconds = 2\n").unwrap_err();
        assert!(matches!(err, ConsoleError::ConfigError { .. }));
    }
}
