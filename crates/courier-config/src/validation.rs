//! Configuration validation module.
//!
//! Fails fast on invalid configuration rather than at request time, and
//! reports every problem found in one pass.

use crate::{AppConfig, DEFAULT_SESSION_SECRET};
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// Session secret is too short outside development.
    SessionSecretTooShort { actual: usize, minimum: usize },
    /// The placeholder secret is in use outside development.
    DefaultSessionSecret,
    /// Port number is invalid.
    InvalidPort { value: u16 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
    /// A protected prefix lists no roles.
    EmptyRoleList { prefix: String },
    /// Redirect targets must be absolute paths.
    InvalidRedirectPath { name: String, value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionSecretTooShort { actual, minimum } => {
                write!(f, "Session secret too short: {} characters (minimum {})", actual, minimum)
            }
            Self::DefaultSessionSecret => {
                write!(f, "Session secret must be set (NEXTAUTH_SECRET) outside development")
            }
            Self::InvalidPort { value } => write!(f, "Invalid server port: {}", value),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name } => {
                write!(f, "Timeout '{}' must be positive", name)
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{}' (valid: pretty, json)", value)
            }
            Self::EmptyRoleList { prefix } => {
                write!(f, "Protected prefix '{}' has no allowed roles", prefix)
            }
            Self::InvalidRedirectPath { name, value } => {
                write!(f, "{} must start with '/': '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Minimum session secret length outside development.
    const MIN_SECRET_LENGTH: usize = 32;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    /// Valid log formats.
    const VALID_LOG_FORMATS: &'static [&'static str] = &["pretty", "json"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_security(config, &mut errors);
        Self::validate_server(config, &mut errors);
        Self::validate_upstream(config, &mut errors);
        Self::validate_access(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_security(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let security = &config.security;

        if !config.app.is_development() {
            if security.session_secret == DEFAULT_SESSION_SECRET {
                errors.push(ConfigValidationError::DefaultSessionSecret);
            } else if security.session_secret.len() < Self::MIN_SECRET_LENGTH {
                errors.push(ConfigValidationError::SessionSecretTooShort {
                    actual: security.session_secret.len(),
                    minimum: Self::MIN_SECRET_LENGTH,
                });
            }
        }

        if security.session_ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "security.session_ttl_secs".to_string(),
            });
        }

        for (name, value) in [
            ("security.login_path", &security.login_path),
            ("security.unauthorized_path", &security.unauthorized_path),
        ] {
            if !value.starts_with('/') {
                errors.push(ConfigValidationError::InvalidRedirectPath {
                    name: name.to_string(),
                    value: value.clone(),
                });
            }
        }
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                value: config.server.port,
            });
        }
    }

    fn validate_upstream(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let upstream = &config.upstream;

        match Url::parse(&upstream.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "upstream".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "upstream".to_string(),
                message: e.to_string(),
            }),
        }

        for (name, value) in [
            ("upstream.request_timeout_secs", upstream.request_timeout_secs),
            ("upstream.transaction_timeout_secs", upstream.transaction_timeout_secs),
            ("upstream.email_timeout_secs", upstream.email_timeout_secs),
            ("upstream.status_probe_timeout_secs", upstream.status_probe_timeout_secs),
        ] {
            if value == 0 {
                errors.push(ConfigValidationError::NonPositiveTimeout {
                    name: name.to_string(),
                });
            }
        }
    }

    fn validate_access(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        for (prefix, roles) in &config.access.routes {
            if roles.is_empty() {
                errors.push(ConfigValidationError::EmptyRoleList {
                    prefix: prefix.clone(),
                });
            }
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let observability = &config.observability;

        let level = observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: observability.log_level.clone(),
            });
        }

        let format = observability.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: observability.log_format.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_default_secret_rejected_in_production() {
        let mut config = AppConfig::default();
        config.app.environment = "production".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::DefaultSessionSecret]);
    }

    #[test]
    fn test_short_secret_rejected_in_production() {
        let mut config = AppConfig::default();
        config.app.environment = "production".to_string();
        config.security.session_secret = "short".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ConfigValidationError::SessionSecretTooShort { actual: 5, minimum: 32 }
        ));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.upstream.base_url = "not a url".to_string();
        config.upstream.transaction_timeout_secs = 0;
        config.observability.log_level = "verbose".to_string();
        config.access.routes.insert("reports".to_string(), Vec::new());

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ConfigValidationError::EmptyRoleList {
            prefix: "reports".to_string()
        }));
    }

    #[test]
    fn test_upstream_scheme_must_be_http() {
        let mut config = AppConfig::default();
        config.upstream.base_url = "ftp://files.example.com".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(&errors[0], ConfigValidationError::InvalidUrl { url_type, .. } if url_type == "upstream"));
    }

    #[test]
    fn test_redirect_paths_must_be_absolute() {
        let mut config = AppConfig::default();
        config.security.login_path = "login".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors[0].to_string().contains("security.login_path"));
    }
}
