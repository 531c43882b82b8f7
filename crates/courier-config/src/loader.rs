//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map};
use courier_core::CourierError;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Dashboard environment variables and the keys they override.
pub const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("NEXT_API_BASE_URL", "upstream.base_url"),
    ("NEXT_ADMIN_DELETE_KEY", "upstream.admin_key"),
    ("NEXTAUTH_SECRET", "security.session_secret"),
    ("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY", "public.google_maps_api_key"),
    ("NEXT_PUBLIC_TINYMCE_API_KEY", "public.tinymce_api_key"),
];

/// Loads and validates the gateway configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `COURIER__` prefix
    /// 5. The dashboard variables listed in [`LEGACY_ENV_KEYS`] and `MOCK_API`
    pub fn new(config_dir: impl Into<String>) -> Result<Self, CourierError> {
        let config_dir = config_dir.into();

        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let vars: HashMap<String, String> = std::env::vars().collect();
        let config = Self::load_config(&config_dir, &vars)?;

        Ok(Self { config, config_dir })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, CourierError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Directory the configuration was read from.
    #[must_use]
    pub fn config_dir(&self) -> &str {
        &self.config_dir
    }

    /// Loads configuration from `config_dir`. Every variable layer, the
    /// `COURIER__*` keys included, reads from `vars` rather than the process
    /// environment.
    pub fn load_config(config_dir: &str, vars: &HashMap<String, String>) -> Result<AppConfig, CourierError> {
        let env = |key: &str| vars.get(key).cloned();
        let environment = env("COURIER_ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder().set_default("app.environment", environment.clone()).map_err(config_error)?;

        for name in ["default".to_string(), environment, "local".to_string()] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        let prefixed: Map<String, String> = vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        builder = builder.add_source(
            Environment::with_prefix("COURIER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(Some(prefixed)),
        );

        builder = apply_legacy_overrides(builder, &env)?;

        let app_config: AppConfig = builder
            .build()
            .map_err(config_error)?
            .try_deserialize()
            .map_err(config_error)?;

        if let Err(errors) = ConfigValidator::validate(&app_config) {
            let message = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
            return Err(CourierError::Configuration(message));
        }

        if app_config.upstream.mock {
            warn!("MOCK_API is set: upstream calls are served from in-memory fixtures");
        }

        Ok(app_config)
    }
}

/// Applies the dashboard's environment variable names on top of `builder`.
fn apply_legacy_overrides<F>(
    mut builder: ConfigBuilder<DefaultState>,
    env: &F,
) -> Result<ConfigBuilder<DefaultState>, CourierError>
where
    F: Fn(&str) -> Option<String>,
{
    for (variable, key) in LEGACY_ENV_KEYS {
        let value = env(variable).filter(|v| !v.trim().is_empty());
        if value.is_some() {
            debug!("Overriding {} from {}", key, variable);
        }
        builder = builder.set_override_option(*key, value).map_err(config_error)?;
    }

    let mock = env("MOCK_API").map(|v| parse_flag(&v));
    builder = builder.set_override_option("upstream.mock", mock).map_err(config_error)?;

    Ok(builder)
}

/// Interprets `1`, `true`, `yes` and `on` (any case) as enabled.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn config_error(err: ConfigError) -> CourierError {
    CourierError::Configuration(err.to_string())
}
