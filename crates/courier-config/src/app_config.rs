//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream delivery API configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Response cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Session configuration.
    #[serde(default)]
    pub security: SecurityConfig,

    /// Role-gated route table.
    #[serde(default)]
    pub access: AccessConfig,

    /// Browser-facing keys handed to the dashboard.
    #[serde(default)]
    pub public: PublicConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "courier-console".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

impl AppMetadata {
    /// Returns true when running with development settings.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Maximum request body size in bytes (e-mail attachments included).
    pub max_body_size: usize,
    /// Enable CORS.
    pub cors_enabled: bool,
    /// CORS allowed origins.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_body_size: 25 * 1024 * 1024, // 25MB
            cors_enabled: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Returns the bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upstream delivery API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the external REST API (`NEXT_API_BASE_URL`).
    pub base_url: String,
    /// Secret sent with privileged operations (`NEXT_ADMIN_DELETE_KEY`).
    pub admin_key: String,
    /// Serve canned fixtures instead of calling the API (`MOCK_API`).
    pub mock: bool,
    /// Default timeout for upstream calls in seconds.
    pub request_timeout_secs: u64,
    /// Timeout for payment status updates in seconds.
    pub transaction_timeout_secs: u64,
    /// Timeout for e-mail relay calls in seconds.
    pub email_timeout_secs: u64,
    /// Timeout for the reachability probe in seconds.
    pub status_probe_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            admin_key: String::new(),
            mock: false,
            request_timeout_secs: 20,
            transaction_timeout_secs: 8,
            email_timeout_secs: 30,
            status_probe_timeout_secs: 5,
        }
    }
}

impl UpstreamConfig {
    /// Returns the default upstream timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the payment status update timeout.
    #[must_use]
    pub const fn transaction_timeout(&self) -> Duration {
        Duration::from_secs(self.transaction_timeout_secs)
    }

    /// Returns the e-mail relay timeout.
    #[must_use]
    pub const fn email_timeout(&self) -> Duration {
        Duration::from_secs(self.email_timeout_secs)
    }

    /// Returns the reachability probe timeout.
    #[must_use]
    pub const fn status_probe_timeout(&self) -> Duration {
        Duration::from_secs(self.status_probe_timeout_secs)
    }
}

/// Response cache configuration. TTLs are per resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false every read bypasses the cache.
    pub enabled: bool,
    pub riders_ttl_secs: u64,
    pub users_ttl_secs: u64,
    pub deliveries_ttl_secs: u64,
    pub transactions_ttl_secs: u64,
    pub admins_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            riders_ttl_secs: 300,
            users_ttl_secs: 600,
            deliveries_ttl_secs: 120,
            transactions_ttl_secs: 120,
            admins_ttl_secs: 60,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn riders_ttl(&self) -> Duration {
        Duration::from_secs(self.riders_ttl_secs)
    }

    #[must_use]
    pub const fn users_ttl(&self) -> Duration {
        Duration::from_secs(self.users_ttl_secs)
    }

    #[must_use]
    pub const fn deliveries_ttl(&self) -> Duration {
        Duration::from_secs(self.deliveries_ttl_secs)
    }

    #[must_use]
    pub const fn transactions_ttl(&self) -> Duration {
        Duration::from_secs(self.transactions_ttl_secs)
    }

    #[must_use]
    pub const fn admins_ttl(&self) -> Duration {
        Duration::from_secs(self.admins_ttl_secs)
    }
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// HS256 signing secret (`NEXTAUTH_SECRET`).
    pub session_secret: String,
    /// Session lifetime in seconds.
    pub session_ttl_secs: u64,
    /// Token issuer.
    pub issuer: String,
    /// Cookie carrying the session token.
    pub session_cookie: String,
    /// Mark the cookie `Secure`.
    pub secure_cookie: bool,
    /// Where unauthenticated page requests are sent.
    pub login_path: String,
    /// Where page requests with the wrong role are sent.
    pub unauthorized_path: String,
}

/// Placeholder secret; rejected outside development.
pub const DEFAULT_SESSION_SECRET: &str = "change-me-in-production";

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
            session_ttl_secs: 8 * 3600,
            issuer: "courier-console".to_string(),
            session_cookie: "courier.session-token".to_string(),
            secure_cookie: false,
            login_path: "/login".to_string(),
            unauthorized_path: "/unauthorized".to_string(),
        }
    }
}

impl SecurityConfig {
    /// Returns the session lifetime.
    #[must_use]
    pub const fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

/// Role-gated route table: first path segment to allowed roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub routes: BTreeMap<String, Vec<String>>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        let table: &[(&str, &[&str])] = &[
            ("dashboard", &["super_admin", "admin", "operations", "finance", "support"]),
            ("riders", &["super_admin", "admin", "operations"]),
            ("deliveries", &["super_admin", "admin", "operations", "support"]),
            ("transactions", &["super_admin", "admin", "finance"]),
            ("admins", &["super_admin"]),
            ("broadcast", &["super_admin", "admin"]),
            ("send-email", &["super_admin", "admin"]),
            ("cache", &["super_admin"]),
        ];

        let routes = table
            .iter()
            .map(|(prefix, roles)| {
                (
                    (*prefix).to_string(),
                    roles.iter().map(|r| (*r).to_string()).collect(),
                )
            })
            .collect();

        Self { routes }
    }
}

/// Browser-facing keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicConfig {
    /// `NEXT_PUBLIC_GOOGLE_MAPS_API_KEY`
    pub google_maps_api_key: Option<String>,
    /// `NEXT_PUBLIC_TINYMCE_API_KEY`
    pub tinymce_api_key: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
    /// Enable metrics.
    pub metrics_enabled: bool,
    /// Metrics endpoint path.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: true,
            metrics_path: "/metrics".to_string(),
        }
    }
}
