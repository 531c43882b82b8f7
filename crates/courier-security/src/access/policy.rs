//! Route access policy.

use crate::SessionClaims;
use courier_config::{AccessConfig, SecurityConfig};
use std::collections::BTreeMap;

/// Outcome of checking one request path against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The path needs no session.
    Public,
    /// A session is present and its role is allowed.
    Allow,
    /// No usable session.
    Login,
    /// The session's role is not in the prefix's allow-list.
    Denied { prefix: String, role: String },
}

impl AccessDecision {
    #[must_use]
    pub const fn is_permitted(&self) -> bool {
        matches!(self, Self::Public | Self::Allow)
    }
}

/// Static map from first path segment to allowed roles.
#[derive(Debug, Clone)]
pub struct RouteAccessPolicy {
    routes: BTreeMap<String, Vec<String>>,
    public_paths: Vec<String>,
    public_prefixes: Vec<String>,
}

impl RouteAccessPolicy {
    /// Builds the policy from the route table and the redirect targets,
    /// which are always public.
    #[must_use]
    pub fn new(access: &AccessConfig, security: &SecurityConfig, metrics_path: &str) -> Self {
        let public_paths = [
            "/health",
            "/ready",
            "/live",
            "/api/public-config",
            metrics_path,
            security.login_path.as_str(),
            security.unauthorized_path.as_str(),
        ]
        .iter()
        .map(|p| (*p).to_string())
        .collect();

        Self {
            routes: access.routes.clone(),
            public_paths,
            public_prefixes: vec!["/api/auth".to_string()],
        }
    }

    /// Reduces a request path to the segment looked up in the table.
    ///
    /// A leading `/api` is dropped, so `/api/riders/7` and `/riders`
    /// both give `riders`. Returns `None` for the root path.
    #[must_use]
    pub fn normalize(path: &str) -> Option<&str> {
        let trimmed = path.trim_start_matches('/');
        let rest = match trimmed.strip_prefix("api") {
            Some("") => "",
            Some(after) if after.starts_with('/') => after.trim_start_matches('/'),
            _ => trimmed,
        };
        rest.split('/').next().filter(|segment| !segment.is_empty())
    }

    /// True when the path bypasses the session check.
    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
            || self
                .public_prefixes
                .iter()
                .any(|p| path == p || path.strip_prefix(p.as_str()).is_some_and(|rest| rest.starts_with('/')))
    }

    /// Allow-list for a normalized segment, if it is protected.
    #[must_use]
    pub fn allowed_roles(&self, segment: &str) -> Option<&[String]> {
        self.routes.get(segment).map(Vec::as_slice)
    }

    /// Decides whether a request for `path` may proceed.
    #[must_use]
    pub fn evaluate(&self, path: &str, session: Option<&SessionClaims>) -> AccessDecision {
        if self.is_public(path) {
            return AccessDecision::Public;
        }

        let Some(claims) = session else {
            return AccessDecision::Login;
        };

        let Some(segment) = Self::normalize(path) else {
            return AccessDecision::Allow;
        };

        match self.allowed_roles(segment) {
            Some(roles) if !claims.has_any_role(roles) => AccessDecision::Denied {
                prefix: segment.to_string(),
                role: claims.role.clone(),
            },
            _ => AccessDecision::Allow,
        }
    }
}
