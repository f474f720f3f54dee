//! Application configuration structures.

use listwire_core::GroupId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Production endpoint of the MailerLite API.
pub const MAILERLITE_BASE_URL: &str = "https://connect.mailerlite.com/api";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListwireConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Remote list service connection.
    #[serde(default)]
    pub mailerlite: MailerLiteConfig,

    /// Import run settings.
    #[serde(default)]
    pub import: ImportConfig,

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
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "listwire".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// MailerLite connection settings.
///
/// Immutable once handed to a client. The API key is never printed by
/// `Debug`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailerLiteConfig {
    /// Bearer token for the API.
    pub api_key: String,
    /// API root, without trailing slash.
    pub base_url: String,
    /// Whole-request timeout in seconds. Unset leaves the HTTP library default.
    pub timeout_secs: Option<u64>,
    /// Group every signup is also placed in.
    pub default_group_id: Option<GroupId>,
}

impl Default for MailerLiteConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: MAILERLITE_BASE_URL.to_string(),
            timeout_secs: None,
            default_group_id: None,
        }
    }
}

impl MailerLiteConfig {
    /// Creates a configuration for the production endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Points the configuration at another API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Sets the default group.
    #[must_use]
    pub fn with_default_group(mut self, group_id: GroupId) -> Self {
        self.default_group_id = Some(group_id);
        self
    }

    /// Returns the request timeout as a Duration, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for MailerLiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerLiteConfig")
            .field("api_key", &format_args!("<redacted, {} chars>", self.api_key.len()))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("default_group_id", &self.default_group_id)
            .finish()
    }
}

/// Import run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// JSON file holding an array of subscriber records.
    pub file: Option<PathBuf>,
    /// Existing group to import into.
    pub group_id: Option<GroupId>,
    /// Name of a group to create when no group ID is configured.
    pub group_name: Option<String>,
    /// Send one request per subscriber instead of one bulk import.
    pub single: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Returns true if logs should be emitted as JSON lines.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
