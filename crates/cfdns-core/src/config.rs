//! Configuration types for cfdns
//!
//! Values that would otherwise be process-wide constants (API base URL,
//! root domain, TTL) live in [`ClientConfig`] and are passed explicitly to
//! the provider and the reconciler.

use serde::{Deserialize, Serialize};

/// Cloudflare API base URL
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TTL written on every create/update (seconds)
pub const DEFAULT_RECORD_TTL: u32 = 120;

/// Client configuration shared by the provider and the reconciler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the provider's REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Registered domain whose zone holds the managed records
    pub root_domain: String,

    /// Zone ID (optional, looked up from `root_domain` when absent)
    #[serde(default)]
    pub zone_id: Option<String>,

    /// Per-request timeout (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TTL written on create/update (in seconds)
    #[serde(default = "default_record_ttl")]
    pub record_ttl: u32,
}

impl ClientConfig {
    /// Create a new configuration for a root domain with defaults
    pub fn new(root_domain: impl Into<String>) -> Self {
        Self {
            api_base: default_api_base(),
            root_domain: root_domain.into(),
            zone_id: None,
            timeout_secs: default_timeout_secs(),
            record_ttl: default_record_ttl(),
        }
    }

    /// Override the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Use a pre-configured zone ID instead of looking it up
    pub fn with_zone_id(mut self, zone_id: Option<String>) -> Self {
        self.zone_id = zone_id;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        validate_domain_name(&self.root_domain)
            .map_err(|e| crate::Error::config(format!("Invalid root domain: {}", e)))?;

        if !self.api_base.starts_with("https://") && !self.api_base.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "API base URL must use HTTP or HTTPS scheme. Got: {}",
                self.api_base
            )));
        }

        if self.timeout_secs == 0 {
            return Err(crate::Error::config("Request timeout must be > 0"));
        }

        if self.record_ttl == 0 {
            return Err(crate::Error::config("Record TTL must be > 0"));
        }

        if let Some(zone_id) = &self.zone_id {
            if zone_id.trim().is_empty() {
                return Err(crate::Error::config("Zone ID cannot be empty when provided"));
            }
        }

        Ok(())
    }

    /// Turn a record name into a fully-qualified name inside the root domain
    ///
    /// `www` becomes `www.<root>`, `@` becomes the root itself, and names
    /// that already end in the root domain are kept as-is.
    pub fn qualify(&self, name: &str) -> String {
        let name = name.trim().trim_end_matches('.').to_lowercase();
        let root = self.root_domain.trim_end_matches('.').to_lowercase();

        if name.is_empty() || name == "@" || name == root {
            return root;
        }

        if name.ends_with(&format!(".{}", root)) {
            name
        } else {
            format!("{}.{}", name, root)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_record_ttl() -> u32 {
    DEFAULT_RECORD_TTL
}

/// Validate that a string is a valid domain name
///
/// Basic RFC 1035 checks: total length, label length and label characters.
/// Underscores are accepted since providers allow them in service labels.
pub fn validate_domain_name(domain: &str) -> Result<(), crate::Error> {
    let domain = domain.trim_end_matches('.');

    if domain.is_empty() {
        return Err(crate::Error::invalid_input("Domain name cannot be empty"));
    }

    if domain.len() > 253 {
        return Err(crate::Error::invalid_input(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(crate::Error::invalid_input(format!(
                "Domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::invalid_input(format!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(crate::Error::invalid_input(format!(
                "Domain label contains invalid characters. Label: '{}'. \
                Valid: alphanumeric, hyphen and underscore only.",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::invalid_input(format!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}
