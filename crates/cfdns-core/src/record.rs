//! DNS record model
//!
//! - [`DnsRecord`]: a record as stored by the provider
//! - [`DesiredRecord`]: the state the caller wants a name to have
//! - [`RecordPayload`]: the full body written on create/update

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::config::validate_domain_name;
use crate::error::{Error, Result};

/// DNS record type managed by cfdns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// A record (IPv4)
    #[serde(rename = "A")]
    A,
    /// CNAME record (alias)
    #[serde(rename = "CNAME")]
    Cname,
}

impl RecordType {
    /// Wire representation of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Cname => "CNAME",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "CNAME" => Ok(RecordType::Cname),
            other => Err(Error::invalid_input(format!(
                "Unsupported record type '{}'. Supported types: A, CNAME",
                other
            ))),
        }
    }
}

/// A DNS record as returned by the provider
///
/// Identity is the provider-assigned `id`. Several records may share the
/// same (name, type) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned record ID
    pub id: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Fully-qualified record name
    pub name: String,

    /// IPv4 literal for A, target domain for CNAME
    pub content: String,

    /// Whether traffic is routed through the provider's proxy
    #[serde(default)]
    pub proxied: bool,

    /// Time-to-live (seconds; 1 means "automatic" on Cloudflare)
    #[serde(default)]
    pub ttl: u32,

    /// Last modification time reported by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Full record body sent on create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

/// The state the caller wants a (name, type) pair to have
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredRecord {
    /// Fully-qualified record name
    pub name: String,
    pub record_type: RecordType,
    pub content: String,
    pub proxied: bool,
}

impl DesiredRecord {
    /// Desired A record
    ///
    /// Fails with [`Error::InvalidInput`] when `ip` is not an IPv4 literal.
    pub fn a(name: impl Into<String>, ip: &str, proxied: bool) -> Result<Self> {
        let ip = parse_ipv4(ip)?;
        Self::build(name.into(), RecordType::A, ip.to_string(), proxied)
    }

    /// Desired CNAME record pointing at `target`
    pub fn cname(name: impl Into<String>, target: &str, proxied: bool) -> Result<Self> {
        let target = target.trim().trim_end_matches('.').to_lowercase();
        validate_domain_name(&target)
            .map_err(|e| Error::invalid_input(format!("Invalid CNAME target '{}': {}", target, e)))?;
        Self::build(name.into(), RecordType::Cname, target, proxied)
    }

    fn build(name: String, record_type: RecordType, content: String, proxied: bool) -> Result<Self> {
        validate_domain_name(&name)?;
        Ok(Self {
            name,
            record_type,
            content,
            proxied,
        })
    }

    /// Whether an existing record already has the desired content and proxy flag
    pub fn matches(&self, record: &DnsRecord) -> bool {
        record.content == self.content && record.proxied == self.proxied
    }

    /// Full write payload for this record
    pub fn to_payload(&self, ttl: u32) -> RecordPayload {
        RecordPayload {
            record_type: self.record_type,
            name: self.name.clone(),
            content: self.content.clone(),
            ttl,
            proxied: self.proxied,
        }
    }
}

/// Parse a strict dotted-quad IPv4 literal
pub fn parse_ipv4(ip: &str) -> Result<Ipv4Addr> {
    ip.trim()
        .parse::<Ipv4Addr>()
        .map_err(|e| Error::invalid_input(format!("Invalid IPv4 address '{}': {}", ip.trim(), e)))
}
