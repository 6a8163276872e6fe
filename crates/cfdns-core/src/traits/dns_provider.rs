// # DNS Provider Trait
//
// Defines the API Client contract: zone lookup plus list/create/update/delete
// of DNS records through a provider's REST API.
//
// ## Implementations
//
// - Cloudflare: `cfdns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use cfdns_core::DnsProvider;
//
// let zone_id = provider.zone_id("example.com").await?;
// let records = provider
//     .list_records(&zone_id, "www.example.com", RecordType::Cname)
//     .await?;
// ```

use async_trait::async_trait;

use crate::record::{DnsRecord, RecordPayload, RecordType};

/// Trait for DNS provider implementations
///
/// Each method issues exactly one HTTP request and returns either the
/// decoded `result` of the provider's success envelope or an error.
///
/// ## Contract
///
/// - No retries or backoff: a failed call is reported once
/// - No caching: every call reads the provider's current state
/// - No existence checks: `delete_record` trusts the caller's ID and lets
///   the provider report a missing record
/// - Errors are [`crate::Error::Network`] when the transport fails and
///   [`crate::Error::Provider`] when the provider reports failure
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Resolve the zone identifier for a registered domain
    ///
    /// Returns [`crate::Error::NotFound`] when the provider knows no such zone.
    async fn zone_id(&self, domain: &str) -> Result<String, crate::Error>;

    /// List records matching a name and type (first page only)
    ///
    /// Zero, one, or several records may be returned.
    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, crate::Error>;

    /// Create a record and return it as stored by the provider
    async fn create_record(
        &self,
        zone_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord, crate::Error>;

    /// Replace a record's content, proxy flag and TTL with `payload`
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord, crate::Error>;

    /// Delete a record by ID
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
