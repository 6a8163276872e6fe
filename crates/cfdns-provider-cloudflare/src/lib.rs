// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare v4 implementation of the cfdns
// `DnsProvider` trait.
//
// ## Behavior
//
// - One HTTP request per trait call
// - Client-wide timeout taken from `ClientConfig` (30 seconds by default)
// - Bearer token and `Content-Type: application/json` on every request
// - Every response is checked twice: HTTP status, then the `success` flag of
//   the JSON envelope; failures carry the status and the raw body
// - No retries, no backoff, first page of results only
//
// ## Security Requirements
//
// - API token NEVER appears in logs or in `Debug` output
// - Provider construction fails if the token is empty
//
// ## API Reference
//
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?name=...&type=...`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Patch DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`
// - Delete DNS Record: DELETE `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use cfdns_core::config::ClientConfig;
use cfdns_core::record::{DnsRecord, RecordPayload, RecordType};
use cfdns_core::traits::DnsProvider;
use cfdns_core::{Error, Result};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const PROVIDER: &str = "cloudflare";

/// Cloudflare response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct Zone {
    id: String,
}

/// Cloudflare DNS provider
///
/// Stateless apart from the HTTP client: nothing is cached between calls,
/// so the zone ID is either configured or looked up every time.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL without trailing slash
    api_base: String,

    /// Zone ID (optional, looked up from the domain when absent)
    zone_id: Option<String>,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("api_base", &self.api_base)
            .field("zone_id", &self.zone_id)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:DNS:Edit permissions
    /// - `config`: API base URL, optional zone ID and request timeout
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the token is empty or the HTTP client cannot be
    /// built.
    pub fn new(api_token: impl Into<String>, config: &ClientConfig) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("cfdns/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_token,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            zone_id: config.zone_id.clone(),
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_base, path))
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
    }

    /// Send a request and decode the `result` of a success envelope
    ///
    /// - transport failure → `Error::Network`
    /// - non-2xx status → `Error::Provider` with status and raw body
    /// - `success: false` or undecodable body → `Error::Provider`
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::network(format!("{} failed: {}", what, describe_transport(&e))))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("{}: failed to read response body: {}", what, e)))?;

        if !status.is_success() {
            tracing::warn!("{} failed: {} ({})", what, status, status_hint(status));
            return Err(Error::provider(PROVIDER, Some(status.as_u16()), body));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("{}: unparseable response: {}", what, e);
            Error::provider(PROVIDER, Some(status.as_u16()), body.clone())
        })?;

        if !envelope.success {
            tracing::warn!("{} returned success=false", what);
            return Err(Error::provider(PROVIDER, Some(status.as_u16()), body));
        }

        envelope.result.ok_or_else(|| {
            Error::provider(PROVIDER, Some(status.as_u16()), format!("{}: response has no result: {}", what, body))
        })
    }
}

/// Human-readable meaning of an error status, for logs
fn status_hint(status: StatusCode) -> &'static str {
    match status.as_u16() {
        401 | 403 => "invalid API token or insufficient permissions",
        404 => "zone or record not found",
        409 => "conflicting record",
        429 => "rate limit exceeded",
        500..=599 => "Cloudflare server error",
        _ => "request rejected",
    }
}

fn describe_transport(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// ```http
    /// GET /zones?name=example.com
    /// ```
    async fn zone_id(&self, domain: &str) -> Result<String> {
        if let Some(zone_id) = &self.zone_id {
            tracing::debug!("Using pre-configured zone ID");
            return Ok(zone_id.clone());
        }

        tracing::debug!("Looking up zone ID for domain: {}", domain);

        let request = self.request(Method::GET, "/zones").query(&[("name", domain)]);
        let zones: Vec<Zone> = self.execute(request, "Zone lookup").await?;

        let zone = zones
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("Zone for {} not found", domain)))?;

        tracing::debug!("Found zone ID: {}", zone.id);
        Ok(zone.id)
    }

    /// ```http
    /// GET /zones/:zone_id/dns_records?type=A&name=staging.example.com
    /// ```
    async fn list_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        tracing::debug!("Listing records: {} (type: {})", name, record_type);

        let request = self
            .request(Method::GET, &format!("/zones/{}/dns_records", zone_id))
            .query(&[("type", record_type.as_str()), ("name", name)]);
        self.execute(request, "Record lookup").await
    }

    /// ```http
    /// POST /zones/:zone_id/dns_records
    /// { "type": "A", "name": "...", "content": "...", "ttl": 120, "proxied": false }
    /// ```
    async fn create_record(&self, zone_id: &str, payload: &RecordPayload) -> Result<DnsRecord> {
        tracing::debug!("Creating {} record {}", payload.record_type, payload.name);

        let request = self
            .request(Method::POST, &format!("/zones/{}/dns_records", zone_id))
            .json(payload);
        self.execute(request, "Record create").await
    }

    /// ```http
    /// PATCH /zones/:zone_id/dns_records/:record_id
    /// { "type": "A", "name": "...", "content": "...", "ttl": 120, "proxied": false }
    /// ```
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord> {
        tracing::debug!("Updating record {}", record_id);

        let request = self
            .request(
                Method::PATCH,
                &format!("/zones/{}/dns_records/{}", zone_id, record_id),
            )
            .json(payload);
        self.execute(request, "Record update").await
    }

    /// ```http
    /// DELETE /zones/:zone_id/dns_records/:record_id
    /// ```
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        tracing::debug!("Deleting record {}", record_id);

        let request = self.request(
            Method::DELETE,
            &format!("/zones/{}/dns_records/{}", zone_id, record_id),
        );
        let _: serde_json::Value = self.execute(request, "Record delete").await?;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
