//! Record reconciler
//!
//! The Reconciler is responsible for:
//! - Resolving the zone for the configured root domain
//! - Fetching the records that match a (name, type) pair
//! - Deciding, per record, whether to leave it, update it, or create one
//! - Applying the decision (live) or reporting it (dry-run)
//!
//! ## Flow
//!
//! ```text
//! DesiredRecord ──► zone_id() ──► list_records()
//!                                      │
//!                   ┌──────────────────┴──────────────────┐
//!                   │ no match                             │ N matches
//!                   ▼                                      ▼
//!        Created / WouldCreate            per record: Unchanged
//!                                                   / Updated / WouldUpdate
//! ```
//!
//! Every existing match is reconciled, not just the first one. A failure
//! part-way through leaves earlier records updated; nothing is rolled back.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::record::{DesiredRecord, DnsRecord, RecordPayload, RecordType};
use crate::traits::DnsProvider;
use tracing::{debug, info, warn};

/// Whether mutating calls are issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Apply changes
    #[default]
    Live,
    /// Compute changes, never write
    DryRun,
}

impl Mode {
    /// Build a mode from a dry-run flag
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { Mode::DryRun } else { Mode::Live }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, Mode::DryRun)
    }

    fn label(&self) -> &'static str {
        match self {
            Mode::Live => "LIVE",
            Mode::DryRun => "DRY-RUN",
        }
    }
}

/// Outcome for one existing record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Content and proxy flag already match; no call was made
    Unchanged { record: DnsRecord },

    /// Dry-run: the record would be replaced by `proposed`
    WouldUpdate {
        previous: DnsRecord,
        proposed: RecordPayload,
    },

    /// The record was replaced
    Updated {
        previous: DnsRecord,
        current: DnsRecord,
    },
}

impl RecordOutcome {
    /// ID of the record this outcome refers to
    pub fn record_id(&self) -> &str {
        match self {
            RecordOutcome::Unchanged { record } => &record.id,
            RecordOutcome::WouldUpdate { previous, .. } => &previous.id,
            RecordOutcome::Updated { previous, .. } => &previous.id,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, RecordOutcome::Unchanged { .. })
    }
}

/// Result of reconciling one desired record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileReport {
    /// One or more records matched the (name, type) pair
    Existing { outcomes: Vec<RecordOutcome> },

    /// Dry-run: no record matched and `proposed` would be created
    WouldCreate { proposed: RecordPayload },

    /// No record matched and one was created
    Created { record: DnsRecord },
}

impl ReconcileReport {
    /// Number of records that were (or would be) written
    pub fn change_count(&self) -> usize {
        match self {
            ReconcileReport::Existing { outcomes } => {
                outcomes.iter().filter(|o| !o.is_unchanged()).count()
            }
            ReconcileReport::WouldCreate { .. } | ReconcileReport::Created { .. } => 1,
        }
    }
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Dry-run: the record would be deleted
    WouldDelete { record_id: String },
    /// The record was deleted
    Deleted { record_id: String },
}

/// Brings the provider's records for a (name, type) pair into agreement
/// with one desired record
///
/// ## Calls per invocation
///
/// One zone lookup (skipped when the zone ID is configured), one list, and
/// at most one write per non-unchanged record. In dry-run mode no write is
/// issued at all.
pub struct Reconciler {
    /// DNS provider for reading and writing records
    provider: Box<dyn DnsProvider>,

    /// Root domain, TTL and zone settings
    config: ClientConfig,

    /// Live or dry-run
    mode: Mode,
}

impl Reconciler {
    /// Create a new reconciler
    pub fn new(provider: Box<dyn DnsProvider>, config: ClientConfig, mode: Mode) -> Self {
        Self {
            provider,
            config,
            mode,
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Configuration in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn resolve_zone(&self) -> Result<String> {
        let zone_id = self.provider.zone_id(&self.config.root_domain).await?;
        debug!("Using zone {} for {}", zone_id, self.config.root_domain);
        Ok(zone_id)
    }

    /// Reconcile the provider's records with `desired`
    ///
    /// The desired name is qualified against the root domain first.
    pub async fn reconcile(&self, desired: &DesiredRecord) -> Result<ReconcileReport> {
        let desired = &DesiredRecord {
            name: self.config.qualify(&desired.name),
            ..desired.clone()
        };

        info!(
            "Reconciling {} record {} -> {} (proxied: {}) [mode: {}]",
            desired.record_type,
            desired.name,
            desired.content,
            desired.proxied,
            self.mode.label()
        );

        let zone_id = self.resolve_zone().await?;
        let existing = self
            .provider
            .list_records(&zone_id, &desired.name, desired.record_type)
            .await?;

        let payload = desired.to_payload(self.config.record_ttl);

        if existing.is_empty() {
            if self.mode.is_dry_run() {
                info!("[DRY-RUN] Would create {} record {}", desired.record_type, desired.name);
                return Ok(ReconcileReport::WouldCreate { proposed: payload });
            }

            let record = self.provider.create_record(&zone_id, &payload).await?;
            info!("Created record {} ({})", record.name, record.id);
            return Ok(ReconcileReport::Created { record });
        }

        if existing.len() > 1 {
            warn!(
                "{} {} records share the name {}; all of them will be reconciled",
                existing.len(),
                desired.record_type,
                desired.name
            );
        }

        let mut outcomes = Vec::with_capacity(existing.len());
        for record in existing {
            let outcome = self.reconcile_one(&zone_id, desired, &payload, record).await?;
            outcomes.push(outcome);
        }

        Ok(ReconcileReport::Existing { outcomes })
    }

    async fn reconcile_one(
        &self,
        zone_id: &str,
        desired: &DesiredRecord,
        payload: &RecordPayload,
        record: DnsRecord,
    ) -> Result<RecordOutcome> {
        if desired.matches(&record) {
            info!("Record {} already up to date ({})", record.id, record.content);
            return Ok(RecordOutcome::Unchanged { record });
        }

        if self.mode.is_dry_run() {
            info!(
                "[DRY-RUN] Would update record {}: {} -> {}, proxied {} -> {}",
                record.id, record.content, payload.content, record.proxied, payload.proxied
            );
            return Ok(RecordOutcome::WouldUpdate {
                previous: record,
                proposed: payload.clone(),
            });
        }

        let current = self
            .provider
            .update_record(zone_id, &record.id, payload)
            .await?;
        info!(
            "Updated record {}: {} -> {}",
            record.id, record.content, current.content
        );

        Ok(RecordOutcome::Updated {
            previous: record,
            current,
        })
    }

    /// List records matching `name` (qualified against the root domain)
    pub async fn search(&self, name: &str, record_type: RecordType) -> Result<Vec<DnsRecord>> {
        let name = self.config.qualify(name);
        info!("Searching {} records for {}", record_type, name);

        let zone_id = self.resolve_zone().await?;
        let records = self.provider.list_records(&zone_id, &name, record_type).await?;

        debug!("Found {} record(s)", records.len());
        Ok(records)
    }

    /// Delete a record by ID, without checking that it exists first
    pub async fn delete(&self, record_id: &str) -> Result<DeleteOutcome> {
        let zone_id = self.resolve_zone().await?;

        if self.mode.is_dry_run() {
            info!("[DRY-RUN] Would delete record {}", record_id);
            return Ok(DeleteOutcome::WouldDelete {
                record_id: record_id.to_string(),
            });
        }

        warn!("Deleting record {}", record_id);
        self.provider.delete_record(&zone_id, record_id).await?;
        info!("Deleted record {}", record_id);

        Ok(DeleteOutcome::Deleted {
            record_id: record_id.to_string(),
        })
    }
}
