// # cfdns-core
//
// Core library for cfdns, a tool that keeps A and CNAME records of a single
// domain in line with a desired state through a DNS provider's REST API.
//
// ## Architecture Overview
//
// - **DnsProvider**: API Client contract (zone lookup, list/create/update/delete)
// - **Reconciler**: compares a desired record with the provider's records and
//   decides between unchanged, update and create, or only reports it (dry-run)
// - **ClientConfig**: API base URL, root domain, timeout and TTL, passed
//   explicitly instead of living in globals
//
// ## Design Principles
//
// 1. **Stateless**: every run reads the provider fresh; nothing is persisted
// 2. **Single-shot calls**: one HTTP request per provider call, no retries
// 3. **Library-First**: the CLI is a thin layer over this crate

pub mod config;
pub mod error;
pub mod reconcile;
pub mod record;
pub mod traits;

// Re-export core types for convenience
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use reconcile::{DeleteOutcome, Mode, ReconcileReport, Reconciler, RecordOutcome};
pub use record::{DesiredRecord, DnsRecord, RecordPayload, RecordType};
pub use traits::DnsProvider;
