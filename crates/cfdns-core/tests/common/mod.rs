//! Test doubles and common utilities for reconciler contract tests
//!
//! The mock provider keeps records in memory and counts every call so tests
//! can assert exactly which requests a reconciliation would have issued.

#![allow(dead_code)]

use cfdns_core::error::{Error, Result};
use cfdns_core::record::{DnsRecord, RecordPayload, RecordType};
use cfdns_core::traits::DnsProvider;
use cfdns_core::ClientConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ZONE_ID: &str = "zone-123";

/// Shared call counters, kept outside the provider so tests can read them
/// after the provider has been boxed into a reconciler
#[derive(Default)]
pub struct CallLog {
    pub zone_lookups: AtomicUsize,
    pub lists: AtomicUsize,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    /// Payloads sent on update, with the target record ID
    pub update_payloads: Mutex<Vec<(String, RecordPayload)>>,
    /// Payloads sent on create
    pub create_payloads: Mutex<Vec<RecordPayload>>,
    /// Record IDs sent on delete
    pub deleted_ids: Mutex<Vec<String>>,
}

impl CallLog {
    /// Number of create + update + delete calls
    pub fn mutating_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
            + self.updates.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn zone_lookups(&self) -> usize {
        self.zone_lookups.load(Ordering::SeqCst)
    }
}

/// In-memory DnsProvider that records every call
pub struct MockDnsProvider {
    records: Mutex<Vec<DnsRecord>>,
    calls: Arc<CallLog>,
    /// Fail the Nth update call (1-based) with a provider error
    fail_update_at: Option<usize>,
    next_id: AtomicUsize,
}

impl MockDnsProvider {
    pub fn new(records: Vec<DnsRecord>) -> (Self, Arc<CallLog>) {
        let calls = Arc::new(CallLog::default());
        let provider = Self {
            records: Mutex::new(records),
            calls: Arc::clone(&calls),
            fail_update_at: None,
            next_id: AtomicUsize::new(1),
        };
        (provider, calls)
    }

    /// Make the Nth update call fail
    pub fn failing_update_at(mut self, n: usize) -> Self {
        self.fail_update_at = Some(n);
        self
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn zone_id(&self, domain: &str) -> Result<String> {
        self.calls.zone_lookups.fetch_add(1, Ordering::SeqCst);
        if domain == "example.com" {
            Ok(ZONE_ID.to_string())
        } else {
            Err(Error::not_found(format!("Zone not found: {}", domain)))
        }
    }

    async fn list_records(
        &self,
        _zone_id: &str,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        self.calls.lists.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name == name && r.record_type == record_type)
            .cloned()
            .collect())
    }

    async fn create_record(&self, _zone_id: &str, payload: &RecordPayload) -> Result<DnsRecord> {
        self.calls.creates.fetch_add(1, Ordering::SeqCst);
        self.calls.create_payloads.lock().unwrap().push(payload.clone());

        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = record_from_payload(&id, payload);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        _zone_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<DnsRecord> {
        let n = self.calls.updates.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls
            .update_payloads
            .lock()
            .unwrap()
            .push((record_id.to_string(), payload.clone()));

        if self.fail_update_at == Some(n) {
            return Err(Error::provider(
                "mock",
                Some(500),
                r#"{"success":false,"errors":[{"code":10000,"message":"boom"}]}"#,
            ));
        }

        let mut records = self.records.lock().unwrap();
        let existing = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Error::provider("mock", Some(404), "Record not found"))?;
        *existing = record_from_payload(record_id, payload);
        Ok(existing.clone())
    }

    async fn delete_record(&self, _zone_id: &str, record_id: &str) -> Result<()> {
        self.calls.deletes.fetch_add(1, Ordering::SeqCst);
        self.calls
            .deleted_ids
            .lock()
            .unwrap()
            .push(record_id.to_string());

        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != record_id);
        if records.len() == before {
            return Err(Error::provider(
                "mock",
                Some(404),
                r#"{"success":false,"errors":[{"code":81044,"message":"Record does not exist."}]}"#,
            ));
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

fn record_from_payload(id: &str, payload: &RecordPayload) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        record_type: payload.record_type,
        name: payload.name.clone(),
        content: payload.content.clone(),
        proxied: payload.proxied,
        ttl: payload.ttl,
        modified_on: None,
    }
}

/// An existing A record
pub fn a_record(id: &str, name: &str, content: &str, proxied: bool) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        record_type: RecordType::A,
        name: name.to_string(),
        content: content.to_string(),
        proxied,
        ttl: 300,
        modified_on: None,
    }
}

/// An existing CNAME record
pub fn cname_record(id: &str, name: &str, target: &str, proxied: bool) -> DnsRecord {
    DnsRecord {
        record_type: RecordType::Cname,
        ..a_record(id, name, target, proxied)
    }
}

/// Configuration for the `example.com` test zone
pub fn test_config() -> ClientConfig {
    ClientConfig::new("example.com")
}
