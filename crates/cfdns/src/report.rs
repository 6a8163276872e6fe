//! Console rendering of reconcile, search and delete results

use cfdns_core::{DeleteOutcome, DnsRecord, ReconcileReport, RecordOutcome, RecordPayload};
use std::fmt::Write;

/// Render the result of a reconciliation
pub fn reconcile(report: &ReconcileReport) -> String {
    let mut out = String::new();

    match report {
        ReconcileReport::Created { record } => {
            let _ = writeln!(out, "Record created");
            let _ = writeln!(
                out,
                "Created record: id={} name={} content={} proxied={}",
                record.id, record.name, record.content, record.proxied
            );
        }
        ReconcileReport::WouldCreate { proposed } => {
            let _ = writeln!(out, "DRY-RUN would CREATE new record");
            let _ = writeln!(out, "Proposed payload:");
            let _ = writeln!(out, "{}", payload_json(proposed));
        }
        ReconcileReport::Existing { outcomes } => {
            let _ = writeln!(out, "Existing records processed");
            let _ = writeln!(out, "Processed {} existing record(s):", outcomes.len());
            for outcome in outcomes {
                let _ = writeln!(out, "  {}", outcome_line(outcome));
            }
        }
    }

    out
}

fn outcome_line(outcome: &RecordOutcome) -> String {
    match outcome {
        RecordOutcome::Unchanged { record } => format!(
            "id={} unchanged content={} proxied={}",
            record.id, record.content, record.proxied
        ),
        RecordOutcome::WouldUpdate { previous, proposed } => format!(
            "id={} DRY-RUN content {} -> {} proxied {} -> {}",
            previous.id, previous.content, proposed.content, previous.proxied, proposed.proxied
        ),
        RecordOutcome::Updated { previous, current } => format!(
            "id={} updated {} -> {} proxied {} -> {}",
            previous.id, previous.content, current.content, previous.proxied, current.proxied
        ),
    }
}

fn payload_json(payload: &RecordPayload) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| format!("{:?}", payload))
}

/// Render search results as a table
pub fn search(records: &[DnsRecord]) -> String {
    if records.is_empty() {
        return "No matching records found\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<34} {:<6} {:<32} {:<32} {:<8} {:<5} {}",
        "ID", "TYPE", "NAME", "CONTENT", "PROXIED", "TTL", "MODIFIED"
    );
    for record in records {
        let modified = record
            .modified_on
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<34} {:<6} {:<32} {:<32} {:<8} {:<5} {}",
            record.id, record.record_type, record.name, record.content, record.proxied, record.ttl, modified
        );
    }
    let _ = writeln!(out, "{} record(s)", records.len());
    out
}

/// Render a delete result
pub fn delete(outcome: &DeleteOutcome) -> String {
    match outcome {
        DeleteOutcome::WouldDelete { record_id } => {
            format!("DRY-RUN would DELETE record id={}\n", record_id)
        }
        DeleteOutcome::Deleted { record_id } => format!("Deleted record id={}\n", record_id),
    }
}
