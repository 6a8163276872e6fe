//! Core traits for cfdns
//!
//! - [`DnsProvider`]: Read and write DNS records via a provider API

pub mod dns_provider;

pub use dns_provider::DnsProvider;
