//! Business logic services.

pub mod evidence_store;

pub use evidence_store::{EvidenceStore, StoredEvidence, PUBLIC_PREFIX};
