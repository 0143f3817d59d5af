//! stmtx-client: two-phase ingestion workflow against the extraction service

pub mod client;
pub mod error;
pub mod workflow;

pub use client::ExtractorClient;
pub use error::IngestError;
pub use workflow::{DEFAULT_ARTIFACT_NAME, IngestionResult, IngestionWorkflow, Phase};
