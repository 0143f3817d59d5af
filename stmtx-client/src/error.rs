//! Ingestion error taxonomy.
//!
//! Everything that can go wrong across the two phases collapses to one of
//! these variants; the workflow boundary surfaces a single `Display` string
//! to the user and never a partial result alongside an error.

use stmtx_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The HTTP call itself could not complete (unreachable host, aborted
    /// connection, timeout).
    #[error("network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP succeeded but the body was not parseable JSON where JSON was
    /// expected.
    #[error("invalid response from server")]
    MalformedResponse(#[source] serde_json::Error),

    /// Parsed JSON does not have the statement-page-sequence shape.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service reported failure; the message is sourced from the error
    /// body when one was available.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The export call succeeded but returned a zero-length payload.
    #[error("generated file is empty")]
    EmptyArtifact,

    /// This run was abandoned because a newer upload started; its result
    /// must not be published.
    #[error("superseded by a newer upload")]
    Superseded,
}
