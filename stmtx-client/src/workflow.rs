//! Two-phase ingestion workflow.
//!
//! One upload drives one sequential chain: upload + fetch tables, validate,
//! derive account metadata, then export the spreadsheet from the same bytes.
//! Any failure aborts the remaining stages; the caller gets either a fully
//! populated result or a single error, never both.

use std::sync::atomic::{AtomicU64, Ordering};

use stmtx_core::{AccountInfo, StatementPage, extract_account_info, validate_pages};

use crate::client::ExtractorClient;
use crate::error::IngestError;

/// File name the presentation layer saves the artifact under.
pub const DEFAULT_ARTIFACT_NAME: &str = "bank_statement.xlsx";

/// Workflow phases, reported to the caller at each transition. `Failed` is
/// reachable from any in-progress phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Uploading,
    Validating,
    ExtractingMetadata,
    ExportingSpreadsheet,
    Complete,
    Failed,
}

impl Phase {
    /// User-facing status line for this phase. `Failed` has none; the error
    /// itself is the message.
    pub fn status_message(&self) -> &'static str {
        match self {
            Phase::Idle => "",
            Phase::Uploading => "Uploading PDF file...",
            Phase::Validating => "Extracting tables from PDF...",
            Phase::ExtractingMetadata => "Reading account details...",
            Phase::ExportingSpreadsheet => "Generating spreadsheet...",
            Phase::Complete => "Processing complete!",
            Phase::Failed => "",
        }
    }
}

/// Everything one successful ingestion produces. Held only for the current
/// upload cycle; a new upload or any failure discards it.
#[derive(Debug, Clone)]
pub struct IngestionResult {
    pub pages: Vec<StatementPage>,
    pub account_info: AccountInfo,
    /// Opaque spreadsheet bytes, non-empty.
    pub artifact: Vec<u8>,
}

pub struct IngestionWorkflow {
    client: ExtractorClient,
    generation: AtomicU64,
}

impl IngestionWorkflow {
    pub fn new(client: ExtractorClient) -> Self {
        Self {
            client,
            generation: AtomicU64::new(0),
        }
    }

    /// Run both phases for one upload.
    ///
    /// `on_phase` is invoked at every transition; printing
    /// `phase.status_message()` gives the user-facing progress line.
    ///
    /// Starting a run supersedes any run still in flight on this workflow:
    /// the older run notices after its next network round-trip and bails
    /// with [`IngestError::Superseded`] instead of publishing a stale
    /// result. The abandoned request is not cancelled remotely.
    pub async fn run(
        &self,
        file_name: &str,
        pdf: Vec<u8>,
        mut on_phase: impl FnMut(Phase) + Send,
    ) -> Result<IngestionResult, IngestError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self
            .run_phases(generation, file_name, pdf, &mut on_phase)
            .await;
        if result.is_err() {
            on_phase(Phase::Failed);
        }
        result
    }

    async fn run_phases(
        &self,
        generation: u64,
        file_name: &str,
        pdf: Vec<u8>,
        on_phase: &mut (dyn FnMut(Phase) + Send),
    ) -> Result<IngestionResult, IngestError> {
        on_phase(Phase::Uploading);
        let reply = self.client.fetch_tables(file_name, pdf.clone()).await?;
        self.still_current(generation)?;

        on_phase(Phase::Validating);
        let pages = validate_pages(&reply)?;

        on_phase(Phase::ExtractingMetadata);
        let account_info = extract_account_info(&pages);

        on_phase(Phase::ExportingSpreadsheet);
        let artifact = self.client.export_spreadsheet(file_name, pdf).await?;
        self.still_current(generation)?;

        on_phase(Phase::Complete);
        Ok(IngestionResult {
            pages,
            account_info,
            artifact,
        })
    }

    fn still_current(&self, generation: u64) -> Result<(), IngestError> {
        if self.generation.load(Ordering::SeqCst) != generation {
            return Err(IngestError::Superseded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages_match_the_ui_strings() {
        assert_eq!(Phase::Uploading.status_message(), "Uploading PDF file...");
        assert_eq!(Phase::Complete.status_message(), "Processing complete!");
        assert_eq!(Phase::Failed.status_message(), "");
    }
}
