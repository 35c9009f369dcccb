use std::fmt::Display;
use std::future::Future;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::model::worker::WorkerRecord;
use crate::payroll::overrides::WorkerId;

pub const MISSING_ID: &str = "Missing valid worker ID";
const UPDATED: &str = "Updated successfully";

/// A row a batch save can address.
pub trait BatchRow {
    fn worker_id(&self) -> Option<WorkerId>;
    fn worker_name(&self) -> &str;
}

impl BatchRow for WorkerRecord {
    fn worker_id(&self) -> Option<WorkerId> {
        self.valid_id()
    }

    fn worker_name(&self) -> &str {
        self.name_or_unknown()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SaveOutcome {
    pub worker: String,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BatchReport {
    pub total: usize,
    pub saved: usize,
    pub summary: String,
    pub results: Vec<SaveOutcome>,
}

impl BatchReport {
    fn new(results: Vec<SaveOutcome>) -> Self {
        let total = results.len();
        let saved = results.iter().filter(|r| r.success).count();

        let summary = if saved == total {
            format!("Saved successfully for all {total} workers")
        } else if saved > 0 {
            let failed: Vec<&str> = results
                .iter()
                .filter(|r| !r.success)
                .map(|r| r.worker.as_str())
                .collect();
            format!(
                "Partially successful: Updated {saved} out of {total} workers. Failed: {}",
                failed.join(", ")
            )
        } else {
            let first = results
                .iter()
                .find(|r| !r.success)
                .map(|r| r.message.as_str())
                .unwrap_or("Unknown error");
            format!("Failed to save data for any workers. Error: {first}")
        };

        Self {
            total,
            saved,
            summary,
            results,
        }
    }

    pub fn all_saved(&self) -> bool {
        self.saved == self.total
    }
}

/// Save `rows` one at a time, in order. Every row yields exactly one outcome;
/// a failed row never stops the rest and nothing already saved is undone.
///
/// `save` returns the server's message on success.
#[instrument(skip_all, fields(rows = rows.len()))]
pub async fn run_batch<'a, T, F, Fut, E>(rows: &'a [T], mut save: F) -> BatchReport
where
    T: BatchRow,
    F: FnMut(WorkerId, &'a T) -> Fut,
    Fut: Future<Output = Result<Option<String>, E>>,
    E: Display,
{
    let mut results = Vec::with_capacity(rows.len());

    for row in rows {
        let worker = row.worker_name().to_string();

        let Some(id) = row.worker_id() else {
            warn!(worker = %worker, "row has no valid id, skipping update");
            results.push(SaveOutcome {
                worker,
                success: false,
                message: MISSING_ID.to_string(),
            });
            continue;
        };

        match save(id, row).await {
            Ok(message) => {
                debug!(worker_id = id, "worker updated");
                results.push(SaveOutcome {
                    worker,
                    success: true,
                    message: message.unwrap_or_else(|| UPDATED.to_string()),
                });
            }
            Err(e) => {
                warn!(error = %e, worker_id = id, "worker update failed");
                results.push(SaveOutcome {
                    worker,
                    success: false,
                    message: e.to_string(),
                });
            }
        }
    }

    let report = BatchReport::new(results);
    info!(saved = report.saved, total = report.total, "batch save finished");
    report
}
