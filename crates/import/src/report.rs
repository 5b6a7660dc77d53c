use serde::Serialize;

use crate::model::RowOutcome;

/// Tally of one import run. Only counts are kept, never the rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub errors: usize,
    /// Blank filler rows (no code or name). Not part of the operator message.
    pub skipped: usize,
}

impl ImportSummary {
    pub fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Created => self.created += 1,
            RowOutcome::Updated => self.updated += 1,
            RowOutcome::Errored => self.errors += 1,
            RowOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Rows that reached the store (created + updated + errors).
    pub fn processed(&self) -> usize {
        self.created + self.updated + self.errors
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// The single line shown to the operator at the end of a run.
    pub fn message(&self) -> String {
        format!(
            "Process complete. Created: {}, Updated: {}, Errors: {}",
            self.created, self.updated, self.errors
        )
    }
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
