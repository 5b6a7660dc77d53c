use chrono::NaiveDateTime;

use crate::error::ImportError;
use crate::header::{resolve_header, DuplicateHeaderPolicy};
use crate::model::{Cell, Field, RowOutcome};
use crate::normalize::normalize_row;
use crate::reconcile::reconcile_row;
use crate::report::ImportSummary;
use crate::store::AssetStore;

/// Knobs for a single import run.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub duplicate_headers: DuplicateHeaderPolicy,
    /// Timestamp written to `updated_at`; defaults to local now.
    pub now: Option<NaiveDateTime>,
}

/// Run one import over pre-read sheet rows (first row = header).
///
/// Returns `Err` only for sheet-level failures, which happen before any store
/// access. Row failures are logged, counted, and the loop moves on; there is
/// no batch-wide transaction.
pub fn run_import<S: AssetStore + ?Sized>(
    rows: &[Vec<Cell>],
    store: &mut S,
    options: &ImportOptions,
) -> Result<ImportSummary, ImportError> {
    let Some((header, data)) = rows.split_first() else {
        return Err(ImportError::EmptySheet);
    };

    let columns = resolve_header(header, options.duplicate_headers)?;
    let now = options
        .now
        .unwrap_or_else(|| chrono::Local::now().naive_local());

    log::info!("importing {} data row(s)", data.len());

    let mut summary = ImportSummary::default();

    for (idx, row) in data.iter().enumerate() {
        // 1-based sheet row number, header is row 1
        let sheet_row = idx + 2;
        let normalized = normalize_row(row, &columns);

        if normalized.is_blank_filler() {
            log::debug!("row {sheet_row}: skipped (no codigo or nombre)");
            summary.record(RowOutcome::Skipped);
            continue;
        }

        let outcome = match reconcile_row(store, &normalized, now) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!(
                    "row {sheet_row} (codigo '{}'): {e}",
                    normalized.get(Field::Code).unwrap_or_default()
                );
                RowOutcome::Errored
            }
        };
        log::debug!("row {sheet_row}: {outcome}");
        summary.record(outcome);
    }

    log::info!("{}", summary.message());
    Ok(summary)
}
