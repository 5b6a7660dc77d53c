//! `activos-import`: spreadsheet reconciliation import.
//!
//! Pure engine crate: receives pre-read sheet rows and an asset store,
//! upserts records by business code and returns the run tally.
//! No file-format or database dependencies.

pub mod engine;
pub mod error;
pub mod header;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod store;

pub use engine::{run_import, ImportOptions};
pub use error::{ImportError, StoreError};
pub use header::{resolve_header, DuplicateHeaderPolicy};
pub use model::{Asset, Cell, ColumnMap, Field, NormalizedRow, RowOutcome};
pub use normalize::normalize_row;
pub use reconcile::reconcile_row;
pub use report::ImportSummary;
pub use store::{AssetStore, MemoryStore};
