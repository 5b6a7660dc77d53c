//! CLI Exit Code Registry
//!
//! Single source of truth for `activos` exit codes. Scripts that drive
//! bulk imports branch on these, so a code never changes meaning.
//!
//! | Code | Trigger                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Success (an import with row errors still exits 0)        |
//! | 1    | General error (unspecified)                              |
//! | 2    | Usage error (bad arguments, unsupported output format)   |
//! | 3    | Sheet has no rows                                        |
//! | 4    | Header lacks `codigo` and/or `nombre`                    |
//! | 5    | Input could not be read as a spreadsheet                 |
//! | 6    | Database could not be opened or queried                  |
//! | 7    | Output file (template, export) could not be written      |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant with the next free number
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `CliError`

use activos_import::ImportError;

/// Success - command completed. Row-level import errors are reported in the
/// summary, not through the exit code.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// The sheet has no rows at all, not even a header.
pub const EXIT_EMPTY_SHEET: u8 = 3;

/// Header row present but a required column (`codigo`, `nombre`) is missing.
pub const EXIT_MISSING_COLUMNS: u8 = 4;

/// Input file missing, unreadable, or not a spreadsheet.
pub const EXIT_SHEET_PARSE: u8 = 5;

/// Database open, schema creation or listing query failed.
pub const EXIT_STORE: u8 = 6;

/// Template or export file could not be written.
pub const EXIT_WRITE: u8 = 7;

/// Map a sheet-level import failure to its exit code.
pub fn import_exit_code(err: &ImportError) -> u8 {
    match err {
        ImportError::EmptySheet => EXIT_EMPTY_SHEET,
        ImportError::MissingRequiredColumns { .. } => EXIT_MISSING_COLUMNS,
        ImportError::SheetParseFailure(_) => EXIT_SHEET_PARSE,
    }
}
