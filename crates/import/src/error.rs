use std::fmt;

/// Sheet-level failures. Any of these aborts the whole run before a row is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The sheet has no rows at all (no header).
    EmptySheet,
    /// Header row present but `codigo` and/or `nombre` are not mapped.
    MissingRequiredColumns { missing: Vec<&'static str> },
    /// The uploaded document could not be read as a spreadsheet.
    SheetParseFailure(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySheet => write!(f, "the sheet is empty (no header row)"),
            Self::MissingRequiredColumns { missing } => {
                write!(f, "missing required columns: {}", missing.join(", "))
            }
            Self::SheetParseFailure(msg) => write!(f, "cannot read spreadsheet: {msg}"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Failures reported by an asset store. At row level these are recovered and
/// counted; they never abort a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Uniqueness or NOT NULL violation.
    Constraint(String),
    /// Any other backend failure (IO, locked database, malformed value).
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constraint(msg) => write!(f, "constraint violation: {msg}"),
            Self::Backend(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_names_tokens() {
        let err = ImportError::MissingRequiredColumns {
            missing: vec!["codigo", "nombre"],
        };
        assert_eq!(err.to_string(), "missing required columns: codigo, nombre");
    }
}
