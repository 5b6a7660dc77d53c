use serde::Deserialize;

use crate::error::ImportError;
use crate::model::{Cell, ColumnMap, Field};

/// Which column wins when a header token appears more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DuplicateHeaderPolicy {
    /// Rightmost occurrence is authoritative.
    #[default]
    #[serde(rename = "last", alias = "lastwins")]
    LastWins,
    /// Leftmost occurrence is authoritative.
    #[serde(rename = "first", alias = "firstwins")]
    FirstWins,
}

/// Build the column map from the header row.
///
/// Cells are matched after trimming and lower-casing, so `" Codigo "` maps
/// `code`. Unknown headers are ignored. Fails when `codigo` or `nombre` is absent.
pub fn resolve_header(
    header: &[Cell],
    policy: DuplicateHeaderPolicy,
) -> Result<ColumnMap, ImportError> {
    let mut map = ColumnMap::default();

    for (idx, cell) in header.iter().enumerate() {
        let Some(text) = cell.to_text() else { continue };
        let token = text.trim().to_lowercase();
        let Some(field) = Field::from_header(&token) else { continue };

        if map.contains(field) {
            if policy == DuplicateHeaderPolicy::FirstWins {
                log::debug!("header '{token}' repeated at column {idx}, keeping first");
                continue;
            }
            log::debug!("header '{token}' repeated at column {idx}, keeping last");
        }
        map.set(field, idx);
    }

    let missing: Vec<&'static str> = Field::REQUIRED
        .iter()
        .filter(|f| !map.contains(**f))
        .map(|f| f.header())
        .collect();

    if !missing.is_empty() {
        return Err(ImportError::MissingRequiredColumns { missing });
    }

    Ok(map)
}
