use crate::model::{Cell, ColumnMap, NormalizedRow};

/// Extract and trim the mapped fields of one data row.
///
/// Rows may be narrower than the header; out-of-range columns read as absent.
pub fn normalize_row(row: &[Cell], columns: &ColumnMap) -> NormalizedRow {
    let mut normalized = NormalizedRow::default();

    for (field, col) in columns.iter() {
        let value = row
            .get(col)
            .and_then(Cell::to_text)
            .map(|text| text.trim().to_string());
        normalized.set(field, value);
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{resolve_header, DuplicateHeaderPolicy};
    use crate::model::Field;

    fn columns(cells: &[&str]) -> ColumnMap {
        let header: Vec<Cell> = cells.iter().map(|c| Cell::from(*c)).collect();
        resolve_header(&header, DuplicateHeaderPolicy::LastWins).unwrap()
    }

    #[test]
    fn trims_and_maps_values() {
        let cols = columns(&["codigo", "nombre", "nivel"]);
        let row = vec![Cell::from("  A-1 "), Cell::from("Chair\t"), Cell::Int(3)];
        let n = normalize_row(&row, &cols);

        assert_eq!(n.get(Field::Code), Some("A-1"));
        assert_eq!(n.get(Field::Name), Some("Chair"));
        assert_eq!(n.get(Field::Floor), Some("3"));
        assert_eq!(n.get(Field::Building), None);
    }

    #[test]
    fn short_rows_read_as_absent() {
        let cols = columns(&["codigo", "nombre", "edificio", "serie"]);
        let row = vec![Cell::from("A-1"), Cell::from("Chair")];
        let n = normalize_row(&row, &cols);

        assert_eq!(n.get(Field::Building), None);
        assert_eq!(n.get(Field::Serial), None);
        assert!(!n.is_blank_filler());
    }

    #[test]
    fn error_cells_are_absent() {
        let cols = columns(&["codigo", "nombre", "serie"]);
        let row = vec![Cell::Error("#DIV/0!".into()), Cell::from("Chair"), Cell::Error("#N/A".into())];
        let n = normalize_row(&row, &cols);

        assert_eq!(n.get(Field::Code), None);
        assert_eq!(n.get(Field::Serial), None);
        assert!(n.is_blank_filler());
    }

    #[test]
    fn whitespace_only_cells_are_absent() {
        let cols = columns(&["codigo", "nombre"]);
        let row = vec![Cell::from("   "), Cell::from("NoCode")];
        let n = normalize_row(&row, &cols);

        assert_eq!(n.get(Field::Code), None);
        assert!(n.is_blank_filler());
    }

    #[test]
    fn numeric_codes_keep_integer_form() {
        let cols = columns(&["codigo", "nombre"]);
        let row = vec![Cell::Float(1001.0), Cell::from("Desk")];
        assert_eq!(normalize_row(&row, &cols).get(Field::Code), Some("1001"));
    }
}
