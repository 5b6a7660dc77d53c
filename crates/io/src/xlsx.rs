// Excel export (xlsx only): blank import template and asset export
//
// Both files use the import header tokens in canonical order, so anything
// written here can be filled in and imported back.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use activos_import::{Asset, Field};

/// Worksheet name used by the template and exports.
pub const SHEET_NAME: &str = "Activos";

/// Example row shipped in the template, one value per canonical field.
pub const TEMPLATE_EXAMPLE: [&str; 7] = [
    "ACT-001",
    "Laptop Dell",
    "Edificio A",
    "Piso 1",
    "Computo",
    "Oficina 1",
    "SN123456",
];

const COLUMN_WIDTH: f64 = 18.0;

/// Write the import template: header row plus one example row.
pub fn write_template(path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_header(sheet).map_err(|e| e.to_string())?;

    for (col, value) in TEMPLATE_EXAMPLE.iter().enumerate() {
        sheet
            .write_string(1, col as u16, *value)
            .map_err(|e| e.to_string())?;
    }

    workbook.save(path).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

/// Export assets, one row each. Absent attributes are written as empty strings.
pub fn export_assets(assets: &[Asset], path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_header(sheet).map_err(|e| e.to_string())?;

    for (idx, asset) in assets.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, field) in Field::ALL.iter().enumerate() {
            sheet
                .write_string(row, col as u16, asset.field(*field).unwrap_or(""))
                .map_err(|e| e.to_string())?;
        }
    }

    log::debug!("exporting {} asset(s) to {}", assets.len(), path.display());
    workbook.save(path).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

fn write_header(sheet: &mut Worksheet) -> Result<(), XlsxError> {
    sheet.set_name(SHEET_NAME)?;
    let bold = Format::new().set_bold();
    for (col, field) in Field::ALL.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, field.header(), &bold)?;
        sheet.set_column_width(col as u16, COLUMN_WIDTH)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use activos_import::Cell;
    use tempfile::tempdir;

    #[test]
    fn template_has_headers_and_example() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plantilla_activos.xlsx");
        write_template(&path).unwrap();

        let rows = crate::sheet::read_rows(&path, Some(SHEET_NAME)).unwrap();
        assert_eq!(rows.len(), 2);
        let header: Vec<Option<String>> = rows[0].iter().map(Cell::to_text).collect();
        assert_eq!(header[0].as_deref(), Some("codigo"));
        assert_eq!(header[6].as_deref(), Some("serie"));
        assert_eq!(rows[1][0], Cell::Text("ACT-001".into()));
    }
}
