// Sheet reading: one rectangular sheet as rows of cells, first row = header

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use activos_import::Cell;

/// Extensions routed to the delimited-text reader; everything else goes to calamine.
const DELIMITED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Read one sheet of a spreadsheet document (xlsx, xls, xlsb, ods, csv, tsv).
///
/// For workbooks, `sheet_name` selects the worksheet; the first one is used
/// when it is `None`. Column positions are absolute: a range that starts at
/// C3 yields two leading empty rows and two leading empty cells per row.
pub fn read_rows(path: &Path, sheet_name: Option<&str>) -> Result<Vec<Vec<Cell>>, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if DELIMITED_EXTENSIONS.contains(&ext.as_str()) {
        return crate::csv::read_rows(path);
    }

    read_workbook_rows(path, sheet_name)
}

fn read_workbook_rows(path: &Path, sheet_name: Option<&str>) -> Result<Vec<Vec<Cell>>, String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open spreadsheet: {}", e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let name = match sheet_name {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| format!("Sheet '{}' not found (available: {})", wanted, sheet_names.join(", ")))?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| "Spreadsheet contains no sheets".to_string())?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", name, e))?;

    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return Ok(Vec::new());
    }

    // Range start offset (data may not begin at A1)
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    log::debug!(
        "sheet '{}': {}x{} starting at row {} col {}",
        name, height, width, start_row, start_col
    );

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }

    Ok(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Float(*n),
        Data::Int(n) => Cell::Int(*n),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(e) => Cell::Error(e.to_string()),
        Data::DateTime(dt) => match serial_to_datetime(dt.as_f64()) {
            Some(value) => Cell::DateTime(value),
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso(s).map(Cell::DateTime).unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Excel serial (days since 1899-12-30, 1900 date system) to a timestamp.
/// Rounded to the millisecond to absorb float noise.
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
