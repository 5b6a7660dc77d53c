// CSV/TSV reading and asset export

use std::io::Read;
use std::path::Path;

use activos_import::{Asset, Cell, Field};

/// Read a delimited file as rows of cells. The delimiter is sniffed.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<Cell>>, String> {
    let content = read_file_as_utf8(path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let delimiter = sniff_delimiter(content);
    rows_from_string(content, delimiter)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Higher field count breaks ties
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Excel-exported CSVs on Windows are usually cp1252
            log::debug!("{} is not UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn rows_from_string(content: &str, delimiter: u8) -> Result<Vec<Vec<Cell>>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(Cell::from).collect());
    }
    Ok(rows)
}

/// Write assets as CSV with the import header tokens, so the file can be
/// re-imported unchanged.
pub fn export_assets(assets: &[Asset], path: &Path) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| e.to_string())?;

    writer
        .write_record(Field::ALL.iter().map(|f| f.header()))
        .map_err(|e| e.to_string())?;

    for asset in assets {
        writer
            .write_record(Field::ALL.iter().map(|f| asset.field(*f).unwrap_or("")))
            .map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}
