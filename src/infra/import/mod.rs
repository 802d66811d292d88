use std::collections::HashSet;
use std::path::Path;

use rand::Rng;

use crate::domain::entities::cell::CellValue;
use crate::domain::entities::table::SheetTable;

pub mod csv;
pub mod xlsx;

/// The two user-visible ways an import can fail. Decode causes carry the
/// underlying message for the diagnostic channel; the UI only shows the
/// human-readable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    EmptySheet,
    Decode(String),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::EmptySheet => write!(f, "empty file: no data rows found"),
            ImportError::Decode(_) => {
                write!(f, "could not read file: not a valid Excel/CSV/TSV file")
            }
        }
    }
}

impl std::error::Error for ImportError {}

/// Decodes a spreadsheet-like file into headers plus rows. Delimited text
/// goes through the csv reader, everything else through calamine. Only the
/// first sheet of a workbook is read.
pub fn parse_table(path: &Path) -> Result<SheetTable, ImportError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let raw = match ext.as_str() {
        "csv" => csv::read_delimited(path, b',')?,
        "tsv" | "txt" => csv::read_delimited(path, b'\t')?,
        _ => xlsx::read_first_sheet(path)?,
    };

    shape_table(raw)
}

/// Turns a raw cell grid into a `SheetTable`: row 0 becomes the header row
/// (trimmed; blank or repeated names get generated placeholders, so headers
/// are unique), fully-blank data rows are dropped, and short rows are padded
/// to the header width.
pub(crate) fn shape_table(raw: Vec<Vec<CellValue>>) -> Result<SheetTable, ImportError> {
    let mut grid = raw.into_iter();
    let Some(header_row) = grid.next() else {
        return Err(ImportError::EmptySheet);
    };

    let mut seen = HashSet::new();
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| {
            let trimmed = cell.to_string().trim().to_string();
            let mut name = if trimmed.is_empty() {
                placeholder_header()
            } else {
                trimmed
            };
            while !seen.insert(name.clone()) {
                name = placeholder_header();
            }
            name
        })
        .collect();

    let rows: Vec<Vec<CellValue>> = grid
        .filter(|row| row.iter().any(|cell| !cell.is_blank()))
        .map(|mut row| {
            row.truncate(headers.len());
            row.resize(headers.len(), CellValue::Empty);
            row
        })
        .collect();

    if rows.is_empty() {
        return Err(ImportError::EmptySheet);
    }

    Ok(SheetTable { headers, rows })
}

/// Placeholder for a blank header cell: `Column` plus five random lowercase
/// alphanumerics, unique enough within one file.
fn placeholder_header() -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..5)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("Column{suffix}")
}
