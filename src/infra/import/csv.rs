use std::path::Path;

use csv::ReaderBuilder;

use crate::domain::entities::cell::CellValue;
use crate::infra::import::ImportError;

/// Reads a delimited text file into a raw cell grid. Header handling is done
/// by the shared shaping step, so the reader treats every line as data.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<Vec<CellValue>>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|err| ImportError::Decode(format!("failed to open {}: {err}", path.display())))?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| {
            ImportError::Decode(format!("failed to parse record in {}: {err}", path.display()))
        })?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::text(field)
                }
            })
            .collect();
        grid.push(row);
    }
    Ok(grid)
}
