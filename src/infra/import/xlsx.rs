use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::domain::entities::cell::CellValue;
use crate::infra::import::ImportError;

/// Reads the first worksheet of a workbook into a raw cell grid. Every other
/// sheet is ignored.
pub fn read_first_sheet(path: &Path) -> Result<Vec<Vec<CellValue>>, ImportError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|err| ImportError::Decode(format!("failed to open {}: {err}", path.display())))?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(ImportError::EmptySheet);
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|err| {
        ImportError::Decode(format!("failed to read sheet {sheet_name}: {err}"))
    })?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect())
}

fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(v) => CellValue::text(v),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => CellValue::text(v.to_string()),
        Data::DateTimeIso(v) => CellValue::text(v.to_string()),
        Data::DurationIso(v) => CellValue::text(v.to_string()),
        Data::Error(v) => CellValue::text(format!("{v:?}")),
        Data::Empty => CellValue::Empty,
    }
}
