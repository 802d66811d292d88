use crate::domain::entities::cell::CellValue;

/// The shaped output of the tabular parser: a unique, ordered header list and
/// data rows aligned positionally against it. Every row has exactly
/// `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}
