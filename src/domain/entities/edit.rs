/// Address of the cell currently being edited in the import editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAddress {
    pub category: String,
    pub row_idx: usize,
    pub header: String,
}
