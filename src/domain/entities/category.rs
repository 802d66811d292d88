use std::collections::BTreeMap;

use crate::domain::entities::cell::CellValue;
use crate::domain::entities::table::SheetTable;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

/// The single source of truth for one import session: every bucket mutation
/// goes through the methods below, and the view layer only ever reads
/// snapshots. Rows are positional against the shared header list, so all rows
/// share one key set by construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryStore {
    headers: Vec<String>,
    buckets: Vec<CategoryBucket>,
}

impl CategoryStore {
    /// Groups parsed rows into buckets keyed by the category column. Buckets
    /// appear in encounter order; rows keep input order within a bucket.
    pub fn categorize(table: &SheetTable) -> CategoryStore {
        let mut store = CategoryStore {
            headers: table.headers.clone(),
            buckets: Vec::new(),
        };
        let category_col = store.category_column();
        for row in &table.rows {
            let name = category_col
                .and_then(|idx| row.get(idx))
                .filter(|value| !value.is_blank())
                .map(|value| value.to_string())
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            store.bucket_entry(&name).rows.push(row.clone());
        }
        store
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn buckets(&self) -> &[CategoryBucket] {
        &self.buckets
    }

    pub fn bucket(&self, name: &str) -> Option<&CategoryBucket> {
        self.buckets.iter().find(|bucket| bucket.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.rows.len()).sum()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|name| name == header)
    }

    /// First header containing "category" (case-insensitive), falling back to
    /// the literal `Category`, which may not exist in this import.
    pub fn category_column(&self) -> Option<usize> {
        self.headers
            .iter()
            .position(|name| name.to_lowercase().contains("category"))
            .or_else(|| self.column_index("Category"))
    }

    /// Same resolution rule for the variant column.
    pub fn variant_column(&self) -> Option<usize> {
        self.headers
            .iter()
            .position(|name| name.to_lowercase().contains("variant"))
            .or_else(|| self.column_index("Variant"))
    }

    /// Renames a header in place. Rows are positional, so no per-row copying
    /// is needed; callers holding a name-keyed visibility map remap it with
    /// [`remap_visibility`]. Blank, unchanged, and already-used names are
    /// refused: headers stay unique, the addressing key for every cell
    /// operation. Returns whether anything changed.
    pub fn rename_header(&mut self, old: &str, new: &str) -> bool {
        let new = new.trim();
        if new.is_empty() || old == new || self.column_index(new).is_some() {
            return false;
        }
        match self.column_index(old) {
            Some(idx) => {
                self.headers[idx] = new.to_string();
                true
            }
            None => false,
        }
    }

    /// Replaces one cell. Silently ignored when the bucket, row, or header no
    /// longer exists.
    pub fn edit_cell(&mut self, category: &str, row_idx: usize, header: &str, value: CellValue) {
        let Some(col_idx) = self.column_index(header) else {
            return;
        };
        let Some(bucket) = self.bucket_mut(category) else {
            return;
        };
        if let Some(cell) = bucket.rows.get_mut(row_idx).and_then(|row| row.get_mut(col_idx)) {
            *cell = value;
        }
    }

    /// Appends an all-empty row with the category column forced to the bucket
    /// name. Creates the bucket when absent.
    pub fn add_row(&mut self, category: &str) {
        let mut row = vec![CellValue::Empty; self.headers.len()];
        if let Some(idx) = self.category_column() {
            row[idx] = CellValue::text(category);
        }
        self.bucket_entry(category).rows.push(row);
    }

    /// Duplicates the row at `row_idx`, clears its variant column, and inserts
    /// the copy immediately after the original.
    pub fn add_variant_row(&mut self, category: &str, row_idx: usize) {
        let variant_col = self.variant_column();
        let Some(bucket) = self.bucket_mut(category) else {
            return;
        };
        let Some(base) = bucket.rows.get(row_idx) else {
            return;
        };
        let mut variant = base.clone();
        if let Some(idx) = variant_col {
            variant[idx] = CellValue::Empty;
        }
        bucket.rows.insert(row_idx + 1, variant);
    }

    /// Deletes one row; a bucket that becomes empty is dropped with it.
    pub fn remove_row(&mut self, category: &str, row_idx: usize) {
        let Some(bucket) = self.bucket_mut(category) else {
            return;
        };
        if row_idx >= bucket.rows.len() {
            return;
        }
        bucket.rows.remove(row_idx);
        if bucket.rows.is_empty() {
            self.buckets.retain(|bucket| bucket.name != category);
        }
    }

    pub fn remove_category(&mut self, name: &str) {
        self.buckets.retain(|bucket| bucket.name != name);
    }

    /// Creates an empty bucket. Blank names are refused, and so are names
    /// already in use: replacing an existing bucket would silently discard its
    /// rows. Returns whether the bucket was created.
    pub fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.bucket(name).is_some() {
            return false;
        }
        self.buckets.push(CategoryBucket {
            name: name.to_string(),
            rows: Vec::new(),
        });
        true
    }

    /// Flips a boolean flag field. `true` becomes `false`; any other value is
    /// treated as `false` and toggles to `true`.
    pub fn toggle_flag(&mut self, category: &str, row_idx: usize, header: &str) {
        let Some(col_idx) = self.column_index(header) else {
            return;
        };
        let Some(bucket) = self.bucket_mut(category) else {
            return;
        };
        if let Some(cell) = bucket.rows.get_mut(row_idx).and_then(|row| row.get_mut(col_idx)) {
            *cell = CellValue::Bool(!cell.is_true());
        }
    }

    /// Display-only snapshot: case-insensitive substring search over every
    /// field, then an optional restriction to one category. The restriction
    /// applies to the already-filtered store, so a category whose rows all
    /// filtered away yields an empty result.
    pub fn filtered(&self, search: &str, active_category: Option<&str>) -> CategoryStore {
        let mut filtered = if search.is_empty() {
            self.clone()
        } else {
            let needle = search.to_lowercase();
            let buckets = self
                .buckets
                .iter()
                .filter_map(|bucket| {
                    let rows: Vec<Vec<CellValue>> = bucket
                        .rows
                        .iter()
                        .filter(|row| {
                            row.iter()
                                .any(|cell| cell.to_string().to_lowercase().contains(&needle))
                        })
                        .cloned()
                        .collect();
                    if rows.is_empty() {
                        None
                    } else {
                        Some(CategoryBucket {
                            name: bucket.name.clone(),
                            rows,
                        })
                    }
                })
                .collect();
            CategoryStore {
                headers: self.headers.clone(),
                buckets,
            }
        };
        if let Some(active) = active_category {
            filtered.buckets.retain(|bucket| bucket.name == active);
        }
        filtered
    }

    fn bucket_mut(&mut self, name: &str) -> Option<&mut CategoryBucket> {
        self.buckets.iter_mut().find(|bucket| bucket.name == name)
    }

    fn bucket_entry(&mut self, name: &str) -> &mut CategoryBucket {
        if let Some(idx) = self.buckets.iter().position(|bucket| bucket.name == name) {
            return &mut self.buckets[idx];
        }
        self.buckets.push(CategoryBucket {
            name: name.to_string(),
            rows: Vec::new(),
        });
        self.buckets
            .last_mut()
            .expect("bucket was pushed on the line above")
    }
}

/// Keeps a name-keyed column-visibility map in step with a header rename.
pub fn remap_visibility(visibility: &mut BTreeMap<String, bool>, old: &str, new: &str) {
    if old == new {
        return;
    }
    let visible = visibility.remove(old).unwrap_or(true);
    visibility.insert(new.to_string(), visible);
}

/// Default visibility for a fresh import: every header shown.
pub fn initial_visibility(headers: &[String]) -> BTreeMap<String, bool> {
    headers
        .iter()
        .map(|header| (header.clone(), true))
        .collect()
}
