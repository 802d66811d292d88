use crate::domain::entities::category::CategoryStore;
use crate::domain::entities::cell::CellValue;

const TOP_STOCK_LIMIT: usize = 10;
const NAME_TRUNCATE: usize = 15;

/// Display-only aggregates over the category store.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySummary {
    pub categories: Vec<CategorySummary>,
    pub top_stock: Vec<StockItem>,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub name: String,
    pub item_count: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    pub name: String,
    pub stock: f64,
    pub category: String,
}

/// Computes per-category counts and monetary totals plus the top stocked
/// items across all categories. Never mutates the store.
pub fn summarize(store: &CategoryStore) -> InventorySummary {
    let headers = store.headers();
    let price_col = resolve_field(headers, "PRICE");
    let stock_col = resolve_field(headers, "STOCK");
    let name_col = resolve_field(headers, "ITEM_NAME");

    let mut categories = Vec::new();
    let mut stock_items = Vec::new();

    for bucket in store.buckets() {
        let mut total_value = 0.0;
        for row in &bucket.rows {
            let price = numeric_field(row, price_col);
            let stock = numeric_field(row, stock_col);
            total_value += price * stock;

            if stock > 0.0 {
                let name = name_col
                    .and_then(|idx| row.get(idx))
                    .filter(|cell| !cell.is_blank())
                    .map(|cell| cell.to_string())
                    .unwrap_or_else(|| "Unknown".to_string());
                stock_items.push(StockItem {
                    name: truncate_name(&name),
                    stock,
                    category: bucket.name.clone(),
                });
            }
        }
        categories.push(CategorySummary {
            name: bucket.name.clone(),
            item_count: bucket.rows.len(),
            total_value,
        });
    }

    // Stable sort keeps encounter order for equal stock levels.
    stock_items.sort_by(|a, b| {
        b.stock
            .partial_cmp(&a.stock)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stock_items.truncate(TOP_STOCK_LIMIT);

    let total_value = categories.iter().map(|summary| summary.total_value).sum();

    InventorySummary {
        categories,
        top_stock: stock_items,
        total_value,
    }
}

/// Field resolution used by the uploads we see in practice: the exact
/// upper-case name first, then any case-insensitive match.
fn resolve_field(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .or_else(|| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
        })
}

fn numeric_field(row: &[CellValue], col: Option<usize>) -> f64 {
    col.and_then(|idx| row.get(idx))
        .and_then(CellValue::as_number)
        .unwrap_or(0.0)
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_TRUNCATE {
        let short: String = name.chars().take(NAME_TRUNCATE).collect();
        format!("{short}...")
    } else {
        name.to_string()
    }
}
