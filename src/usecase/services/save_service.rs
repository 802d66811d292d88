use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::entities::category::CategoryStore;
use crate::usecase::ports::save::{InventorySink, SaveError, SavePayload, SaveReceipt, SavedCategory};

pub struct SaveService {
    sink: Arc<dyn InventorySink>,
}

impl SaveService {
    pub fn new(sink: Arc<dyn InventorySink>) -> Self {
        Self { sink }
    }

    /// Serializes the store into the nested list-of-categories shape and
    /// hands it to the sink. Fire once, no retries: a failure is terminal for
    /// this attempt and the session stays editable.
    pub fn save_inventory(&self, store: &CategoryStore) -> Result<SaveReceipt, SaveError> {
        self.sink.submit(&build_payload(store))
    }
}

/// Pure store-to-payload conversion. Items are header-keyed maps in header
/// order; bucket order is the store's encounter order.
pub fn build_payload(store: &CategoryStore) -> SavePayload {
    let categories = store
        .buckets()
        .iter()
        .map(|bucket| SavedCategory {
            name: bucket.name.clone(),
            items: bucket
                .rows
                .iter()
                .map(|row| {
                    let mut item = Map::new();
                    for (header, cell) in store.headers().iter().zip(row) {
                        let value =
                            serde_json::to_value(cell).unwrap_or(Value::Null);
                        item.insert(header.clone(), value);
                    }
                    item
                })
                .collect(),
        })
        .collect();
    SavePayload { categories }
}
