use chrono::Local;

use crate::usecase::ports::save::{InventorySink, SaveError, SavePayload, SaveReceipt};

/// Sink that only emits the payload on the diagnostic channel. Stands in for
/// the backend upload until one exists.
pub struct LogSink;

impl InventorySink for LogSink {
    fn submit(&self, payload: &SavePayload) -> Result<SaveReceipt, SaveError> {
        let body = serde_json::to_string(payload)
            .map_err(|err| SaveError::Serialize(err.to_string()))?;

        let categories = payload.categories.len();
        let items = payload
            .categories
            .iter()
            .map(|category| category.items.len())
            .sum();

        tracing::info!(
            target: "bizstack::save",
            categories,
            items,
            payload = %body,
            "inventory save requested"
        );

        Ok(SaveReceipt {
            categories,
            items,
            saved_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }
}
