use serde::Serialize;
use serde_json::{Map, Value};

/// Outbound save payload: the category store serialized as a nested
/// list-of-categories structure. Items keep their header-keyed shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavePayload {
    pub categories: Vec<SavedCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedCategory {
    pub name: String,
    pub items: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    Serialize(String),
    Transport(String),
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Serialize(message) => write!(f, "failed to serialize payload: {message}"),
            SaveError::Transport(message) => write!(f, "failed to deliver payload: {message}"),
        }
    }
}

impl std::error::Error for SaveError {}

/// Acknowledgment returned by a sink on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub categories: usize,
    pub items: usize,
    pub saved_at: String,
}

/// Where a finished import session goes. The shipped implementation only
/// logs the payload; a real backend client slots in behind this trait.
pub trait InventorySink: Send + Sync {
    fn submit(&self, payload: &SavePayload) -> Result<SaveReceipt, SaveError>;
}
