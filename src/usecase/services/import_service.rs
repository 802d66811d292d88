use std::path::Path;

use crate::domain::entities::category::CategoryStore;
use crate::infra::import::{parse_table, ImportError};

/// One import session: the decoded file, categorized, plus the name shown in
/// the editor header. Owned exclusively by the import UI and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSession {
    pub file_name: String,
    pub store: CategoryStore,
}

pub struct ImportService;

impl ImportService {
    pub fn new() -> Self {
        Self
    }

    /// Parses the picked file and buckets its rows. On failure the caller
    /// stays in the pre-import state; decode causes go to the diagnostic
    /// channel here so the UI only deals with the display form.
    pub fn import_file(&self, path: &Path) -> Result<ImportSession, ImportError> {
        let table = parse_table(path).map_err(|err| {
            if let ImportError::Decode(cause) = &err {
                tracing::warn!(target: "bizstack::import", path = %path.display(), %cause, "import decode failed");
            }
            err
        })?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();

        tracing::info!(
            target: "bizstack::import",
            file = %file_name,
            headers = table.headers.len(),
            rows = table.rows.len(),
            "imported tabular file"
        );

        Ok(ImportSession {
            file_name,
            store: CategoryStore::categorize(&table),
        })
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new()
    }
}
