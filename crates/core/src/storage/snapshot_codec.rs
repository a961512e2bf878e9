use chrono::NaiveDateTime;
use log::warn;

use crate::errors::CoreError;
use crate::models::snapshot::Snapshot;

/// Converts snapshots to and from the portable JSON document.
///
/// Document shape:
/// ```text
/// {
///   "cash_balance": 1000000,
///   "notifications": [{ "date": "2025-11-28", "type": "Alert", "message": "..." }],
///   "holdings": [{ "ticker": "VTI", "display_name": "...", "category": "...",
///                  "quantity": 30, "target_ratio": 0.25 }],
///   "transactions": [{ "date": "2025-11-27", "kind": "Income", "category": "...",
///                      "amount": 73985, "status": "Completed" }]
/// }
/// ```
///
/// Dates are ISO-8601 calendar dates. Decimals are written as JSON numbers
/// carrying their exact digits. Unknown fields are ignored on import.
pub struct SnapshotCodec;

impl SnapshotCodec {
    /// Serialize a snapshot to a pretty-printed JSON document.
    pub fn export(snapshot: &Snapshot) -> Result<String, CoreError> {
        serde_json::to_string_pretty(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to export snapshot: {e}")))
    }

    /// Parse and validate a document. Either the whole snapshot is returned
    /// or a `CoreError::Schema` explaining the first problem found.
    pub fn import(document: &str) -> Result<Snapshot, CoreError> {
        let snapshot: Snapshot = serde_json::from_str(document).map_err(|e| {
            warn!("Rejected snapshot document: {e}");
            CoreError::Schema(e.to_string())
        })?;

        snapshot.validate().map_err(|reason| {
            warn!("Rejected snapshot document: {reason}");
            CoreError::Schema(reason)
        })?;

        Ok(snapshot)
    }

    /// Same as `import`, from raw bytes (e.g., an uploaded file).
    pub fn import_bytes(bytes: &[u8]) -> Result<Snapshot, CoreError> {
        let document = std::str::from_utf8(bytes)
            .map_err(|e| CoreError::Schema(format!("Document is not valid UTF-8: {e}")))?;
        Self::import(document)
    }

    /// Suggested download name, e.g. `backup_20251128_0930.json`.
    pub fn backup_file_name(at: NaiveDateTime) -> String {
        format!("backup_{}.json", at.format("%Y%m%d_%H%M"))
    }
}
