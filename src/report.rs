use serde::Serialize;

use crate::error::TelemetryError;

/// Serializes a snapshot record to the JSON text stored in a single sheet
/// cell. Fields serialize in declaration order and empty fields are kept, so
/// the receiving side always sees the full shape.
pub fn to_report_json<T: Serialize>(record: &T) -> Result<String, TelemetryError> {
    Ok(serde_json::to_string(record)?)
}

/// Submit-path variant: a record that fails to serialize must not abort the
/// session, so the failure is logged and the cell goes out empty.
pub fn to_report_json_or_empty<T: Serialize>(record: &T) -> String {
    match to_report_json(record) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!(error = %err, "snapshot serialization failed");
            String::new()
        }
    }
}
