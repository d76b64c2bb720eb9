use thiserror::Error;

/// Failure taxonomy for the telemetry pipeline. None of these are allowed to
/// escalate past a log line; the host game keeps running no matter what.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("key {0:?} is not in the playtest variable list")]
    UndeclaredKey(String),

    #[error("identity storage unavailable: {0}")]
    Storage(#[from] std::io::Error),

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
