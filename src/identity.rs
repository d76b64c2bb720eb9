use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use crate::error::TelemetryError;
use crate::platform::PlatformCapability;
use crate::report;

const PREFS_FILE: &str = "playtester.json";
const ID_KEY: &str = "PlaytesterId";
const EMAIL_KEY: &str = "playtesterEmail";
const UNKNOWN_ID: &str = "unknown";
const MISSING_EMAIL: &str = "Player email Missing";

/// Number of trailing identifier characters submitted as the wire id.
const SHORT_ID_LEN: usize = 12;

/// Durable per-installation identity. The canonical identifier lives in a
/// small JSON prefs file; it is generated exactly once and read back
/// unchanged on every later run while the file is intact.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    /// Store backed by `<dir>/playtester.json`.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(PREFS_FILE),
        }
    }

    /// Store in the per-user config directory.
    pub fn open_default() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("playtest");
        Self::open(dir)
    }

    /// Stable playtester id. The first call ever generates and persists a
    /// fresh guid; storage trouble degrades to the `"unknown"` sentinel
    /// rather than failing the submission flow.
    pub fn get_or_create_identifier(&self) -> String {
        match self.read_or_init_id() {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(error = %err, "identity storage unavailable, using sentinel id");
                UNKNOWN_ID.to_string()
            }
        }
    }

    /// Wire form of the identifier: its last 12 characters, enough to join
    /// submissions without repeating the full guid in every request.
    /// Counts characters, not bytes, so a hand-edited prefs file with a
    /// non-ASCII identifier cannot split a char boundary.
    pub fn short_id(&self) -> String {
        let id = self.get_or_create_identifier();
        let start = id
            .char_indices()
            .rev()
            .nth(SHORT_ID_LEN - 1)
            .map(|(i, _)| i)
            .unwrap_or(0);
        id[start..].to_string()
    }

    /// Optional playtester email. Written by the host's opt-in UI, only ever
    /// read here; absent or unreadable values yield the sentinel text.
    pub fn email(&self) -> String {
        self.load()
            .ok()
            .and_then(|prefs| prefs.get(EMAIL_KEY).cloned())
            .unwrap_or_else(|| MISSING_EMAIL.to_string())
    }

    fn read_or_init_id(&self) -> Result<String, TelemetryError> {
        let mut prefs = self.load()?;
        if let Some(id) = prefs.get(ID_KEY) {
            return Ok(id.clone());
        }
        let id = Uuid::new_v4().to_string();
        prefs.insert(ID_KEY.to_string(), id.clone());
        self.save(&prefs)?;
        Ok(id)
    }

    fn load(&self) -> Result<BTreeMap<String, String>, TelemetryError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, prefs: &BTreeMap<String, String>) -> Result<(), TelemetryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(prefs)?)?;
        Ok(())
    }
}

/// One-time capture of player-facing identity for a session. Value type;
/// never mutated after construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentitySnapshot {
    pub player_email: String,
    pub player_id: String,
    pub persona: String,
    pub platform_id: String,
}

impl IdentitySnapshot {
    pub fn capture(store: &IdentityStore, platform: &dyn PlatformCapability) -> Self {
        Self {
            player_email: store.email(),
            player_id: store.get_or_create_identifier(),
            persona: platform.persona_name().unwrap_or_default(),
            platform_id: platform.platform_id().unwrap_or_default(),
        }
    }

    pub fn to_json(&self) -> Result<String, TelemetryError> {
        report::to_report_json(self)
    }
}
