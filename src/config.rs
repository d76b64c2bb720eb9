use std::env;
use std::path::PathBuf;

use crate::client::SheetsClient;
use crate::identity::IdentityStore;

/// Placeholder endpoint; hosts point this at their deployed sheets app
/// script, or set `PLAYTEST_SHEETS_URL`.
pub const DEFAULT_SHEETS_URL: &str = "https://script.google.com/macros/s/REPLACE_ME/exec";

/// Host-facing wiring: where to submit, which version tag to stamp on
/// submissions, and where identity prefs live.
#[derive(Debug, Clone)]
pub struct PlaytestConfig {
    pub base_url: String,
    pub version: String,
    /// `None` means the per-user config directory.
    pub storage_dir: Option<PathBuf>,
}

impl PlaytestConfig {
    pub fn new(base_url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            version: version.into(),
            storage_dir: None,
        }
    }

    /// Environment overrides, falling back to the placeholder endpoint and
    /// the crate version.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("PLAYTEST_SHEETS_URL")
                .unwrap_or_else(|_| DEFAULT_SHEETS_URL.to_string()),
            version: env::var("PLAYTEST_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            storage_dir: None,
        }
    }

    pub fn client(&self) -> SheetsClient {
        SheetsClient::new(self.base_url.clone())
    }

    pub fn identity_store(&self) -> IdentityStore {
        match &self.storage_dir {
            Some(dir) => IdentityStore::open(dir),
            None => IdentityStore::open_default(),
        }
    }
}
