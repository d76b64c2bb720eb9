use crate::error::TelemetryError;

/// Ordered key/value payload handed to the submission client. Keys keep the
/// position of their first insertion so the produced query string is stable
/// and reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryReport {
    entries: Vec<(String, String)>,
}

impl TelemetryReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert. A repeated key overwrites the value in place rather than
    /// appending a duplicate.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Mutable per-session variable map with a declared-key allow-list. The
/// allow-list keeps ad-hoc writes from silently adding columns to the
/// receiving sheet; internal fields computed at submission time go through
/// the `allow_undeclared` escape hatch instead.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    vars: TelemetryReport,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared keys are present from the start with empty values, so every
    /// expected field appears in a submission even when nothing wrote to it.
    pub fn with_declared_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vars = TelemetryReport::new();
        for key in keys {
            vars.insert(key, "");
        }
        Self { vars }
    }

    /// Writes `value` at `key`. An undeclared key without the escape flag is
    /// rejected: the registry is left unchanged and the caller gets
    /// [`TelemetryError::UndeclaredKey`] back to inspect or drop.
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<String>,
        allow_undeclared: bool,
    ) -> Result<(), TelemetryError> {
        if !self.vars.contains_key(key) && !allow_undeclared {
            tracing::warn!(key, "key is not in the playtest variable list; declare it first");
            return Err(TelemetryError::UndeclaredKey(key.to_string()));
        }
        self.vars.insert(key, value);
        Ok(())
    }

    /// Lenient read: missing keys yield an empty string, never an error.
    pub fn get(&self, key: &str) -> &str {
        self.vars.get(key).unwrap_or("")
    }

    /// Value-type copy of the current state for a submission.
    pub fn snapshot(&self) -> TelemetryReport {
        self.vars.clone()
    }
}
